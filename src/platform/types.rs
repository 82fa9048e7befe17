use crate::error::PlatformError;
use crate::geometry::{Point, Size};

/// Process identifier of a running application.
pub type Pid = i32;

/// Low-level window-server identifier, resolved from an accessibility
/// window handle.
pub type WindowId = u32;

/// The element an event interest is registered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element<W> {
    /// The application element of the subscribed process.
    Application,
    /// A specific window of the subscribed process.
    Window(W),
}

/// Event kinds an interest can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    FocusedWindowChanged,
    Moved,
    Resized,
    Miniaturized,
}

/// A normalized window-system event, delivered by the host on the main
/// event-loop thread in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowSystemEvent<W> {
    /// The frontmost application changed.
    ApplicationActivated(Pid),
    /// The tracked application's focused window changed to this handle.
    FocusedWindowChanged(W),
    /// The focused window moved.
    Moved,
    /// The focused window was resized.
    Resized,
    /// The focused window was minimized.
    Miniaturized,
}

/// Everything the observer needs from the host window system: accessibility
/// queries, the application-activation notifier, the event-subscription
/// service, screen enumeration, and the optional corner-radius capability.
///
/// On macOS this seam maps to `AXUIElement` queries, an `AXObserver` per
/// subscription, `NSWorkspace` activation notifications and the private
/// SkyLight corner-radius query. Implementations of the optional capability
/// must probe for its availability once at startup and answer `None` from
/// then on when it is absent, never re-probe per call.
///
/// All methods are called from one thread (the host's main event loop);
/// implementations need no internal locking on the observer's account.
pub trait WindowSystem {
    /// Opaque handle to a window of the tracked process.
    type Window: Clone + PartialEq;
    /// A live event subscription scoped to one process.
    type Subscription;

    // Accessibility queries. All of these answer `None` on any failure
    // (stale handle, denied attribute, no such window).

    /// Pid of the current frontmost application, if any.
    fn frontmost_application(&self) -> Option<Pid>;

    /// The window of `pid` that currently has keyboard focus.
    fn focused_window(&self, pid: Pid) -> Option<Self::Window>;

    /// Window position in top-left-origin coordinates (Y grows downward).
    fn window_position(&self, window: &Self::Window) -> Option<Point>;

    fn window_size(&self, window: &Self::Window) -> Option<Size>;

    // Application-activation notifier. Once observing, every foreground
    // switch must be delivered as `WindowSystemEvent::ApplicationActivated`.

    fn observe_activations(&mut self) -> Result<(), PlatformError>;

    fn stop_observing_activations(&mut self);

    // Event-subscription service.

    /// Create a fresh subscription scoped to `pid`. At most one subscription
    /// per observer is ever live; the observer detaches the old one first.
    fn subscribe(&mut self, pid: Pid) -> Result<Self::Subscription, PlatformError>;

    fn add_interest(
        &mut self,
        subscription: &mut Self::Subscription,
        element: Element<Self::Window>,
        kind: EventKind,
    );

    fn remove_interest(
        &mut self,
        subscription: &mut Self::Subscription,
        element: Element<Self::Window>,
        kind: EventKind,
    );

    /// Attach the subscription's event source to the main event loop so its
    /// callbacks are delivered on that thread.
    fn attach_to_main_loop(&mut self, subscription: &mut Self::Subscription);

    /// Synchronously tear down the subscription, releasing every interest
    /// still registered on it. Must complete before `subscribe` is called
    /// again; two subscriptions are never concurrently live.
    fn detach(&mut self, subscription: Self::Subscription);

    // Screen enumeration.

    /// Height of the primary screen (first entry of the current screen
    /// list), which defines the global coordinate space. `0.0` when no
    /// screens are enumerable.
    fn primary_screen_height(&self) -> f64;

    // Optional corner-radius capability.

    /// Resolve the low-level window-server id for an accessibility handle.
    fn window_id(&self, window: &Self::Window) -> Option<WindowId>;

    /// The window server's rounded-corner radii for a window. `None` when
    /// the capability is unavailable on this platform version or the lookup
    /// misses.
    fn corner_radii(&self, window_id: WindowId) -> Option<Vec<i32>>;
}

//! Focus tracking: one live subscription that follows the frontmost
//! application and its focused window across app switches, window switches,
//! moves, resizes and minimization.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::constants::FALLBACK_CORNER_RADIUS;
use crate::error::PlatformError;
use crate::geometry::Rect;
use crate::platform::{Element, EventKind, Pid, WindowSystem, WindowSystemEvent};

/// The three per-window interests that follow the focused window handle.
const WINDOW_EVENT_KINDS: [EventKind; 3] =
    [EventKind::Moved, EventKind::Resized, EventKind::Miniaturized];

/// Immutable snapshot of the focused window, produced fresh on every event.
///
/// `rect` is in global screen coordinates, bottom-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusedWindowInfo {
    pub rect: Rect,
    pub corner_radius: f64,
}

type Listener = Box<dyn FnMut(Option<FocusedWindowInfo>)>;

/// Bookkeeping for the application currently being tracked. At most one
/// subscription is ever live; replacing the tracked application tears the
/// old one down before anything new is created.
struct Tracked<S: WindowSystem> {
    pid: Pid,
    focused: Option<S::Window>,
    subscription: Option<S::Subscription>,
}

/// Tracks the focused window of the frontmost application and publishes a
/// fresh [`FocusedWindowInfo`] (or `None`) on every change.
///
/// Single-threaded by contract: the host must call [`start`] and
/// [`handle_event`] on its main event-loop thread, the same thread the
/// [`WindowSystem`] delivers events on. No locking happens here.
///
/// Accessibility permission is the host's concern; it must gate before
/// constructing the observer.
///
/// [`start`]: WindowObserver::start
/// [`handle_event`]: WindowObserver::handle_event
pub struct WindowObserver<S: WindowSystem> {
    system: S,
    listener: Option<Listener>,
    tracked: Option<Tracked<S>>,
    started: bool,
}

impl<S: WindowSystem> WindowObserver<S> {
    pub fn new(system: S) -> Self {
        Self {
            system,
            listener: None,
            tracked: None,
            started: false,
        }
    }

    /// Register the callback that receives every focus snapshot. `None`
    /// means "no focused window" (none exists, it was minimized, or its
    /// geometry could not be read); the host should dim everything.
    pub fn on_focused_window_changed(
        &mut self,
        listener: impl FnMut(Option<FocusedWindowInfo>) + 'static,
    ) {
        self.listener = Some(Box::new(listener));
    }

    /// Begin tracking: register for application activations, then track the
    /// current frontmost application if there is one. Idempotent.
    pub fn start(&mut self) -> Result<(), PlatformError> {
        if self.started {
            return Ok(());
        }
        self.system.observe_activations()?;
        self.started = true;

        if let Some(pid) = self.system.frontmost_application() {
            self.track_application(pid);
        }
        Ok(())
    }

    /// Feed one window-system event to the observer. Events must arrive on
    /// the main event-loop thread in emission order; each one is handled
    /// fully (no coalescing of rapid move/resize bursts).
    pub fn handle_event(&mut self, event: WindowSystemEvent<S::Window>) {
        match event {
            WindowSystemEvent::ApplicationActivated(pid) => self.track_application(pid),
            WindowSystemEvent::FocusedWindowChanged(window) => self.retarget_window(window),
            WindowSystemEvent::Moved | WindowSystemEvent::Resized => self.publish(),
            // Minimized: report no focus but keep the handle and its
            // interests, the window will come back.
            WindowSystemEvent::Miniaturized => self.emit(None),
        }
    }

    /// Switch tracking to a newly activated application. The old
    /// subscription (and every interest on it) is released synchronously
    /// before any new registration happens.
    fn track_application(&mut self, pid: Pid) {
        self.teardown_tracked();
        debug!("tracking application {pid}");

        let focused = self.system.focused_window(pid);
        self.tracked = Some(Tracked {
            pid,
            focused: focused.clone(),
            subscription: None,
        });

        if focused.is_some() {
            self.publish();
        } else {
            self.emit(None);
        }

        let mut subscription = match self.system.subscribe(pid) {
            Ok(subscription) => subscription,
            Err(err) => {
                // Degrade: the snapshot above was still published, we just
                // won't hear about changes until the next activation.
                warn!("window event subscription failed: {err}");
                return;
            }
        };

        self.system.add_interest(
            &mut subscription,
            Element::Application,
            EventKind::FocusedWindowChanged,
        );
        if let Some(window) = focused {
            for kind in WINDOW_EVENT_KINDS {
                self.system
                    .add_interest(&mut subscription, Element::Window(window.clone()), kind);
            }
        }
        self.system.attach_to_main_loop(&mut subscription);

        if let Some(tracked) = self.tracked.as_mut() {
            tracked.subscription = Some(subscription);
        }
    }

    /// Move the three per-window interests from the previous focused window
    /// to the new one, then publish its geometry.
    fn retarget_window(&mut self, new_window: S::Window) {
        let Some(tracked) = self.tracked.as_mut() else {
            debug!("focus change with no tracked application, ignoring");
            return;
        };

        if let Some(subscription) = tracked.subscription.as_mut() {
            if let Some(old) = tracked.focused.take() {
                for kind in WINDOW_EVENT_KINDS {
                    self.system
                        .remove_interest(subscription, Element::Window(old.clone()), kind);
                }
            }
            for kind in WINDOW_EVENT_KINDS {
                self.system
                    .add_interest(subscription, Element::Window(new_window.clone()), kind);
            }
        }
        tracked.focused = Some(new_window);

        self.publish();
    }

    /// Query the tracked window's geometry and publish a snapshot. Both
    /// position and size must resolve, otherwise the result is `None`.
    fn publish(&mut self) {
        let Some(window) = self.tracked.as_ref().and_then(|t| t.focused.clone()) else {
            self.emit(None);
            return;
        };

        let (Some(position), Some(size)) = (
            self.system.window_position(&window),
            self.system.window_size(&window),
        ) else {
            self.emit(None);
            return;
        };

        // Accessibility coordinates are top-left origin; the primary
        // screen's height defines the bottom-left-origin global space.
        let screen_height = self.system.primary_screen_height();
        let rect = Rect::from_top_left(position, size, screen_height);
        let corner_radius = self.corner_radius(&window);

        self.emit(Some(FocusedWindowInfo {
            rect,
            corner_radius,
        }));
    }

    /// Resolve the window's server-side corner radius. Any miss along the
    /// chain, and a reported radius of 0, falls back to
    /// [`FALLBACK_CORNER_RADIUS`].
    fn corner_radius(&self, window: &S::Window) -> f64 {
        let resolved = self
            .system
            .window_id(window)
            .and_then(|id| self.system.corner_radii(id))
            .and_then(|radii| radii.first().copied());

        match resolved {
            Some(radius) if radius > 0 => f64::from(radius),
            Some(_) | None => FALLBACK_CORNER_RADIUS,
        }
    }

    fn emit(&mut self, info: Option<FocusedWindowInfo>) {
        if let Some(listener) = self.listener.as_mut() {
            listener(info);
        }
    }

    fn teardown_tracked(&mut self) {
        if let Some(tracked) = self.tracked.take() {
            debug!("releasing subscription for application {}", tracked.pid);
            if let Some(subscription) = tracked.subscription {
                self.system.detach(subscription);
            }
        }
    }
}

impl<S: WindowSystem> Drop for WindowObserver<S> {
    fn drop(&mut self) {
        self.teardown_tracked();
        if self.started {
            self.system.stop_observing_activations();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};
    use crate::test_utils::{FakeWindowSystem, SCREEN_HEIGHT};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Published = Rc<RefCell<Vec<Option<FocusedWindowInfo>>>>;

    fn observed(system: &FakeWindowSystem) -> (WindowObserver<FakeWindowSystem>, Published) {
        let published: Published = Rc::default();
        let sink = Rc::clone(&published);
        let mut observer = WindowObserver::new(system.clone());
        observer.on_focused_window_changed(move |info| sink.borrow_mut().push(info));
        (observer, published)
    }

    #[test]
    fn test_start_publishes_initial_snapshot() {
        let system = FakeWindowSystem::new();
        system.activate(42, Some(7));
        system.place_window(7, Point::new(100.0, 200.0), Size::new(300.0, 400.0));

        let (mut observer, published) = observed(&system);
        observer.start().unwrap();

        // Top-left (100, 200) on a 1080-high screen -> bottom-left y 480.
        assert_eq!(
            *published.borrow(),
            vec![Some(FocusedWindowInfo {
                rect: Rect::new(100.0, 480.0, 300.0, 400.0),
                corner_radius: 10.0,
            })]
        );
        assert!(system.state.borrow().observing_activations);
    }

    #[test]
    fn test_start_is_idempotent() {
        let system = FakeWindowSystem::new();
        system.activate(42, Some(7));
        system.place_window(7, Point::new(0.0, 0.0), Size::new(100.0, 100.0));

        let (mut observer, published) = observed(&system);
        observer.start().unwrap();
        observer.start().unwrap();

        assert_eq!(system.state.borrow().subscribe_calls, 1);
        assert_eq!(published.borrow().len(), 1);
    }

    #[test]
    fn test_no_focused_window_publishes_none() {
        let system = FakeWindowSystem::new();
        system.activate(42, None);

        let (mut observer, published) = observed(&system);
        observer.start().unwrap();

        assert_eq!(*published.borrow(), vec![None]);
        // Only the app-level interest is registered.
        let state = system.state.borrow();
        assert_eq!(state.interests.len(), 1);
        assert_eq!(
            state.interests[0].1,
            Element::<u32>::Application,
        );
    }

    #[test]
    fn test_app_switches_leave_one_live_subscription() {
        let system = FakeWindowSystem::new();
        system.activate(42, Some(7));
        system.place_window(7, Point::new(0.0, 0.0), Size::new(100.0, 100.0));

        let (mut observer, _published) = observed(&system);
        observer.start().unwrap();

        system.activate(43, Some(8));
        system.place_window(8, Point::new(10.0, 10.0), Size::new(100.0, 100.0));
        observer.handle_event(WindowSystemEvent::ApplicationActivated(43));

        system.activate(44, Some(9));
        system.place_window(9, Point::new(20.0, 20.0), Size::new(100.0, 100.0));
        observer.handle_event(WindowSystemEvent::ApplicationActivated(44));

        let state = system.state.borrow();
        assert_eq!(state.subscribe_calls, 3);
        assert_eq!(state.detach_calls, 2);
        assert_eq!(state.live_subscriptions.len(), 1);
        // Every remaining interest belongs to the one live subscription.
        assert!(state
            .interests
            .iter()
            .all(|(id, _, _)| state.live_subscriptions.contains(id)));
        // App-level focus interest plus the three per-window ones.
        assert_eq!(state.interests.len(), 4);
    }

    #[test]
    fn test_focus_change_rewires_window_interests() {
        let system = FakeWindowSystem::new();
        system.activate(42, Some(7));
        system.place_window(7, Point::new(0.0, 0.0), Size::new(100.0, 100.0));
        system.place_window(8, Point::new(50.0, 60.0), Size::new(200.0, 100.0));

        let (mut observer, published) = observed(&system);
        observer.start().unwrap();
        published.borrow_mut().clear();

        observer.handle_event(WindowSystemEvent::FocusedWindowChanged(8));

        let state = system.state.borrow();
        assert!(!state
            .interests
            .iter()
            .any(|(_, element, _)| *element == Element::Window(7)));
        let new_window_interests = state
            .interests
            .iter()
            .filter(|(_, element, _)| *element == Element::Window(8))
            .count();
        assert_eq!(new_window_interests, 3);
        drop(state);

        assert_eq!(
            *published.borrow(),
            vec![Some(FocusedWindowInfo {
                rect: Rect::new(50.0, SCREEN_HEIGHT - 60.0 - 100.0, 200.0, 100.0),
                corner_radius: 10.0,
            })]
        );
    }

    #[test]
    fn test_move_republishes() {
        let system = FakeWindowSystem::new();
        system.activate(42, Some(7));
        system.place_window(7, Point::new(0.0, 0.0), Size::new(100.0, 100.0));

        let (mut observer, published) = observed(&system);
        observer.start().unwrap();
        published.borrow_mut().clear();

        system.place_window(7, Point::new(30.0, 40.0), Size::new(100.0, 100.0));
        observer.handle_event(WindowSystemEvent::Moved);

        assert_eq!(
            *published.borrow(),
            vec![Some(FocusedWindowInfo {
                rect: Rect::new(30.0, SCREEN_HEIGHT - 40.0 - 100.0, 100.0, 100.0),
                corner_radius: 10.0,
            })]
        );
    }

    #[test]
    fn test_miniaturize_publishes_single_none_and_keeps_interests() {
        let system = FakeWindowSystem::new();
        system.activate(42, Some(7));
        system.place_window(7, Point::new(0.0, 0.0), Size::new(100.0, 100.0));

        let (mut observer, published) = observed(&system);
        observer.start().unwrap();
        published.borrow_mut().clear();
        let interests_before = system.state.borrow().interests.clone();

        observer.handle_event(WindowSystemEvent::Miniaturized);

        assert_eq!(*published.borrow(), vec![None]);
        assert_eq!(system.state.borrow().interests, interests_before);

        // The handle is still tracked: a later move publishes again.
        observer.handle_event(WindowSystemEvent::Moved);
        assert_eq!(published.borrow().len(), 2);
        assert!(published.borrow()[1].is_some());
    }

    #[test]
    fn test_corner_radius_falls_back_without_capability() {
        let system = FakeWindowSystem::new();
        system.activate(42, Some(7));
        system.place_window(7, Point::new(0.0, 0.0), Size::new(100.0, 100.0));

        let (mut observer, published) = observed(&system);
        observer.start().unwrap();

        assert_eq!(published.borrow()[0].unwrap().corner_radius, 10.0);
    }

    #[test]
    fn test_corner_radius_from_window_server() {
        let system = FakeWindowSystem::new();
        system.activate(42, Some(7));
        system.place_window(7, Point::new(0.0, 0.0), Size::new(100.0, 100.0));
        system.set_server_radii(7, vec![16, 16, 16, 16]);

        let (mut observer, published) = observed(&system);
        observer.start().unwrap();

        assert_eq!(published.borrow()[0].unwrap().corner_radius, 16.0);
    }

    #[test]
    fn test_zero_server_radius_uses_fallback() {
        // A reported radius of 0 is indistinguishable from "unknown" here
        // and keeps the fallback.
        let system = FakeWindowSystem::new();
        system.activate(42, Some(7));
        system.place_window(7, Point::new(0.0, 0.0), Size::new(100.0, 100.0));
        system.set_server_radii(7, vec![0]);

        let (mut observer, published) = observed(&system);
        observer.start().unwrap();

        assert_eq!(published.borrow()[0].unwrap().corner_radius, 10.0);
    }

    #[test]
    fn test_failed_geometry_query_publishes_none() {
        let system = FakeWindowSystem::new();
        system.activate(42, Some(7));
        // No position or size on record for window 7.

        let (mut observer, published) = observed(&system);
        observer.start().unwrap();

        assert_eq!(*published.borrow(), vec![None]);
    }

    #[test]
    fn test_subscribe_failure_still_publishes() {
        let system = FakeWindowSystem::new();
        system.activate(42, Some(7));
        system.place_window(7, Point::new(0.0, 0.0), Size::new(100.0, 100.0));
        system.state.borrow_mut().fail_subscribe = true;

        let (mut observer, published) = observed(&system);
        observer.start().unwrap();

        assert_eq!(published.borrow().len(), 1);
        assert!(published.borrow()[0].is_some());
        assert!(system.state.borrow().live_subscriptions.is_empty());
    }

    #[test]
    fn test_drop_releases_everything() {
        let system = FakeWindowSystem::new();
        system.activate(42, Some(7));
        system.place_window(7, Point::new(0.0, 0.0), Size::new(100.0, 100.0));

        {
            let (mut observer, _published) = observed(&system);
            observer.start().unwrap();
            assert_eq!(system.state.borrow().live_subscriptions.len(), 1);
        }

        let state = system.state.borrow();
        assert!(state.live_subscriptions.is_empty());
        assert!(state.interests.is_empty());
        assert!(!state.observing_activations);
    }

    #[test]
    fn test_snapshot_serializes() {
        let info = FocusedWindowInfo {
            rect: Rect::new(100.0, 480.0, 300.0, 400.0),
            corner_radius: 10.0,
        };
        let value = serde_json::to_value(info).unwrap();
        assert_eq!(value["rect"]["origin"]["x"], 100.0);
        assert_eq!(value["rect"]["size"]["height"], 400.0);
        assert_eq!(value["corner_radius"], 10.0);
    }
}

//! Shared test utilities: a scripted, fully in-memory `WindowSystem` whose
//! registration calls are counted so tests can assert subscription hygiene.

#![cfg(test)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::error::PlatformError;
use crate::geometry::{Point, Size};
use crate::platform::{Element, EventKind, Pid, WindowId, WindowSystem};

/// Screen height every fake uses; tests convert fixtures against it.
pub const SCREEN_HEIGHT: f64 = 1080.0;

/// Fake windows are plain ids; the fake reuses the id as the low-level
/// window-server id.
pub type FakeWindow = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeSubscription {
    pub id: u64,
}

#[derive(Default)]
pub struct FakeState {
    pub frontmost: Option<Pid>,
    pub focused: HashMap<Pid, FakeWindow>,
    /// Top-left-origin positions, as the accessibility layer reports them.
    pub positions: HashMap<FakeWindow, Point>,
    pub sizes: HashMap<FakeWindow, Size>,
    /// Window-server corner radii; an absent map entry is a lookup miss,
    /// `capability_available == false` means the query API does not exist.
    pub server_radii: HashMap<WindowId, Vec<i32>>,
    pub capability_available: bool,
    pub fail_subscribe: bool,
    pub observing_activations: bool,

    pub subscribe_calls: usize,
    pub detach_calls: usize,
    pub add_interest_calls: usize,
    pub remove_interest_calls: usize,

    next_subscription: u64,
    pub live_subscriptions: HashSet<u64>,
    pub attached: HashSet<u64>,
    pub interests: Vec<(u64, Element<FakeWindow>, EventKind)>,
}

/// Cloneable handle onto shared fake state, so a test can keep inspecting
/// and mutating the world after handing the system to an observer.
#[derive(Clone, Default)]
pub struct FakeWindowSystem {
    pub state: Rc<RefCell<FakeState>>,
}

impl FakeWindowSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `pid` the frontmost application with the given focused window.
    pub fn activate(&self, pid: Pid, focused: Option<FakeWindow>) {
        let mut state = self.state.borrow_mut();
        state.frontmost = Some(pid);
        match focused {
            Some(window) => {
                state.focused.insert(pid, window);
            }
            None => {
                state.focused.remove(&pid);
            }
        }
    }

    /// Record a window's geometry, top-left origin.
    pub fn place_window(&self, window: FakeWindow, top_left: Point, size: Size) {
        let mut state = self.state.borrow_mut();
        state.positions.insert(window, top_left);
        state.sizes.insert(window, size);
    }

    /// Enable the corner-radius capability and script the server's answer
    /// for one window.
    pub fn set_server_radii(&self, window: FakeWindow, radii: Vec<i32>) {
        let mut state = self.state.borrow_mut();
        state.capability_available = true;
        state.server_radii.insert(WindowId::from(window), radii);
    }
}

impl WindowSystem for FakeWindowSystem {
    type Window = FakeWindow;
    type Subscription = FakeSubscription;

    fn frontmost_application(&self) -> Option<Pid> {
        self.state.borrow().frontmost
    }

    fn focused_window(&self, pid: Pid) -> Option<FakeWindow> {
        self.state.borrow().focused.get(&pid).copied()
    }

    fn window_position(&self, window: &FakeWindow) -> Option<Point> {
        self.state.borrow().positions.get(window).copied()
    }

    fn window_size(&self, window: &FakeWindow) -> Option<Size> {
        self.state.borrow().sizes.get(window).copied()
    }

    fn observe_activations(&mut self) -> Result<(), PlatformError> {
        self.state.borrow_mut().observing_activations = true;
        Ok(())
    }

    fn stop_observing_activations(&mut self) {
        self.state.borrow_mut().observing_activations = false;
    }

    fn subscribe(&mut self, pid: Pid) -> Result<FakeSubscription, PlatformError> {
        let mut state = self.state.borrow_mut();
        state.subscribe_calls += 1;
        if state.fail_subscribe {
            return Err(PlatformError::Subscription {
                pid,
                reason: "scripted failure".to_string(),
            });
        }
        state.next_subscription += 1;
        let id = state.next_subscription;
        state.live_subscriptions.insert(id);
        Ok(FakeSubscription { id })
    }

    fn add_interest(
        &mut self,
        subscription: &mut FakeSubscription,
        element: Element<FakeWindow>,
        kind: EventKind,
    ) {
        let mut state = self.state.borrow_mut();
        state.add_interest_calls += 1;
        state.interests.push((subscription.id, element, kind));
    }

    fn remove_interest(
        &mut self,
        subscription: &mut FakeSubscription,
        element: Element<FakeWindow>,
        kind: EventKind,
    ) {
        let mut state = self.state.borrow_mut();
        state.remove_interest_calls += 1;
        let entry = (subscription.id, element, kind);
        if let Some(index) = state.interests.iter().position(|e| *e == entry) {
            state.interests.remove(index);
        }
    }

    fn attach_to_main_loop(&mut self, subscription: &mut FakeSubscription) {
        self.state.borrow_mut().attached.insert(subscription.id);
    }

    fn detach(&mut self, subscription: FakeSubscription) {
        let mut state = self.state.borrow_mut();
        state.detach_calls += 1;
        state.live_subscriptions.remove(&subscription.id);
        state.attached.remove(&subscription.id);
        // AXObserver semantics: destroying the observer releases every
        // interest registered through it.
        state.interests.retain(|(id, _, _)| *id != subscription.id);
    }

    fn primary_screen_height(&self) -> f64 {
        SCREEN_HEIGHT
    }

    fn window_id(&self, window: &FakeWindow) -> Option<WindowId> {
        Some(WindowId::from(*window))
    }

    fn corner_radii(&self, window_id: WindowId) -> Option<Vec<i32>> {
        let state = self.state.borrow();
        if !state.capability_available {
            return None;
        }
        state.server_radii.get(&window_id).cloned()
    }
}

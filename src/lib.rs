//! penumbra: dim the screen everywhere except the focused window.
//!
//! The crate has two halves. [`observer::WindowObserver`] keeps a single
//! live event subscription following the frontmost application's focused
//! window (across app switches, window switches, moves, resizes and
//! minimization) and publishes [`observer::FocusedWindowInfo`] snapshots.
//! [`cutout::compute`] is the pure half: given a surface's bounds and a
//! window rect in that surface's space, it builds the even-odd fill path
//! whose inner sub-path is rounded per corner, square wherever the window
//! sits flush against a surface edge.
//!
//! The OS itself stays behind the [`platform::WindowSystem`] trait; hosts
//! implement it, deliver events on their main loop, and render the
//! [`overlay::Scene`] however they draw.

pub mod constants;
pub mod cutout;
pub mod error;
pub mod geometry;
pub mod observer;
pub mod overlay;
pub mod platform;
mod test_utils;

pub use cutout::{CornerRadii, CutoutSpec, FillRule, PathOp, RoundedHole};
pub use error::PlatformError;
pub use geometry::{Point, Rect, Size};
pub use observer::{FocusedWindowInfo, WindowObserver};
pub use overlay::{Fill, OverlayModel, Scene};
pub use platform::{Element, EventKind, Pid, WindowId, WindowSystem, WindowSystemEvent};

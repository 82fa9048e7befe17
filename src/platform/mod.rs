//! Capability interfaces onto the host window system.
//!
//! The crate ships no OS bindings; hosts implement [`WindowSystem`] with
//! whatever the platform offers and feed the resulting events to the
//! observer on the main event loop.

pub mod types;

pub use types::{Element, EventKind, Pid, WindowId, WindowSystem, WindowSystemEvent};

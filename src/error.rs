use thiserror::Error;

/// Errors surfaced by `WindowSystem` implementations.
///
/// Only the registration paths are fallible; attribute queries degrade to
/// `None` instead, so a stale handle or a denied lookup never fails the
/// observer.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("could not observe application activations: {reason}")]
    ActivationObserver { reason: String },

    #[error("could not subscribe to window events for pid {pid}: {reason}")]
    Subscription { pid: i32, reason: String },
}

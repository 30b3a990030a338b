//! Routing error types

use thiserror::Error;

/// Errors that can occur while talking to the OS audio subsystem
///
/// Switch operations never surface these to the host; they are logged and
/// reported as `false`. Lifecycle operations return them to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The OS rejected a session/category/mode change
    #[error("Audio session rejected the request: {0}")]
    SessionRejected(String),

    /// Attach was called while already listening
    #[error("Adapter is already attached")]
    AlreadyAttached,
}

/// Result type for routing operations
pub type RouteResult<T> = Result<T, RouteError>;

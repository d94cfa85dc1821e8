//! Sandbox error types.

use thiserror::Error;

/// Invalid-argument conditions raised by the drawing API into a script.
///
/// These are script-level errors: the runtime catches them like any other
/// script failure, formats them into an `output` record, and the run still
/// finishes normally.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Infrastructure failures around the sandbox itself.
///
/// Unlike script errors these never travel through the event stream. They
/// are not user-recoverable: the host logs them and returns to idle with
/// no retry.
#[derive(Debug, Error)]
pub enum SandboxError {
    /// The worker context is gone and can no longer accept runs.
    #[error("sandbox worker is not running")]
    WorkerGone,
    /// The event channel disconnected while a run was in flight.
    #[error("event channel closed unexpectedly")]
    ChannelClosed,
}

//! Rendering error types.

use thiserror::Error;

/// Errors surfaced by a drawing surface during a paint pass.
///
/// A failed paint never stops the render loop; the tick logs the error and
/// the next tick repaints.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The underlying surface rejected a paint call.
    #[error("surface error: {0}")]
    Surface(String),
}

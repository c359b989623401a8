//! Errors raised while wiring the backdrop into the host page.

use thiserror::Error;

/// Errors that can occur while setting up or driving the backdrop.
///
/// None of these reach the page: the web entry point logs them and falls
/// back to an inert handle.
#[derive(Error, Debug)]
pub enum BackdropError {
    /// No global `window` object.
    #[error("no window object available")]
    NoWindow,

    /// No `document` on the window.
    #[error("no document available")]
    NoDocument,

    /// The requested canvas element does not exist or is not a canvas.
    #[error("canvas `{0}` not found")]
    CanvasNotFound(String),

    /// The canvas refused to hand out a 2D drawing context.
    #[error("2D drawing context unavailable")]
    ContextUnavailable,

    /// The host frame scheduler rejected a request.
    #[error("frame scheduler unavailable: {0}")]
    SchedulerUnavailable(String),

    /// A host DOM call failed.
    #[error("host call failed: {0}")]
    Host(String),

    /// The page supplied a config override that does not parse.
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

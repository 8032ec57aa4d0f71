//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The minifb window could not be created.
    #[error("window error: {0}")]
    Window(String),

    /// The requested landmark source was compiled out.
    #[error("landmark source `{0}` is not available in this build (rebuild with --features {0})")]
    SourceUnavailable(&'static str),
}

impl From<minifb::Error> for AppError {
    fn from(e: minifb::Error) -> Self {
        AppError::Window(e.to_string())
    }
}

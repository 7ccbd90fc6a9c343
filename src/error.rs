//! Error types for the render pipeline

use thiserror::Error;

/// Result type alias for render operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the headless browser
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to launch the headless browser
    #[error("Browser launch failed: {0}")]
    LaunchError(String),

    /// Failed to navigate to the preview page
    #[error("Failed to load preview page: {0}")]
    LoadError(String),

    /// The preview page never signalled readiness
    #[error("Preview page did not become ready within {0}ms")]
    ReadyTimeout(u64),

    /// Failed to capture the container screenshot
    #[error("Screenshot capture failed: {0}")]
    CaptureError(String),

    /// Failed to install a font for the browser
    #[error("Font registration failed: {0}")]
    FontError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

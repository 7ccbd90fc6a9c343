//! Codeshot
//!
//! Renders syntax-highlighted code snippets to PNG images. The service
//! validates request parameters, serializes them into a URL for a templated
//! HTML preview page, drives a headless Chrome instance to that page, waits
//! for the page's readiness signal, and screenshots the snippet container.
//!
//! The preview page itself (highlighting, layout, the readiness flag) and the
//! Chrome binary are external collaborators; this crate only sequences them.
//!
//! # Example
//!
//! ```no_run
//! use codeshot::capture::{capture_preview, CaptureOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = CaptureOptions::default();
//! let png = capture_preview(&options, "http://localhost:3000/preview.html?language=rust")?;
//! println!("captured {} bytes", png.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod languages;
pub mod themes;

pub mod params;
pub mod preview;

pub mod capture;
pub mod fonts;

pub mod server;

/// Deployment mode selecting which hostname serves the preview page and
/// font assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RunMode {
    /// Local preview server on the developer machine.
    Development,
    /// The deployed public preview site.
    Production,
}

impl RunMode {
    /// Base URL the preview page and fonts are fetched from in this mode.
    pub fn preview_host(self) -> &'static str {
        match self {
            RunMode::Development => "http://localhost:3000",
            RunMode::Production => "https://codeshot.app",
        }
    }
}

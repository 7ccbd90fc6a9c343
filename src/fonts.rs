//! Font installation for the headless browser
//!
//! The preview page renders emoji in code comments, so the browser needs a
//! color emoji font that is not present on most server images. Fonts are
//! fetched from the service hostname and dropped into the user font directory
//! where Chrome's fontconfig picks them up. Downloads are cached on disk, so
//! only the first request after a cold start pays the fetch.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use log::{info, warn};

use crate::error::{Error, Result};

/// Font files served under `<host>/fonts/`.
pub const FONT_FILES: &[&str] = &["NotoColorEmoji.ttf"];

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Install the preview fonts, returning the paths that are now present.
///
/// Individual download failures are logged and skipped; a missing emoji font
/// degrades glyph coverage but never fails the render. Only an unusable font
/// directory is reported as an error.
pub fn register_fonts(host: &str) -> Result<Vec<PathBuf>> {
    let font_dir = font_dir()?;
    fs::create_dir_all(&font_dir)
        .map_err(|e| Error::FontError(format!("Cannot create {}: {}", font_dir.display(), e)))?;

    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| Error::FontError(format!("Failed to build HTTP client: {}", e)))?;

    let mut installed = Vec::new();
    for name in FONT_FILES {
        let target = font_dir.join(name);
        if target.exists() {
            installed.push(target);
            continue;
        }

        let url = format!("{}/fonts/{}", host.trim_end_matches('/'), name);
        info!("loading {}", url);
        match fetch_font(&client, &url) {
            Ok(bytes) => match fs::write(&target, bytes) {
                Ok(()) => installed.push(target),
                Err(e) => warn!("failed to write font {}: {}", target.display(), e),
            },
            Err(e) => warn!("failed to fetch font {}: {}", url, e),
        }
    }

    Ok(installed)
}

fn fetch_font(client: &reqwest::blocking::Client, url: &str) -> Result<Vec<u8>> {
    let response = client
        .get(url)
        .send()
        .map_err(|e| Error::FontError(e.to_string()))?;
    if !response.status().is_success() {
        return Err(Error::FontError(format!(
            "{} returned {}",
            url,
            response.status()
        )));
    }
    let bytes = response
        .bytes()
        .map_err(|e| Error::FontError(e.to_string()))?;
    Ok(bytes.to_vec())
}

fn font_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| Error::FontError("No home directory for font installation".to_string()))?;
    Ok(home.join(".fonts"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_dir_under_home() {
        let dir = font_dir().unwrap();
        assert!(dir.ends_with(".fonts"));
    }

    #[test]
    fn test_unreachable_host_is_nonfatal() {
        // The fetch fails, but register_fonts still succeeds with whatever is
        // already cached on disk.
        let result = register_fonts("http://127.0.0.1:1");
        assert!(result.is_ok());
    }
}

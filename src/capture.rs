//! Headless Chrome driver for the preview page
//!
//! Launches a fresh browser per capture, navigates to the built preview URL,
//! waits for the page's readiness flag, and screenshots the snippet
//! container. The API is synchronous (the `headless_chrome` crate blocks on
//! CDP round-trips); callers on an async runtime run it on a blocking worker.

use std::ffi::OsStr;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, LaunchOptions, Tab};
use log::info;

use crate::error::{Error, Result};
use crate::params::DEFAULT_WIDTH;

/// Chrome flags for constrained server environments. Sandboxing is disabled
/// separately through the launch options builder.
const LAUNCH_ARGS: &[&str] = &[
    "--disable-setuid-sandbox",
    "--disable-dev-shm-usage",
    "--disable-accelerated-2d-canvas",
    "--no-first-run",
    "--no-zygote",
    "--single-process",
    "--disable-gpu",
];

/// Element the preview page renders the snippet into.
const CONTAINER_SELECTOR: &str = "#container";

/// Global flag the preview page sets once highlighting and layout are done.
const READY_EXPRESSION: &str = "window.LOAD_COMPLETE === true";

const READY_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Fixed viewport height; the container screenshot clips to the element box,
/// so only the width is caller-controlled.
pub const VIEWPORT_HEIGHT: u32 = 1000;

/// Per-capture browser configuration.
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    /// Viewport width in CSS pixels; 0 falls back to the default width.
    pub width: u32,
    /// Device scale factor, already clamped to [1, 5].
    pub scale: u32,
    /// Upper bound for navigation and the readiness wait.
    pub ready_timeout: Duration,
    /// Explicit Chrome binary path; autodetected when unset.
    pub chrome_path: Option<PathBuf>,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            scale: 2,
            ready_timeout: Duration::from_secs(15),
            chrome_path: None,
        }
    }
}

/// Capture the preview container as PNG bytes.
///
/// The browser instance is exclusively owned by this call. Dropping it
/// terminates the Chrome child process, so teardown happens on every exit
/// path, including the early `?` returns.
pub fn capture_preview(options: &CaptureOptions, url: &str) -> Result<Vec<u8>> {
    let started = Instant::now();
    let browser = launch(options)?;

    let tab = browser
        .new_tab()
        .map_err(|e| Error::LaunchError(format!("Failed to open tab: {}", e)))?;
    tab.set_default_timeout(options.ready_timeout);

    tab.navigate_to(url)
        .map_err(|e| Error::LoadError(format!("Navigation failed: {}", e)))?;
    tab.wait_until_navigated()
        .map_err(|e| Error::LoadError(format!("Wait for navigation failed: {}", e)))?;

    wait_for_ready(&tab, options.ready_timeout)?;

    let container = tab
        .wait_for_element(CONTAINER_SELECTOR)
        .map_err(|e| Error::CaptureError(format!("Container element not found: {}", e)))?;
    let png = container
        .capture_screenshot(Page::CaptureScreenshotFormatOption::Png)
        .map_err(|e| Error::CaptureError(format!("Screenshot failed: {}", e)))?;

    info!(
        "capture finished in {:.2}s ({} bytes)",
        started.elapsed().as_secs_f64(),
        png.len()
    );
    Ok(png)
}

fn launch(options: &CaptureOptions) -> Result<Browser> {
    let width = if options.width == 0 {
        DEFAULT_WIDTH
    } else {
        options.width
    };

    let scale_arg = format!("--force-device-scale-factor={}", options.scale);
    let mut args: Vec<&OsStr> = LAUNCH_ARGS.iter().map(OsStr::new).collect();
    args.push(OsStr::new(&scale_arg));

    let launch_options = LaunchOptions::default_builder()
        .headless(true)
        .sandbox(false)
        .ignore_certificate_errors(true)
        .window_size(Some((width, VIEWPORT_HEIGHT)))
        .path(options.chrome_path.clone())
        .args(args)
        .build()
        .map_err(|e| Error::LaunchError(format!("Failed to build launch options: {}", e)))?;

    Browser::new(launch_options)
        .map_err(|e| Error::LaunchError(format!("Failed to launch browser: {}", e)))
}

/// Poll the page-global readiness flag until it is true or the timeout
/// expires. The flag is a cooperative signal set by the preview page script.
fn wait_for_ready(tab: &Tab, timeout: Duration) -> Result<()> {
    let deadline = Instant::now() + timeout;
    loop {
        let probe = tab
            .evaluate(READY_EXPRESSION, false)
            .map_err(|e| Error::LoadError(format!("Readiness probe failed: {}", e)))?;
        if probe.value == Some(serde_json::Value::Bool(true)) {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(Error::ReadyTimeout(timeout.as_millis() as u64));
        }
        std::thread::sleep(READY_POLL_INTERVAL);
    }
}

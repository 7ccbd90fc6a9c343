//! Request parameter validation and clamping
//!
//! Turns the raw query string and request body into a validated
//! [`RenderRequest`], or a [`Rejection`] carrying the JSON payload for a 400
//! response. Required fields (body, language, theme) short-circuit on the
//! first failure; numeric fields (scale, width, padding) never abort the
//! request, they clamp or fall back to defaults.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{languages, themes};

/// Default device scale factor applied when the `scale` parameter is absent
/// or unparseable.
pub const DEFAULT_SCALE: u32 = 2;
/// Inclusive scale bounds.
pub const MIN_SCALE: u32 = 1;
pub const MAX_SCALE: u32 = 5;

/// Default viewport width in CSS pixels.
pub const DEFAULT_WIDTH: u32 = 1000;
/// Upper bound for the viewport width.
pub const MAX_WIDTH: u32 = 1920;

/// Upper bound for the background padding, in rem units on the preview page.
pub const MAX_PADDING: u32 = 10;

/// Query parameters as they arrive on the wire, before validation.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawQuery {
    pub theme: Option<String>,
    pub language: Option<String>,
    #[serde(rename = "line-numbers")]
    pub line_numbers: Option<String>,
    pub scale: Option<String>,
    pub width: Option<String>,
    pub padding: Option<String>,
    #[serde(rename = "background-color")]
    pub background_color: Option<String>,
    #[serde(rename = "background-image")]
    pub background_image: Option<String>,
    #[serde(rename = "show-background")]
    pub show_background: Option<String>,
}

/// A fully validated render request.
///
/// All numeric fields are already clamped to their documented ranges; the
/// background fields pass through as opaque strings for the preview page to
/// interpret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub code: String,
    pub language: String,
    pub theme: String,
    pub line_numbers: bool,
    pub scale: u32,
    /// Clamped width; may be 0, in which case the viewport falls back to
    /// [`DEFAULT_WIDTH`] at capture time.
    pub width: u32,
    pub padding: Option<u32>,
    pub background_color: String,
    pub background_image: String,
    pub show_background: bool,
}

/// Payload sent back with a 400 response when a required field fails
/// validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub message: String,
    #[serde(rename = "availableLanguages", skip_serializing_if = "Option::is_none")]
    pub available_languages: Option<Vec<&'static str>>,
    #[serde(rename = "availableThemes", skip_serializing_if = "Option::is_none")]
    pub available_themes: Option<Vec<&'static str>>,
}

impl Rejection {
    fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            available_languages: None,
            available_themes: None,
        }
    }

    fn with_languages(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            available_languages: Some(languages::LANGUAGES.to_vec()),
            available_themes: None,
        }
    }

    fn with_themes(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            available_languages: None,
            available_themes: Some(themes::THEMES.to_vec()),
        }
    }
}

/// Validate the request body and query parameters.
///
/// Validation order: body presence, language, theme, padding, scale, width.
/// The first failing required check returns the corresponding [`Rejection`].
pub fn validate(body: Option<&str>, query: &RawQuery) -> Result<RenderRequest, Rejection> {
    let code = match body {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => {
            error!("code snippet missing from request body");
            return Err(Rejection::message_only(
                "Code snippet missing, please include it in the request body",
            ));
        }
    };

    let language = query.language.clone().unwrap_or_default();
    if language.is_empty() {
        error!("language not specified");
        return Err(Rejection::with_languages(
            "language missing: please specify a language",
        ));
    }
    if !languages::is_supported(&language) {
        error!("unknown language '{}'", language);
        return Err(Rejection::with_languages(format!(
            "Unknown language '{}'",
            language
        )));
    }

    let theme = query.theme.clone().unwrap_or_default();
    if !themes::is_supported(&theme) {
        error!("unknown theme '{}'", theme);
        return Err(Rejection::with_themes(format!("Unknown theme: '{}'", theme)));
    }

    let padding = clamp_padding(query.padding.as_deref());
    let scale = clamp_scale(query.scale.as_deref());
    let width = clamp_width(query.width.as_deref());
    let line_numbers = query.line_numbers.as_deref() == Some("true");
    let show_background = query.show_background.as_deref() != Some("false");

    info!("theme: {}", theme);
    info!("language: {}", language);
    info!("line numbers: {}", line_numbers);
    info!("scale factor: {}", scale);
    info!("width: {}", width);

    Ok(RenderRequest {
        code,
        language,
        theme,
        line_numbers,
        scale,
        width,
        padding,
        background_color: query.background_color.clone().unwrap_or_default(),
        background_image: query.background_image.clone().unwrap_or_default(),
        show_background,
    })
}

/// Effective scale: `clamp(parsedOrDefault(2), 1, 5)`. A parsed 0 clamps to
/// 1 rather than falling back to the default.
fn clamp_scale(raw: Option<&str>) -> u32 {
    let parsed = raw
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(DEFAULT_SCALE as i64);
    parsed.clamp(MIN_SCALE as i64, MAX_SCALE as i64) as u32
}

/// Effective width: `min(abs(parsedOrDefault(1000)), 1920)`. Zero survives
/// here; the capture viewport substitutes the default for falsy widths.
fn clamp_width(raw: Option<&str>) -> u32 {
    let parsed = match raw.and_then(|s| s.parse::<i64>().ok()) {
        Some(value) => value.unsigned_abs(),
        None => DEFAULT_WIDTH as u64,
    };
    parsed.min(MAX_WIDTH as u64) as u32
}

/// Effective padding: clamp to [0, 10] when parseable, unset otherwise.
fn clamp_padding(raw: Option<&str>) -> Option<u32> {
    let parsed = raw?.parse::<i64>().ok()?;
    Some(parsed.clamp(0, MAX_PADDING as i64) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_query() -> RawQuery {
        RawQuery {
            theme: Some("dark".to_string()),
            language: Some("python".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_body_rejected() {
        let rejection = validate(None, &valid_query()).unwrap_err();
        assert!(rejection.message.contains("missing"));
        assert!(rejection.available_languages.is_none());
    }

    #[test]
    fn test_empty_body_rejected() {
        let rejection = validate(Some(""), &valid_query()).unwrap_err();
        assert!(rejection.message.contains("missing"));
    }

    #[test]
    fn test_missing_language_rejected_with_full_list() {
        let query = RawQuery {
            theme: Some("dark".to_string()),
            ..Default::default()
        };
        let rejection = validate(Some("x"), &query).unwrap_err();
        assert_eq!(
            rejection.message,
            "language missing: please specify a language"
        );
        assert_eq!(
            rejection.available_languages.as_deref(),
            Some(languages::LANGUAGES)
        );
        assert!(rejection.available_themes.is_none());
    }

    #[test]
    fn test_unknown_language_quotes_value() {
        let query = RawQuery {
            theme: Some("dark".to_string()),
            language: Some("brainfuck".to_string()),
            ..Default::default()
        };
        let rejection = validate(Some("x"), &query).unwrap_err();
        assert_eq!(rejection.message, "Unknown language 'brainfuck'");
        assert_eq!(
            rejection.available_languages.as_deref(),
            Some(languages::LANGUAGES)
        );
    }

    #[test]
    fn test_unknown_theme_rejected_with_full_list() {
        let query = RawQuery {
            theme: Some("nonexistent".to_string()),
            language: Some("python".to_string()),
            ..Default::default()
        };
        let rejection = validate(Some("x"), &query).unwrap_err();
        assert_eq!(rejection.message, "Unknown theme: 'nonexistent'");
        assert_eq!(rejection.available_themes.as_deref(), Some(themes::THEMES));
    }

    #[test]
    fn test_language_checked_before_theme() {
        let query = RawQuery {
            theme: Some("nonexistent".to_string()),
            language: Some("brainfuck".to_string()),
            ..Default::default()
        };
        let rejection = validate(Some("x"), &query).unwrap_err();
        assert!(rejection.available_languages.is_some());
        assert!(rejection.available_themes.is_none());
    }

    #[test]
    fn test_scale_clamping() {
        assert_eq!(clamp_scale(Some("0")), 1);
        assert_eq!(clamp_scale(Some("99")), 5);
        assert_eq!(clamp_scale(Some("abc")), 2);
        assert_eq!(clamp_scale(Some("-3")), 1);
        assert_eq!(clamp_scale(Some("3")), 3);
        assert_eq!(clamp_scale(None), 2);
    }

    #[test]
    fn test_width_clamping() {
        assert_eq!(clamp_width(Some("-50")), 50);
        assert_eq!(clamp_width(Some("5000")), 1920);
        assert_eq!(clamp_width(Some("x")), 1000);
        assert_eq!(clamp_width(Some("0")), 0);
        assert_eq!(clamp_width(None), 1000);
    }

    #[test]
    fn test_padding_clamping() {
        assert_eq!(clamp_padding(Some("15")), Some(10));
        assert_eq!(clamp_padding(Some("-3")), Some(0));
        assert_eq!(clamp_padding(Some("4")), Some(4));
        assert_eq!(clamp_padding(Some("abc")), None);
        assert_eq!(clamp_padding(None), None);
    }

    #[test]
    fn test_line_numbers_literal_true_only() {
        let mut query = valid_query();
        query.line_numbers = Some("true".to_string());
        assert!(validate(Some("x"), &query).unwrap().line_numbers);

        query.line_numbers = Some("TRUE".to_string());
        assert!(!validate(Some("x"), &query).unwrap().line_numbers);

        query.line_numbers = Some("yes".to_string());
        assert!(!validate(Some("x"), &query).unwrap().line_numbers);

        query.line_numbers = None;
        assert!(!validate(Some("x"), &query).unwrap().line_numbers);
    }

    #[test]
    fn test_show_background_defaults_true() {
        let query = valid_query();
        assert!(validate(Some("x"), &query).unwrap().show_background);

        let mut query = valid_query();
        query.show_background = Some("false".to_string());
        assert!(!validate(Some("x"), &query).unwrap().show_background);
    }

    #[test]
    fn test_valid_request_passes_through() {
        let query = RawQuery {
            theme: Some("dracula".to_string()),
            language: Some("rust".to_string()),
            scale: Some("10".to_string()),
            width: Some("9999".to_string()),
            padding: Some("5".to_string()),
            background_color: Some("#abb8c3".to_string()),
            ..Default::default()
        };
        let request = validate(Some("fn main() {}"), &query).unwrap();
        assert_eq!(request.code, "fn main() {}");
        assert_eq!(request.scale, 5);
        assert_eq!(request.width, 1920);
        assert_eq!(request.padding, Some(5));
        assert_eq!(request.background_color, "#abb8c3");
        assert_eq!(request.background_image, "");
    }

    #[test]
    fn test_rejection_serializes_camel_case() {
        let rejection = Rejection::with_languages("Unknown language 'x'");
        let json = serde_json::to_value(&rejection).unwrap();
        assert!(json.get("availableLanguages").is_some());
        assert!(json.get("availableThemes").is_none());
        assert_eq!(json["message"], "Unknown language 'x'");
    }
}

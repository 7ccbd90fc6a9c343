//! Preview page URL construction
//!
//! Serializes a validated [`RenderRequest`] into the query string the preview
//! page understands. Building the same request twice yields byte-identical
//! URLs; the parameter order below is fixed.

use url::Url;

use crate::error::{Error, Result};
use crate::params::RenderRequest;

/// Path of the preview page under the service hostname.
pub const PREVIEW_PAGE: &str = "preview.html";

/// Build the preview page URL for the given request.
///
/// `theme` and `language` are only set when non-empty; `line-numbers` and
/// `code` are always set; the background keys are always set, possibly to
/// empty strings, so the page can distinguish "off" from "unset".
pub fn build_preview_url(host: &str, request: &RenderRequest) -> Result<Url> {
    let base = Url::parse(host)
        .map_err(|e| Error::ConfigError(format!("Invalid preview host '{}': {}", host, e)))?;
    let mut url = base
        .join(PREVIEW_PAGE)
        .map_err(|e| Error::ConfigError(format!("Failed to build preview URL: {}", e)))?;

    {
        let mut pairs = url.query_pairs_mut();
        if !request.theme.is_empty() {
            pairs.append_pair("theme", &request.theme);
        }
        if !request.language.is_empty() {
            pairs.append_pair("language", &request.language);
        }
        pairs.append_pair("line-numbers", bool_str(request.line_numbers));
        pairs.append_pair("code", &request.code);
        pairs.append_pair("background-image", &request.background_image);
        pairs.append_pair("background-color", &request.background_color);
        pairs.append_pair("show-background", bool_str(request.show_background));
        let padding = request.padding.map(|p| p.to_string()).unwrap_or_default();
        pairs.append_pair("padding", &padding);
    }

    Ok(url)
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RenderRequest {
        RenderRequest {
            code: "print('hi')".to_string(),
            language: "python".to_string(),
            theme: "dark".to_string(),
            line_numbers: false,
            scale: 2,
            width: 1000,
            padding: None,
            background_color: String::new(),
            background_image: String::new(),
            show_background: true,
        }
    }

    #[test]
    fn test_url_contains_all_keys() {
        let url = build_preview_url("http://localhost:3000", &request()).unwrap();
        let query = url.query().unwrap();
        assert!(url.path().ends_with("/preview.html"));
        assert!(query.contains("theme=dark"));
        assert!(query.contains("language=python"));
        assert!(query.contains("line-numbers=false"));
        assert!(query.contains("code=print"));
        assert!(query.contains("show-background=true"));
        assert!(query.contains("padding="));
    }

    #[test]
    fn test_code_is_percent_encoded() {
        let mut req = request();
        req.code = "a = b & c;\nprint(a)".to_string();
        let url = build_preview_url("http://localhost:3000", &req).unwrap();
        let query = url.query().unwrap();
        // Raw separators from the snippet must not leak into the query string.
        assert!(!query.contains("b & c"));
        let decoded: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let code = decoded.iter().find(|(k, _)| k == "code").unwrap();
        assert_eq!(code.1, "a = b & c;\nprint(a)");
    }

    #[test]
    fn test_identical_requests_build_identical_urls() {
        let a = build_preview_url("https://codeshot.app", &request()).unwrap();
        let b = build_preview_url("https://codeshot.app", &request()).unwrap();
        assert_eq!(a.as_str(), b.as_str());
    }

    #[test]
    fn test_padding_serialized_when_set() {
        let mut req = request();
        req.padding = Some(7);
        let url = build_preview_url("http://localhost:3000", &req).unwrap();
        assert!(url.query().unwrap().contains("padding=7"));
    }

    #[test]
    fn test_invalid_host_is_config_error() {
        let err = build_preview_url("not a host", &request()).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }
}

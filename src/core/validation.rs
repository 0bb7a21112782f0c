//! Field-level validation shared by every create and update operation.
//!
//! Each check names the field it rejects so the RPC layer can point callers at
//! the offending input. Checks run before any store access.

use crate::errors::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<std::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

/// Trims human-entered text and rejects it when nothing is left.
pub fn required_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Like [`required_text`] for nullable fields: `None` stays `None`.
pub fn optional_text(field: &str, value: Option<&str>) -> Result<Option<String>> {
    value.map(|v| required_text(field, v)).transpose()
}

/// Accepts absolute `http`/`https` URLs.
pub fn url(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    let parsed = url::Url::parse(trimmed)
        .map_err(|e| Error::validation(field, format!("is not a valid URL: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(Error::validation(
            field,
            format!("unsupported URL scheme `{other}`"),
        )),
    }
}

/// Nullable URL field.
pub fn optional_url(field: &str, value: Option<&str>) -> Result<Option<String>> {
    value.map(|v| url(field, v)).transpose()
}

/// Accepts `local@domain.tld` shaped addresses.
pub fn email(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    let re = EMAIL_RE
        .as_ref()
        .map_err(|e| Error::validation(field, format!("email pattern unavailable: {e}")))?;
    if !re.is_match(trimmed) {
        return Err(Error::validation(field, "is not a valid email address"));
    }
    Ok(trimmed.to_string())
}

/// Score on the 0-100 scale (transparency, risk, AI predictions).
pub fn percent_score(field: &str, value: f64) -> Result<f64> {
    score_in(field, value, 0.0, 100.0)
}

/// Confidence on the 0-1 scale.
pub fn confidence(field: &str, value: f64) -> Result<f64> {
    score_in(field, value, 0.0, 1.0)
}

fn score_in(field: &str, value: f64, min: f64, max: f64) -> Result<f64> {
    if !value.is_finite() || value < min || value > max {
        return Err(Error::validation(
            field,
            format!("{value} is outside [{min}, {max}]"),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_required_text() {
        assert_eq!(required_text("name", "  Bridge  ").unwrap(), "Bridge");
        assert!(required_text("name", "").is_err());
        assert!(required_text("name", "   ").is_err());
        assert_eq!(optional_text("contractor", None).unwrap(), None);
        assert!(optional_text("contractor", Some(" ")).is_err());
    }

    #[test]
    fn test_url() {
        assert!(url("document_url", "https://docs.example.go.id/c/1.pdf").is_ok());
        assert!(url("document_url", "not a url").is_err());
        assert!(url("document_url", "ftp://example.com/file").is_err());
        assert_eq!(optional_url("file_url", None).unwrap(), None);
    }

    #[test]
    fn test_email() {
        assert_eq!(email("author_email", " ana@example.org ").unwrap(), "ana@example.org");
        assert!(email("author_email", "ana@").is_err());
        assert!(email("author_email", "ana example.org").is_err());
    }

    #[test]
    fn test_scores() {
        assert_eq!(percent_score("risk_score", 100.0).unwrap(), 100.0);
        assert!(percent_score("risk_score", 100.5).is_err());
        assert!(percent_score("risk_score", -1.0).is_err());
        assert!(percent_score("risk_score", f64::NAN).is_err());
        assert!(confidence("confidence_score", 0.0).is_ok());
        assert!(confidence("confidence_score", 1.01).is_err());
    }

    #[test]
    fn test_error_names_field() {
        let err = percent_score("transparency_score", 101.0).unwrap_err();
        assert_eq!(err.field(), Some("transparency_score"));
    }
}

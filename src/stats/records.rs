//! Immutable records produced while a worker processes crawl events

use crate::url::ScopeIndicator;

/// Outcome of one fetch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlStatusRecord {
    pub url: String,
    pub status_code: u16,
}

impl UrlStatusRecord {
    pub fn new(url: impl Into<String>, status_code: u16) -> Self {
        Self {
            url: url.into(),
            status_code,
        }
    }
}

/// Metrics for one downloaded page body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlInfoRecord {
    pub url: String,
    pub size_bytes: u64,
    pub outlink_count: u64,
    /// Lowercase media type without parameters; empty when unknown
    pub content_type: String,
}

impl UrlInfoRecord {
    pub fn new(
        url: impl Into<String>,
        size_bytes: u64,
        outlink_count: u64,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            size_bytes,
            outlink_count,
            content_type: content_type.into(),
        }
    }
}

/// One link discovery event with its domain containment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlDetailRecord {
    pub url: String,
    pub scope: ScopeIndicator,
}

impl UrlDetailRecord {
    pub fn new(url: impl Into<String>, scope: ScopeIndicator) -> Self {
        Self {
            url: url.into(),
            scope,
        }
    }
}

/// Normalizes a raw `Content-Type` header value
///
/// Parameters such as `charset` are dropped and the media type is lowercased.
/// A missing header yields an empty string.
pub fn normalize_content_type(raw: Option<&str>) -> String {
    raw.map(|value| {
        value
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_parameters_dropped() {
        assert_eq!(
            normalize_content_type(Some("text/html; charset=UTF-8")),
            "text/html"
        );
    }

    #[test]
    fn test_content_type_lowercased() {
        assert_eq!(normalize_content_type(Some("Image/JPEG")), "image/jpeg");
    }

    #[test]
    fn test_content_type_missing() {
        assert_eq!(normalize_content_type(None), "");
        assert_eq!(normalize_content_type(Some("")), "");
        assert_eq!(normalize_content_type(Some(";charset=utf-8")), "");
    }

    #[test]
    fn test_record_constructors() {
        let status = UrlStatusRecord::new("https://foxnews.com/a", 404);
        assert_eq!(status.status_code, 404);

        let info = UrlInfoRecord::new("https://foxnews.com/a", 10, 2, "text/html");
        assert_eq!(info.size_bytes, 10);
        assert_eq!(info.outlink_count, 2);

        let detail = UrlDetailRecord::new("https://ads.com/b", ScopeIndicator::OutOfScope);
        assert_eq!(detail.scope, ScopeIndicator::OutOfScope);
    }
}

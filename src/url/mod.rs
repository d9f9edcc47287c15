//! URL handling module for Crawlstat
//!
//! This module provides the scope normalization, the file-type exclusion rule
//! and the combined classification consulted whenever a link is discovered.

mod matcher;
mod normalize;

use std::fmt;

// Re-export main functions
pub use matcher::{matches_excluded_extension, EXCLUDED_EXTENSIONS};
pub use normalize::normalize_for_scope;

/// Whether a discovered URL lives on the crawled site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeIndicator {
    /// Normalized URL starts with the target domain
    InScope,
    /// Anything else, including malformed URLs
    OutOfScope,
}

impl ScopeIndicator {
    /// Returns the indicator text used in the URL detail export
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InScope => "OK",
            Self::OutOfScope => "N_OK",
        }
    }

    /// Parses the indicator text used in the URL detail export
    ///
    /// Returns None if the string is neither `OK` nor `N_OK`.
    pub fn from_indicator(s: &str) -> Option<Self> {
        match s {
            "OK" => Some(Self::InScope),
            "N_OK" => Some(Self::OutOfScope),
            _ => None,
        }
    }

    /// Returns true for [`ScopeIndicator::InScope`]
    pub fn is_in_scope(&self) -> bool {
        matches!(self, Self::InScope)
    }
}

impl fmt::Display for ScopeIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a discovered URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlClassification {
    /// Domain containment of the URL
    pub scope: ScopeIndicator,
    /// True when the URL ends with a non-HTML file extension
    pub excluded: bool,
}

impl UrlClassification {
    /// Returns true if the crawling engine should fetch the URL
    ///
    /// Both signals must pass: the URL has to be in scope and not excluded.
    pub fn should_visit(&self) -> bool {
        !self.excluded && self.scope.is_in_scope()
    }
}

/// Classifies a raw URL against the target domain
///
/// The URL is normalized with [`normalize_for_scope`], then checked for
/// domain containment (plain prefix test against `target_domain`) and for an
/// excluded file extension. Neither check can fail; a malformed URL simply
/// does not start with the domain.
///
/// # Arguments
///
/// * `url` - The URL exactly as the crawling engine reported it
/// * `target_domain` - The crawled site's domain, e.g. `foxnews.com`
///
/// # Examples
///
/// ```
/// use crawlstat::url::{classify, ScopeIndicator};
///
/// let c = classify("https://www.foxnews.com/politics", "foxnews.com");
/// assert_eq!(c.scope, ScopeIndicator::InScope);
/// assert!(c.should_visit());
///
/// let c = classify("HTTPS://WWW.FOXNEWS.COM/Story.MP4", "foxnews.com");
/// assert!(c.excluded);
/// assert!(!c.should_visit());
/// ```
pub fn classify(url: &str, target_domain: &str) -> UrlClassification {
    let normalized = normalize_for_scope(url);

    let scope = if normalized.starts_with(target_domain) {
        ScopeIndicator::InScope
    } else {
        ScopeIndicator::OutOfScope
    };

    UrlClassification {
        scope,
        excluded: matches_excluded_extension(&normalized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN: &str = "foxnews.com";

    #[test]
    fn test_in_scope_page() {
        let c = classify("https://www.foxnews.com/us/story", DOMAIN);
        assert_eq!(c.scope, ScopeIndicator::InScope);
        assert!(!c.excluded);
        assert!(c.should_visit());
    }

    #[test]
    fn test_out_of_scope_page() {
        let c = classify("https://ads.com/b", DOMAIN);
        assert_eq!(c.scope, ScopeIndicator::OutOfScope);
        assert!(!c.should_visit());
    }

    #[test]
    fn test_subdomain_is_out_of_scope() {
        let c = classify("https://video.foxnews.com/clip", DOMAIN);
        assert_eq!(c.scope, ScopeIndicator::OutOfScope);
    }

    #[test]
    fn test_excluded_in_scope_url_not_visited() {
        let c = classify("HTTPS://WWW.FOXNEWS.COM/Story.MP4", DOMAIN);
        assert_eq!(c.scope, ScopeIndicator::InScope);
        assert!(c.excluded);
        assert!(!c.should_visit());
    }

    #[test]
    fn test_excluded_and_out_of_scope_are_independent() {
        let c = classify("https://cdn.example.com/app.js", DOMAIN);
        assert_eq!(c.scope, ScopeIndicator::OutOfScope);
        assert!(c.excluded);
    }

    #[test]
    fn test_malformed_url_is_out_of_scope() {
        for raw in ["", "::::", "mailto:someone@foxnews.com", "javascript:void(0)"] {
            let c = classify(raw, DOMAIN);
            assert_eq!(c.scope, ScopeIndicator::OutOfScope, "{:?}", raw);
            assert!(!c.excluded, "{:?}", raw);
        }
    }

    #[test]
    fn test_root_url_in_scope() {
        let c = classify("https://www.foxnews.com/", DOMAIN);
        assert_eq!(c.scope, ScopeIndicator::InScope);
        assert!(c.should_visit());
    }

    #[test]
    fn test_prefix_match_is_literal() {
        // Plain prefix test, so a longer host sharing the prefix is in scope
        let c = classify("https://foxnews.com.evil.net/", DOMAIN);
        assert_eq!(c.scope, ScopeIndicator::InScope);
    }

    #[test]
    fn test_indicator_strings() {
        assert_eq!(ScopeIndicator::InScope.as_str(), "OK");
        assert_eq!(ScopeIndicator::OutOfScope.as_str(), "N_OK");
        assert_eq!(ScopeIndicator::from_indicator("OK"), Some(ScopeIndicator::InScope));
        assert_eq!(
            ScopeIndicator::from_indicator("N_OK"),
            Some(ScopeIndicator::OutOfScope)
        );
        assert_eq!(ScopeIndicator::from_indicator("ok"), None);
        assert_eq!(ScopeIndicator::OutOfScope.to_string(), "N_OK");
    }
}

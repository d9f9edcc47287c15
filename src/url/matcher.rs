use crate::url::normalize::path_portion;

/// File extensions that are never worth fetching as HTML pages
pub const EXCLUDED_EXTENSIONS: &[&str] = &[
    "vcf", "js", "avi", "mp3", "mid", "css", "mp4", "xml", "mov", "mpeg", "zip", "ram", "wav",
    "m4v", "gz",
];

/// Checks whether a normalized URL points at an excluded file type
///
/// Only the final path segment is inspected: the text after its last `.`
/// must equal one of [`EXCLUDED_EXTENSIONS`], ignoring ASCII case. Anything
/// after `?` or `#` is not part of the path and does not affect the result.
///
/// # Arguments
///
/// * `normalized` - A URL already passed through `normalize_for_scope`
///
/// # Examples
///
/// ```
/// use crawlstat::url::matches_excluded_extension;
///
/// assert!(matches_excluded_extension("foxnews.com/clip.mp4"));
/// assert!(matches_excluded_extension("foxnews.com/app.JS?v=3"));
/// assert!(!matches_excluded_extension("foxnews.com/js"));
/// assert!(!matches_excluded_extension("foxnews.com/story.html"));
/// ```
pub fn matches_excluded_extension(normalized: &str) -> bool {
    let path = path_portion(normalized);
    let last_segment = path.rsplit('/').next().unwrap_or(path);

    match last_segment.rsplit_once('.') {
        Some((_, extension)) => EXCLUDED_EXTENSIONS
            .iter()
            .any(|excluded| extension.eq_ignore_ascii_case(excluded)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_extension_is_excluded() {
        for ext in EXCLUDED_EXTENSIONS {
            let url = format!("foxnews.com/file.{}", ext);
            assert!(matches_excluded_extension(&url), "{} should be excluded", url);
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert!(matches_excluded_extension("foxnews.com/Story.MP4"));
        assert!(matches_excluded_extension("foxnews.com/feed.Xml"));
    }

    #[test]
    fn test_html_not_excluded() {
        assert!(!matches_excluded_extension("foxnews.com/story.html"));
        assert!(!matches_excluded_extension("foxnews.com/story"));
        assert!(!matches_excluded_extension("foxnews.com"));
    }

    #[test]
    fn test_extension_needs_dot() {
        assert!(!matches_excluded_extension("foxnews.com/css"));
        assert!(!matches_excluded_extension("foxnews.com/category/gz"));
    }

    #[test]
    fn test_query_string_ignored() {
        assert!(matches_excluded_extension("foxnews.com/a.mp4?b=1&a=2"));
        assert!(matches_excluded_extension("foxnews.com/a.mp4?a=2&b=1"));
        assert!(!matches_excluded_extension("foxnews.com/page?file=a.mp4"));
    }

    #[test]
    fn test_extension_only_in_earlier_segment() {
        assert!(!matches_excluded_extension("foxnews.com/archive.zip/index"));
    }

    #[test]
    fn test_partial_extension_not_matched() {
        assert!(!matches_excluded_extension("foxnews.com/style.scss"));
        assert!(!matches_excluded_extension("foxnews.com/data.json"));
        assert!(!matches_excluded_extension("foxnews.com/movie.mp45"));
    }

    #[test]
    fn test_empty_string() {
        assert!(!matches_excluded_extension(""));
    }
}

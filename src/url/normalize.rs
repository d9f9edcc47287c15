/// Normalizes a raw URL into the form used for scope and exclusion checks
///
/// The steps are applied in order:
/// 1. Strip a single trailing slash
/// 2. Replace commas with underscores
/// 3. Lowercase
/// 4. Strip a leading `http://` or `https://`, and a `www.` directly after it
///
/// The result is not a valid URL anymore; it is only meant for prefix and
/// suffix tests. Malformed input is passed through the same steps unchanged.
///
/// # Examples
///
/// ```
/// use crawlstat::url::normalize_for_scope;
///
/// assert_eq!(normalize_for_scope("https://www.FoxNews.com/"), "foxnews.com");
/// assert_eq!(normalize_for_scope("http://foxnews.com/a,b"), "foxnews.com/a_b");
/// assert_eq!(normalize_for_scope("not a url"), "not a url");
/// ```
pub fn normalize_for_scope(raw: &str) -> String {
    let trimmed = raw.strip_suffix('/').unwrap_or(raw);
    let lowered = trimmed.replace(',', "_").to_lowercase();

    let without_scheme = lowered
        .strip_prefix("https://")
        .or_else(|| lowered.strip_prefix("http://"));

    match without_scheme {
        Some(rest) => rest.strip_prefix("www.").unwrap_or(rest).to_string(),
        None => lowered,
    }
}

/// Returns the path portion of a normalized URL, without query or fragment
pub(crate) fn path_portion(normalized: &str) -> &str {
    match normalized.find(['?', '#']) {
        Some(idx) => &normalized[..idx],
        None => normalized,
    }
}

//! Search and listing helpers.
//!
//! Lives in `core` so the matching rules can be unit tested without a
//! database. The repository layer feeds [`like_pattern`] into an `ILIKE`
//! with `ESCAPE '\'`.

/// Maximum page size a client may request.
pub const MAX_LIST_LIMIT: i64 = 500;

/// Escape character used in generated `LIKE` patterns.
pub const LIKE_ESCAPE: char = '\\';

/// Normalize a user-supplied search term. Blank input means "no filter".
pub fn normalize_search(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Build a case-insensitive substring pattern for `ILIKE ... ESCAPE '\'`.
///
/// `%`, `_` and the escape character itself match literally.
///
/// # Examples
///
/// ```
/// use registrar_core::search::like_pattern;
/// assert_eq!(like_pattern("smith"), "%smith%");
/// assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
/// ```
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Clamp a user-provided limit. `None` means no limit (the full table).
pub fn clamp_limit(limit: Option<i64>) -> Option<i64> {
    limit.map(|l| l.clamp(1, MAX_LIST_LIMIT))
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

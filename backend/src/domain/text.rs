//! Case-insensitive text matching shared by the catalogue filters.

/// Lower-case a search term once so it can be reused across many records.
pub fn fold(term: &str) -> String {
    term.to_lowercase()
}

/// Whether `haystack` contains an already-folded `needle`, ignoring case.
///
/// # Examples
/// ```
/// use backend::domain::text::{contains_folded, fold};
///
/// assert!(contains_folded("North Goa", &fold("GOA")));
/// assert!(contains_folded("anything", &fold("")));
/// ```
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

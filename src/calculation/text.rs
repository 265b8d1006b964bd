use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Bracketed annotations such as `[A1]` or `[kod 0412]`.
    static ref BRACKET_ANNOTATION: Regex = Regex::new(r"\[[^\]]*\]").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Strip `[...]` annotations, collapse whitespace runs and trim.
/// An empty result is `None` so callers can apply their own fallback.
///
/// ```
/// use faktura_vat::calculation::clean_text;
///
/// assert_eq!(clean_text("  VW [0412]  Golf\n"), Some("VW Golf".to_string()));
/// assert_eq!(clean_text(" [x] "), None);
/// ```
pub fn clean_text(value: &str) -> Option<String> {
    let without_annotations = BRACKET_ANNOTATION.replace_all(value, " ");
    let collapsed = WHITESPACE_RUN.replace_all(&without_annotations, " ");
    let trimmed = collapsed.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

//! Text normalization applied before intent prediction.

/// Lowercase, drop punctuation, collapse whitespace.
///
/// Word characters (letters, digits, `_`) and whitespace survive; everything
/// else is removed without leaving a gap, so `"e-mail"` becomes `"email"`.
pub fn clean_text(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

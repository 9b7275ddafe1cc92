//! Characters allowed inside a placeholder key.

/// Returns true if `c` may appear in the key part of a `${KEY}` placeholder.
///
/// Only ASCII `-`, `.`, digits, letters and `_` are accepted; Unicode letters
/// are rejected on purpose so keys stay valid environment variable names.
///
/// # Examples
///
/// ```
/// use envrepl::core::is_key_char;
///
/// assert!(is_key_char('A'));
/// assert!(is_key_char('.'));
/// assert!(!is_key_char('!'));
/// assert!(!is_key_char('é'));
/// ```
pub fn is_key_char(c: char) -> bool {
    matches!(c, '-' | '.' | '0'..='9' | 'A'..='Z' | '_' | 'a'..='z')
}

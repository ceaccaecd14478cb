//! Separator table for non-indexable code points.

/// Check whether a code point is a separator that never participates in a
/// token.
///
/// Separators are ASCII whitespace, ASCII punctuation, and a small fixed set
/// of full-width CJK punctuation. Everything else is indexable.
///
/// # Examples
///
/// ```
/// use yari::analysis::is_separator;
///
/// assert!(is_separator(' '));
/// assert!(is_separator('、'));
/// assert!(!is_separator('a'));
/// assert!(!is_separator('日'));
/// ```
#[inline]
pub fn is_separator(c: char) -> bool {
    matches!(c,
        // ASCII whitespace
        ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r'
        // ASCII punctuation
        | '!'..='/'
        | ':'..='@'
        | '['..='`'
        | '{'..='~'
        // Full-width space and CJK punctuation
        | '\u{3000}' | '\u{3001}' | '\u{3002}'
        | '\u{FF01}' | '\u{FF08}' | '\u{FF09}'
        | '\u{FF0C}' | '\u{FF1A}' | '\u{FF1B}' | '\u{FF1F}')
}

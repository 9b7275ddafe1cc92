//! Single-pass placeholder scanner.
//!
//! Finds the leftmost complete `${KEY}` or `${KEY:default}` expression in a
//! line. Only one span is reported per call; the engine rescans the rewritten
//! line to pick up the next one.

use super::charset::is_key_char;

/// Location of one placeholder inside a line, as byte offsets.
///
/// All syntax characters (`$`, `{`, `:`, `}`, `\`) are ASCII, so every offset
/// lies on a char boundary and can be used to slice the line directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Offset of the `$` of the open tag.
    pub start: usize,
    /// Offset of the `:` that ends the key, or of the closing `}` when the
    /// placeholder has no default.
    pub key_end: usize,
    /// Offset of the closing `}`.
    pub close: usize,
    /// A `\}` was skipped while looking for the closing brace.
    pub had_escaped_end: bool,
}

impl Span {
    /// The key between `${` and the key terminator.
    pub fn key<'a>(&self, line: &'a str) -> &'a str {
        &line[self.start + 2..self.key_end]
    }

    pub fn has_default(&self) -> bool {
        self.key_end != self.close
    }

    /// The written-out default, which may be empty. `None` for `${KEY}`.
    pub fn default_value<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.has_default()
            .then(|| &line[self.key_end + 1..self.close])
    }

    /// The whole expression, `${` through `}` inclusive.
    pub fn raw<'a>(&self, line: &'a str) -> &'a str {
        &line[self.start..=self.close]
    }

    /// Replace the whole expression in `line` with `replacement`.
    pub fn splice(&self, line: &str, replacement: &str) -> String {
        let mut out = String::with_capacity(line.len() + replacement.len());
        out.push_str(&line[..self.start]);
        out.push_str(replacement);
        out.push_str(&line[self.close + 1..]);
        out
    }
}

/// Scan `line` for the leftmost complete placeholder.
///
/// Rules:
/// - `${` opens a tag; a later `${` replaces any still-open one.
/// - Inside the key, the first `:` ends the key and starts the default; the
///   first `}` ends both key and expression.
/// - A key character outside [`is_key_char`] abandons the open tag.
/// - Inside the default any character is accepted, and a `}` preceded by `\`
///   does not close the expression.
///
/// Returns `None` when no expression is complete by the end of the line.
pub fn scan(line: &str) -> Option<Span> {
    let bytes = line.as_bytes();
    let mut start: Option<usize> = None;
    let mut key_end: Option<usize> = None;
    let mut had_escaped_end = false;

    let mut chars = line.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c == '$' && matches!(chars.peek(), Some((_, '{'))) {
            chars.next();
            start = Some(i);
            key_end = None;
            had_escaped_end = false;
            continue;
        }

        let Some(open) = start else {
            continue;
        };

        match key_end {
            None => match c {
                ':' => key_end = Some(i),
                '}' => {
                    return Some(Span {
                        start: open,
                        key_end: i,
                        close: i,
                        had_escaped_end,
                    });
                }
                c if !is_key_char(c) => start = None,
                _ => {}
            },
            Some(key_end) => {
                if c != '}' {
                    continue;
                }
                if bytes[i - 1] == b'\\' {
                    had_escaped_end = true;
                } else {
                    return Some(Span {
                        start: open,
                        key_end,
                        close: i,
                        had_escaped_end,
                    });
                }
            }
        }
    }

    None
}

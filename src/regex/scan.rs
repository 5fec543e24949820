// Structural scanning over raw pattern text.
//
// All three walks share the same lexical rules:
// - `\` makes the next character inert
// - `[` opens a class that only the next `]` closes; nothing inside counts
// - depth is tracked only outside classes

use crate::error::PatternError;

/// Index of the `)` balancing the first `(` found at or after `from`.
///
/// Returns [`PatternError::Structural`] if the text ends before the depth
/// returns to zero.
pub(crate) fn find_close(pattern: &str, from: usize) -> Result<usize, PatternError> {
    let mut depth = 0usize;
    let mut in_class = false;
    let mut escaped = false;

    for (i, c) in pattern[from..].char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if in_class {
            if c == ']' {
                in_class = false;
            }
        } else {
            match c {
                '[' => in_class = true,
                '(' => depth += 1,
                ')' if depth > 0 => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(from + i);
                    }
                }
                _ => {}
            }
        }
    }

    Err(PatternError::Structural(pattern[from..].to_owned()))
}

/// Split `pattern` on every top-level `|`.
///
/// A pattern without one comes back as a single alternative. A stray `)`
/// drives the depth negative, and no `|` after it splits.
pub(crate) fn split_alts(pattern: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut depth = 0isize;
    let mut in_class = false;
    let mut escaped = false;

    for (i, c) in pattern.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
            continue;
        }
        if in_class {
            if c == ']' {
                in_class = false;
            }
            continue;
        }
        match c {
            '[' => in_class = true,
            '(' => depth += 1,
            ')' => depth -= 1,
            '|' if depth == 0 => {
                out.push(&pattern[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    out.push(&pattern[start..]);
    out
}

/// Number of groups opened anywhere in `pattern`, at any depth.
///
/// This is how many group ids the text consumes, so numbering can resume
/// after it.
pub(crate) fn count_groups(pattern: &str) -> usize {
    let mut n = 0;
    let mut in_class = false;
    let mut escaped = false;

    for c in pattern.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
            continue;
        }
        if in_class {
            if c == ']' {
                in_class = false;
            }
            continue;
        }
        match c {
            '[' => in_class = true,
            '(' => n += 1,
            _ => {}
        }
    }

    n
}

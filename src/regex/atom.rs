// Leaf syntax: one character test per atom.

use crate::error::PatternError;

/// A single-character predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Atom {
    /// `.`: anything but a newline.
    AnyButNewline,
    /// `[^]`: anything at all.
    Any,
    /// `[...]` or `[^...]`.
    Set { chars: Vec<char>, negated: bool },
    /// `\d`
    Digit,
    /// `\w`
    Word,
    Literal(char),
}

impl Atom {
    #[inline]
    pub(crate) fn is_match(&self, c: char) -> bool {
        match self {
            Atom::AnyButNewline => c != '\n',
            Atom::Any => true,
            Atom::Set { chars, negated } => chars.contains(&c) != *negated,
            Atom::Digit => c.is_ascii_digit(),
            Atom::Word => c.is_ascii_alphanumeric() || c == '_',
            Atom::Literal(l) => c == *l,
        }
    }
}

/// Parse the atom at the head of `pattern`.
///
/// Returns the predicate and the text after it, or `None` on empty input.
/// A class runs to the first `]` after its opening bracket; escapes inside
/// it are taken literally.
pub(crate) fn next_atom(pattern: &str) -> Result<Option<(Atom, &str)>, PatternError> {
    let mut chars = pattern.chars();
    let Some(head) = chars.next() else {
        return Ok(None);
    };

    let parsed = match head {
        '.' => (Atom::AnyButNewline, &pattern[1..]),
        '[' if pattern.starts_with("[^]") => (Atom::Any, &pattern[3..]),
        '[' => {
            let negated = pattern.starts_with("[^");
            let open = if negated { 2 } else { 1 };
            let close = pattern[open..]
                .find(']')
                .map(|j| open + j)
                .ok_or_else(|| PatternError::MalformedClass(pattern.to_owned()))?;
            let set = Atom::Set {
                chars: pattern[open..close].chars().collect(),
                negated,
            };
            (set, &pattern[close + 1..])
        }
        '\\' => match chars.next() {
            None => (Atom::Literal('\\'), ""),
            Some('d') => (Atom::Digit, &pattern[2..]),
            Some('w') => (Atom::Word, &pattern[2..]),
            Some(t) => (Atom::Literal(t), &pattern[1 + t.len_utf8()..]),
        },
        c => (Atom::Literal(c), &pattern[c.len_utf8()..]),
    };

    Ok(Some(parsed))
}

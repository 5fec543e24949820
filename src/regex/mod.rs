//! The mini-regex engine.
//!
//! Supported syntax:
//!
//! | syntax      | meaning                                        |
//! |-------------|------------------------------------------------|
//! | `a`         | literal character                              |
//! | `.`         | any character except newline                   |
//! | `[abc]`     | any of a, b, c                                 |
//! | `[^abc]`    | any character except a, b, c (`[^]`: anything) |
//! | `\d` `\w`   | ASCII digit; ASCII letter, digit or `_`        |
//! | `\X`        | literal X                                      |
//! | `( … )`     | group, numbered by its opening parenthesis     |
//! | `a\|b`      | alternation                                    |
//! | `+` `?`     | one or more; zero or one                       |
//! | `^` `$`     | start of line; end of line                     |
//! | `\1` … `\9` | the text captured by group 1 … 9               |
//!
//! There is no `*`, no `{m,n}`, no ranges inside classes and no lookaround.
//!
//! A pattern is compiled once into a small node tree and matched by
//! recursive backtracking over it. Pathological patterns can take
//! exponential time; nothing bounds that.

mod atom;
mod backref;
mod captures;
mod generator;
mod parse;
mod scan;

use std::ops::ControlFlow;

use crate::error::PatternError;

pub use captures::Captures;

use generator::generate;
use parse::{parse_seq, Node};

/// A compiled pattern.
///
/// # Example
///
/// ```rust
/// use tinygrep::Regex;
///
/// let re = Regex::new(r"^(\w+) \1$").unwrap();
/// assert!(re.is_match("hey hey"));
/// assert!(!re.is_match("hey you"));
///
/// let caps = re.captures("hey hey").unwrap();
/// assert_eq!(caps.get(0), Some("hey"));
/// ```
#[derive(Debug, Clone)]
pub struct Regex {
    pattern: String,
    branches: Vec<Branch>,
}

/// One way a prefix of the input can be consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefix<'t> {
    /// The consumed prefix.
    pub matched: &'t str,
    /// Group captures for this particular way of matching.
    pub captures: Captures<'t>,
}

/// A top-level alternative with its own anchors and its own group numbering.
#[derive(Debug, Clone)]
struct Branch {
    start: bool,
    end: bool,
    nodes: Vec<Node>,
}

impl Regex {
    /// Compile `pattern`.
    ///
    /// # Errors
    ///
    /// [`PatternError::Structural`] for an unbalanced `(`, and
    /// [`PatternError::MalformedClass`] for a `[` without its `]`.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let branches = scan::split_alts(pattern)
            .into_iter()
            .map(Branch::compile)
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!(
            "compiled pattern {:?} into {} branch(es)",
            pattern,
            branches.len()
        );

        Ok(Self {
            pattern: pattern.to_owned(),
            branches,
        })
    }

    /// The pattern this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Whether the pattern matches somewhere in `text`, honouring anchors.
    pub fn is_match(&self, text: &str) -> bool {
        self.captures(text).is_some()
    }

    /// Captures of the first match found, trying top-level alternatives
    /// left to right, start offsets left to right, and greedy choices first.
    pub fn captures<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        self.branches.iter().find_map(|branch| branch.search(text))
    }

    /// Every way each top-level alternative can consume a prefix of `text`,
    /// in exploration order.
    ///
    /// Only offset 0 is tried, whatever the `^` anchor says; a `$` anchor
    /// keeps only the ways that consume all of `text`.
    pub fn prefixes<'t>(&self, text: &'t str) -> Vec<Prefix<'t>> {
        let mut out = Vec::new();
        for branch in &self.branches {
            let flow = generate(&branch.nodes, text, Captures::default(), &mut |rest, captures| {
                if !branch.end || rest.is_empty() {
                    out.push(Prefix {
                        matched: &text[..text.len() - rest.len()],
                        captures,
                    });
                }
                ControlFlow::Continue(())
            });
            debug_assert!(flow.is_continue());
        }
        out
    }
}

impl std::fmt::Display for Regex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl std::str::FromStr for Regex {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Branch {
    fn compile(alt: &str) -> Result<Self, PatternError> {
        let (start, body) = match alt.strip_prefix('^') {
            Some(rest) => (true, rest),
            None => (false, alt),
        };
        let (end, body) = match body.strip_suffix('$') {
            Some(rest) => (true, rest),
            None => (false, body),
        };

        Ok(Self {
            start,
            end,
            nodes: parse_seq(body, 0)?,
        })
    }

    /// Candidate start offsets: only 0 when anchored, else every char
    /// boundary including the end of the text.
    fn offsets<'a>(&self, text: &'a str) -> impl Iterator<Item = usize> + 'a {
        let limit = if self.start { 1 } else { usize::MAX };
        text.char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .take(limit)
    }

    fn search<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        for offset in self.offsets(text) {
            let mut found = None;
            let flow = generate(&self.nodes, &text[offset..], Captures::default(), &mut |rest, caps| {
                if self.end && !rest.is_empty() {
                    return ControlFlow::Continue(());
                }
                found = Some(caps);
                ControlFlow::Break(())
            });
            if flow.is_break() {
                return found;
            }
        }
        None
    }
}

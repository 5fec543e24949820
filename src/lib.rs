//! # tinygrep
//!
//! A tiny grep with its own backtracking regex engine.
//!
//! The engine ([`Regex`]) understands a deliberately small syntax: literals,
//! `.`, classes (`[abc]`, `[^abc]`), `\d`, `\w`, groups, alternation, `+`,
//! `?`, the anchors `^` and `$`, and backreferences `\1`…`\9`. It matches by
//! recursive backtracking with per-branch capture lists; see the
//! [`regex`](crate::Regex) docs for the full table.
//!
//! Around it sits a small search front end: [`Source`]s produce documents,
//! a [`Matcher`] tests each line, and [`search()`] wires them together.
//!
//! # Quick Start
//!
//! ```rust
//! assert!(tinygrep::matches("hello world", "^hello"));
//! assert!(tinygrep::matches("foofoo", r"(foo)\1"));
//! assert!(!tinygrep::matches("foobar", r"(foo)\1"));
//! ```
//!
//! # Searching
//!
//! ```rust
//! use tinygrep::{Document, DocumentKind, GrepError, Source, WalkConfig};
//!
//! // A minimal in-memory source for demonstration
//! struct Memory(&'static str);
//!
//! impl Source for Memory {
//!     fn documents(&self, _config: &WalkConfig) -> Box<dyn Iterator<Item = Result<Document, GrepError>>> {
//!         Box::new(std::iter::once(Ok(Document {
//!             path:  None,
//!             label: None,
//!             kind:  DocumentKind::Stdin,
//!             text:  self.0.to_string(),
//!         })))
//!     }
//! }
//!
//! let results = tinygrep::search()
//!     .source(Memory("apple pie\nblueberry\nraspberry jam"))
//!     .pattern(".+berry")
//!     .collect_lines(true)
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(results.matches, 2);
//! assert_eq!(results.lines[1].to_string(), "raspberry jam");
//! ```

#![forbid(unsafe_code)]

mod builder;
mod document;
mod engine;
mod error;
mod regex;
mod results;
mod sources;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::SearchBuilder;
pub use document::{Document, DocumentKind, Lines};
pub use engine::WalkConfig;
pub use error::{GrepError, PatternError};
pub use regex::{Captures, Prefix, Regex};
pub use results::{MatchedLine, Results, ScanStats};
pub use sources::{FileSource, StdinSource, TreeSource};
pub use traits::{Matcher, Source};

// ── Entry points ──────────────────────────────────────────────────────────────

/// Create a new [`SearchBuilder`] to configure and run a search.
pub fn search() -> SearchBuilder {
    SearchBuilder::default()
}

/// Whether `pattern` matches somewhere in `line`.
///
/// A pattern that does not compile matches nothing.
///
/// # Example
///
/// ```rust
/// assert!(tinygrep::matches("abab", "(ab)+"));
/// assert!(!tinygrep::matches("cats", "^cat$"));
/// assert!(!tinygrep::matches("anything", "(unclosed"));
/// ```
pub fn matches(line: &str, pattern: &str) -> bool {
    match Regex::new(pattern) {
        Ok(re) => re.is_match(line),
        Err(e) => {
            log::debug!("pattern {:?} cannot match: {}", pattern, e);
            false
        }
    }
}

use crate::document::Document;
use crate::engine::WalkConfig;
use crate::error::GrepError;

/// A source of documents to search through.
///
/// Implement this to make tinygrep search anything line-oriented: files,
/// standard input, directory trees, in-memory buffers, or any other text.
///
/// # Object Safety
///
/// `Source` is object-safe. The builder stores sources as `Box<dyn Source>`,
/// so `documents()` returns a boxed iterator rather than `impl Iterator`.
///
/// # Error Handling
///
/// Recoverable errors (missing file, permission denied) should be yielded as
/// `Err(GrepError)` rather than panicking or silently skipping. The engine
/// skips the failed input and collects the error into [`Results::errors`]
/// when `.collect_errors(true)` is set on the builder.
///
/// [`Results::errors`]: crate::Results::errors
///
/// # Example
///
/// ```rust
/// use tinygrep::{Document, DocumentKind, GrepError, Source, WalkConfig};
///
/// struct Memory(&'static str);
///
/// impl Source for Memory {
///     fn documents(&self, _config: &WalkConfig) -> Box<dyn Iterator<Item = Result<Document, GrepError>>> {
///         let doc = Document {
///             path:  None,
///             label: Some("memory".into()),
///             kind:  DocumentKind::Stdin,
///             text:  self.0.to_string(),
///         };
///         Box::new(std::iter::once(Ok(doc)))
///     }
/// }
/// ```
pub trait Source: Send + Sync {
    /// Yield the documents to search, in the order their lines should be
    /// reported.
    ///
    /// `config` carries traversal parameters (thread count, depth limit) so
    /// sources can honour them during their own traversal.
    fn documents(&self, config: &WalkConfig) -> Box<dyn Iterator<Item = Result<Document, GrepError>>>;
}

/// Decides whether a line is a match.
///
/// [`Regex`](crate::Regex) implements this; implement it yourself for any
/// other line test.
///
/// # Example
///
/// ```rust
/// use tinygrep::Matcher;
///
/// struct LongLine(usize);
///
/// impl Matcher for LongLine {
///     fn is_match(&self, line: &str) -> bool {
///         line.chars().count() > self.0
///     }
/// }
/// ```
pub trait Matcher: Send + Sync {
    /// Returns `true` if this line should be reported.
    fn is_match(&self, line: &str) -> bool;
}

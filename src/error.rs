use std::path::PathBuf;
use thiserror::Error;

/// A pattern that cannot be compiled.
///
/// Both variants carry the fragment of the pattern in which the problem was
/// found. Either one is fatal for the whole pattern: nothing can match it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("unbalanced parentheses in `{0}`")]
    Structural(String),

    #[error("character class without closing `]` in `{0}`")]
    MalformedClass(String),
}

#[derive(Error, Debug)]
pub enum GrepError {
    // Traversal
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("symlink loop: {}", .0.display())]
    SymlinkLoop(PathBuf),

    // Config
    #[error("invalid pattern: {0}")]
    Pattern(#[from] PatternError),

    #[error("no pattern provided")]
    MissingPattern,

    #[error("no source provided")]
    MissingSource,

    #[error("invalid thread count: {0}")]
    InvalidThreadCount(usize),

    // Runtime
    #[error("IO error: {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output")]
    Output(#[source] std::io::Error),

    // Third-party extensibility
    #[error("source error: {0}")]
    Source(String),
}

impl GrepError {
    /// The path this error occurred at, if applicable.
    /// Callers use this to present "Skipped: <path>" without pattern matching on variants.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::PermissionDenied(p)
            | Self::NotFound(p)
            | Self::SymlinkLoop(p)
            | Self::Io { path: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Whether the search can continue after this error.
    ///
    /// Recoverable errors concern a single input (missing file, permission
    /// denied, unreadable bytes). They are collected and surfaced after the
    /// search completes, and the remaining inputs are still searched.
    ///
    /// Everything else (bad pattern, missing source, broken output) halts.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied(_)
                | Self::NotFound(_)
                | Self::SymlinkLoop(_)
                | Self::Io { .. }
                | Self::Source(_)
        )
    }

    /// Map an I/O failure on `path` to the most specific variant.
    pub(crate) fn from_io(path: PathBuf, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::Io { path, source: err },
        }
    }
}

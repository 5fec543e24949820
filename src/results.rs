use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::GrepError;

/// The output of a completed search.
///
/// `lines` and `errors` are both opt-in and disabled by default to avoid
/// allocation overhead in the common case. Enable them on the builder:
/// `.collect_lines(true)` and `.collect_errors(true)`.
pub struct Results {
    /// Total number of lines that matched.
    pub matches: usize,

    /// Matching lines, in document order then line order.
    /// Only populated if `.collect_lines(true)` was set on the builder.
    pub lines: Vec<MatchedLine>,

    /// Scan statistics.
    pub stats: ScanStats,

    /// Non-fatal errors encountered during the search (missing file, etc.).
    /// Only populated if `.collect_errors(true)` was set on the builder.
    pub errors: Vec<GrepError>,
}

/// One matching line and where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedLine {
    /// The document's label, printed as a `label:` prefix.
    pub label: Option<String>,

    /// The document's path, if it has one.
    pub path: Option<PathBuf>,

    /// 1-based line number within the document.
    pub number: usize,

    /// The line, without its terminator.
    pub text: String,
}

impl fmt::Display for MatchedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{}:{}", label, self.text),
            None => f.write_str(&self.text),
        }
    }
}

/// Statistics for a completed scan.
pub struct ScanStats {
    /// Documents read (files, or standard input).
    pub documents: usize,

    /// Lines tested against the matcher.
    pub lines: usize,

    /// Wall-clock time from search start to completion.
    pub duration: Duration,

    /// Lines tested per second. Equals
    /// `lines / duration.as_secs_f64()`, clamped to 0 on zero-duration runs.
    pub lines_per_sec: usize,
}

impl ScanStats {
    /// Compute `lines_per_sec` from raw counts and duration.
    pub(crate) fn compute(documents: usize, lines: usize, duration: Duration) -> Self {
        let lps = if duration.as_secs_f64() > 0.0 {
            (lines as f64 / duration.as_secs_f64()) as usize
        } else {
            0
        };
        Self {
            documents,
            lines,
            duration,
            lines_per_sec: lps,
        }
    }
}

use std::io;

use crate::engine::{EngineOptions, LineSink, WalkConfig, run};
use crate::error::GrepError;
use crate::regex::Regex;
use crate::results::{MatchedLine, Results};
use crate::traits::{Matcher, Source};

// ---------------------------------------------------------------------------
// SearchBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and executing a search.
///
/// Created via [`tinygrep::search()`](crate::search). Configure with chained
/// builder methods, then call [`run()`](SearchBuilder::run) to execute.
///
/// # Example
///
/// ```rust,ignore
/// let results = tinygrep::search()
///     .source(TreeSource::new(["src"]))
///     .pattern(r"fn \w+")
///     .limit(10)
///     .collect_lines(true)
///     .run()?;
/// ```
pub struct SearchBuilder {
    source:         Option<Box<dyn Source>>,
    matcher:        Option<Box<dyn Matcher>>,
    pattern:        Option<String>,
    sink:           Option<LineSink>,
    limit:          Option<usize>,
    threads:        usize,
    max_depth:      Option<usize>,
    collect_lines:  bool,
    collect_errors: bool,
}

impl Default for SearchBuilder {
    fn default() -> Self {
        Self {
            source:         None,
            matcher:        None,
            pattern:        None,
            sink:           None,
            limit:          None,
            threads:        num_cpus(),
            max_depth:      None,
            collect_lines:  false,
            collect_errors: false,
        }
    }
}

impl SearchBuilder {
    // ── Source ────────────────────────────────────────────────────────────

    /// Set the source to search through.
    ///
    /// Any type implementing [`Source`] is accepted: standard input, named
    /// files, directory trees, in-memory text, etc.
    pub fn source(mut self, s: impl Source + 'static) -> Self {
        self.source = Some(Box::new(s));
        self
    }

    // ── Matcher ───────────────────────────────────────────────────────────

    /// Set a custom matcher. Takes precedence over [`pattern()`](Self::pattern).
    pub fn with_matcher(mut self, m: impl Matcher + 'static) -> Self {
        self.matcher = Some(Box::new(m));
        self
    }

    /// Match lines against a mini-regex pattern.
    ///
    /// The pattern is compiled by [`run()`](Self::run), which reports a
    /// malformed pattern as [`GrepError::Pattern`].
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    // ── Output ────────────────────────────────────────────────────────────

    /// Hand each matching line to `f` as soon as it is found, before the
    /// rest of the input is read.
    ///
    /// An error from `f` stops the search; `run()` returns it as
    /// [`GrepError::Output`].
    pub fn on_match<F>(mut self, f: F) -> Self
    where
        F: FnMut(&MatchedLine) -> io::Result<()> + 'static,
    {
        self.sink = Some(Box::new(f));
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Stop after `n` matching lines.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Number of threads used to walk directory trees.
    ///
    /// Defaults to the number of logical CPU cores. `0` is rejected by `run()`.
    pub fn threads(mut self, n: usize) -> Self {
        self.threads = n;
        self
    }

    /// Maximum directory depth for recursive sources. `0` means the root
    /// only, `1` one level of children, and so on. Unlimited by default.
    pub fn max_depth(mut self, d: usize) -> Self {
        self.max_depth = Some(d);
        self
    }

    /// Collect matching lines into [`Results::lines`].
    ///
    /// Disabled by default; only the match count is kept.
    pub fn collect_lines(mut self, yes: bool) -> Self {
        self.collect_lines = yes;
        self
    }

    /// Collect non-fatal errors into [`Results::errors`].
    ///
    /// Disabled by default. Failed inputs are skipped either way.
    pub fn collect_errors(mut self, yes: bool) -> Self {
        self.collect_errors = yes;
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Execute the search and return results.
    ///
    /// # Errors
    ///
    /// Returns `Err` for fatal configuration errors: no source, no pattern
    /// or matcher, a malformed pattern, or a thread count of zero. Failures
    /// on individual inputs are not fatal; see
    /// [`collect_errors()`](Self::collect_errors).
    pub fn run(self) -> Result<Results, GrepError> {
        let source = self.source.ok_or(GrepError::MissingSource)?;

        if self.threads == 0 {
            return Err(GrepError::InvalidThreadCount(0));
        }

        let matcher: Box<dyn Matcher> = match (self.matcher, self.pattern) {
            (Some(m), _)       => m,
            (None, Some(p))    => Box::new(Regex::new(&p)?),
            (None, None)       => return Err(GrepError::MissingPattern),
        };

        let opts = EngineOptions {
            config: WalkConfig {
                threads:   self.threads,
                max_depth: self.max_depth,
                limit:     self.limit,
            },
            source,
            matcher,
            sink:           self.sink,
            collect_lines:  self.collect_lines,
            collect_errors: self.collect_errors,
        };

        run(opts)
    }
}

// ---------------------------------------------------------------------------
// Built-in matchers
// ---------------------------------------------------------------------------

impl Matcher for Regex {
    fn is_match(&self, line: &str) -> bool {
        Regex::is_match(self, line)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Get the logical CPU count, with a safe fallback.
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

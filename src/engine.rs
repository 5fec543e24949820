use std::io;
use std::time::Instant;

use crate::error::GrepError;
use crate::results::{MatchedLine, Results, ScanStats};
use crate::traits::{Matcher, Source};

// ---------------------------------------------------------------------------
// WalkConfig
// ---------------------------------------------------------------------------

/// Traversal parameters passed from the builder to sources and the engine.
///
/// Callers configure these via the builder methods (`.threads()`,
/// `.max_depth()`, `.limit()`); custom [`Source`]s receive them in
/// [`Source::documents`].
#[derive(Debug, Clone)]
pub struct WalkConfig {
    pub threads:   usize,
    pub max_depth: Option<usize>,
    pub limit:     Option<usize>,
}

// ---------------------------------------------------------------------------
// Engine options
// ---------------------------------------------------------------------------

/// Called with each matching line as soon as it is found.
pub(crate) type LineSink = Box<dyn FnMut(&MatchedLine) -> io::Result<()>>;

/// Internal options passed from the builder to `run()`.
pub(crate) struct EngineOptions {
    pub config:         WalkConfig,
    pub source:         Box<dyn Source>,
    pub matcher:        Box<dyn Matcher>,
    pub sink:           Option<LineSink>,
    pub collect_lines:  bool,
    pub collect_errors: bool,
}

// ---------------------------------------------------------------------------
// run()
// ---------------------------------------------------------------------------

/// Feed every line of every document to the matcher.
///
/// Documents are consumed in the order the source yields them, so output
/// order is the source's order. Failed documents are skipped. A sink that
/// fails to accept a line stops the search with [`GrepError::Output`].
/// Called by `SearchBuilder::run()` after validating inputs.
pub(crate) fn run(mut opts: EngineOptions) -> Result<Results, GrepError> {
    let mut matches   = 0usize;
    let mut documents = 0usize;
    let mut scanned   = 0usize;
    let mut lines     = Vec::<MatchedLine>::new();
    let mut errors    = Vec::<GrepError>::new();

    let start = Instant::now();

    'docs: for doc in opts.source.documents(&opts.config) {
        let doc = match doc {
            Ok(d) => d,
            Err(e) => {
                log::warn!("skipping input: {}", e);
                if opts.collect_errors {
                    errors.push(e);
                }
                continue;
            }
        };

        if opts.config.limit.is_some_and(|lim| matches >= lim) {
            break;
        }

        documents += 1;
        log::trace!(
            "searching {}",
            doc.label.as_deref().unwrap_or("<stdin>")
        );

        for (idx, line) in doc.lines().enumerate() {
            scanned += 1;

            if !opts.matcher.is_match(line) {
                continue;
            }
            matches += 1;

            if opts.collect_lines || opts.sink.is_some() {
                let matched = MatchedLine {
                    label:  doc.label.clone(),
                    path:   doc.path.clone(),
                    number: idx + 1,
                    text:   line.to_owned(),
                };
                if let Some(sink) = opts.sink.as_mut() {
                    sink(&matched).map_err(GrepError::Output)?;
                }
                if opts.collect_lines {
                    lines.push(matched);
                }
            }

            if let Some(lim) = opts.config.limit {
                if matches >= lim {
                    break 'docs;
                }
            }
        }
    }

    let duration = start.elapsed();
    log::debug!(
        "searched {} document(s), {} line(s), {} match(es) in {:?}",
        documents,
        scanned,
        matches,
        duration
    );

    Ok(Results {
        matches,
        lines,
        stats: ScanStats::compute(documents, scanned, duration),
        errors,
    })
}

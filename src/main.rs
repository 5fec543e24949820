use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

use tinygrep::{FileSource, GrepError, SearchBuilder, StdinSource, TreeSource};

/// Print lines matching a pattern.
///
/// Exit status is 0 if any line matched, 1 otherwise (including bad
/// arguments and patterns that do not compile).
#[derive(Parser, Debug)]
#[command(name = "tinygrep", version, about)]
struct Cli {
    /// Pattern to match: literals . [abc] [^abc] \d \w ( ) | + ? ^ $ \1-\9
    #[arg(short = 'E', value_name = "PATTERN", allow_hyphen_values = true)]
    pattern: String,

    /// Search directories recursively, prefixing lines with their path
    #[arg(short = 'r')]
    recursive: bool,

    /// Threads used to walk directories (default: logical CPUs)
    #[arg(short = 'j', long, value_name = "N")]
    threads: Option<usize>,

    /// Maximum directory depth with -r
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Stop after N matching lines
    #[arg(short = 'm', long = "max-count", value_name = "N")]
    max_count: Option<usize>,

    /// Files or directories to search; standard input when omitted
    paths: Vec<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            log::error!("{}", e);
            ExitCode::from(1)
        }
    }
}

/// Run the search, printing matching lines as they are found. `Ok(true)` if
/// anything matched.
fn run(cli: Cli) -> Result<bool, GrepError> {
    let mut out = io::stdout().lock();
    let mut builder = tinygrep::search()
        .pattern(cli.pattern)
        .on_match(move |line| writeln!(out, "{}", line));

    if let Some(n) = cli.threads {
        builder = builder.threads(n);
    }
    if let Some(d) = cli.max_depth {
        builder = builder.max_depth(d);
    }
    if let Some(m) = cli.max_count {
        builder = builder.limit(m);
    }

    let builder = with_source(builder, cli.recursive, cli.paths)?;
    let results = builder.run()?;

    Ok(results.matches > 0)
}

/// `-r` walks every path; plain paths are files; no paths reads stdin.
fn with_source(builder: SearchBuilder, recursive: bool, paths: Vec<PathBuf>) -> Result<SearchBuilder, GrepError> {
    if recursive {
        if paths.is_empty() {
            return Err(GrepError::MissingSource);
        }
        return Ok(builder.source(TreeSource::new(paths)));
    }

    if paths.is_empty() {
        Ok(builder.source(StdinSource))
    } else {
        Ok(builder.source(FileSource::new(paths)))
    }
}

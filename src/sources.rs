use std::io::Read;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};

use ignore::{DirEntry, WalkBuilder, WalkState};

use crate::document::{decode, Document, DocumentKind};
use crate::engine::WalkConfig;
use crate::error::GrepError;
use crate::traits::Source;

// ---------------------------------------------------------------------------
// StdinSource
// ---------------------------------------------------------------------------

/// All of standard input, as one unlabelled document.
///
/// Nothing is read until the engine pulls the document.
pub struct StdinSource;

impl Source for StdinSource {
    fn documents(&self, _config: &WalkConfig) -> Box<dyn Iterator<Item = Result<Document, GrepError>>> {
        Box::new(std::iter::once_with(|| {
            let mut bytes = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut bytes)
                .map_err(|e| GrepError::Io {
                    path:   PathBuf::from("<stdin>"),
                    source: e,
                })?;
            Ok(Document {
                path:  None,
                label: None,
                kind:  DocumentKind::Stdin,
                text:  decode(&bytes),
            })
        }))
    }
}

// ---------------------------------------------------------------------------
// FileSource
// ---------------------------------------------------------------------------

/// Named files, searched in the order given.
///
/// With more than one file, each is labelled with its path exactly as
/// given; a single file is unlabelled.
pub struct FileSource {
    paths: Vec<PathBuf>,
}

impl FileSource {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl Source for FileSource {
    fn documents(&self, _config: &WalkConfig) -> Box<dyn Iterator<Item = Result<Document, GrepError>>> {
        let labelled = self.paths.len() > 1;
        Box::new(self.paths.clone().into_iter().map(move |path| {
            let label = labelled.then(|| path.display().to_string());
            Document::read(&path, label)
        }))
    }
}

// ---------------------------------------------------------------------------
// TreeSource
// ---------------------------------------------------------------------------

/// Recursive search: every regular file under each root.
///
/// Roots that are files are searched directly; roots that do not exist
/// yield [`GrepError::NotFound`]. Hidden files are included and ignore files
/// are not consulted. Symlinks to files are searched; symlinked directories
/// are not descended into.
///
/// Every file is labelled with its lexically normalised path. Directory
/// walks run on `config.threads` threads and are sorted by path afterwards,
/// so the output order does not depend on scheduling.
pub struct TreeSource {
    roots: Vec<PathBuf>,
}

impl TreeSource {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }
}

impl Source for TreeSource {
    fn documents(&self, config: &WalkConfig) -> Box<dyn Iterator<Item = Result<Document, GrepError>>> {
        let mut found = Vec::new();
        for root in &self.roots {
            if root.is_dir() {
                found.extend(walk(root, config));
            } else if root.is_file() {
                found.push(Ok(root.clone()));
            } else {
                found.push(Err(GrepError::NotFound(root.clone())));
            }
        }

        Box::new(found.into_iter().map(|res| {
            let path = res?;
            let label = normalize(&path).display().to_string();
            Document::read(&path, Some(label))
        }))
    }
}

/// Walk `root` in parallel and return its files sorted by path, preceded by
/// any traversal errors.
fn walk(root: &Path, config: &WalkConfig) -> Vec<Result<PathBuf, GrepError>> {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .ignore(false)
        .parents(false)
        .hidden(false)
        .follow_links(false)
        .same_file_system(false)
        .threads(config.threads);

    if let Some(depth) = config.max_depth {
        builder.max_depth(Some(depth));
    }

    let walker = builder.build_parallel();

    // Shared state across threads
    let files  = Arc::new(Mutex::new(Vec::<PathBuf>::new()));
    let errors = Arc::new(Mutex::new(Vec::<GrepError>::new()));

    walker.run(|| {
        let files  = Arc::clone(&files);
        let errors = Arc::clone(&errors);

        Box::new(move |res: Result<DirEntry, ignore::Error>| -> WalkState {
            let entry = match res {
                Ok(e) => e,
                Err(e) => {
                    if let Ok(mut errs) = errors.lock() {
                        errs.push(map_ignore_error(e));
                    }
                    return WalkState::Continue;
                }
            };

            let is_file = match entry.file_type() {
                Some(ft) if ft.is_file()    => true,
                Some(ft) if ft.is_symlink() => entry.path().is_file(),
                _                           => false,
            };

            if is_file {
                if let Ok(mut f) = files.lock() {
                    f.push(entry.into_path());
                }
            }

            WalkState::Continue
        })
    });

    let mut files = Arc::try_unwrap(files).unwrap_or_default().into_inner().unwrap_or_default();
    let errors    = Arc::try_unwrap(errors).unwrap_or_default().into_inner().unwrap_or_default();
    files.sort();

    log::debug!(
        "walked {}: {} file(s), {} error(s)",
        root.display(),
        files.len(),
        errors.len()
    );

    errors
        .into_iter()
        .map(Err)
        .chain(files.into_iter().map(Ok))
        .collect()
}

// ---------------------------------------------------------------------------
// Map ignore::Error to GrepError
// ---------------------------------------------------------------------------

fn map_ignore_error(e: ignore::Error) -> GrepError {
    match e {
        ignore::Error::WithPath { path, err } => match *err {
            ignore::Error::Io(io_err) => GrepError::from_io(path, io_err),
            other                     => GrepError::Source(format!("{}: {}", path.display(), other)),
        },
        ignore::Error::WithDepth { err, .. } => map_ignore_error(*err),
        ignore::Error::Loop { child, .. } => GrepError::SymlinkLoop(child),
        ignore::Error::Io(io_err)         => GrepError::Io {
            path: PathBuf::new(),
            source: io_err,
        },
        other => GrepError::Source(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Lexically normalise a path: drop `.` components and trailing separators,
/// fold `name/..` pairs. The filesystem is not consulted.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

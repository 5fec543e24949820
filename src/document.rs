use std::path::{Path, PathBuf};

use crate::error::GrepError;

/// A single input produced by a [`Source`](crate::traits::Source).
///
/// The whole text is held in memory; the engine walks it line by line.
pub struct Document {
    /// Where the text came from, if it came from the filesystem.
    pub path: Option<PathBuf>,

    /// Printed before each matching line as `label:line`. `None` prints the
    /// line bare.
    pub label: Option<String>,

    /// What kind of input this is.
    pub kind: DocumentKind,

    /// The decoded contents.
    pub text: String,
}

/// The kind of a searched document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Standard input, or any other unnamed stream.
    Stdin,

    /// A regular file.
    File,
}

impl Document {
    /// Read the file at `path`. Invalid UTF-8 sequences are dropped.
    pub fn read(path: &Path, label: Option<String>) -> Result<Self, GrepError> {
        let bytes = std::fs::read(path).map_err(|e| GrepError::from_io(path.to_path_buf(), e))?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            label,
            kind: DocumentKind::File,
            text: decode(&bytes),
        })
    }

    /// Lines of the text, without their terminators.
    ///
    /// Besides `\n` and `\r\n`, a lone `\r`, `\x0b`, `\x0c`, `\x1c`..`\x1e`,
    /// `\u{85}`, `\u{2028}` and `\u{2029}` all end a line. A terminator at the
    /// very end does not start another, empty line.
    pub fn lines(&self) -> Lines<'_> {
        Lines { rest: &self.text }
    }
}

/// Decode `bytes` as UTF-8, skipping invalid sequences.
pub(crate) fn decode(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Iterator over the lines of a [`Document`], see [`Document::lines`].
pub struct Lines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        match self.rest.char_indices().find(|&(_, c)| is_line_break(c)) {
            Some((i, c)) => {
                let line = &self.rest[..i];
                let mut end = i + c.len_utf8();
                if c == '\r' && self.rest[end..].starts_with('\n') {
                    end += 1;
                }
                self.rest = &self.rest[end..];
                Some(line)
            }
            None => Some(std::mem::take(&mut self.rest)),
        }
    }
}

//! Textual include scanning.
//!
//! This is pattern matching on whole lines, not preprocessing: includes inside
//! comments or `#if` blocks are reported like any other, and a directive split
//! over several lines is not recognised.

use crate::error::BuildError;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// A quoted local include found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    /// Header path exactly as written between the quotes.
    pub target: PathBuf,
    /// 1-based line number of the directive.
    pub line: usize,
}

/// Open `path` for scanning. Fails only if the file cannot be opened.
pub fn scan<'p>(
    path: &Path,
    pattern: &'p Regex,
) -> Result<Includes<'p, BufReader<File>>, BuildError> {
    let file = File::open(path).map_err(|e| BuildError::file_io(path, e))?;
    Ok(Includes::new(BufReader::new(file), pattern, path))
}

/// Lazy, one-shot sequence of the include directives in a file.
pub struct Includes<'p, R> {
    reader: R,
    pattern: &'p Regex,
    path: PathBuf,
    line: usize,
    buf: Vec<u8>,
}

impl<'p, R: BufRead> Includes<'p, R> {
    pub fn new(reader: R, pattern: &'p Regex, path: &Path) -> Self {
        Self {
            reader,
            pattern,
            path: path.to_path_buf(),
            line: 0,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for Includes<'_, R> {
    type Item = Result<IncludeDirective, BuildError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(BuildError::file_io(&self.path, e))),
            }
            self.line += 1;

            let text = String::from_utf8_lossy(&self.buf);
            let text = text.trim_end_matches(['\n', '\r']);
            if let Some(caps) = self.pattern.captures(text) {
                return Some(Ok(IncludeDirective {
                    target: PathBuf::from(&caps[1]),
                    line: self.line,
                }));
            }
        }
    }
}

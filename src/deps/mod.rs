//! Companion-source discovery for an entry file.

pub mod resolver;
pub mod scanner;

pub use resolver::{CompanionIndex, SourceResolver};
pub use scanner::{IncludeDirective, Includes, scan};

use std::path::{Path, PathBuf};

/// Header → implementation file, in the order the headers were included.
///
/// A header that is included more than once keeps its first entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanionMap {
    entries: Vec<(PathBuf, PathBuf)>,
}

impl CompanionMap {
    /// Returns `false` if `header` was already mapped.
    pub fn insert(&mut self, header: PathBuf, source: PathBuf) -> bool {
        if self.get(&header).is_some() {
            return false;
        }
        self.entries.push((header, source));
        true
    }

    pub fn get(&self, header: &Path) -> Option<&Path> {
        self.entries
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, s)| s.as_path())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.entries
            .iter()
            .map(|(h, s)| (h.as_path(), s.as_path()))
    }

    pub fn sources(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|(_, s)| s.as_path())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

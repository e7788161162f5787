use super::CompanionMap;
use super::scanner;
use crate::config::Patterns;
use crate::error::BuildError;
use crate::fs_utils;
use colored::*;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Every implementation file under a root, keyed by file name.
///
/// When two files share a name the lexicographically smallest path wins, so
/// the result does not depend on directory iteration order.
#[derive(Debug, Default)]
pub struct CompanionIndex {
    by_name: HashMap<OsString, PathBuf>,
}

impl CompanionIndex {
    pub fn build(root: &Path, extension: &str) -> Self {
        let mut by_name: HashMap<OsString, PathBuf> = HashMap::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        for entry in walker.filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != extension) {
                continue;
            }

            let display = display_path(root, path);
            match by_name.entry(entry.file_name().to_os_string()) {
                Entry::Vacant(slot) => {
                    slot.insert(display);
                }
                Entry::Occupied(mut slot) => {
                    if display < *slot.get() {
                        slot.insert(display);
                    }
                }
            }
        }

        Self { by_name }
    }

    pub fn get(&self, file_name: &OsStr) -> Option<&Path> {
        self.by_name.get(file_name).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Paths under `.` are reported without the leading `./`.
fn display_path(root: &Path, path: &Path) -> PathBuf {
    if root == Path::new(".") {
        path.strip_prefix(".").unwrap_or(path).to_path_buf()
    } else {
        path.to_path_buf()
    }
}

/// Maps the includes of an entry file to implementation files in its project.
pub struct SourceResolver<'a> {
    patterns: &'a Patterns,
    extension: &'a str,
    verbose: bool,
}

impl<'a> SourceResolver<'a> {
    pub fn new(patterns: &'a Patterns, extension: &'a str) -> Self {
        Self {
            patterns,
            extension,
            verbose: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn resolve(&self, entry: &Path) -> Result<CompanionMap, BuildError> {
        let includes = scanner::scan(entry, &self.patterns.include)?;

        let root = fs_utils::project_root(entry);
        let index = CompanionIndex::build(&root, self.extension);
        if self.verbose {
            println!(
                "   {} Indexed {} .{} file(s) under {}",
                "🔍".cyan(),
                index.len(),
                self.extension,
                root.display()
            );
        }

        let entry_name = entry.file_name();
        let mut map = CompanionMap::default();

        for directive in includes {
            let directive = directive?;
            let candidate = directive.target.with_extension(self.extension);
            let Some(candidate_name) = candidate.file_name() else {
                continue;
            };

            if Some(candidate_name) == entry_name {
                if self.verbose {
                    println!(
                        "   {} line {}: {} refers back to the entry file, skipped",
                        "!".yellow(),
                        directive.line,
                        directive.target.display()
                    );
                }
                continue;
            }

            match index.get(candidate_name) {
                Some(source) => {
                    if self.verbose {
                        println!(
                            "   {} {} -> {}",
                            "+".green(),
                            directive.target.display(),
                            source.display()
                        );
                    }
                    map.insert(directive.target, source.to_path_buf());
                }
                None => {
                    if self.verbose {
                        println!(
                            "   {} line {}: no {} for {}, header only",
                            "-".dimmed(),
                            directive.line,
                            candidate_name.to_string_lossy(),
                            directive.target.display()
                        );
                    }
                }
            }
        }

        Ok(map)
    }
}

//! Filesystem helpers: existence checks, project-root discovery and
//! executable lookup.

use std::env;
use std::path::{Path, PathBuf};

pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

pub fn directory_exists(path: &Path) -> bool {
    path.is_dir()
}

/// Top-most ancestor directory of `entry`.
///
/// Relative paths are walked up their parents until exhausted, so
/// `project/src/main.cpp` yields `project` and a bare `main.cpp` yields `.`.
/// Walking an absolute path that far would land on `/`, so absolute entries
/// are rooted at the working directory when they live beneath it and at their
/// own parent directory otherwise.
pub fn project_root(entry: &Path) -> PathBuf {
    if entry.is_absolute() {
        if let Ok(cwd) = env::current_dir()
            && entry.starts_with(&cwd)
        {
            return cwd;
        }
        return entry
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));
    }

    entry
        .ancestors()
        .skip(1)
        .filter(|a| !a.as_os_str().is_empty())
        .last()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Locate `program` the way a shell would: paths containing a separator are
/// checked directly, bare names are searched on `PATH`.
pub fn find_executable(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return file_exists(candidate).then(|| candidate.to_path_buf());
    }

    let search = env::var_os("PATH")?;
    env::split_paths(&search).find_map(|dir| {
        let full = dir.join(program);
        if file_exists(&full) {
            return Some(full);
        }
        if cfg!(windows) {
            let exe = full.with_extension("exe");
            if file_exists(&exe) {
                return Some(exe);
            }
        }
        None
    })
}

use crate::deps::CompanionMap;
use std::collections::HashSet;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// A program plus its argument vector.
///
/// Commands stay in this form until they are executed; [`render`](Self::render)
/// only exists for display and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Split a user-supplied command line on whitespace. `None` when blank.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let program = words.next()?;
        Some(Self::new(program).args(words))
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn render(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Where the artifact for `entry` lands.
///
/// The entry path loses only its final extension and keeps any directories,
/// so `src/main.cpp` built into `./out` becomes `./out/src/main`.
pub fn output_path(output_dir: &Path, entry: &Path) -> PathBuf {
    let entry = entry.to_string_lossy();
    let stem = match entry.rfind('.') {
        Some(dot) => &entry[..dot],
        None => &entry[..],
    };

    let mut joined = OsString::from(output_dir.as_os_str());
    joined.push("/");
    joined.push(stem);
    PathBuf::from(joined)
}

/// Assemble the single compile command for an entry file and its companions.
pub fn build_compile_command(
    compiler: &Invocation,
    entry: &Path,
    output: &Path,
    extra_flags: &[String],
    companions: &CompanionMap,
) -> Invocation {
    let mut command = compiler
        .clone()
        .path_arg(entry)
        .arg("-o")
        .path_arg(output)
        .args(extra_flags.iter().cloned());

    let mut emitted: HashSet<&Path> = HashSet::new();
    for (_, source) in companions.iter() {
        if emitted.insert(source) {
            command = command.path_arg(source);
        }
    }

    command
}

/// Command that executes the artifact, optionally behind a memory checker.
pub fn build_run_command(output: &Path, launcher: Option<&Invocation>) -> Invocation {
    match launcher {
        Some(launcher) => launcher.clone().path_arg(output),
        None => Invocation::new(output.to_string_lossy()),
    }
}

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "./out";
pub const DEFAULT_MEMORY_CHECKER: &str = "valgrind";
pub const IMPLEMENTATION_EXTENSION: &str = "cpp";
pub const LOCAL_CONFIG_FILE: &str = "ccomp.toml";

/// Compiled patterns shared by the pipeline stages.
///
/// Built once at startup and passed by reference to whoever needs them.
#[derive(Debug, Clone)]
pub struct Patterns {
    /// Quoted local include on a line of its own.
    pub include: Regex,
    /// `gnu-NN` / `clang-NN` compiler token.
    pub compiler_token: Regex,
    /// Entry file name.
    pub source_path: Regex,
}

impl Patterns {
    pub fn new() -> Self {
        Self {
            include: Regex::new(r#"^\s*#include\s*"([^"]+)"\s*$"#).expect("valid include pattern"),
            compiler_token: Regex::new(r"^(gnu|clang)-[0-9]{2}$")
                .expect("valid compiler token pattern"),
            source_path: Regex::new(r"^.+\.cpp$").expect("valid source path pattern"),
        }
    }
}

impl Default for Patterns {
    fn default() -> Self {
        Self::new()
    }
}

/// What happens to the artifact after a successful compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    None,
    Direct,
    MemoryChecked,
}

impl RunMode {
    /// The memory checker wins when both flags are set.
    pub fn from_flags(run: bool, run_valgrind: bool) -> Self {
        match (run, run_valgrind) {
            (_, true) => RunMode::MemoryChecked,
            (true, false) => RunMode::Direct,
            (false, false) => RunMode::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CompilerChoice {
    /// Probe the machine for g++/clang++.
    #[default]
    Ambient,
    /// A `family-NN` token or a literal compiler command.
    Requested(String),
}

/// Fully merged settings for one invocation.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub entry: PathBuf,
    pub output_dir: PathBuf,
    pub compiler: CompilerChoice,
    pub run: RunMode,
    pub extra_flags: Vec<String>,
    pub memory_checker: String,
    pub assume_yes: bool,
    pub dry_run: bool,
    pub verbose: bool,
}

impl BuildConfig {
    pub fn new(entry: impl Into<PathBuf>) -> Self {
        Self {
            entry: entry.into(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            compiler: CompilerChoice::Ambient,
            run: RunMode::None,
            extra_flags: Vec::new(),
            memory_checker: DEFAULT_MEMORY_CHECKER.to_string(),
            assume_yes: false,
            dry_run: false,
            verbose: false,
        }
    }

    /// Fill everything the command line left open from a defaults file.
    pub fn apply_defaults(&mut self, defaults: &FileConfig, output_given: bool) {
        if let (CompilerChoice::Ambient, Some(compiler)) = (&self.compiler, &defaults.compiler) {
            self.compiler = CompilerChoice::Requested(compiler.clone());
        }
        if !output_given && let Some(output) = &defaults.output {
            self.output_dir = output.clone();
        }
        if let Some(flags) = &defaults.flags {
            let mut merged = flags.clone();
            merged.append(&mut self.extra_flags);
            self.extra_flags = merged;
        }
        if let Some(checker) = &defaults.memory_checker {
            self.memory_checker = checker.clone();
        }
    }
}

/// Optional `ccomp.toml` defaults.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub compiler: Option<String>,
    pub output: Option<PathBuf>,
    pub flags: Option<Vec<String>>,
    pub memory_checker: Option<String>,
}

impl FileConfig {
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context(
            "Failed to parse ccomp.toml - check for syntax errors (missing quotes, brackets)",
        )
    }

    pub fn load_file(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config =
            Self::parse(&contents).with_context(|| format!("in {}", path.display()))?;
        Ok(Some(config))
    }

    /// Layer the global file under the local one; local keys win.
    pub fn merged(self, local: FileConfig) -> FileConfig {
        FileConfig {
            compiler: local.compiler.or(self.compiler),
            output: local.output.or(self.output),
            flags: local.flags.or(self.flags),
            memory_checker: local.memory_checker.or(self.memory_checker),
        }
    }

    /// Global `~/.ccomp/config.toml` overlaid with `./ccomp.toml`.
    pub fn load() -> Result<Self> {
        let global = match global_config_path() {
            Some(path) => Self::load_file(&path)?.unwrap_or_default(),
            None => Self::default(),
        };
        let local = Self::load_file(Path::new(LOCAL_CONFIG_FILE))?.unwrap_or_default();
        Ok(global.merged(local))
    }
}

fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".ccomp").join("config.toml"))
}

//! Command-line surface.
//!
//! ```text
//! ccomp <SOURCE> [-r] [-rv] [-o DIR] [-c COMPILER] [-y] [--dry-run] [--verbose] [-- FLAGS...]
//! ```

use crate::config::{BuildConfig, CompilerChoice, DEFAULT_OUTPUT_DIR, RunMode};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ccomp")]
#[command(about = "Compile a C++ file together with the sources it includes", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct Cli {
    /// Entry source file (*.cpp)
    pub source: Option<PathBuf>,

    /// Run the binary after a successful compile
    #[arg(short, long)]
    pub run: bool,

    /// Run the binary under the memory checker (also accepted as -rv)
    #[arg(long = "run-valgrind")]
    pub run_valgrind: bool,

    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Compiler: gnu-NN, clang-NN, or a literal compiler command
    #[arg(short, long, value_name = "COMPILER")]
    pub compiler: Option<String>,

    /// Create a missing output directory without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Show what would be executed without running
    #[arg(long)]
    pub dry_run: bool,

    /// Show compiler resolution and include mapping details
    #[arg(long)]
    pub verbose: bool,

    /// Extra compiler flags, placed before the companion sources
    #[arg(last = true, value_name = "FLAGS")]
    pub flags: Vec<String>,
}

impl Cli {
    /// Parse after rewriting the two-letter `-rv` flag, which clap cannot
    /// express as a short option.
    pub fn try_parse_normalized<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }

    /// The settings this command line asks for, before defaults files.
    /// `None` when no source file was given.
    pub fn to_config(&self) -> Option<BuildConfig> {
        let mut config = BuildConfig::new(self.source.clone()?);
        config.output_dir = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        config.compiler = match &self.compiler {
            Some(token) => CompilerChoice::Requested(token.clone()),
            None => CompilerChoice::Ambient,
        };
        config.run = RunMode::from_flags(self.run, self.run_valgrind);
        config.extra_flags = self.flags.clone();
        config.assume_yes = self.yes;
        config.dry_run = self.dry_run;
        config.verbose = self.verbose;
        Some(config)
    }
}

/// Rewrite `-rv` to `--run-valgrind`; everything after `--` is left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            if passthrough {
                return arg;
            }
            if arg == "--" {
                passthrough = true;
                arg
            } else if arg == "-rv" {
                OsString::from("--run-valgrind")
            } else {
                arg
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["ccomp"];
        full.extend_from_slice(args);
        Cli::try_parse_normalized(full).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cfg = parse(&["main.cpp"]).to_config().unwrap();
        assert_eq!(cfg.entry, PathBuf::from("main.cpp"));
        assert_eq!(cfg.output_dir, PathBuf::from("./out"));
        assert_eq!(cfg.compiler, CompilerChoice::Ambient);
        assert_eq!(cfg.run, RunMode::None);
        assert!(cfg.extra_flags.is_empty());
    }

    #[test]
    fn test_short_flags() {
        let cfg = parse(&["main.cpp", "-r", "-o", "bin", "-c", "gnu-17"])
            .to_config()
            .unwrap();
        assert_eq!(cfg.run, RunMode::Direct);
        assert_eq!(cfg.output_dir, PathBuf::from("bin"));
        assert_eq!(cfg.compiler, CompilerChoice::Requested("gnu-17".into()));
    }

    #[test]
    fn test_rv_flag_is_memory_checked_run() {
        let cfg = parse(&["-rv", "main.cpp"]).to_config().unwrap();
        assert_eq!(cfg.run, RunMode::MemoryChecked);

        let both = parse(&["main.cpp", "-r", "-rv"]).to_config().unwrap();
        assert_eq!(both.run, RunMode::MemoryChecked);
    }

    #[test]
    fn test_flags_after_double_dash_are_verbatim() {
        let cfg = parse(&["main.cpp", "--", "-Wall", "-rv", "-O2"])
            .to_config()
            .unwrap();
        assert_eq!(cfg.extra_flags, vec!["-Wall", "-rv", "-O2"]);
        assert_eq!(cfg.run, RunMode::None);
    }

    #[test]
    fn test_passthrough_compiler_string() {
        let cfg = parse(&["main.cpp", "-c", "g++-13 -std=gnu++23"])
            .to_config()
            .unwrap();
        assert_eq!(
            cfg.compiler,
            CompilerChoice::Requested("g++-13 -std=gnu++23".into())
        );
    }

    #[test]
    fn test_missing_source_yields_no_config() {
        assert!(parse(&["-r"]).to_config().is_none());
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(Cli::try_parse_normalized(["ccomp", "main.cpp", "--bogus"]).is_err());
        assert!(Cli::try_parse_normalized(["ccomp", "main.cpp", "-o"]).is_err());
    }
}

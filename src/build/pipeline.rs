use super::command::{Invocation, build_compile_command, build_run_command, output_path};
use super::executor::{Executor, ProcessRunner};
use super::prompt::{Answer, Confirm};
use crate::config::{BuildConfig, IMPLEMENTATION_EXTENSION, Patterns, RunMode};
use crate::deps::SourceResolver;
use crate::error::BuildError;
use crate::fs_utils;
use crate::toolchain;
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// What a successful pipeline did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub compile_command: Invocation,
    pub run_command: Option<Invocation>,
    pub output: PathBuf,
    /// True when nothing was executed (`--dry-run`).
    pub dry_run: bool,
}

/// Compile an entry file with its companions, then optionally run it.
///
/// Stages run strictly in order and the first failure ends the pipeline:
/// resolve compiler, validate source, ensure output directory, build command,
/// compile, run.
pub fn build_and_run(
    config: &BuildConfig,
    patterns: &Patterns,
    runner: &mut dyn ProcessRunner,
    confirm: &mut dyn Confirm,
) -> Result<BuildReport, BuildError> {
    let start_time = Instant::now();

    // 1. Compiler
    let compiler = toolchain::resolve_compiler(&config.compiler, patterns)?;
    if config.verbose {
        println!("   {} Compiler: {}", "🔧".cyan(), compiler);
    }

    // 2. Entry file
    validate_source(&config.entry, patterns)?;

    // 3. Output directory
    if !config.dry_run {
        ensure_output_dir(&config.output_dir, confirm)?;
    }

    // 4. Command
    let companions = SourceResolver::new(patterns, IMPLEMENTATION_EXTENSION)
        .verbose(config.verbose)
        .resolve(&config.entry)?;
    let output = output_path(&config.output_dir, &config.entry);
    let compile_command = build_compile_command(
        &compiler,
        &config.entry,
        &output,
        &config.extra_flags,
        &companions,
    );

    let launcher = match config.run {
        RunMode::MemoryChecked => Some(
            Invocation::from_command_line(&config.memory_checker)
                .unwrap_or_else(|| Invocation::new(crate::config::DEFAULT_MEMORY_CHECKER)),
        ),
        _ => None,
    };
    let run_command = match config.run {
        RunMode::None => None,
        _ => Some(build_run_command(&output, launcher.as_ref())),
    };

    if config.dry_run {
        println!("{} Would execute: {}", "[DRY RUN]".yellow(), compile_command);
        if let Some(run) = &run_command {
            println!("{} Would execute: {}", "[DRY RUN]".yellow(), run);
        }
        return Ok(BuildReport {
            compile_command,
            run_command,
            output,
            dry_run: true,
        });
    }

    // 5. Compile
    println!("   {} {}", "🔨".cyan(), compile_command);
    let mut executor = Executor::new(runner);
    executor.run_compile(&compile_command)?;
    println!(
        "{} Built {} in {:.2?}",
        "✓".green(),
        output.display(),
        start_time.elapsed()
    );

    // 6. Run
    if run_command.is_some() {
        println!("{} Running...\n", "▶".green());
        executor.run_artifact(&output, launcher.as_ref())?;
    }

    Ok(BuildReport {
        compile_command,
        run_command,
        output,
        dry_run: false,
    })
}

fn validate_source(entry: &Path, patterns: &Patterns) -> Result<(), BuildError> {
    let text = entry.to_string_lossy();
    if !patterns.source_path.is_match(&text) {
        return Err(BuildError::InvalidSourcePath {
            message: format!("expected a .{} file", IMPLEMENTATION_EXTENSION),
            path: Some(entry.to_path_buf()),
        });
    }
    if !fs_utils::file_exists(entry) {
        return Err(BuildError::InvalidSourcePath {
            message: "source file does not exist".to_string(),
            path: Some(entry.to_path_buf()),
        });
    }
    Ok(())
}

fn ensure_output_dir(dir: &Path, confirm: &mut dyn Confirm) -> Result<(), BuildError> {
    if fs_utils::directory_exists(dir) {
        return Ok(());
    }

    let prompt = format!("Create output directory {}/ [y,n]:", dir.display());
    loop {
        match confirm.ask(&prompt) {
            Answer::Yes => {
                fs::create_dir_all(dir).map_err(|e| BuildError::file_io(dir, e))?;
                println!("{} Created output directory {}", "✓".green(), dir.display());
                return Ok(());
            }
            Answer::No => {
                return Err(BuildError::ProcessAborted {
                    directory: dir.to_path_buf(),
                });
            }
            Answer::Repeat => println!("Invalid input. Please enter 'y' or 'n'."),
        }
    }
}

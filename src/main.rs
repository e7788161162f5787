//! # ccomp CLI Entry Point
//!
//! Parses arguments, merges defaults files, runs the build pipeline and turns
//! its outcome into the process exit status.

use clap::error::ErrorKind;
use colored::*;
use std::ffi::OsString;
use std::process;

use ccomp::build::{self, Answer, Confirm, SystemRunner, TerminalConfirm};
use ccomp::cli::Cli;
use ccomp::config::{FileConfig, Patterns};
use ccomp::error::{BuildError, codes};

fn main() {
    let args: Vec<_> = std::env::args_os().collect();
    if args.len() < 2 {
        print_banner();
        return;
    }

    if let Err(err) = run(args) {
        report(&err);
        process::exit(err.exit_code());
    }
}

fn run(args: Vec<OsString>) -> Result<(), BuildError> {
    let cli = match Cli::try_parse_normalized(args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            process::exit(codes::SUCCESS);
        }
        Err(e) => {
            let _ = e.print();
            return Err(BuildError::ArgumentParsing(e.kind().to_string()));
        }
    };

    let Some(mut config) = cli.to_config() else {
        return Err(BuildError::ArgumentParsing(
            "a source file (*.cpp) is required".to_string(),
        ));
    };

    let defaults =
        FileConfig::load().map_err(|e| BuildError::ArgumentParsing(format!("{:#}", e)))?;
    config.apply_defaults(&defaults, cli.output.is_some());

    let patterns = Patterns::new();
    let mut runner = SystemRunner;
    let mut assume_yes = |_: &str| Answer::Yes;
    let mut terminal = TerminalConfirm;
    let confirm: &mut dyn Confirm = if config.assume_yes {
        &mut assume_yes
    } else {
        &mut terminal
    };

    build::build_and_run(&config, &patterns, &mut runner, confirm)?;
    Ok(())
}

fn print_banner() {
    println!("{}", "CCOMP".red().bold());
    println!(
        "Compile a C++ file together with the sources it includes. Try {}.",
        "ccomp --help".cyan()
    );
}

fn report(err: &BuildError) {
    eprintln!(
        "{}",
        format!("Process terminated -- exit code {}", err.exit_code()).red()
    );
    eprintln!("{} {}", "x".red(), err);
    if let Some(context) = err.context() {
        eprintln!("   {}", context.dimmed());
    }
    eprintln!("-- Possible Causes:");
    for cause in err.causes() {
        eprintln!("{}", format!("-- {}", cause).dimmed());
    }
}

use super::command::{Invocation, build_run_command};
use super::feedback::FeedbackAnalyzer;
use crate::error::BuildError;
use colored::*;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// What a finished child process left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub status: i32,
    /// Combined stdout and stderr, in arrival order.
    pub output: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Runs an invocation to completion.
pub trait ProcessRunner {
    fn run(&mut self, invocation: &Invocation) -> io::Result<ProcessOutput>;
}

/// Spawns real processes, echoing their output to our stdout as it arrives.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        let (mut reader, writer) = io::pipe()?;

        let mut command = Command::new(invocation.program());
        command
            .args(invocation.get_args())
            .stdin(Stdio::inherit())
            .stdout(writer.try_clone()?)
            .stderr(writer);
        let mut child = command.spawn()?;
        // The command still owns the write ends; reading would never see EOF.
        drop(command);

        let mut captured = Vec::new();
        let mut stdout = io::stdout().lock();
        let mut chunk = [0u8; 8192];
        loop {
            let n = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            stdout.write_all(&chunk[..n])?;
            stdout.flush()?;
            captured.extend_from_slice(&chunk[..n]);
        }

        let status = child.wait()?;
        Ok(ProcessOutput {
            status: exit_status_code(status),
            output: String::from_utf8_lossy(&captured).into_owned(),
        })
    }
}

#[cfg(unix)]
fn exit_status_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|sig| 128 + sig))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_status_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

/// Runs the compile and run steps and classifies their failures.
pub struct Executor<'r> {
    runner: &'r mut dyn ProcessRunner,
}

impl<'r> Executor<'r> {
    pub fn new(runner: &'r mut dyn ProcessRunner) -> Self {
        Self { runner }
    }

    /// Run the compiler. A compiler that cannot even be started is reported
    /// as an invalid compiler rather than a failed compilation.
    pub fn run_compile(&mut self, command: &Invocation) -> Result<ProcessOutput, BuildError> {
        let result = self
            .runner
            .run(command)
            .map_err(|e| BuildError::InvalidCompilerPath {
                message: format!("failed to launch '{}': {}", command.program(), e),
                compiler: Some(command.render()),
            })?;

        if !result.success() {
            if let Some(hint) = FeedbackAnalyzer::analyze(&result.output) {
                println!("\n{} {}", "💡".yellow(), hint);
            }
            return Err(BuildError::CompilationFailed {
                command: command.render(),
                status: result.status,
            });
        }
        Ok(result)
    }

    /// Run the built artifact, behind `launcher` when one is given.
    pub fn run_artifact(
        &mut self,
        output: &Path,
        launcher: Option<&Invocation>,
    ) -> Result<ProcessOutput, BuildError> {
        let command = build_run_command(output, launcher);
        let result = self.runner.run(&command).map_err(|e| {
            let status = match e.kind() {
                io::ErrorKind::NotFound => 127,
                io::ErrorKind::PermissionDenied => 126,
                _ => 1,
            };
            BuildError::ExecutionFailed {
                command: command.render(),
                status,
            }
        })?;

        if !result.success() {
            return Err(BuildError::ExecutionFailed {
                command: command.render(),
                status: result.status,
            });
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::testing::{ScriptedRunner, exited};

    #[test]
    fn test_compile_failure_carries_command() {
        let mut runner = ScriptedRunner::default();
        runner.results.push_back(exited(1));
        let cmd = Invocation::new("g++").arg("main.cpp");

        let err = Executor::new(&mut runner).run_compile(&cmd).unwrap_err();
        match err {
            BuildError::CompilationFailed { command, status } => {
                assert_eq!(command, "g++ main.cpp");
                assert_eq!(status, 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_compiler_launch_failure_is_invalid_compiler() {
        let mut runner = ScriptedRunner::default();
        runner
            .results
            .push_back(Err(io::Error::from(io::ErrorKind::NotFound)));

        let err = Executor::new(&mut runner)
            .run_compile(&Invocation::new("nocc"))
            .unwrap_err();
        assert_eq!(err.code(), crate::error::codes::INVALID_COMPILER_PATH);
    }

    #[test]
    fn test_run_failure_propagates_status() {
        let mut runner = ScriptedRunner::default();
        runner.results.push_back(exited(42));

        let err = Executor::new(&mut runner)
            .run_artifact(Path::new("./out/main"), None)
            .unwrap_err();
        assert_eq!(err.exit_code(), 42);
        assert_eq!(runner.seen, vec!["./out/main"]);
    }

    #[test]
    fn test_run_under_launcher() {
        let mut runner = ScriptedRunner::default();
        let valgrind = Invocation::new("valgrind");

        Executor::new(&mut runner)
            .run_artifact(Path::new("out/main"), Some(&valgrind))
            .unwrap();
        assert_eq!(runner.seen, vec!["valgrind out/main"]);
    }

    #[test]
    fn test_missing_launcher_exits_127() {
        let mut runner = ScriptedRunner::default();
        runner
            .results
            .push_back(Err(io::Error::from(io::ErrorKind::NotFound)));

        let err = Executor::new(&mut runner)
            .run_artifact(Path::new("out/main"), Some(&Invocation::new("valgrind")))
            .unwrap_err();
        assert_eq!(err.exit_code(), 127);
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_captures_both_streams() {
        let inv = Invocation::new("sh")
            .arg("-c")
            .arg("echo out; echo err 1>&2; exit 3");
        let result = SystemRunner.run(&inv).unwrap();
        assert_eq!(result.status, 3);
        assert!(result.output.contains("out"));
        assert!(result.output.contains("err"));
    }

    #[test]
    fn test_system_runner_reports_spawn_failure() {
        let err = SystemRunner
            .run(&Invocation::new("ccomp-no-such-program-xyz"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}

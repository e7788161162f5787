//! Failure taxonomy.
//!
//! Every failure of the pipeline is one of a fixed set of outcomes, each with a
//! stable numeric code that doubles as the process exit status. Scripts calling
//! `ccomp` rely on these numbers, so they must never be renumbered.
//!
//! | Code | Outcome |
//! |------|---------|
//! | 1 | [`BuildError::ArgumentParsing`] |
//! | 2 | [`BuildError::InvalidCompilerPath`] |
//! | 3 | [`BuildError::InvalidSourcePath`] |
//! | 4 | [`BuildError::ProcessAborted`] |
//! | 5 | [`BuildError::FileIo`] |
//! | 6 | [`BuildError::CompilationFailed`] |
//! | 7 | [`BuildError::ExecutionFailed`] (exit status is the child's own) |

use std::path::PathBuf;

/// Exit code constants.
pub mod codes {
    pub const SUCCESS: i32 = 0;
    pub const ARGUMENT_PARSING: i32 = 1;
    pub const INVALID_COMPILER_PATH: i32 = 2;
    pub const INVALID_SOURCE_PATH: i32 = 3;
    pub const PROCESS_ABORTED: i32 = 4;
    pub const FILE_IO: i32 = 5;
    pub const COMPILATION_FAILED: i32 = 6;
    pub const EXECUTION_FAILED: i32 = 7;
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Invalid arguments: {0}")]
    ArgumentParsing(String),

    #[error("Invalid compiler: {message}")]
    InvalidCompilerPath {
        message: String,
        compiler: Option<String>,
    },

    #[error("Invalid source path: {message}")]
    InvalidSourcePath {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("Operation aborted by user")]
    ProcessAborted { directory: PathBuf },

    #[error("{} could not be processed", path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Compilation failed with exit code {status}")]
    CompilationFailed { command: String, status: i32 },

    #[error("Execution failed with exit code {status}")]
    ExecutionFailed { command: String, status: i32 },
}

impl BuildError {
    pub fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BuildError::FileIo {
            path: path.into(),
            source,
        }
    }

    /// Taxonomy number of this outcome.
    pub fn code(&self) -> i32 {
        match self {
            BuildError::ArgumentParsing(_) => codes::ARGUMENT_PARSING,
            BuildError::InvalidCompilerPath { .. } => codes::INVALID_COMPILER_PATH,
            BuildError::InvalidSourcePath { .. } => codes::INVALID_SOURCE_PATH,
            BuildError::ProcessAborted { .. } => codes::PROCESS_ABORTED,
            BuildError::FileIo { .. } => codes::FILE_IO,
            BuildError::CompilationFailed { .. } => codes::COMPILATION_FAILED,
            BuildError::ExecutionFailed { .. } => codes::EXECUTION_FAILED,
        }
    }

    /// Status the process should exit with.
    ///
    /// Identical to [`code`](Self::code) except for a failed run, where the
    /// artifact's own status is propagated unchanged.
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildError::ExecutionFailed { status, .. } => *status,
            other => other.code(),
        }
    }

    /// The offending path or command line, when there is one.
    pub fn context(&self) -> Option<String> {
        match self {
            BuildError::ArgumentParsing(_) => None,
            BuildError::InvalidCompilerPath { compiler, .. } => compiler.clone(),
            BuildError::InvalidSourcePath { path, .. } => {
                path.as_ref().map(|p| p.display().to_string())
            }
            BuildError::ProcessAborted { directory } => Some(directory.display().to_string()),
            BuildError::FileIo { path, .. } => Some(path.display().to_string()),
            BuildError::CompilationFailed { command, .. }
            | BuildError::ExecutionFailed { command, .. } => Some(command.clone()),
        }
    }

    pub fn causes(&self) -> &'static [&'static str] {
        match self {
            BuildError::ArgumentParsing(_) => &[
                "unknown flag or a flag missing its value",
                "ccomp.toml contains a syntax error",
            ],
            BuildError::InvalidCompilerPath { .. } => &[
                "no g++ or clang++ found on PATH",
                "compiler token is not of the form gnu-NN or clang-NN",
                "passthrough compiler could not be located",
            ],
            BuildError::InvalidSourcePath { .. } => &[
                "source file was not provided",
                "source file does not exist",
                "source file does not end in .cpp",
            ],
            BuildError::ProcessAborted { .. } => &["output directory creation was declined"],
            BuildError::FileIo { .. } => &["file might not be readable", "file might not exist"],
            BuildError::CompilationFailed { .. } => &[
                "the compiler reported errors above",
                "a companion source was not found under the project root",
            ],
            BuildError::ExecutionFailed { .. } => &[
                "the program returned a non-zero status",
                "the memory checker reported errors",
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct_and_ordered() {
        let errors = [
            BuildError::ArgumentParsing("x".into()),
            BuildError::InvalidCompilerPath {
                message: "x".into(),
                compiler: None,
            },
            BuildError::InvalidSourcePath {
                message: "x".into(),
                path: None,
            },
            BuildError::ProcessAborted {
                directory: "out".into(),
            },
            BuildError::file_io("a.cpp", std::io::Error::other("boom")),
            BuildError::CompilationFailed {
                command: "g++".into(),
                status: 1,
            },
            BuildError::ExecutionFailed {
                command: "./out/a".into(),
                status: 42,
            },
        ];
        let codes: Vec<i32> = errors.iter().map(BuildError::code).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_execution_failure_propagates_child_status() {
        let err = BuildError::ExecutionFailed {
            command: "./out/main".into(),
            status: 42,
        };
        assert_eq!(err.code(), codes::EXECUTION_FAILED);
        assert_eq!(err.exit_code(), 42);
    }

    #[test]
    fn test_compilation_failure_carries_command() {
        let err = BuildError::CompilationFailed {
            command: "g++ -std=c++20 main.cpp -o ./out/main".into(),
            status: 1,
        };
        assert_eq!(err.exit_code(), codes::COMPILATION_FAILED);
        assert_eq!(
            err.context().as_deref(),
            Some("g++ -std=c++20 main.cpp -o ./out/main")
        );
    }

    #[test]
    fn test_file_io_message_names_path() {
        let err = BuildError::file_io(
            "src/main.cpp",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert_eq!(err.to_string(), "src/main.cpp could not be processed");
    }
}

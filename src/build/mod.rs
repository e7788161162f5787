mod command;
mod executor;
mod feedback;
mod pipeline;
pub mod prompt;

pub use command::{Invocation, build_compile_command, build_run_command, output_path};
pub use executor::{Executor, ProcessOutput, ProcessRunner, SystemRunner};
pub use feedback::FeedbackAnalyzer;
pub use pipeline::{BuildReport, build_and_run};
pub use prompt::{Answer, Confirm, TerminalConfirm};

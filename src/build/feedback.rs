use colored::*;

/// Turns raw compiler/linker output into a one-paragraph hint.
pub struct FeedbackAnalyzer;

impl FeedbackAnalyzer {
    pub fn analyze(output: &str) -> Option<String> {
        // Checked before the generic linker case: the entry has no main().
        if output.contains("undefined reference to `main'")
            || output.contains("_main\", referenced from")
        {
            return Some(format!(
                "The entry file has no {} function.\nPass the file that defines it as the source argument.",
                "main()".bold().yellow()
            ));
        }

        if output.contains("undefined reference to") || output.contains("Undefined symbols") {
            return Some(format!(
                "It looks like a {} error.\nA companion {} is only picked up when it shares the header's name\nand lives under the project root; add missing libraries after {}.",
                "Linker".bold().red(),
                ".cpp".bold().yellow(),
                "--".bold().green()
            ));
        }

        if output.contains("fatal error: ") && output.contains("No such file or directory")
            || output.contains("file not found")
        {
            return Some(format!(
                "It looks like a {} error.\nCheck the quoted path in the {} directive, or pass {} after {}.",
                "Missing Header".bold().red(),
                "#include".bold().yellow(),
                "-I<dir>".bold().green(),
                "--".bold().green()
            ));
        }

        None
    }
}

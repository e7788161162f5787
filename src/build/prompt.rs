//! Yes/no confirmation used before creating the output directory.

use std::io::{self, BufRead, IsTerminal, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    /// Unrecognised input; ask again.
    Repeat,
}

/// `y`/`Y` and `n`/`N`; anything else asks again.
pub fn parse_answer(input: &str) -> Answer {
    match input.trim() {
        "y" | "Y" => Answer::Yes,
        "n" | "N" => Answer::No,
        _ => Answer::Repeat,
    }
}

pub trait Confirm {
    fn ask(&mut self, prompt: &str) -> Answer;
}

/// Closures make convenient fixed or scripted policies.
impl<F: FnMut(&str) -> Answer> Confirm for F {
    fn ask(&mut self, prompt: &str) -> Answer {
        self(prompt)
    }
}

/// Asks on the terminal, or reads a line from stdin when it is not one.
///
/// End of input and a cancelled prompt both count as "no".
#[derive(Debug, Default)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn ask(&mut self, prompt: &str) -> Answer {
        if io::stdin().is_terminal() {
            return match inquire::Text::new(prompt).prompt() {
                Ok(input) => parse_answer(&input),
                Err(_) => Answer::No,
            };
        }

        print!("{} ", prompt);
        let _ = io::stdout().flush();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => Answer::No,
            Ok(_) => parse_answer(&line),
        }
    }
}

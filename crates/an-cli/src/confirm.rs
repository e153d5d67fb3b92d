use std::io::{self, BufRead, Write};

use an_engine::Confirm;

/// Asks on stderr and reads one answer line from stdin.
pub struct TerminalConfirm<R> {
    input: R,
}

impl TerminalConfirm<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }
}

impl<R: BufRead> TerminalConfirm<R> {
    #[cfg(test)]
    fn from_reader(input: R) -> Self {
        Self { input }
    }
}

/// `y` or `yes`, any case.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

impl<R: BufRead> Confirm for TerminalConfirm<R> {
    fn confirm(&mut self, question: &str) -> bool {
        let mut stderr = io::stderr().lock();
        let _ = write!(stderr, "{question} (y/n): ");
        let _ = stderr.flush();

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => {
                let _ = writeln!(stderr);
                false
            }
            Ok(_) => is_affirmative(&answer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_y_and_yes() {
        for answer in ["y", "Y", "yes", " YES \n"] {
            assert!(is_affirmative(answer), "{answer:?}");
        }
        for answer in ["", "n", "no", "yep", "sure"] {
            assert!(!is_affirmative(answer), "{answer:?}");
        }
    }

    #[test]
    fn reads_one_line_per_question() {
        let mut confirm = TerminalConfirm::from_reader("yes\nno\n".as_bytes());
        assert!(confirm.confirm("Process a.go?"));
        assert!(!confirm.confirm("Process b.go?"));
    }

    #[test]
    fn end_of_input_declines() {
        let mut confirm = TerminalConfirm::from_reader("".as_bytes());
        assert!(!confirm.confirm("Process a.go?"));
    }
}

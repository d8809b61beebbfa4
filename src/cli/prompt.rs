//! Line input for the interactive commands.
//!
//! Generic over any tokio `AsyncBufRead` so the flows can be driven from a
//! byte slice in tests and from stdin in the binary.

use super::output::Output;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

/// Reads answers line by line. `None` means the input is exhausted.
pub struct Prompter<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin> Prompter<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// Next raw line, trimmed. Cancel safe, so it can sit in a `select!`.
    pub async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        Ok(self
            .lines
            .next_line()
            .await?
            .map(|line| line.trim().to_string()))
    }

    /// Print `question` and read the answer.
    pub async fn ask(&mut self, output: &Output, question: &str) -> std::io::Result<Option<String>> {
        output.prompt(question);
        self.next_line().await
    }
}

/// Prompter over the process's stdin.
pub fn stdin() -> Prompter<BufReader<Stdin>> {
    Prompter::new(BufReader::new(tokio::io::stdin()))
}

/// Whether an answer asks to step back.
pub fn is_back(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("back") || answer.eq_ignore_ascii_case("b")
}

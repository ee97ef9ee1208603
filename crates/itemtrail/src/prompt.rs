// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Manual item entry when no item numbers are configured

use std::io::{self, BufRead, Write};

use itemtrail_core::{ItemMatcher, MatchMode};

/// Asks the user for item numbers
pub trait ItemPrompt {
    /// Ask for items; `Ok(None)` means the user declined
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying terminal.
    fn request_items(&mut self, mode: MatchMode) -> io::Result<Option<Vec<String>>>;
}

/// Prompt over a line-oriented reader and writer, normally stdin and stdout
#[derive(Debug)]
pub struct StdinPrompt<R, W> {
    input: R,
    output: W,
}

/// Terminal stream the prompt text goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStream {
    /// Standard output
    Stdout,
    /// Standard error, when stdout is reserved for machine-readable output
    Stderr,
}

impl StdinPrompt<io::StdinLock<'static>, Box<dyn Write>> {
    /// Prompt reading the process stdin and writing to `stream`
    #[must_use]
    pub fn terminal(stream: PromptStream) -> Self {
        let output: Box<dyn Write> = match stream {
            PromptStream::Stdout => Box::new(io::stdout()),
            PromptStream::Stderr => Box::new(io::stderr()),
        };
        Self::new(io::stdin().lock(), output)
    }
}

impl<R: BufRead, W: Write> StdinPrompt<R, W> {
    /// Prompt reading from `input` and writing to `output`
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> io::Result<String> {
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> ItemPrompt for StdinPrompt<R, W> {
    fn request_items(&mut self, mode: MatchMode) -> io::Result<Option<Vec<String>>> {
        writeln!(
            self.output,
            "No items have been supplied. You can list them under \"ItemNumbers\" in your settings file."
        )?;
        write!(self.output, "Would you like to enter those item numbers now? (Y/N) ")?;
        let answer = self.read_line()?;
        if !answer.to_lowercase().starts_with('y') {
            writeln!(
                self.output,
                "Be sure to enter the item numbers you need commits for in your settings file."
            )?;
            return Ok(None);
        }

        writeln!(
            self.output,
            "Please enter your item numbers separated by commas. Press ENTER when done:"
        )?;
        let line = self.read_line()?;
        let items: Vec<String> = ItemMatcher::new(line.split(','), mode).items().to_vec();

        writeln!(self.output, "Item numbers I'll search for:")?;
        writeln!(self.output, "{}\n", items.join(", "))?;
        Ok(Some(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn ask(input: &str, mode: MatchMode) -> (Option<Vec<String>>, String) {
        let mut output = Vec::new();
        let answer = StdinPrompt::new(input.as_bytes(), &mut output)
            .request_items(mode)
            .expect("in-memory I/O");
        (answer, String::from_utf8(output).expect("utf-8 output"))
    }

    #[test]
    fn test_accepts_and_normalizes() {
        let (items, output) = ask("yes\nITEM-12, 34 ,,ITEM-12\n", MatchMode::Strict);
        assert_eq!(items, Some(vec!["12".to_string(), "34".to_string()]));
        assert!(output.contains("Item numbers I'll search for:\n12, 34\n"));
    }

    #[test]
    fn test_literal_mode_keeps_prefixes() {
        let (items, _) = ask("Y\nITEM-12, OPS-7\n", MatchMode::Literal);
        assert_eq!(items, Some(vec!["ITEM-12".to_string(), "OPS-7".to_string()]));
    }

    #[test]
    fn test_declines() {
        let (items, output) = ask("n\n", MatchMode::Strict);
        assert_eq!(items, None);
        assert!(output.contains("Be sure to enter"));
    }

    #[test]
    fn test_end_of_input_declines() {
        let (items, _) = ask("", MatchMode::Strict);
        assert_eq!(items, None);
    }
}

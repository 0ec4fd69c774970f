use crate::error::{KeeperError, Result};
use std::io::{BufRead, Write};

/// Line-oriented prompting over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Prints `prompt` and reads one line without its line ending.
    /// Returns `None` once the input is exhausted. A line that is not UTF-8 is
    /// consumed and reported as an input error.
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        let mut line = String::from_utf8(bytes)
            .map_err(|_| KeeperError::InvalidInput("Input is not valid UTF-8".into()))?;
        let len = line.trim_end_matches(|c: char| c == '\n' || c == '\r').len();
        line.truncate(len);
        Ok(Some(line))
    }

    /// Re-prompts until `parse` accepts the line.
    ///
    /// Input errors (see [`crate::error::KeeperError::is_input_error`]) are printed
    /// and the same prompt is shown again; any other error is returned. `None` means
    /// the input ended before a valid value was entered.
    pub fn ask<T, F>(&mut self, prompt: &str, mut parse: F) -> Result<Option<T>>
    where
        F: FnMut(&str) -> Result<T>,
    {
        loop {
            let parsed = match self.read_line(prompt) {
                Ok(Some(line)) => parse(&line),
                Ok(None) => return Ok(None),
                Err(e) => Err(e),
            };
            match parsed {
                Ok(value) => return Ok(Some(value)),
                Err(e) if e.is_input_error() => self.report_retry(&e)?,
                Err(e) => return Err(e),
            }
        }
    }

    pub fn report_retry(&mut self, error: &KeeperError) -> Result<()> {
        writeln!(self.output, "{}. Please try again.", error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{validate_state, BookState};
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<&[u8]>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes()), Vec::new())
    }

    fn raw_prompter(input: &[u8]) -> Prompter<Cursor<&[u8]>, Vec<u8>> {
        Prompter::new(Cursor::new(input), Vec::new())
    }

    #[test]
    fn read_line_strips_line_endings() {
        let mut p = prompter("first\r\nsecond\n");
        assert_eq!(p.read_line("> ").unwrap().as_deref(), Some("first"));
        assert_eq!(p.read_line("> ").unwrap().as_deref(), Some("second"));
        assert_eq!(p.read_line("> ").unwrap(), None);
        assert_eq!(String::from_utf8(p.output.clone()).unwrap(), "> > > ");
    }

    #[test]
    fn ask_retries_until_valid() {
        let mut p = prompter("rdng\nReading\nreading\n");
        let state = p.ask("State: ", validate_state).unwrap();
        assert_eq!(state, Some(BookState::Reading));

        let out = String::from_utf8(p.output.clone()).unwrap();
        assert!(out.contains("rdng is not a valid book state. Please try again."));
        assert!(out.contains("Reading is not a valid book state. Please try again."));
        assert_eq!(out.matches("State: ").count(), 3);
    }

    #[test]
    fn ask_gives_up_at_end_of_input() {
        let mut p = prompter("nope\n");
        assert_eq!(p.ask("State: ", validate_state).unwrap(), None);
    }

    #[test]
    fn ask_propagates_other_errors() {
        let mut p = prompter("anything\n");
        let result: Result<Option<()>> = p.ask("> ", |_| Err(KeeperError::NotFound(1)));
        assert!(matches!(result, Err(KeeperError::NotFound(1))));
    }

    #[test]
    fn read_line_rejects_invalid_utf8_and_moves_on() {
        let mut p = raw_prompter(b"\xff\xfe\nnext\n");
        assert!(matches!(p.read_line("> "), Err(KeeperError::InvalidInput(_))));
        assert_eq!(p.read_line("> ").unwrap().as_deref(), Some("next"));
    }

    #[test]
    fn ask_reprompts_after_invalid_utf8() {
        let mut p = raw_prompter(b"\xff\xfe\nreading\n");
        let state = p.ask("State: ", validate_state).unwrap();
        assert_eq!(state, Some(BookState::Reading));

        let out = String::from_utf8(p.output.clone()).unwrap();
        assert!(out.contains("Input is not valid UTF-8. Please try again."));
        assert_eq!(out.matches("State: ").count(), 2);
    }
}

//! # Prompter
//!
//! Line-oriented terminal I/O over any `BufRead` + `Write` pair, so a whole
//! session can run against stdin/stdout or against a scripted buffer.
//!
//! ## Retry Loop
//! ```text
//! ask_with("Quantity to add: ", parser)
//!      │
//!      ├── read line ── EOF ───────────────► Err(AppError::InputClosed)
//!      │
//!      ├── parser(line) ── Err(e) ─► print e ─┐
//!      │        ▲                              │
//!      │        └──────────────────────────────┘
//!      │
//!      └── Ok(value) ─────────────────────────► Ok(value)
//! ```

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::ops::RangeInclusive;

use crate::error::{AppError, AppResult};

/// Prompts on `output`, reads answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Prints one line.
    pub fn say(&mut self, text: impl Display) -> AppResult<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Prints an empty line.
    pub fn blank(&mut self) -> AppResult<()> {
        writeln!(self.output)?;
        Ok(())
    }

    /// Prints `prompt` and reads one line, without its line ending.
    pub fn ask(&mut self, prompt: &str) -> AppResult<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AppError::InputClosed);
        }
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }

    /// Asks until `parse` accepts the answer, printing each rejection.
    pub fn ask_with<T, E, F>(&mut self, prompt: &str, parse: F) -> AppResult<T>
    where
        E: Display,
        F: Fn(&str) -> Result<T, E>,
    {
        loop {
            let line = self.ask(prompt)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(e) => self.say(e)?,
            }
        }
    }

    /// Asks for a menu number within `range`.
    pub fn choose(&mut self, prompt: &str, range: RangeInclusive<usize>) -> AppResult<usize> {
        self.ask_with(prompt, |text| {
            text.trim()
                .parse::<usize>()
                .ok()
                .filter(|n| range.contains(n))
                .ok_or("Invalid option. Try again.")
        })
    }

    /// Asks a y/n question.
    pub fn confirm(&mut self, prompt: &str) -> AppResult<bool> {
        self.ask_with(prompt, |text| match text.trim().to_lowercase().as_str() {
            "y" | "yes" => Ok(true),
            "n" | "no" => Ok(false),
            _ => Err("Invalid input. Enter y or n."),
        })
    }

    /// Gives back the output sink.
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(prompter: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.into_output()).unwrap()
    }

    #[test]
    fn test_ask_strips_line_endings() {
        let mut io = prompter("alice\r\n  bob  \n");
        assert_eq!(io.ask("Name: ").unwrap(), "alice");
        assert_eq!(io.ask("Name: ").unwrap(), "  bob  ");
        assert_eq!(output(io), "Name: Name: ");
    }

    #[test]
    fn test_eof_is_input_closed() {
        let mut io = prompter("");
        assert!(matches!(io.ask("> "), Err(AppError::InputClosed)));

        // A final line without a newline still counts
        let mut io = prompter("last");
        assert_eq!(io.ask("> ").unwrap(), "last");
        assert!(matches!(io.ask("> "), Err(AppError::InputClosed)));
    }

    #[test]
    fn test_choose_retries_until_in_range() {
        let mut io = prompter("x\n9\n0\n2\n");
        assert_eq!(io.choose("Pick: ", 1..=3).unwrap(), 2);
        let out = output(io);
        assert_eq!(out.matches("Invalid option. Try again.").count(), 3);
    }

    #[test]
    fn test_confirm() {
        let mut io = prompter("maybe\nY\nno\n");
        assert!(io.confirm("? ").unwrap());
        assert!(!io.confirm("? ").unwrap());
        assert!(output(io).contains("Enter y or n"));
    }

    #[test]
    fn test_ask_with_prints_parser_errors() {
        let mut io = prompter("-1\n4\n");
        let n = io
            .ask_with("Qty: ", |t| awe_core::validation::parse_positive_int("quantity", t))
            .unwrap();
        assert_eq!(n, 4);
        assert!(output(io).contains("quantity must be positive"));
    }
}

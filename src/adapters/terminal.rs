use crate::domain::ports::Prompt;
use crate::utils::error::Result;
use std::io::{BufRead, Write};

/// Line-oriented prompt over any reader/writer pair (stdin/stdout in the
/// binary, in-memory buffers in tests).
pub struct TerminalPrompt<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    fn next_command(&mut self) -> Result<Option<String>> {
        write!(self.output, "> ")?;
        self.output.flush()?;
        self.read_line()
    }

    fn ask(&mut self, question: &str, default: Option<&str>) -> Result<Option<String>> {
        match default {
            Some(value) => write!(self.output, "{} [{}]: ", question, value)?,
            None => write!(self.output, "{}: ", question)?,
        }
        self.output.flush()?;

        let answer = match self.read_line()? {
            Some(answer) => answer,
            None => return Ok(None),
        };
        if answer.trim().is_empty() {
            return Ok(Some(default.unwrap_or_default().to_string()));
        }
        Ok(Some(answer))
    }

    fn show(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    fn show_error(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "Error: {}", message)?;
        Ok(())
    }
}

//! Interactive path acquisition

use crate::error::{AudioError, AudioResult};
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Prompt shown before the waveform path is read
pub const WAVE_PROMPT: &str = "Input the name of the wave file.";
/// Prompt shown before the output path is read
pub const OUTPUT_PROMPT: &str = "Input the name of the output file.";

/// Prints a prompt line, then reads the next whitespace-delimited token.
///
/// Tokens left over on a line are handed out by later calls without
/// reading further input, so `a.wav out.txt` on a single line answers
/// both prompts.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Wrap an input stream and the stream prompts are written to
    pub fn new(reader: R, writer: W) -> Self {
        Prompter {
            reader,
            writer,
            pending: VecDeque::new(),
        }
    }

    /// Show `message` and return the next token.
    ///
    /// `expected` names the answer in the error raised when input runs out.
    pub fn ask(&mut self, message: &str, expected: &'static str) -> AudioResult<String> {
        writeln!(self.writer, "{message}")?;
        self.writer.flush()?;
        self.next_token()?.ok_or(AudioError::InputExhausted { expected })
    }

    /// Use `given` when present, otherwise ask for it
    pub fn resolve(
        &mut self,
        given: Option<PathBuf>,
        message: &str,
        expected: &'static str,
    ) -> AudioResult<PathBuf> {
        match given {
            Some(path) => Ok(path),
            None => self.ask(message, expected).map(PathBuf::from),
        }
    }

    fn next_token(&mut self) -> AudioResult<Option<String>> {
        let mut line = String::new();
        while self.pending.is_empty() {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(line.split_whitespace().map(str::to_owned));
        }
        Ok(self.pending.pop_front())
    }
}

//! Line readers feeding the read-eval loop.
//!
//! Both readers hand out lines that are already validated: non-blank, within
//! [`Limits::max_line_len`], free of control characters other than tab, and
//! trimmed of surrounding whitespace.

use crate::config::Limits;
use anyhow::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::fs::File;
use std::io::{self, Read, Write};
use std::os::fd::AsFd;

/// Prompt shown before each line when reading from a terminal.
pub const PROMPT: &str = "# ";

/// Anything the read-eval loop can pull lines from.
pub trait LineSource {
    /// The next usable line, or `None` at end of input.
    ///
    /// Errors are unrecoverable read failures.
    fn next_line(&mut self) -> Result<Option<String>>;
}

/// Result of checking one raw input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checked<'a> {
    Accepted(&'a str),
    Blank,
    TooLong,
    ControlCharacter,
}

/// Validate a raw line, with its newline already removed.
pub fn validate_line<'a>(raw: &'a str, limits: &Limits) -> Checked<'a> {
    if raw.len() > limits.max_line_len {
        return Checked::TooLong;
    }
    check_content(raw)
}

/// Everything [`validate_line`] checks except the length.
fn check_content(raw: &str) -> Checked<'_> {
    let line = raw.trim();
    if line.is_empty() {
        Checked::Blank
    } else if line.chars().any(|c| c.is_control() && c != '\t') {
        Checked::ControlCharacter
    } else {
        Checked::Accepted(line)
    }
}

/// Turn a check result into a line, reporting rejected lines to `diagnostics`.
fn accept(checked: Checked<'_>, diagnostics: &mut dyn Write) -> io::Result<Option<String>> {
    match checked {
        Checked::Accepted(line) => return Ok(Some(line.to_owned())),
        Checked::Blank => {}
        Checked::TooLong => writeln!(diagnostics, "Input line is too long.")?,
        Checked::ControlCharacter => {
            writeln!(diagnostics, "*** ERROR: Control characters are not allowed.")?
        }
    }
    Ok(None)
}

/// Interactive input through a line editor, with a prompt and history.
pub struct TerminalInput {
    editor: DefaultEditor,
    limits: Limits,
}

impl TerminalInput {
    pub fn new(limits: Limits) -> Result<Self> {
        let editor = DefaultEditor::new().context("Error initializing the line editor")?;
        Ok(Self { editor, limits })
    }
}

impl LineSource for TerminalInput {
    fn next_line(&mut self) -> Result<Option<String>> {
        loop {
            match self.editor.readline(PROMPT) {
                Ok(raw) => {
                    let checked = validate_line(&raw, &self.limits);
                    if let Some(line) = accept(checked, &mut io::stderr())? {
                        self.editor.add_history_entry(line.as_str())?;
                        return Ok(Some(line));
                    }
                }
                Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => return Ok(None),
                Err(err) => return Err(err).context("Error reading command line"),
            }
        }
    }
}

/// Non-interactive input, e.g. a file redirected to standard input.
///
/// No prompt is shown; instead every byte read is echoed to `echo` so the
/// output reads like a terminal session. A trailing fragment with no newline
/// is dropped.
///
/// The reader is consumed one byte at a time and never past the newline, so
/// with an unbuffered reader on fd 0 a child started for one line reads the
/// input that follows it.
pub struct StreamInput<R, W, E> {
    reader: R,
    echo: W,
    diagnostics: E,
    limits: Limits,
}

impl<R: Read, W: Write, E: Write> StreamInput<R, W, E> {
    pub fn new(reader: R, echo: W, diagnostics: E, limits: Limits) -> Self {
        Self {
            reader,
            echo,
            diagnostics,
            limits,
        }
    }

    /// Append bytes up to and including the next newline to `buf`.
    ///
    /// Returns `false` if input ended before a newline.
    fn read_raw_line(&mut self, buf: &mut Vec<u8>) -> io::Result<bool> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(false),
                Ok(_) => {
                    buf.push(byte[0]);
                    if byte[0] == b'\n' {
                        return Ok(true);
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }
}

impl StreamInput<File, io::Stdout, io::Stderr> {
    /// Read from the process's standard input, echoing to standard output.
    ///
    /// Reads go through an unbuffered duplicate of fd 0, which shares its
    /// file offset with the descriptor children inherit.
    pub fn from_stdio(limits: Limits) -> io::Result<Self> {
        let stdin = io::stdin().as_fd().try_clone_to_owned()?;
        Ok(Self::new(File::from(stdin), io::stdout(), io::stderr(), limits))
    }
}

impl<R: Read, W: Write, E: Write> LineSource for StreamInput<R, W, E> {
    fn next_line(&mut self) -> Result<Option<String>> {
        loop {
            let mut buf = Vec::new();
            let terminated = self
                .read_raw_line(&mut buf)
                .context("Error reading command line")?;
            if buf.is_empty() {
                return Ok(None);
            }
            self.echo.write_all(&buf)?;
            self.echo.flush()?;

            if !terminated {
                return Ok(None);
            }
            buf.pop();
            // The limit is in bytes of input, so measure before lossy decoding.
            let decoded;
            let checked = if buf.len() > self.limits.max_line_len {
                Checked::TooLong
            } else {
                decoded = String::from_utf8_lossy(&buf);
                check_content(&decoded)
            };
            if let Some(line) = accept(checked, &mut self.diagnostics)? {
                return Ok(Some(line));
            }
        }
    }
}

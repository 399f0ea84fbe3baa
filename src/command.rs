use std::path::PathBuf;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// Status recorded for a pipeline stage whose program could not be started.
pub const EXEC_FAILURE: ExitCode = 127;

/// One program invocation: `words[0]` names the program, the rest are its arguments.
///
/// The words borrow from the input line and stay unchanged once the command
/// has been built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command<'a> {
    words: Vec<&'a str>,
}

impl<'a> Command<'a> {
    pub fn new(words: Vec<&'a str>) -> Self {
        Self { words }
    }

    /// The program name or path, `None` for an empty command.
    pub fn program(&self) -> Option<&'a str> {
        self.words.first().copied()
    }

    /// Arguments following the program name.
    pub fn args(&self) -> &[&'a str] {
        self.words.get(1..).unwrap_or(&[])
    }

    pub fn words(&self) -> &[&'a str] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// What a single input line asks to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pipeline<'a> {
    /// A lone command.
    Single(Command<'a>),
    /// Two commands where `left`'s standard output feeds `right`'s standard input.
    Piped { left: Command<'a>, right: Command<'a> },
}

/// A command together with the executable path it resolved to.
///
/// The path was executable when it was checked; nothing guarantees it still is
/// by the time the process is spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand<'a> {
    pub path: PathBuf,
    pub command: Command<'a>,
}

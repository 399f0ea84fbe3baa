use std::env as stdenv;
use std::ffi::OsString;

/// Source of the colon-separated directory list used to find bare command names.
///
/// The resolver asks for the value each time it needs it and never caches it,
/// so a change to `PATH` is seen by the next command.
pub trait SearchPath {
    /// The current search path, or `None` when it is not set.
    fn search_path(&self) -> Option<OsString>;
}

/// Read-only view of the process environment used by the interpreter.
///
/// Children always inherit the real process environment unmodified; the
/// optional override only changes where the interpreter itself looks for
/// programs.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    path: Option<OsString>,
}

impl Environment {
    /// Resolve commands through the process's own `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve commands through `path` instead of the process's `PATH`.
    pub fn with_path(path: impl Into<OsString>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}

impl SearchPath for Environment {
    /// Returns the override if there is one, falling back to `std::env::var_os("PATH")`.
    fn search_path(&self) -> Option<OsString> {
        self.path.clone().or_else(|| stdenv::var_os("PATH"))
    }
}

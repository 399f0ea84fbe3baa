use crate::command::{Command, ExitCode, ResolvedCommand};
use crate::env::SearchPath;
use std::ffi::{CString, OsStr, OsString};
use std::fmt;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::path::{Path, PathBuf};
use std::process::{Child, ExitStatus, Stdio};
use tracing::debug;

/// A command whose program could not be found or is not executable.
///
/// `name` is empty when the command itself had no words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFound {
    pub name: String,
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' cannot be executed", self.name)
    }
}

impl std::error::Error for NotFound {}

/// Resolve a command's program to an executable path.
///
/// Behavior:
/// - Empty command: `NotFound`, without consulting the search path.
/// - Name containing `/`: used as the path verbatim, if it is executable.
/// - Bare name: each `PATH` directory is tried in order as `<dir>/<name>` and
///   the first executable candidate wins. An empty directory entry yields
///   `/<name>`.
///
/// "Executable" is whatever `access(2)` with `X_OK` says, so a searchable
/// directory passes the check too.
pub fn resolve<'a>(
    command: Command<'a>,
    env: &dyn SearchPath,
) -> Result<ResolvedCommand<'a>, NotFound> {
    let Some(name) = command.program() else {
        return Err(NotFound {
            name: String::new(),
        });
    };

    let found = if name.contains('/') {
        find_by_path(Path::new(name))
    } else {
        env.search_path()
            .and_then(|search_paths| find_in_path(&search_paths, name))
    };

    match found {
        Some(path) => {
            debug!(name, path = %path.display(), "resolved command");
            Ok(ResolvedCommand { path, command })
        }
        None => {
            debug!(name, "command not found");
            Err(NotFound {
                name: name.to_owned(),
            })
        }
    }
}

fn find_in_path(search_paths: &OsStr, cmd: &str) -> Option<PathBuf> {
    for dir in search_paths.as_bytes().split(|b| *b == b':') {
        let mut candidate = OsString::from(OsStr::from_bytes(dir));
        candidate.push("/");
        candidate.push(cmd);
        if let Some(path) = find_by_path(Path::new(&candidate)) {
            return Some(path);
        }
    }
    None
}

fn find_by_path(path: &Path) -> Option<PathBuf> {
    if is_executable(path) {
        Some(path.to_path_buf())
    } else {
        None
    }
}

fn is_executable(path: &Path) -> bool {
    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: `c_path` is a valid NUL-terminated string that outlives the call.
    unsafe { libc::access(c_path.as_ptr(), libc::X_OK) == 0 }
}

impl ResolvedCommand<'_> {
    /// Start the program with the given standard input and output.
    ///
    /// `argv[0]` is the word the user typed, not the resolved path. Standard
    /// error and the environment are inherited. The `std::process::Command`
    /// builder, and with it the parent's copy of `stdin` and `stdout`, is
    /// dropped before this returns.
    pub(crate) fn spawn(&self, stdin: Stdio, stdout: Stdio) -> io::Result<Child> {
        debug!(path = %self.path.display(), argv = ?self.command.words(), "spawning");
        std::process::Command::new(&self.path)
            .arg0(self.command.program().unwrap_or_default())
            .args(self.command.args())
            .stdin(stdin)
            .stdout(stdout)
            .spawn()
    }
}

/// Wait for `child` and convert how it ended into an [`ExitCode`].
pub(crate) fn wait(mut child: Child) -> io::Result<ExitCode> {
    let exit_status = child.wait()?;
    debug!(pid = child.id(), %exit_status, "child finished");
    Ok(match exit_status.code() {
        Some(x) => x,
        None => terminated_by_signal(exit_status),
    })
}

fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    if let Some(signal) = exit_status.signal() {
        128 + signal
    } else if exit_status.core_dumped() {
        255
    } else {
        -1
    }
}

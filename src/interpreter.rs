use crate::command::{EXEC_FAILURE, ExitCode, Pipeline, ResolvedCommand};
use crate::config::Limits;
use crate::env::Environment;
use crate::external::{self, NotFound, resolve};
use crate::input::LineSource;
use crate::lexer::{self, ParseError};
use crate::parser;
use std::io::{self, Write};
use std::process::{Child, Stdio};
use tracing::debug;

/// What happened to one input line.
///
/// Every outcome lets the read-eval loop carry on with the next line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The line was discarded before resolution.
    Rejected(ParseError),
    /// At least one command did not resolve, so nothing was started.
    /// Holds the unresolved command names.
    NotExecutable(Vec<String>),
    /// Every started process has been waited on; holds the last stage's status.
    Completed(ExitCode),
}

/// A minimal command interpreter running one or two external programs per line.
///
/// Example
/// ```no_run
/// use tinysh::Interpreter;
/// use tinysh::input::StreamInput;
///
/// let sh = Interpreter::default();
/// let mut input = StreamInput::from_stdio(*sh.limits()).unwrap();
/// sh.repl(&mut input).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct Interpreter {
    env: Environment,
    limits: Limits,
}

impl Interpreter {
    pub fn new(env: Environment, limits: Limits) -> Self {
        Self { env, limits }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Read-eval loop: evaluate lines from `source` until it runs out.
    ///
    /// Children write straight to the inherited standard output; diagnostics go
    /// to standard error. Once input ends a single newline is written.
    pub fn repl(&self, source: &mut dyn LineSource) -> anyhow::Result<()> {
        while let Some(line) = source.next_line()? {
            if let Err(e) = self.eval_line(&line, Stdio::inherit(), &mut io::stderr()) {
                eprintln!("*** ERROR: {e}.");
            }
        }
        let mut stdout = io::stdout();
        stdout.write_all(b"\n")?;
        stdout.flush()?;
        Ok(())
    }

    /// Tokenize, split and execute one validated line.
    ///
    /// `stdout` becomes the standard output of the last stage.
    pub fn eval_line(
        &self,
        line: &str,
        stdout: Stdio,
        diagnostics: &mut dyn Write,
    ) -> io::Result<ExecutionOutcome> {
        let tokens = match lexer::tokenize(line, &self.limits) {
            Ok(tokens) => tokens,
            Err(e) => {
                writeln!(diagnostics, "*** ERROR: {e}.")?;
                return Ok(ExecutionOutcome::Rejected(e));
            }
        };
        if tokens.is_empty() {
            return Ok(ExecutionOutcome::Completed(0));
        }
        self.execute(parser::split(tokens), stdout, diagnostics)
    }

    /// Resolve every command of `pipeline` and, only if all of them resolve, run it.
    pub fn execute(
        &self,
        pipeline: Pipeline<'_>,
        stdout: Stdio,
        diagnostics: &mut dyn Write,
    ) -> io::Result<ExecutionOutcome> {
        match pipeline {
            Pipeline::Single(command) => match resolve(command, &self.env) {
                Ok(resolved) => {
                    let child = start(&resolved, Stdio::inherit(), stdout, diagnostics)?;
                    Ok(ExecutionOutcome::Completed(finish(child)?))
                }
                Err(missing) => report_not_found(diagnostics, vec![missing]),
            },
            Pipeline::Piped { left, right } => {
                match (resolve(left, &self.env), resolve(right, &self.env)) {
                    (Ok(left), Ok(right)) => {
                        let status = run_piped(&left, &right, stdout, diagnostics)?;
                        Ok(ExecutionOutcome::Completed(status))
                    }
                    (left, right) => {
                        let missing = [left.err(), right.err()].into_iter().flatten().collect();
                        report_not_found(diagnostics, missing)
                    }
                }
            }
        }
    }
}

fn run_piped(
    left: &ResolvedCommand<'_>,
    right: &ResolvedCommand<'_>,
    stdout: Stdio,
    diagnostics: &mut dyn Write,
) -> io::Result<ExitCode> {
    let (reader, writer) = io::pipe()?;
    // Each pipe end is moved into its child's stdio and closed in the parent
    // by the time `start` returns, so the reader sees end-of-file once the
    // upstream child exits.
    let upstream = start(left, Stdio::inherit(), writer.into(), diagnostics)?;
    let downstream = match start(right, reader.into(), stdout, diagnostics) {
        Ok(child) => child,
        Err(e) => {
            // Reap the upstream child before giving up on the line.
            finish(upstream)?;
            return Err(e);
        }
    };

    let upstream_status = finish(upstream);
    let downstream_status = finish(downstream);
    debug!(?upstream_status, ?downstream_status, "pipeline finished");
    upstream_status?;
    downstream_status
}

/// Spawn one stage; a stage that cannot be started is reported and yields `None`.
///
/// Only a failure to write that report is an error.
fn start(
    resolved: &ResolvedCommand<'_>,
    stdin: Stdio,
    stdout: Stdio,
    diagnostics: &mut dyn Write,
) -> io::Result<Option<Child>> {
    match resolved.spawn(stdin, stdout) {
        Ok(child) => Ok(Some(child)),
        Err(e) => {
            writeln!(
                diagnostics,
                "*** ERROR: '{}' could not be started: {e}.",
                resolved.command.program().unwrap_or_default()
            )?;
            Ok(None)
        }
    }
}

fn finish(child: Option<Child>) -> io::Result<ExitCode> {
    match child {
        Some(child) => external::wait(child),
        None => Ok(EXEC_FAILURE),
    }
}

fn report_not_found(
    diagnostics: &mut dyn Write,
    missing: Vec<NotFound>,
) -> io::Result<ExecutionOutcome> {
    let names: Vec<String> = missing.into_iter().map(|m| m.name).collect();
    let quoted = names
        .iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(diagnostics, "*** ERROR: {quoted} cannot be executed.\n")?;
    Ok(ExecutionOutcome::NotExecutable(names))
}

use anyhow::Context;
use argh::FromArgs;
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tinysh::Interpreter;
use tinysh::config::Limits;
use tinysh::env::Environment;
use tinysh::input::{LineSource, StreamInput, TerminalInput};
use tracing::level_filters::LevelFilter;

#[derive(FromArgs)]
/// A minimal command interpreter: one command per line, optionally piped into a second one.
struct Args {
    /// longest accepted input line, in bytes
    #[argh(option, default = "Limits::default().max_line_len")]
    max_line_len: usize,

    /// maximum number of words on a line
    #[argh(option, default = "Limits::default().max_words")]
    max_words: usize,

    /// word length budget; words must be shorter than this
    #[argh(option, default = "Limits::default().max_word_len")]
    max_word_len: usize,

    /// log command resolution and process lifetimes to standard error
    #[argh(switch, short = 'v')]
    verbose: bool,
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if args.verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::WARN
        })
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let limits = Limits {
        max_line_len: args.max_line_len,
        max_words: args.max_words,
        max_word_len: args.max_word_len,
    };
    let sh = Interpreter::new(Environment::new(), limits);

    let mut source: Box<dyn LineSource> = if io::stdin().is_terminal() {
        Box::new(TerminalInput::new(limits)?)
    } else {
        Box::new(StreamInput::from_stdio(limits).context("Error opening standard input")?)
    };
    sh.repl(source.as_mut())
}

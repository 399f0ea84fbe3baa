//! A tiny interactive command interpreter.
//!
//! Each input line is split into words, the words are split into at most two
//! commands around a `|` separator, every command is resolved to an executable
//! path (directly or through `PATH`), and the result is run as one child
//! process or as two children connected by an anonymous pipe.
//!
//! The main entry point is [`Interpreter`]. The public modules [`command`],
//! [`config`], [`env`] and [`input`] expose the types needed to drive it from
//! another program or from tests.

pub mod command;
pub mod config;
pub mod env;
mod external;
pub mod input;
mod interpreter;
mod lexer;
mod parser;

pub use external::{NotFound, resolve};
pub use interpreter::{ExecutionOutcome, Interpreter};
pub use lexer::{ParseError, tokenize};
pub use parser::split;

use crate::command::{Command, Pipeline};
use crate::lexer::Token;

/// The word that separates the two halves of a pipeline.
pub const PIPE: &str = "|";

/// Split a tokenized line into a [`Pipeline`].
///
/// Only the last `|` word separates the two commands. Any earlier `|` words
/// stay in the left command and reach its program as literal arguments, so
/// `a | b | c` runs `a` with arguments `| b` and pipes it into `c`.
/// A trailing `|` leaves the right command empty.
pub fn split(tokens: Vec<Token<'_>>) -> Pipeline<'_> {
    match tokens.iter().rposition(|token| *token == PIPE) {
        None => Pipeline::Single(Command::new(tokens)),
        Some(at) => {
            let mut left = tokens;
            let right = left.split_off(at + 1);
            left.pop();
            Pipeline::Piped {
                left: Command::new(left),
                right: Command::new(right),
            }
        }
    }
}

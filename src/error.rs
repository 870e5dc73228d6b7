//! Errors raised while compiling rule notation or applying compiled rules.

use std::fmt;
use thiserror::Error;

/// A malformed piece of notation.
///
/// `position` is a character offset into `text` when the failure can be pinned down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: &'static str,
    pub position: Option<usize>,
    pub text: String,
}

impl SyntaxError {
    pub fn new(message: &'static str, text: &str) -> SyntaxError {
        SyntaxError { message, position: None, text: text.to_string() }
    }

    pub fn at(message: &'static str, position: usize, text: &str) -> SyntaxError {
        SyntaxError { message, position: Some(position), text: text.to_string() }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(pos) => write!(f, "{} at char {} in '{}'", self.message, pos, self.text),
            None => write!(f, "{} in '{}'", self.message, self.text),
        }
    }
}

impl std::error::Error for SyntaxError {}

/// Everything that can go wrong between a notation string and a processed word.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// An output literal that the language has no phoneme for.
    #[error("no phoneme with symbol '{symbol}' (in rule '{rule}')")]
    UnknownPhoneme { symbol: char, rule: String },

    /// A feature-changing output applied to a span of a different length.
    #[error("rule '{rule}' has {expected} output slots but matched {found} phonemes")]
    LengthMismatch { expected: usize, found: usize, rule: String },
}

pub type Result<T> = std::result::Result<T, Error>;

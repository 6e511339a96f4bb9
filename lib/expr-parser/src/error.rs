use snafu::Snafu;

use crate::lexer::TokenKind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum Error {
    #[snafu(display("Lexical error: {}", source), context(false))]
    Lex { source: LexError },

    #[snafu(display("Parse error: {}", source), context(false))]
    Parse { source: ParseError },
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum LexError {
    #[snafu(display("Unrecognized character '{}' at position {}", ch, position))]
    UnrecognizedCharacter { ch: char, position: usize },

    #[snafu(display("Incomplete connective starting with '{}' at position {}, expected {}", ch, position, expected))]
    IncompleteConnective {
        ch: char,
        position: usize,
        expected: &'static str,
    },
}

impl LexError {
    pub fn ch(&self) -> char {
        match self {
            LexError::UnrecognizedCharacter { ch, .. } | LexError::IncompleteConnective { ch, .. } => *ch,
        }
    }

    pub fn position(&self) -> usize {
        match self {
            LexError::UnrecognizedCharacter { position, .. } | LexError::IncompleteConnective { position, .. } => *position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum ParseError {
    #[snafu(display("Empty input, expected a formula"))]
    Empty,

    #[snafu(display("Expected {} at position {}, found {}", expected, position, found))]
    UnexpectedToken {
        expected: &'static str,
        found: TokenKind,
        position: usize,
    },

    #[snafu(display("Expected ')' closing '(' at position {}, found {} at position {}", open, found, position))]
    UnclosedParen { open: usize, found: TokenKind, position: usize },

    #[snafu(display("Expected end of input at position {}, found {}", position, found))]
    TrailingInput { found: TokenKind, position: usize },

    #[snafu(display("Nesting exceeds the limit of {} at position {}", limit, position))]
    TooDeep { limit: usize, position: usize },
}

impl ParseError {
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::Empty => None,
            ParseError::UnexpectedToken { position, .. }
            | ParseError::UnclosedParen { position, .. }
            | ParseError::TrailingInput { position, .. }
            | ParseError::TooDeep { position, .. } => Some(*position),
        }
    }
}

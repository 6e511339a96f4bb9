//! Tokenizer and precedence-climbing parser for propositional formulas.
//!
//! Precedence from lowest to highest: `<->` (right), `->` (right), `|` (left), `&` (left), `!` (prefix).

pub mod error;
pub mod expr;
pub mod lexer;
pub mod parser;

pub use error::{Error, LexError, ParseError, Result};
pub use expr::{BinOp, Expr};
pub use parser::{parse_expr, parse_expr_with_depth, DEFAULT_MAX_DEPTH};

use std::fmt::{Display, Formatter};
use std::iter::Peekable;
use std::str::Chars;

use log::debug;

use crate::error::LexError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Variable(String),
    Not,
    And,
    Or,
    Implies,
    Iff,
    LParen,
    RParen,
    End,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Variable(name) => write!(f, "variable '{name}'"),
            TokenKind::Not => write!(f, "'!'"),
            TokenKind::And => write!(f, "'&'"),
            TokenKind::Or => write!(f, "'|'"),
            TokenKind::Implies => write!(f, "'->'"),
            TokenKind::Iff => write!(f, "'<->'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::End => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Character offset of the first character of the token.
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, position: usize) -> Self {
        Token { kind, position }
    }
}

pub fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    position: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Lexer {
            chars: input.chars().peekable(),
            position: 0,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.position += 1;
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.chars.peek() == Some(&expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    // Consumes the remainder of a multi-character connective whose first character `ch` is already consumed.
    fn finish(&mut self, ch: char, start: usize, rest: &str, expected: &'static str) -> Result<(), LexError> {
        for c in rest.chars() {
            if !self.eat(c) {
                return Err(LexError::IncompleteConnective {
                    ch,
                    position: start,
                    expected,
                });
            }
        }
        Ok(())
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
            self.bump();
        }

        let start = self.position;
        let Some(c) = self.bump() else {
            return Ok(Token::new(TokenKind::End, start));
        };

        let kind = match c {
            '!' | '~' | '¬' => TokenKind::Not,
            '∧' => TokenKind::And,
            '∨' => TokenKind::Or,
            '→' => TokenKind::Implies,
            '↔' => TokenKind::Iff,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '&' => {
                self.eat('&');
                TokenKind::And
            }
            '|' => {
                self.eat('|');
                TokenKind::Or
            }
            // `-` alone is negation
            '-' => {
                if self.eat('>') {
                    TokenKind::Implies
                } else {
                    TokenKind::Not
                }
            }
            '=' => {
                self.finish(c, start, ">", "'=>'")?;
                TokenKind::Implies
            }
            '<' => {
                if self.eat('-') {
                    self.finish(c, start, ">", "'<->'")?;
                } else {
                    self.finish(c, start, "=>", "'<->' or '<=>'")?;
                }
                TokenKind::Iff
            }
            c if is_ident_char(c) => {
                let mut name = String::from(c);
                while let Some(&c) = self.chars.peek() {
                    if !is_ident_char(c) {
                        break;
                    }
                    name.push(c);
                    self.bump();
                }
                TokenKind::Variable(name)
            }
            ch => return Err(LexError::UnrecognizedCharacter { ch, position: start }),
        };

        Ok(Token::new(kind, start))
    }
}

/// Splits `input` into tokens. The returned sequence always ends with [`TokenKind::End`].
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let is_end = token.kind == TokenKind::End;
        tokens.push(token);
        if is_end {
            break;
        }
    }
    debug!("tokenize({input:?}) -> {} tokens", tokens.len());
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).unwrap().into_iter().map(|t| t.kind).collect()
    }

    fn var(name: &str) -> TokenKind {
        TokenKind::Variable(name.to_string())
    }

    #[test]
    fn test_ascii_connectives() {
        assert_eq!(
            kinds("!a & b | c -> d <-> e"),
            vec![
                TokenKind::Not,
                var("a"),
                TokenKind::And,
                var("b"),
                TokenKind::Or,
                var("c"),
                TokenKind::Implies,
                var("d"),
                TokenKind::Iff,
                var("e"),
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn test_unicode_connectives() {
        assert_eq!(kinds("¬a∧b∨c→d↔e"), kinds("!a & b | c -> d <-> e"));
    }

    #[test]
    fn test_alternative_spellings() {
        assert_eq!(kinds("~a && b || c => d <=> e"), kinds("!a & b | c -> d <-> e"));
        assert_eq!(kinds("-(a & b) -> c"), kinds("!(a & b) -> c"));
    }

    #[test]
    fn test_identifiers_are_maximal() {
        assert_eq!(kinds("foo_1&x42"), vec![var("foo_1"), TokenKind::And, var("x42"), TokenKind::End]);
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("  (ab -> c)").unwrap();
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![2, 3, 6, 9, 10, 11]);
    }

    #[test]
    fn test_positions_count_characters() {
        let tokens = tokenize("¬a ∧ b").unwrap();
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 1, 3, 5, 6]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(kinds("   "), vec![TokenKind::End]);
    }

    #[test]
    fn test_unrecognized_character() {
        let err = tokenize("A # B").unwrap_err();
        assert_eq!(err, LexError::UnrecognizedCharacter { ch: '#', position: 2 });
        assert_eq!(err.ch(), '#');
    }

    #[test]
    fn test_dash_is_negation_unless_arrow() {
        assert_eq!(kinds("a -b"), vec![var("a"), TokenKind::Not, var("b"), TokenKind::End]);
        assert_eq!(kinds("--a->b"), kinds("!!a -> b"));
    }

    #[test]
    fn test_incomplete_double_arrow() {
        let err = tokenize("a = b").unwrap_err();
        assert!(matches!(err, LexError::IncompleteConnective { ch: '=', position: 2, .. }));
    }

    #[test]
    fn test_incomplete_iff() {
        let err = tokenize("a <- b").unwrap_err();
        assert!(matches!(err, LexError::IncompleteConnective { ch: '<', position: 2, .. }));
    }
}

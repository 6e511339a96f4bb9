use log::debug;

use crate::error::{ParseError, Result};
use crate::expr::{BinOp, Expr};
use crate::lexer::{tokenize, Token, TokenKind};

/// Default limit on the nesting of negations, parentheses and right-associative chains.
pub const DEFAULT_MAX_DEPTH: usize = 256;

const EXPECTED_OPERAND: &str = "a variable, '!' or '('";

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>, max_depth: usize) -> Self {
        debug_assert!(matches!(tokens.last(), Some(Token { kind: TokenKind::End, .. })));
        Parser {
            tokens,
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    // `pos` never moves past the trailing `End` token.
    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek(&self) -> &TokenKind {
        &self.current().kind
    }

    fn position(&self) -> usize {
        self.current().position
    }

    fn bump(&mut self) {
        if self.peek() != &TokenKind::End {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek() == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn descend(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ParseError::TooDeep {
                limit: self.max_depth,
                position: self.position(),
            });
        }
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth -= 1;
    }

    fn parse(mut self) -> Result<Expr, ParseError> {
        if self.peek() == &TokenKind::End {
            return Err(ParseError::Empty);
        }
        let expr = self.parse_iff()?;
        match self.peek() {
            TokenKind::End => Ok(expr),
            found => Err(ParseError::TrailingInput {
                found: found.clone(),
                position: self.position(),
            }),
        }
    }

    // iff := imply ('<->' iff)?
    fn parse_iff(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.parse_imply()?;
        if self.eat(&TokenKind::Iff) {
            self.descend()?;
            let rhs = self.parse_iff()?;
            self.ascend();
            return Ok(Expr::iff(lhs, rhs));
        }
        Ok(lhs)
    }

    // imply := or ('->' imply)?
    fn parse_imply(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.parse_or()?;
        if self.eat(&TokenKind::Implies) {
            self.descend()?;
            let rhs = self.parse_imply()?;
            self.ascend();
            return Ok(Expr::imply(lhs, rhs));
        }
        Ok(lhs)
    }

    // or := and ('|' and)*
    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_and()?;
        while self.eat(&TokenKind::Or) {
            let rhs = self.parse_and()?;
            lhs = Expr::binop(BinOp::Or, lhs, rhs);
        }
        Ok(lhs)
    }

    // and := unary ('&' unary)*
    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_unary()?;
        while self.eat(&TokenKind::And) {
            let rhs = self.parse_unary()?;
            lhs = Expr::binop(BinOp::And, lhs, rhs);
        }
        Ok(lhs)
    }

    // unary := '!' unary | primary
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.eat(&TokenKind::Not) {
            self.descend()?;
            let arg = self.parse_unary()?;
            self.ascend();
            return Ok(Expr::negation(arg));
        }
        self.parse_primary()
    }

    // primary := variable | '(' iff ')'
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let position = self.position();
        match self.peek().clone() {
            TokenKind::Variable(name) => {
                self.bump();
                Ok(Expr::Var(name))
            }
            TokenKind::LParen => {
                self.bump();
                self.descend()?;
                let expr = self.parse_iff()?;
                self.ascend();
                if !self.eat(&TokenKind::RParen) {
                    return Err(ParseError::UnclosedParen {
                        open: position,
                        found: self.peek().clone(),
                        position: self.position(),
                    });
                }
                Ok(expr)
            }
            found => Err(ParseError::UnexpectedToken {
                expected: EXPECTED_OPERAND,
                found,
                position,
            }),
        }
    }
}

/// Parses a propositional formula with the default nesting limit.
pub fn parse_expr(input: &str) -> Result<Expr> {
    parse_expr_with_depth(input, DEFAULT_MAX_DEPTH)
}

pub fn parse_expr_with_depth(input: &str, max_depth: usize) -> Result<Expr> {
    let tokens = tokenize(input)?;
    let expr = Parser::new(tokens, max_depth).parse()?;
    debug!("parse_expr({input:?}) -> {expr}");
    Ok(expr)
}

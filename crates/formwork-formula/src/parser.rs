//! Recursive-descent parser for formula expressions.
//!
//! Grammar, with `*` and `/` binding tighter than `+` and `-`, all binary
//! operators left-associative:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := NUMBER | IDENT | '(' expr ')'
//! ```

use crate::error::{FormulaError, Result};
use crate::lexer::Lexer;
use crate::token::Token;

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// A parsed formula.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Ident(String),
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

/// Deepest allowed nesting of parenthesised and signed subexpressions.
/// Formulas past this bound fail to parse instead of recursing further.
const MAX_DEPTH: usize = 64;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Parse a complete formula. Trailing tokens after the expression are an
    /// error, as is an empty source.
    pub fn parse(src: &str) -> Result<Expr> {
        let tokens = Lexer::tokenize(src)?;
        let mut parser = Parser { tokens, pos: 0 };
        let expr = parser.parse_expr(0)?;
        if parser.pos < parser.tokens.len() {
            return Err(parser.error("expected end of formula"));
        }
        Ok(expr)
    }

    fn parse_expr(&mut self, depth: usize) -> Result<Expr> {
        let mut lhs = self.parse_term(depth)?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.parse_term(depth)?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_term(&mut self, depth: usize) -> Result<Expr> {
        let mut lhs = self.parse_unary(depth)?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.parse_unary(depth)?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    // Every recursion step, parenthesised or signed, passes through here,
    // so this is the one place the depth bound needs checking.
    fn parse_unary(&mut self, depth: usize) -> Result<Expr> {
        if depth > MAX_DEPTH {
            return Err(self.error("formula nests too deeply"));
        }
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(Expr::Neg(Box::new(self.parse_unary(depth + 1)?)))
            }
            // Unary plus is accepted and folded away.
            Some(Token::Plus) => {
                self.pos += 1;
                self.parse_unary(depth + 1)
            }
            _ => self.parse_primary(depth),
        }
    }

    fn parse_primary(&mut self, depth: usize) -> Result<Expr> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(Expr::Number(value)),
            Some(Token::Ident(name)) => Ok(Expr::Ident(name)),
            Some(Token::LParen) => {
                let inner = self.parse_expr(depth + 1)?;
                match self.advance() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(self.error("expected closing parenthesis")),
                }
            }
            Some(other) => Err(self.error(&format!("unexpected token {:?}", other))),
            None => Err(self.error("unexpected end of formula")),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn error(&self, message: &str) -> FormulaError {
        FormulaError::Parse {
            message: message.to_string(),
            at: self.pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_binds_products_under_sums() {
        let expr = Parser::parse("a + b * c").expect("parse");
        let Expr::Binary { op: BinaryOp::Add, rhs, .. } = expr else {
            panic!("expected top-level addition");
        };
        assert!(matches!(
            *rhs,
            Expr::Binary {
                op: BinaryOp::Mul,
                ..
            }
        ));
    }

    #[test]
    fn parentheses_override_precedence() {
        let expr = Parser::parse("(a + b) * c").expect("parse");
        assert!(matches!(
            expr,
            Expr::Binary {
                op: BinaryOp::Mul,
                ..
            }
        ));
    }

    #[test]
    fn subtraction_is_left_associative() {
        // 10 - 4 - 3 must parse as (10 - 4) - 3.
        let expr = Parser::parse("10 - 4 - 3").expect("parse");
        let Expr::Binary { op: BinaryOp::Sub, lhs, rhs } = expr else {
            panic!("expected top-level subtraction");
        };
        assert!(matches!(
            *lhs,
            Expr::Binary {
                op: BinaryOp::Sub,
                ..
            }
        ));
        assert_eq!(*rhs, Expr::Number(3.0));
    }

    #[test]
    fn unary_minus_nests() {
        let expr = Parser::parse("--a").expect("parse");
        assert!(matches!(expr, Expr::Neg(_)));
    }

    #[test]
    fn moderate_nesting_parses() {
        let src = format!("{}a{}", "(".repeat(32), ")".repeat(32));
        assert!(Parser::parse(&src).is_ok());
        // Width is not depth: a long flat sum stays within the bound.
        let flat = vec!["a"; 200].join(" + ");
        assert!(Parser::parse(&flat).is_ok());
    }

    #[test]
    fn runaway_nesting_is_rejected() {
        let parens = format!("{}a{}", "(".repeat(10_000), ")".repeat(10_000));
        assert!(matches!(
            Parser::parse(&parens),
            Err(FormulaError::Parse { .. })
        ));
        let signs = format!("{}a", "-".repeat(10_000));
        assert!(matches!(
            Parser::parse(&signs),
            Err(FormulaError::Parse { .. })
        ));
    }

    #[test]
    fn dangling_operator_is_rejected() {
        assert!(Parser::parse("a +").is_err());
        assert!(Parser::parse("* a").is_err());
        assert!(Parser::parse("(a + b").is_err());
        assert!(Parser::parse("a b").is_err());
        assert!(Parser::parse("").is_err());
    }
}

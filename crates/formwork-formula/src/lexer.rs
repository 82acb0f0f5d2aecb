//! Formula tokenizer.
//!
//! Walks the source byte-by-byte. The accepted alphabet is deliberately
//! closed: numbers, identifiers, the four arithmetic operators, parentheses,
//! and whitespace. Any other character is a lex error, which is what keeps
//! formulas from ever smuggling anything executable past the parser.

use crate::error::{FormulaError, Result};
use crate::token::Token;

pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Tokenize the whole formula.
    pub fn tokenize(src: &str) -> Result<Vec<Token>> {
        let mut lexer = Lexer::new(src);
        let mut tokens = Vec::new();
        while let Some(token) = lexer.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        let bytes = self.src.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        let Some(&byte) = bytes.get(self.pos) else {
            return Ok(None);
        };
        let token = match byte {
            b'0'..=b'9' => self.lex_number(),
            b'.' if self.peek_at(1).is_some_and(|next| next.is_ascii_digit()) => self.lex_number(),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.lex_ident(),
            b'+' => self.single(Token::Plus),
            b'-' => self.single(Token::Minus),
            b'*' => self.single(Token::Star),
            b'/' => self.single(Token::Slash),
            b'(' => self.single(Token::LParen),
            b')' => self.single(Token::RParen),
            other => {
                // The position always sits on a char boundary here: every
                // byte the lexer consumes is ASCII.
                let found = self.src[self.pos..]
                    .chars()
                    .next()
                    .unwrap_or(char::from(other));
                return Err(FormulaError::Lex {
                    found,
                    at: self.pos,
                });
            }
        };
        Ok(Some(token))
    }

    fn single(&mut self, token: Token) -> Token {
        self.pos += 1;
        token
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.as_bytes().get(self.pos + offset).copied()
    }

    /// Integer or decimal literal. No exponent form and no sign; a leading
    /// minus is the parser's unary operator.
    fn lex_number(&mut self) -> Token {
        let bytes = self.src.as_bytes();
        let start = self.pos;
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        if self.pos < bytes.len() && bytes[self.pos] == b'.' {
            self.pos += 1;
            while self.pos < bytes.len() && bytes[self.pos].is_ascii_digit() {
                self.pos += 1;
            }
        }
        // The scanned text is always valid float syntax; absurdly long
        // literals overflow to infinity and fail later as non-finite.
        let value = self.src[start..self.pos].parse().unwrap_or(f64::INFINITY);
        Token::Number(value)
    }

    fn lex_ident(&mut self) -> Token {
        let bytes = self.src.as_bytes();
        let start = self.pos;
        while self.pos < bytes.len()
            && (bytes[self.pos].is_ascii_alphanumeric() || bytes[self.pos] == b'_')
        {
            self.pos += 1;
        }
        Token::Ident(self.src[start..self.pos].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_operators_and_identifiers() {
        let tokens = Lexer::tokenize("a + b_2 * (c - 4)").expect("tokenize");
        assert_eq!(
            tokens,
            vec![
                Token::Ident("a".to_string()),
                Token::Plus,
                Token::Ident("b_2".to_string()),
                Token::Star,
                Token::LParen,
                Token::Ident("c".to_string()),
                Token::Minus,
                Token::Number(4.0),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn numbers_may_carry_a_fraction() {
        assert_eq!(
            Lexer::tokenize("3.25").expect("tokenize"),
            vec![Token::Number(3.25)]
        );
        // A bare leading dot also reads as a fraction.
        assert_eq!(
            Lexer::tokenize(".5").expect("tokenize"),
            vec![Token::Number(0.5)]
        );
    }

    #[test]
    fn foreign_characters_are_lex_errors() {
        let error = Lexer::tokenize("a $ b").expect_err("reject dollar");
        assert_eq!(error, FormulaError::Lex { found: '$', at: 2 });

        let error = Lexer::tokenize("a; drop()").expect_err("reject semicolon");
        assert!(matches!(error, FormulaError::Lex { found: ';', .. }));
    }

    #[test]
    fn whitespace_is_insignificant() {
        assert_eq!(
            Lexer::tokenize("  a\t+\n b ").expect("tokenize"),
            Lexer::tokenize("a+b").expect("tokenize")
        );
    }

    #[test]
    fn empty_source_yields_no_tokens() {
        assert!(Lexer::tokenize("").expect("tokenize").is_empty());
        assert!(Lexer::tokenize("   ").expect("tokenize").is_empty());
    }
}

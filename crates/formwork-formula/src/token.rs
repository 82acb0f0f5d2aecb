/// One lexical token of a formula.
///
/// The language is small enough that tokens carry their payload directly
/// rather than a kind/span pair: positions only matter for error reporting,
/// and the lexer reports those at the byte where scanning stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal, integer or decimal.
    Number(f64),
    /// Field reference: `[A-Za-z_][A-Za-z0-9_]*`.
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

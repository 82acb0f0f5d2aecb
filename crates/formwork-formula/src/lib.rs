//! Arithmetic formula engine for derived form fields.
//!
//! Formulas are a closed little language: numeric literals, parent-field
//! identifiers, `+ - * /`, unary minus, and parentheses. Nothing else
//! tokenizes, nothing is ever spliced into source text, and identifiers are
//! resolved as whole tokens during evaluation, so `x` and `x2` can never
//! collide. Host data stays behind the [`eval::Resolver`] seam.

pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod recompute;
pub mod token;

pub use error::{FormulaError, Result};
pub use eval::{Resolver, evaluate};
pub use parser::{BinaryOp, Expr, Parser};
pub use recompute::recompute;
pub use token::Token;

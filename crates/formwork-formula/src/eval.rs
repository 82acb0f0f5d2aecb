//! Expression evaluation.

use std::collections::BTreeMap;

use crate::error::{FormulaError, Result};
use crate::parser::{BinaryOp, Expr, Parser};

/// Supplies a numeric value for each identifier an expression references.
///
/// Implementations decide what a name means and which names are visible;
/// evaluation itself never looks anywhere else, so a resolver is also the
/// sandbox boundary.
pub trait Resolver {
    fn resolve(&self, name: &str) -> Result<f64>;
}

/// Plain map lookup, mostly for tests and one-off evaluation.
impl Resolver for BTreeMap<String, f64> {
    fn resolve(&self, name: &str) -> Result<f64> {
        self.get(name)
            .copied()
            .ok_or_else(|| FormulaError::UnknownIdentifier {
                name: name.to_string(),
            })
    }
}

/// Parse and evaluate `src` in one step.
pub fn evaluate(src: &str, resolver: &dyn Resolver) -> Result<f64> {
    Parser::parse(src)?.eval(resolver)
}

impl Expr {
    /// Evaluate against a resolver.
    ///
    /// Division by a zero divisor is an error rather than an infinity, and a
    /// non-finite result is an error rather than a value: a derived field
    /// either holds a real number or holds nothing.
    pub fn eval(&self, resolver: &dyn Resolver) -> Result<f64> {
        let value = self.eval_inner(resolver)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(FormulaError::NonFinite)
        }
    }

    fn eval_inner(&self, resolver: &dyn Resolver) -> Result<f64> {
        match self {
            Expr::Number(value) => Ok(*value),
            Expr::Ident(name) => resolver.resolve(name),
            Expr::Neg(inner) => Ok(-inner.eval_inner(resolver)?),
            Expr::Binary { op, lhs, rhs } => {
                let lhs = lhs.eval_inner(resolver)?;
                let rhs = rhs.eval_inner(resolver)?;
                match op {
                    BinaryOp::Add => Ok(lhs + rhs),
                    BinaryOp::Sub => Ok(lhs - rhs),
                    BinaryOp::Mul => Ok(lhs * rhs),
                    BinaryOp::Div => {
                        if rhs == 0.0 {
                            Err(FormulaError::DivisionByZero)
                        } else {
                            Ok(lhs / rhs)
                        }
                    }
                }
            }
        }
    }
}

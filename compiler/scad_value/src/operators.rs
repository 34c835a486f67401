//! Operator dispatch for the evaluator.
//!
//! The evaluator maps each operator node of the expression tree to a
//! [`BinaryOp`] or [`UnaryOp`] and calls [`evaluate_binary`] or
//! [`evaluate_unary`]. The operator set is closed, so dispatch is a plain
//! `match`. Nothing here fails: mismatched operands give `undef`.

use std::fmt;

use crate::value::Value;

/// Binary operators of the language.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl BinaryOp {
    /// Source spelling.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
        }
    }

    /// Whether the result is always a bool.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::NotEq
                | BinaryOp::Lt
                | BinaryOp::LtEq
                | BinaryOp::Gt
                | BinaryOp::GtEq
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Prefix operators of the language.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Evaluate `left op right`.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> Value {
    match op {
        BinaryOp::Add => left.plus(right),
        BinaryOp::Sub => left.minus(right),
        BinaryOp::Mul => left.times(right),
        BinaryOp::Div => left.divide(right),
        BinaryOp::Mod => left.modulo(right),
        BinaryOp::Eq => Value::Bool(left == right),
        BinaryOp::NotEq => Value::Bool(left != right),
        BinaryOp::Lt => Value::Bool(left.less_than(right)),
        BinaryOp::LtEq => Value::Bool(left.less_equal(right)),
        BinaryOp::Gt => Value::Bool(left.greater_than(right)),
        BinaryOp::GtEq => Value::Bool(left.greater_equal(right)),
    }
}

/// Evaluate `op value`.
pub fn evaluate_unary(value: &Value, op: UnaryOp) -> Value {
    match op {
        UnaryOp::Neg => value.negate(),
        UnaryOp::Not => Value::Bool(!value.to_bool()),
    }
}

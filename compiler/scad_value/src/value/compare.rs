//! Equality and ordering between values.
//!
//! Only same-tag operands compare, with one exception: a bool and a number
//! compare numerically (`true == 1`). Every other cross-tag comparison is
//! `false` for all six operators, so `a < b`, `a >= b` and `a == b` can all be
//! false at once. That rules out `PartialOrd`; the ordering operators are
//! plain methods instead.

#![allow(clippy::float_cmp, reason = "value equality is exact IEEE equality")]

use super::Value;
use crate::heap::Heap;
use crate::stack::ensure_sufficient_stack;
use crate::vector::VectorType;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Relation {
    Lt,
    Le,
    Gt,
    Ge,
}

impl Relation {
    fn holds<T: PartialOrd + ?Sized>(self, a: &T, b: &T) -> bool {
        match self {
            Relation::Lt => a < b,
            Relation::Le => a <= b,
            Relation::Gt => a > b,
            Relation::Ge => a >= b,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Bool(a), Value::Number(b)) => f64::from(u8::from(*a)) == *b,
            (Value::Number(a), Value::Bool(b)) => *a == f64::from(u8::from(*b)),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Vector(a), Value::Vector(b)) => a == b,
            (Value::EmbeddedVector(a), Value::EmbeddedVector(b)) => a == b,
            (Value::Range(a), Value::Range(b)) => Heap::ptr_eq(a, b) || a == b,
            // Closures are equal only to themselves.
            (Value::Function(a), Value::Function(b)) => Heap::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Value {
    /// `self < other`.
    pub fn less_than(&self, other: &Value) -> bool {
        self.relate(other, Relation::Lt)
    }

    /// `self <= other`.
    pub fn less_equal(&self, other: &Value) -> bool {
        self.relate(other, Relation::Le)
    }

    /// `self > other`.
    pub fn greater_than(&self, other: &Value) -> bool {
        self.relate(other, Relation::Gt)
    }

    /// `self >= other`.
    pub fn greater_equal(&self, other: &Value) -> bool {
        self.relate(other, Relation::Ge)
    }

    fn relate(&self, other: &Value, rel: Relation) -> bool {
        match (self, other) {
            // `undef` is equal to itself, so only the non-strict relations hold.
            (Value::Undefined, Value::Undefined) => matches!(rel, Relation::Le | Relation::Ge),
            (Value::Bool(a), Value::Bool(b)) => rel.holds(a, b),
            (Value::Number(a), Value::Number(b)) => rel.holds(a, b),
            (Value::Bool(a), Value::Number(b)) => rel.holds(&f64::from(u8::from(*a)), b),
            (Value::Number(a), Value::Bool(b)) => rel.holds(a, &f64::from(u8::from(*b))),
            (Value::String(a), Value::String(b)) => rel.holds(a.as_str(), b.as_str()),
            (Value::Vector(a), Value::Vector(b)) => relate_vectors(a, b, rel),
            (Value::EmbeddedVector(a), Value::EmbeddedVector(b)) => {
                relate_vectors(a.as_vector(), b.as_vector(), rel)
            }
            (Value::Range(a), Value::Range(b)) => rel.holds(&**a, &**b),
            _ => false,
        }
    }
}

/// Lexicographic comparison by element `<`. The non-strict relations are the
/// negations of the swapped strict ones, so `a <= b` is `!(b < a)`.
fn relate_vectors(a: &VectorType, b: &VectorType, rel: Relation) -> bool {
    match rel {
        Relation::Lt => lexicographic_less(a, b),
        Relation::Le => !lexicographic_less(b, a),
        Relation::Gt => lexicographic_less(b, a),
        Relation::Ge => !lexicographic_less(a, b),
    }
}

fn lexicographic_less(a: &VectorType, b: &VectorType) -> bool {
    ensure_sufficient_stack(|| {
        let mut a_items = a.iter();
        let mut b_items = b.iter();
        loop {
            match (a_items.next(), b_items.next()) {
                (Some(x), Some(y)) => {
                    if x.less_than(&y) {
                        return true;
                    }
                    if y.less_than(&x) {
                        return false;
                    }
                }
                (x, y) => return x.is_none() && y.is_some(),
            }
        }
    })
}

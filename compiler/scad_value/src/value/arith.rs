//! Arithmetic on values.
//!
//! Every operator is total: operands it has no meaning for produce `undef`.
//! Element-wise vector operators recurse into nested vectors and truncate to
//! the shorter operand. Multiplication of two vectors picks dot product,
//! vector-matrix, matrix-vector or matrix-matrix product from the first
//! element of each operand; malformed matrices are reported with a warning.

use std::cell::Ref;
use std::ops;

use super::Value;
use crate::stack::ensure_sufficient_stack;
use crate::vector::VectorType;

impl Value {
    /// `self + other`.
    pub fn plus(&self, other: &Value) -> Value {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Value::Number(a + b),
            (Value::Vector(a), Value::Vector(b)) => zip_with(a, b, Value::plus),
            _ => Value::Undefined,
        }
    }

    /// `self - other`.
    pub fn minus(&self, other: &Value) -> Value {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Value::Number(a - b),
            (Value::Vector(a), Value::Vector(b)) => zip_with(a, b, Value::minus),
            _ => Value::Undefined,
        }
    }

    /// `self * other`.
    pub fn times(&self, other: &Value) -> Value {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Value::Number(a * b),
            (Value::Vector(v), Value::Number(_)) => map_elements(v, |x| x.times(other)),
            (Value::Number(_), Value::Vector(v)) => map_elements(v, |x| x.times(self)),
            (Value::Vector(a), Value::Vector(b)) => multiply_vectors(a, b),
            _ => Value::Undefined,
        }
    }

    /// `self / other`.
    pub fn divide(&self, other: &Value) -> Value {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Value::Number(a / b),
            (Value::Vector(v), Value::Number(_)) => map_elements(v, |x| x.divide(other)),
            (Value::Number(_), Value::Vector(v)) => map_elements(v, |x| self.divide(x)),
            _ => Value::Undefined,
        }
    }

    /// `self % other`: floating-point remainder, with the sign of `self`.
    pub fn modulo(&self, other: &Value) -> Value {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Value::Number(a % b),
            _ => Value::Undefined,
        }
    }

    /// `-self`.
    pub fn negate(&self) -> Value {
        match self {
            Value::Number(n) => Value::Number(-n),
            Value::Vector(v) => map_elements(v, Value::negate),
            _ => Value::Undefined,
        }
    }
}

fn zip_with(a: &VectorType, b: &VectorType, op: impl Fn(&Value, &Value) -> Value) -> Value {
    ensure_sufficient_stack(|| {
        Value::Vector(a.iter().zip(b.iter()).map(|(x, y)| op(&x, &y)).collect())
    })
}

fn map_elements(v: &VectorType, op: impl Fn(&Value) -> Value) -> Value {
    ensure_sufficient_stack(|| Value::Vector(v.iter().map(|x| op(&x)).collect()))
}

fn multiply_vectors(a: &VectorType, b: &VectorType) -> Value {
    let lhs = a.as_slice();
    let rhs = b.as_slice();
    let (Some(lhs_first), Some(rhs_first)) = (lhs.first(), rhs.first()) else {
        return Value::Undefined;
    };
    match (lhs_first, rhs_first) {
        (Value::Number(_), Value::Number(_)) if lhs.len() == rhs.len() => dot(&lhs, &rhs),
        (Value::Number(_), Value::Vector(_)) => {
            if lhs.len() == rhs.len() {
                vector_times_matrix(&lhs, &rhs)
            } else {
                dimension_mismatch(lhs.len(), rhs.len())
            }
        }
        (Value::Vector(first_row), Value::Number(_)) => {
            if first_row.size() == rhs.len() {
                matrix_times_vector(&lhs, &rhs)
            } else {
                dimension_mismatch(first_row.size(), rhs.len())
            }
        }
        (Value::Vector(first_row), Value::Vector(_)) => {
            if first_row.size() == rhs.len() {
                matrix_times_matrix(&lhs, &rhs)
            } else {
                dimension_mismatch(first_row.size(), rhs.len())
            }
        }
        _ => Value::Undefined,
    }
}

#[cold]
fn dimension_mismatch(lhs_columns: usize, rhs_rows: usize) -> Value {
    tracing::warn!("Matrix dimensions must agree: {lhs_columns} columns against {rhs_rows} rows");
    Value::Undefined
}

/// Dot product. Any non-numeric entry makes it `undef`.
fn dot(a: &[Value], b: &[Value]) -> Value {
    let mut sum = 0.0;
    for (x, y) in a.iter().zip(b) {
        let (Some(x), Some(y)) = (x.get_double(), y.get_double()) else {
            return Value::Undefined;
        };
        sum += x * y;
    }
    Value::Number(sum)
}

/// Borrow every row of `matrix` that is a vector.
fn rows(matrix: &[Value]) -> Vec<Option<Ref<'_, [Value]>>> {
    matrix
        .iter()
        .map(|row| row.as_vector().map(VectorType::as_slice))
        .collect()
}

/// Row vector times matrix. `vector` has one entry per matrix row; the
/// result has one entry per column of the first row.
fn vector_times_matrix(vector: &[Value], matrix: &[Value]) -> Value {
    let rows = rows(matrix);
    let columns = rows.first().and_then(Option::as_ref).map_or(0, |row| row.len());
    let mut product = VectorType::with_capacity(columns);
    for i in 0..columns {
        let mut sum = 0.0;
        for (j, (x, row)) in vector.iter().zip(&rows).enumerate() {
            let Some(row) = row.as_ref().filter(|row| row.len() == columns) else {
                tracing::warn!("Matrix must be rectangular. Problem at row {j}");
                return Value::Undefined;
            };
            let Some(x) = x.get_double() else {
                tracing::warn!("Vector must contain only numbers. Problem at index {j}");
                return Value::Undefined;
            };
            let Some(m) = row[i].get_double() else {
                tracing::warn!("Matrix must contain only numbers. Problem at row {j}, col {i}");
                return Value::Undefined;
            };
            sum += x * m;
        }
        product.append_value(Value::Number(sum));
    }
    Value::Vector(product)
}

/// Matrix times column vector: one dot product per row.
fn matrix_times_vector(matrix: &[Value], vector: &[Value]) -> Value {
    let mut product = VectorType::with_capacity(matrix.len());
    for (i, row) in rows(matrix).iter().enumerate() {
        let Some(row) = row.as_ref().filter(|row| row.len() == vector.len()) else {
            tracing::warn!("Matrix must be rectangular. Problem at row {i}");
            return Value::Undefined;
        };
        let mut sum = 0.0;
        for (j, (m, x)) in row.iter().zip(vector).enumerate() {
            let Some(m) = m.get_double() else {
                tracing::warn!("Matrix must contain only numbers. Problem at row {i}, col {j}");
                return Value::Undefined;
            };
            let Some(x) = x.get_double() else {
                tracing::warn!("Vector must contain only numbers. Problem at index {j}");
                return Value::Undefined;
            };
            sum += m * x;
        }
        product.append_value(Value::Number(sum));
    }
    Value::Vector(product)
}

/// Each row of `lhs` times `rhs`.
fn matrix_times_matrix(lhs: &[Value], rhs: &[Value]) -> Value {
    let mut product = VectorType::with_capacity(lhs.len());
    for (i, row) in lhs.iter().enumerate() {
        let row = match row.as_vector() {
            Some(row) if row.size() == rhs.len() => row.as_slice(),
            _ => {
                tracing::warn!("Matrix must be rectangular. Problem at row {i}");
                return Value::Undefined;
            }
        };
        product.append_value(vector_times_matrix(&row, rhs));
    }
    Value::Vector(product)
}

impl ops::Add for &Value {
    type Output = Value;

    fn add(self, rhs: &Value) -> Value {
        self.plus(rhs)
    }
}

impl ops::Sub for &Value {
    type Output = Value;

    fn sub(self, rhs: &Value) -> Value {
        self.minus(rhs)
    }
}

impl ops::Mul for &Value {
    type Output = Value;

    fn mul(self, rhs: &Value) -> Value {
        self.times(rhs)
    }
}

impl ops::Div for &Value {
    type Output = Value;

    fn div(self, rhs: &Value) -> Value {
        self.divide(rhs)
    }
}

impl ops::Rem for &Value {
    type Output = Value;

    fn rem(self, rhs: &Value) -> Value {
        self.modulo(rhs)
    }
}

impl ops::Neg for &Value {
    type Output = Value;

    fn neg(self) -> Value {
        self.negate()
    }
}

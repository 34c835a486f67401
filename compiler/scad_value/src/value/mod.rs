//! Runtime values for the SCAD interpreter.
//!
//! # Sharing
//!
//! Every payload that owns memory (text, vector storage, range, closure)
//! sits behind a [`Heap`] handle whose constructor is crate-private, so
//! outside code builds values through the factories here (`Value::string`,
//! `Value::vector`, `Value::range`, ...). `Value` is `Clone` but not `Copy`:
//! a copy is always an explicit `.clone()`, and it is O(1) for every
//! variant.
//!
//! # Failure
//!
//! Operators never fail. A type or shape mismatch yields
//! [`Value::Undefined`], with a `tracing` warning where silence would hide a
//! user error (malformed matrix products, [`Value::chr_string`] over a huge
//! range). Typed accessors come in three flavours:
//! `as_*` returns an `Option`, `try_*` returns a [`ValueResult`], and
//! `to_*` panics on a wrong tag, which is an evaluator bug.

mod arith;
mod compare;
mod display;

use std::fmt;

use crate::errors::{ValueError, ValueResult};
use crate::function::{FunctionHandle, FunctionType};
use crate::heap::Heap;
use crate::range::{RangeHandle, RangeType, MAX_RANGE_STEPS};
use crate::stack::ensure_sufficient_stack;
use crate::text::Utf8Text;
use crate::vector::{EmbeddedVectorType, VectorType};

/// A borrowable `undef`, for lookups that have no value to hand out.
pub const UNDEFINED: &Value = &Value::Undefined;

/// Runtime value in the SCAD interpreter.
#[derive(Clone, Default)]
pub enum Value {
    /// `undef`.
    #[default]
    Undefined,
    Bool(bool),
    /// Every number is a double.
    Number(f64),
    String(Utf8Text),
    Vector(VectorType),
    /// A vector on its way to being spliced into a parent vector. Never the
    /// result of an expression.
    EmbeddedVector(EmbeddedVectorType),
    Range(RangeHandle),
    Function(FunctionHandle),
}

/// Tag of a [`Value`], for diagnostics and type checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    Undefined,
    Bool,
    Number,
    String,
    Vector,
    EmbeddedVector,
    Range,
    Function,
}

impl ValueType {
    /// Stable name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Undefined => "undefined",
            ValueType::Bool => "bool",
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Vector => "vector",
            ValueType::EmbeddedVector => "embedded vector",
            ValueType::Range => "range",
            ValueType::Function => "function",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Factory methods
impl Value {
    #[inline]
    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Utf8Text::new(s))
    }

    pub fn vector(items: Vec<Value>) -> Self {
        Value::Vector(VectorType::from_vec(items))
    }

    pub fn empty_vector() -> Self {
        Value::Vector(VectorType::new())
    }

    /// `[begin : step : end]`.
    pub fn range(begin: f64, step: f64, end: f64) -> Self {
        Value::Range(Heap::new(RangeType::with_step(begin, step, end)))
    }

    pub fn function(function: FunctionType) -> Self {
        Value::Function(Heap::new(function))
    }

    /// Mark `vector` for splicing into the vector it gets appended to.
    pub fn embedded(vector: VectorType) -> Self {
        Value::EmbeddedVector(vector.into_embedded())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Utf8Text> for Value {
    fn from(text: Utf8Text) -> Self {
        Value::String(text)
    }
}

impl From<VectorType> for Value {
    fn from(vector: VectorType) -> Self {
        Value::Vector(vector)
    }
}

impl From<EmbeddedVectorType> for Value {
    fn from(embedded: EmbeddedVectorType) -> Self {
        Value::EmbeddedVector(embedded)
    }
}

impl From<RangeType> for Value {
    fn from(range: RangeType) -> Self {
        Value::Range(Heap::new(range))
    }
}

impl From<FunctionType> for Value {
    fn from(function: FunctionType) -> Self {
        Value::function(function)
    }
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Undefined => ValueType::Undefined,
            Value::Bool(_) => ValueType::Bool,
            Value::Number(_) => ValueType::Number,
            Value::String(_) => ValueType::String,
            Value::Vector(_) => ValueType::Vector,
            Value::EmbeddedVector(_) => ValueType::EmbeddedVector,
            Value::Range(_) => ValueType::Range,
            Value::Function(_) => ValueType::Function,
        }
    }

    /// Name of this value's type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.value_type().name()
    }

    #[inline]
    pub fn is_defined(&self) -> bool {
        !self.is_undefined()
    }

    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Whether this value has tag `ty`.
    pub fn is_defined_as(&self, ty: ValueType) -> bool {
        self.value_type() == ty
    }

    /// Truthiness: `false`, `0`, `""`, `[]`, `undef` and functions are false;
    /// every range is true.
    pub fn to_bool(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Vector(v) => !v.is_empty(),
            Value::EmbeddedVector(v) => !v.is_empty(),
            Value::Range(_) => true,
            Value::Undefined | Value::Function(_) => false,
        }
    }

    /// The number, or `0.0` for any other tag.
    pub fn to_double(&self) -> f64 {
        self.get_double().unwrap_or(0.0)
    }

    /// The number, if this is one.
    #[inline]
    pub fn get_double(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The number, if this is one and it is neither NaN nor infinite.
    pub fn get_finite_double(&self) -> Option<f64> {
        self.get_double().filter(|n| n.is_finite())
    }

    pub fn as_text(&self) -> Option<&Utf8Text> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_text().map(Utf8Text::as_str)
    }

    pub fn as_vector(&self) -> Option<&VectorType> {
        match self {
            Value::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<&RangeType> {
        match self {
            Value::Range(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionType> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// The text of a string value.
    ///
    /// # Panics
    /// If this is not a string.
    pub fn to_text(&self) -> &Utf8Text {
        match self.as_text() {
            Some(text) => text,
            None => self.wrong_tag(ValueType::String),
        }
    }

    /// The vector of a vector value.
    ///
    /// # Panics
    /// If this is not a vector.
    pub fn to_vector(&self) -> &VectorType {
        match self.as_vector() {
            Some(vector) => vector,
            None => self.wrong_tag(ValueType::Vector),
        }
    }

    /// # Panics
    /// If this is not a range.
    pub fn to_range(&self) -> &RangeType {
        match self.as_range() {
            Some(range) => range,
            None => self.wrong_tag(ValueType::Range),
        }
    }

    /// # Panics
    /// If this is not a function.
    pub fn to_function(&self) -> &FunctionType {
        match self.as_function() {
            Some(function) => function,
            None => self.wrong_tag(ValueType::Function),
        }
    }

    #[cold]
    #[track_caller]
    fn wrong_tag(&self, expected: ValueType) -> ! {
        panic!(
            "value accessed as {expected} but is {}",
            self.value_type()
        )
    }

    pub fn try_number(&self) -> ValueResult<f64> {
        self.get_double()
            .ok_or_else(|| ValueError::mismatch(ValueType::Number, self.value_type()))
    }

    pub fn try_finite_number(&self) -> ValueResult<f64> {
        let n = self.try_number()?;
        if n.is_finite() {
            Ok(n)
        } else {
            Err(ValueError::NotFinite(n))
        }
    }

    pub fn try_str(&self) -> ValueResult<&str> {
        self.as_str()
            .ok_or_else(|| ValueError::mismatch(ValueType::String, self.value_type()))
    }

    pub fn try_vector(&self) -> ValueResult<&VectorType> {
        self.as_vector()
            .ok_or_else(|| ValueError::mismatch(ValueType::Vector, self.value_type()))
    }

    pub fn try_range(&self) -> ValueResult<&RangeType> {
        self.as_range()
            .ok_or_else(|| ValueError::mismatch(ValueType::Range, self.value_type()))
    }

    pub fn try_function(&self) -> ValueResult<&FunctionType> {
        self.as_function()
            .ok_or_else(|| ValueError::mismatch(ValueType::Function, self.value_type()))
    }

    /// `[x, y]` from a two-element numeric vector. With `ignore_infinite`,
    /// NaN and infinite components are rejected too.
    pub fn get_vec2(&self, ignore_infinite: bool) -> Option<[f64; 2]> {
        let items = self.as_vector()?.as_slice();
        let [x, y] = &*items else {
            return None;
        };
        if ignore_infinite {
            Some([x.get_finite_double()?, y.get_finite_double()?])
        } else {
            Some([x.get_double()?, y.get_double()?])
        }
    }

    /// `[x, y, z]` from a three-element numeric vector.
    pub fn get_vec3(&self) -> Option<[f64; 3]> {
        let items = self.as_vector()?.as_slice();
        let [x, y, z] = &*items else {
            return None;
        };
        Some([x.get_double()?, y.get_double()?, z.get_double()?])
    }

    /// Like [`get_vec3`](Self::get_vec3), but a two-element vector gets
    /// `default_z` as its third component.
    pub fn get_vec3_or(&self, default_z: f64) -> Option<[f64; 3]> {
        match self.get_vec2(false) {
            Some([x, y]) => Some([x, y, default_z]),
            None => self.get_vec3(),
        }
    }

    /// `self[index]`.
    ///
    /// - string: the grapheme at that position
    /// - vector: a clone of the element
    /// - range: `0`, `1`, `2` give begin, step, end
    ///
    /// Anything else, including a non-numeric or out-of-bounds index, is
    /// `undef`.
    pub fn index(&self, index: &Value) -> Value {
        match index {
            Value::Number(n) => self.element(index_to_u32(*n)),
            _ => Value::Undefined,
        }
    }

    /// `self[index]` with an already-integral index.
    pub fn index_at(&self, index: usize) -> Value {
        self.element(u32::try_from(index).unwrap_or(u32::MAX))
    }

    fn element(&self, index: u32) -> Value {
        let i = index as usize;
        match self {
            Value::String(text) => text
                .grapheme_at(i)
                .map_or(Value::Undefined, Value::string),
            Value::Vector(vector) => vector.get(i),
            Value::EmbeddedVector(embedded) => embedded.as_vector().get(i),
            Value::Range(range) => match index {
                0 => Value::Number(range.begin_value()),
                1 => Value::Number(range.step_value()),
                2 => Value::Number(range.end_value()),
                _ => Value::Undefined,
            },
            _ => Value::Undefined,
        }
    }

    /// Text of the code points this value denotes, as computed by `chr()`.
    ///
    /// Numbers map to their code point (invalid or zero code points give
    /// nothing), vectors and ranges concatenate their elements, everything
    /// else is empty. A range of `MAX_RANGE_STEPS` elements or more is
    /// refused with a warning.
    pub fn chr_string(&self) -> String {
        let mut out = String::new();
        self.push_chr(&mut out);
        out
    }

    fn push_chr(&self, out: &mut String) {
        match self {
            Value::Number(n) => out.extend(code_point(*n)),
            Value::Vector(vector) => ensure_sufficient_stack(|| {
                for item in vector {
                    item.push_chr(out);
                }
            }),
            Value::Range(range) => {
                let steps = range.num_values();
                if steps >= MAX_RANGE_STEPS {
                    tracing::warn!(
                        "Bad range parameter in for statement: too many elements ({steps})."
                    );
                    return;
                }
                out.extend(range.iter().filter_map(code_point));
            }
            _ => {}
        }
    }
}

/// Clamp an index to `u32`. NaN, infinities and anything outside
/// `(-1, 2^32)` become `u32::MAX`, which no string or vector reaches.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "range checked; truncation toward zero is the index rule"
)]
fn index_to_u32(n: f64) -> u32 {
    if n.is_finite() && n > -1.0 && n < 4_294_967_296.0 {
        n as u32
    } else {
        u32::MAX
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "positive and saturating; char::from_u32 rejects what is out of range"
)]
fn code_point(n: f64) -> Option<char> {
    if n > 0.0 {
        char::from_u32(n as u32).filter(|&c| c != '\0')
    } else {
        None
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("Undefined"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Vector(v) => write!(f, "Vector({v:?})"),
            Value::EmbeddedVector(v) => write!(f, "{v:?}"),
            Value::Range(r) => write!(f, "Range({r})"),
            Value::Function(func) => write!(f, "Function({func})"),
        }
    }
}

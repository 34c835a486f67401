//! String conversion of values.
//!
//! Three renderings share one writer:
//! - `to_display_string`: a top-level string prints raw, strings nested in
//!   vectors print in double quotes (without escaping)
//! - `to_echo_string`: like the above, but a top-level string is quoted too
//! - `Display`: a top-level string is quoted and escaped via
//!   [`QuotedString`]

use std::fmt::{self, Write};

use super::Value;
use crate::number_format::write_number;
use crate::stack::ensure_sufficient_stack;
use crate::text::QuotedString;
use crate::vector::VectorType;

impl Value {
    /// The text `str()` and `echo` produce for this value.
    pub fn to_display_string(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write_value(&mut out, self, false);
        out
    }

    /// Like [`to_display_string`](Self::to_display_string), with a top-level
    /// string wrapped in double quotes.
    pub fn to_echo_string(&self) -> String {
        let mut out = String::new();
        let _ = write_value(&mut out, self, true);
        out
    }
}

fn write_value<W: Write + ?Sized>(out: &mut W, value: &Value, quote_strings: bool) -> fmt::Result {
    match value {
        Value::Undefined => out.write_str("undef"),
        Value::Bool(b) => out.write_str(if *b { "true" } else { "false" }),
        Value::Number(n) => write_number(out, *n),
        Value::String(s) if quote_strings => write!(out, "\"{s}\""),
        Value::String(s) => out.write_str(s.as_str()),
        Value::Vector(v) => write_vector(out, v),
        Value::EmbeddedVector(v) => write_vector(out, v.as_vector()),
        Value::Range(r) => write!(out, "{r}"),
        Value::Function(f) => write!(out, "{f}"),
    }
}

fn write_vector<W: Write + ?Sized>(out: &mut W, vector: &VectorType) -> fmt::Result {
    ensure_sufficient_stack(|| {
        out.write_char('[')?;
        for (i, item) in vector.iter().enumerate() {
            if i > 0 {
                out.write_str(", ")?;
            }
            write_value(out, &item, true)?;
        }
        out.write_char(']')
    })
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", QuotedString(s.as_str())),
            _ => write_value(f, self, false),
        }
    }
}

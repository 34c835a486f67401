//! Runtime values for the SCAD modeling language interpreter.
//!
//! Every expression evaluates to a [`Value`]: `undef`, a bool, a number, a
//! UTF-8 string, a vector, a range or a function closure. This crate holds
//! the value type and everything the evaluator does with values:
//!
//! - conversions and typed accessors (`to_bool`, `get_double`, `try_vector`, ...)
//! - comparison and arithmetic, including vector and matrix products
//! - indexing, `chr` conversion and the display grammar used by `echo`/`str`
//! - the number formatter every displayed number goes through
//!
//! Vectors support O(1) concatenation through embedded sub-vectors, flattened
//! lazily on first random access; see [`vector`]. String length is counted in
//! grapheme clusters and cached per buffer; see [`text`].
//!
//! Values are single-threaded: payloads are shared through non-atomic
//! reference counts.

mod errors;
pub mod function;
mod heap;
pub mod number_format;
mod operators;
pub mod range;
mod stack;
pub mod text;
mod value;
pub mod vector;

#[cfg(test)]
mod test_helpers;

use std::sync::Once;

pub use errors::{ValueError, ValueResult};
pub use function::{Expression, FunctionHandle, FunctionType, Parameter, Scope};
pub use heap::Heap;
pub use number_format::{format_number, DisplayNumber};
pub use operators::{evaluate_binary, evaluate_unary, BinaryOp, UnaryOp};
pub use range::{RangeHandle, RangeType, MAX_RANGE_STEPS};
pub use text::{QuotedString, Utf8Text};
pub use value::{Value, ValueType, UNDEFINED};
pub use vector::{EmbeddedVectorType, VectorType};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber for the warnings values emit.
///
/// Does nothing unless `RUST_LOG` is set, and nothing after the first call.
/// Embedders with their own subscriber should not call this.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another global subscriber wins; ours is then dropped.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}

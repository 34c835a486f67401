//! Lazy arithmetic progressions (`[begin : step : end]`).
//!
//! A range never materializes its elements. The element count is computed in
//! closed form and is robust to infinite bounds, a zero step and NaN.

#![allow(clippy::float_cmp, reason = "range bounds are compared exactly")]

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use crate::heap::Heap;
use crate::number_format::DisplayNumber;

/// Largest number of elements a range may expand to where expansion is
/// bounded (e.g. `chr` over a range).
pub const MAX_RANGE_STEPS: u32 = 10_000;

/// Range payload of [`Value::Range`](crate::Value::Range).
#[derive(Clone, Debug)]
pub struct RangeType {
    begin: f64,
    step: f64,
    end: f64,
}

impl RangeType {
    /// Range with the default step of 1.
    pub fn new(begin: f64, end: f64) -> Self {
        RangeType {
            begin,
            step: 1.0,
            end,
        }
    }

    pub fn with_step(begin: f64, step: f64, end: f64) -> Self {
        RangeType { begin, step, end }
    }

    #[inline]
    pub fn begin_value(&self) -> f64 {
        self.begin
    }

    #[inline]
    pub fn step_value(&self) -> f64 {
        self.step
    }

    #[inline]
    pub fn end_value(&self) -> f64 {
        self.end
    }

    /// Number of values the range produces.
    ///
    /// - `0` if any component is NaN, or `step` points away from `end`
    /// - `1` if `begin == end` or `step` is infinite
    /// - `u32::MAX` if a bound is infinite or `step` is zero
    /// - otherwise `floor((end - begin) / step) + 1`, nudging quotients that
    ///   land just below a whole number up to it first
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "quotient is non-negative here and saturates at u32::MAX"
    )]
    pub fn num_values(&self) -> u32 {
        let RangeType { begin, step, end } = *self;
        if begin.is_nan() || step.is_nan() || end.is_nan() {
            return 0;
        }
        if step < 0.0 {
            if begin < end {
                return 0;
            }
        } else if begin > end {
            return 0;
        }
        if begin == end || step.is_infinite() {
            return 1;
        }
        if begin.is_infinite() || end.is_infinite() || step == 0.0 {
            return u32::MAX;
        }

        let num_steps = next_up((end - begin) / step) as u32;
        if num_steps == u32::MAX {
            u32::MAX
        } else {
            num_steps + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.num_values() == 0
    }

    /// Fresh cursor positioned at `begin`.
    pub fn iter(&self) -> RangeIter<'_> {
        RangeIter::new(self)
    }
}

/// Next representable double above a non-negative finite `x`.
fn next_up(x: f64) -> f64 {
    if x.is_finite() && x >= 0.0 {
        f64::from_bits(x.to_bits() + 1)
    } else {
        x
    }
}

impl PartialEq for RangeType {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

/// Ranges order by emptiness first (every empty range is equal to every
/// other and less than any non-empty one), then by `begin`, `step` and
/// element count.
impl PartialOrd for RangeType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let n1 = self.num_values();
        let n2 = other.num_values();
        match (n1, n2) {
            (0, 0) => return Some(Ordering::Equal),
            (0, _) => return Some(Ordering::Less),
            (_, 0) => return Some(Ordering::Greater),
            _ => {}
        }
        match self.begin.partial_cmp(&other.begin)? {
            Ordering::Equal => {}
            ord => return Some(ord),
        }
        match self.step.partial_cmp(&other.step)? {
            Ordering::Equal => {}
            ord => return Some(ord),
        }
        Some(n1.cmp(&n2))
    }
}

impl fmt::Display for RangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} : {} : {}]",
            DisplayNumber(self.begin),
            DisplayNumber(self.step),
            DisplayNumber(self.end)
        )
    }
}

/// Shared handle to a range.
pub type RangeHandle = Heap<RangeType>;

/// Position of a [`RangeIter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorState {
    /// Nothing produced yet.
    Begin,
    /// At least one value produced, more to come.
    Running,
    /// Exhausted.
    End,
}

/// Forward-only cursor over a range.
///
/// Values are computed as `begin + step * i` rather than accumulated, so no
/// rounding error builds up over long ranges.
#[derive(Clone, Debug)]
pub struct RangeIter<'a> {
    range: &'a RangeType,
    value: f64,
    state: CursorState,
    num_values: u32,
    step_index: u32,
}

impl<'a> RangeIter<'a> {
    fn new(range: &'a RangeType) -> Self {
        let mut iter = RangeIter {
            range,
            value: range.begin,
            state: CursorState::Begin,
            num_values: range.num_values(),
            step_index: 0,
        };
        iter.update_state();
        iter
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == CursorState::End
    }

    fn update_state(&mut self) {
        if self.range.step == 0.0 || self.step_index >= self.num_values {
            self.state = CursorState::End;
        }
    }
}

impl Iterator for RangeIter<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.is_done() {
            return None;
        }
        let current = self.value;
        self.step_index += 1;
        self.value = self.range.begin + self.range.step * f64::from(self.step_index);
        self.state = CursorState::Running;
        self.update_state();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.is_done() {
            0
        } else {
            usize::try_from(self.num_values - self.step_index).unwrap_or(usize::MAX)
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RangeIter<'_> {}

impl FusedIterator for RangeIter<'_> {}

/// Two exhausted cursors are equal when they walk equal ranges; live
/// cursors must also sit on the same value.
impl PartialEq for RangeIter<'_> {
    fn eq(&self, other: &Self) -> bool {
        let same_position = match (self.is_done(), other.is_done()) {
            (true, true) => true,
            (false, false) => self.value == other.value,
            _ => false,
        };
        same_position && self.range == other.range
    }
}

#[cfg(test)]
mod tests;

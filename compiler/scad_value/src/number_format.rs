//! Number to text conversion.
//!
//! Every displayed number goes through [`write_number`]: 6 significant
//! digits with exact half-way cases rounded away from zero, `inf`/`-inf`/`nan` for special values, and no redundant trailing
//! zeroes. Scientific notation is chosen the same way a precision-mode
//! double converter chooses it: when the plain form would need more than
//! [`MAX_LEADING_ZEROES`] zeroes after the decimal point, or any padding
//! zeroes before it. The exponent always carries a sign (`1e+6`, `1e-6`).
//!
//! Formatting happens in a fixed-size stack buffer; the only allocation is
//! the caller's output.

use std::fmt::{self, Write};

/// Significant digits rendered for every number.
pub const PRECISION: usize = 6;

/// Zeroes allowed between the decimal point and the first digit before
/// switching to scientific notation.
pub const MAX_LEADING_ZEROES: i32 = 5;

/// Padding zeroes allowed before the decimal point before switching to
/// scientific notation.
pub const MAX_TRAILING_ZEROES: i32 = 0;

/// Capacity of the formatting buffer. No rendering comes close.
pub const BUFFER_SIZE: usize = 128;

const INFINITY_TEXT: &str = "inf";
const NAN_TEXT: &str = "nan";

/// Fixed-capacity ASCII text buffer living on the stack.
pub struct NumberBuf {
    bytes: [u8; BUFFER_SIZE],
    len: usize,
}

impl NumberBuf {
    pub fn new() -> Self {
        NumberBuf {
            bytes: [0; BUFFER_SIZE],
            len: 0,
        }
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn push(&mut self, byte: u8) -> fmt::Result {
        let slot = self.bytes.get_mut(self.len).ok_or(fmt::Error)?;
        *slot = byte;
        self.len += 1;
        Ok(())
    }
}

impl Default for NumberBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for NumberBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        s.bytes().try_for_each(|b| self.push(b))
    }
}

/// Displays an `f64` with the number formatting rules.
#[derive(Clone, Copy, Debug)]
pub struct DisplayNumber(pub f64);

impl fmt::Display for DisplayNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_number(f, self.0)
    }
}

/// Format `x` into a new string.
pub fn format_number(x: f64) -> String {
    let mut buf = NumberBuf::new();
    match render(&mut buf, x) {
        Ok(()) => buf.as_str().to_owned(),
        // Unreachable with a 128 byte buffer; fall back to the std form.
        Err(fmt::Error) => x.to_string(),
    }
}

/// Format `x` into `out`.
pub fn write_number<W: Write + ?Sized>(out: &mut W, x: f64) -> fmt::Result {
    let mut buf = NumberBuf::new();
    render(&mut buf, x)?;
    out.write_str(buf.as_str())
}

fn render(buf: &mut NumberBuf, x: f64) -> fmt::Result {
    if x.is_nan() {
        return buf.write_str(NAN_TEXT);
    }
    if x.is_infinite() {
        if x < 0.0 {
            buf.push(b'-')?;
        }
        return buf.write_str(INFINITY_TEXT);
    }
    // Covers -0 as well: zero never carries a sign.
    if x == 0.0 {
        return buf.push(b'0');
    }

    let (digits, exponent) = significant_digits(x.abs())?;
    if x < 0.0 {
        buf.push(b'-')?;
    }

    let decimal_point = exponent + 1;
    let as_exponential = 1 - decimal_point > MAX_LEADING_ZEROES
        || decimal_point - PRECISION_I32 > MAX_TRAILING_ZEROES;
    let significant = trim_trailing_zeroes(&digits);

    if as_exponential {
        buf.push(significant[0])?;
        if significant.len() > 1 {
            buf.push(b'.')?;
            significant[1..].iter().try_for_each(|&d| buf.push(d))?;
        }
        let sign = if exponent < 0 { '-' } else { '+' };
        write!(buf, "e{sign}{}", exponent.unsigned_abs())
    } else if decimal_point <= 0 {
        buf.write_str("0.")?;
        for _ in decimal_point..0 {
            buf.push(b'0')?;
        }
        significant.iter().try_for_each(|&d| buf.push(d))
    } else {
        // 1..=PRECISION by the exponential test above.
        let split = usize::try_from(decimal_point).map_err(|_| fmt::Error)?;
        digits[..split].iter().try_for_each(|&d| buf.push(d))?;
        if significant.len() > split {
            buf.push(b'.')?;
            significant[split..].iter().try_for_each(|&d| buf.push(d))?;
        }
        Ok(())
    }
}

#[allow(
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation,
    reason = "PRECISION is a small constant"
)]
const PRECISION_I32: i32 = PRECISION as i32;

/// Digits rendered past the first before rounding to [`PRECISION`]. No
/// double lies this close to a half-way point without being on it, so the
/// extended rendering decides ties exactly.
const ROUNDING_DIGITS: usize = 40;

/// Leading digits of a positive finite `x` rounded half away from zero, and
/// the decimal exponent of the first one.
fn significant_digits(x: f64) -> Result<([u8; PRECISION], i32), fmt::Error> {
    let mut scratch = NumberBuf::new();
    write!(scratch, "{:.*e}", ROUNDING_DIGITS, x)?;
    let (mantissa, exponent) = scratch.as_str().split_once('e').ok_or(fmt::Error)?;
    let mut exponent: i32 = exponent.parse().map_err(|_| fmt::Error)?;

    let mut rendered = mantissa.bytes().filter(u8::is_ascii_digit);
    let mut digits = [b'0'; PRECISION];
    for (slot, digit) in digits.iter_mut().zip(rendered.by_ref()) {
        *slot = digit;
    }
    let round_up = rendered.next().is_some_and(|d| d >= b'5');
    if round_up && increment(&mut digits) {
        // 999999 carried into 1000000.
        digits = [b'0'; PRECISION];
        digits[0] = b'1';
        exponent += 1;
    }
    Ok((digits, exponent))
}

/// Add one unit in the last place. Returns whether it carried out of the
/// first digit.
fn increment(digits: &mut [u8]) -> bool {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return false;
        }
    }
    true
}

fn trim_trailing_zeroes(digits: &[u8]) -> &[u8] {
    let end = digits
        .iter()
        .rposition(|&d| d != b'0')
        .map_or(1, |last| last + 1);
    &digits[..end]
}

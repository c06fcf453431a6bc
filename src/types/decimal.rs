//! # Fixed-Point Decimal
//!
//! [`FixedDecimal`] is a signed 128-bit fixed-point number with 48
//! fractional bits: the wire value is the raw `i128`, the numeric value is
//! `raw / 2^48`. The integer part spans 80 bits, the fraction resolves to
//! 1/2^48 (~3.6e-15).
//!
//! Integer values round-trip exactly; fractional values are quantized to
//! the nearest representable step on construction.

use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Number of fractional bits in the raw representation.
pub const FRAC_BITS: u32 = 48;

const SCALE: i128 = 1 << FRAC_BITS;

/// Signed fixed-point decimal: 80 integer bits, 48 fractional bits.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FixedDecimal {
    raw: i128,
}

impl FixedDecimal {
    pub const ZERO: Self = Self { raw: 0 };
    pub const ONE: Self = Self { raw: SCALE };

    /// Wraps a raw wire value.
    pub fn from_raw(raw: i128) -> Self {
        Self { raw }
    }

    /// Raw wire value (`value * 2^48`).
    pub fn raw(self) -> i128 {
        self.raw
    }

    pub fn from_int(value: i64) -> Self {
        Self {
            raw: (value as i128) << FRAC_BITS,
        }
    }

    /// Converts a 128-bit integer, failing when it exceeds the 80-bit
    /// integer range.
    pub fn checked_from_int(value: i128) -> Option<Self> {
        value.checked_mul(SCALE).map(|raw| Self { raw })
    }

    /// Quantizes a float to the nearest 1/2^48 step. Out-of-range values
    /// saturate; NaN maps to zero.
    pub fn from_f64(value: f64) -> Self {
        Self {
            raw: (value * SCALE as f64).round() as i128,
        }
    }

    pub fn to_f64(self) -> f64 {
        self.raw as f64 / SCALE as f64
    }

    /// Integer part, truncated toward zero.
    pub fn trunc(self) -> i128 {
        self.raw / SCALE
    }

    pub fn is_negative(self) -> bool {
        self.raw < 0
    }

    pub fn is_integer(self) -> bool {
        self.raw % SCALE == 0
    }
}

impl From<i64> for FixedDecimal {
    fn from(value: i64) -> Self {
        Self::from_int(value)
    }
}

impl From<FixedDecimal> for f64 {
    fn from(value: FixedDecimal) -> Self {
        value.to_f64()
    }
}

impl Add for FixedDecimal {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            raw: self.raw + rhs.raw,
        }
    }
}

impl Sub for FixedDecimal {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            raw: self.raw - rhs.raw,
        }
    }
}

impl Neg for FixedDecimal {
    type Output = Self;

    fn neg(self) -> Self {
        Self { raw: -self.raw }
    }
}

impl fmt::Debug for FixedDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedDecimal({self})")
    }
}

impl fmt::Display for FixedDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.raw < 0 { "-" } else { "" };
        let magnitude = self.raw.unsigned_abs();
        let int_part = magnitude >> FRAC_BITS;
        let frac_part = magnitude & (SCALE as u128 - 1);

        if frac_part == 0 {
            return write!(f, "{sign}{int_part}");
        }

        // 12 decimal digits cover the displayable fraction; trailing zeros
        // are trimmed.
        let digits = (frac_part * 10_u128.pow(12)) >> FRAC_BITS;
        let text = format!("{digits:012}");
        write!(f, "{sign}{int_part}.{}", text.trim_end_matches('0'))
    }
}

//! # 256-Bit Integer Wire Types
//!
//! [`U256`] and [`I256`] exist to carry 32-byte integer slots through the
//! codec. They are wire types, not arithmetic types: construction, byte
//! conversion in either order, comparison, and narrowing back to 128-bit
//! are the whole surface.

use std::fmt;

fn split_halves(bytes: &[u8; 32]) -> ([u8; 16], [u8; 16]) {
    let mut first = [0u8; 16];
    let mut second = [0u8; 16];
    first.copy_from_slice(&bytes[..16]);
    second.copy_from_slice(&bytes[16..]);
    (first, second)
}

/// Unsigned 256-bit integer as two 128-bit limbs.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct U256 {
    hi: u128,
    lo: u128,
}

impl U256 {
    pub const ZERO: Self = Self { hi: 0, lo: 0 };
    pub const MAX: Self = Self {
        hi: u128::MAX,
        lo: u128::MAX,
    };

    pub fn new(hi: u128, lo: u128) -> Self {
        Self { hi, lo }
    }

    pub fn from_le_bytes(bytes: [u8; 32]) -> Self {
        let (low, high) = split_halves(&bytes);
        Self {
            hi: u128::from_le_bytes(high),
            lo: u128::from_le_bytes(low),
        }
    }

    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        let (high, low) = split_halves(&bytes);
        Self {
            hi: u128::from_be_bytes(high),
            lo: u128::from_be_bytes(low),
        }
    }

    pub fn to_le_bytes(self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[..16].copy_from_slice(&self.lo.to_le_bytes());
        out[16..].copy_from_slice(&self.hi.to_le_bytes());
        out
    }

    pub fn to_be_bytes(self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[..16].copy_from_slice(&self.hi.to_be_bytes());
        out[16..].copy_from_slice(&self.lo.to_be_bytes());
        out
    }

    pub fn high(self) -> u128 {
        self.hi
    }

    pub fn low(self) -> u128 {
        self.lo
    }

    /// Narrows to `u128` when the high limb is zero.
    pub fn to_u128(self) -> Option<u128> {
        (self.hi == 0).then_some(self.lo)
    }
}

impl From<u128> for U256 {
    fn from(value: u128) -> Self {
        Self { hi: 0, lo: value }
    }
}

impl From<u64> for U256 {
    fn from(value: u64) -> Self {
        Self::from(value as u128)
    }
}

impl fmt::Debug for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U256(0x{:032x}{:032x})", self.hi, self.lo)
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hi == 0 {
            write!(f, "{}", self.lo)
        } else {
            write!(f, "0x{:x}{:032x}", self.hi, self.lo)
        }
    }
}

/// Signed 256-bit integer in two's complement: a signed high limb over an
/// unsigned low limb.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct I256 {
    hi: i128,
    lo: u128,
}

impl I256 {
    pub const ZERO: Self = Self { hi: 0, lo: 0 };
    pub const MIN: Self = Self {
        hi: i128::MIN,
        lo: 0,
    };
    pub const MAX: Self = Self {
        hi: i128::MAX,
        lo: u128::MAX,
    };

    pub fn new(hi: i128, lo: u128) -> Self {
        Self { hi, lo }
    }

    pub fn from_le_bytes(bytes: [u8; 32]) -> Self {
        let (low, high) = split_halves(&bytes);
        Self {
            hi: i128::from_le_bytes(high),
            lo: u128::from_le_bytes(low),
        }
    }

    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        let (high, low) = split_halves(&bytes);
        Self {
            hi: i128::from_be_bytes(high),
            lo: u128::from_be_bytes(low),
        }
    }

    pub fn to_le_bytes(self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[..16].copy_from_slice(&self.lo.to_le_bytes());
        out[16..].copy_from_slice(&self.hi.to_le_bytes());
        out
    }

    pub fn to_be_bytes(self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[..16].copy_from_slice(&self.hi.to_be_bytes());
        out[16..].copy_from_slice(&self.lo.to_be_bytes());
        out
    }

    pub fn is_negative(self) -> bool {
        self.hi < 0
    }

    /// Narrows to `i128` when the value is within `i128` range.
    pub fn to_i128(self) -> Option<i128> {
        let top_bit = self.lo >> 127 != 0;
        match self.hi {
            0 if !top_bit => Some(self.lo as i128),
            -1 if top_bit => Some(self.lo as i128),
            _ => None,
        }
    }
}

impl From<i128> for I256 {
    fn from(value: i128) -> Self {
        Self {
            hi: if value < 0 { -1 } else { 0 },
            lo: value as u128,
        }
    }
}

impl From<i64> for I256 {
    fn from(value: i64) -> Self {
        Self::from(value as i128)
    }
}

impl fmt::Debug for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I256(0x{:032x}{:032x})", self.hi as u128, self.lo)
    }
}

impl fmt::Display for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_i128() {
            Some(v) => write!(f, "{v}"),
            None => write!(f, "0x{:x}{:032x}", self.hi as u128, self.lo),
        }
    }
}

//! # Type System
//!
//! This module provides the declared-type vocabulary and the value model of
//! the codec:
//!
//! - `semantic`: [`SemanticType`], the tagged description of one field's
//!   binary encoding, plus [`EnumType`] declarations
//! - `value`: [`Value`], the owned dynamic value records encode from and
//!   decode into
//! - `decimal`: [`FixedDecimal`], a 128-bit fixed-point number with 48
//!   fractional bits
//! - `wide`: [`U256`] / [`I256`], 256-bit integer wire types
//!
//! ## Width Coverage
//!
//! | Semantic type | Widths | Value variant |
//! |---------------|--------|---------------|
//! | unsigned int  | 8–256 bits | `UInt(u128)` / `U256` |
//! | signed int    | 8–256 bits | `Int(i128)` / `I256` |
//! | float         | 32/64 bits | `Float(f64)` |
//! | decimal       | 128 bits   | `Decimal(FixedDecimal)` |
//! | bytes/text    | declared size | `Bytes` / `Text` |

pub mod decimal;
pub mod semantic;
pub mod value;
pub mod wide;

pub use decimal::FixedDecimal;
pub use semantic::{EnumMember, EnumType, FloatWidth, IntWidth, SemanticType};
pub use value::Value;
pub use wide::{I256, U256};

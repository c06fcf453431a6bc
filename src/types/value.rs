//! # Owned Value Representation
//!
//! [`Value`] is the dynamic value the codec encodes from and decodes into.
//! Every variant owns its data; decoded records never borrow from the input
//! buffer, so values can outlive the buffer and cross API boundaries freely.
//!
//! Integer widths up to 128 bits share the `UInt`/`Int` variants; 256-bit
//! fields use the dedicated wire types. Enum fields travel as their
//! underlying integer after discriminant validation.

use super::decimal::FixedDecimal;
use super::wide::{I256, U256};

/// Fully-owned codec value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    UInt(u128),
    Int(i128),
    U256(U256),
    I256(I256),
    Float(f64),
    Decimal(FixedDecimal),
    Text(String),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    Record(Vec<Value>),
}

impl Value {
    /// Name of this value's kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::UInt(_) => "unsigned integer",
            Value::Int(_) => "signed integer",
            Value::U256(_) => "u256",
            Value::I256(_) => "i256",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "array",
            Value::Record(_) => "record",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u128> {
        match self {
            Value::UInt(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i128> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<FixedDecimal> {
        match self {
            Value::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&[Value]> {
        match self {
            Value::Record(v) => Some(v),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt(v as u128)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v as i128)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<FixedDecimal> for Value {
    fn from(v: FixedDecimal) -> Self {
        Value::Decimal(v)
    }
}

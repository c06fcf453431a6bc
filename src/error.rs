//! # Error Types
//!
//! packrec distinguishes two disjoint error kinds, separated by return type
//! so callers can statically tell a broken schema from a bad buffer:
//!
//! | Kind | Raised by | Meaning |
//! |------|-----------|---------|
//! | [`ConfigError`] | compilation and resolution | the schema itself is wrong |
//! | [`DomainError`] | encode/decode/stream calls | this value or buffer is invalid |
//!
//! A published descriptor can never raise a `ConfigError`; compilation is
//! eager and total, so every configuration problem surfaces before the
//! descriptor is registered. `DomainError` wraps the underlying packer
//! failure where one exists, preserving its description.

use crate::pack::{FormatError, PackError};

/// Schema-time error: the record declaration, codec wiring, or registry use
/// is wrong. Not expected to be handled at runtime.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no encoding known for type `{0}`")]
    MissingEncoding(String),

    #[error("wrong codec: expected a codec for `{expected}`, found one for `{found}`")]
    CodecMismatch { expected: String, found: String },

    #[error("array length must be greater than zero")]
    ZeroLengthArray,

    #[error("fixed-size field must span at least one byte")]
    ZeroSizeField,

    #[error("enum `{0}` must use an integer underlying type")]
    InvalidEnumUnderlying(String),

    #[error("enum `{0}` has no members")]
    EmptyEnum(String),

    #[error("record `{0}` has no fields")]
    EmptyRecord(String),

    #[error("record type `{0}` is already registered")]
    DuplicateRecord(String),

    #[error("codec for `{0}` is already registered")]
    DuplicateCodec(String),

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Runtime error: a concrete value or byte buffer cannot be encoded or
/// decoded. Recoverable by the caller.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error(transparent)]
    Packer(#[from] PackError),

    #[error("value {value} out of range for a {bits}-bit {signedness} field")]
    IntOutOfRange {
        value: String,
        bits: u32,
        signedness: &'static str,
    },

    #[error("expected {expected} value, found {found}")]
    ValueMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("native slot holds {got} bytes, expected {expected}")]
    SlotWidth { expected: usize, got: usize },

    #[error("invalid discriminant {value} for enum `{name}`")]
    InvalidDiscriminant { name: String, value: String },

    #[error("record `{name}` expects {expected} field values, found {found}")]
    FieldCount {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("text field holds invalid utf-8: {0}")]
    InvalidText(#[from] std::string::FromUtf8Error),

    #[error("native value stream exhausted")]
    Exhausted,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

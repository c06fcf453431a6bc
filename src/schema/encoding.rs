//! # Field Encodings
//!
//! A [`FieldEncoding`] is the executable form of one resolved field: the
//! format fragment describing its native slots, plus the decode and encode
//! functions that move values through a shared cursor/sink.
//!
//! ## Invariant
//!
//! The number of native slots `decode` consumes equals the number `encode`
//! appends, and both equal what the format fragment declares. Resolution
//! builds every encoding to hold this; the packer's strict value-count
//! check backstops it at runtime.
//!
//! ## Passthrough Tag
//!
//! Encodings whose encode step is nothing but a value-to-native conversion
//! carry that conversion as a plain `fn` pointer in `passthrough`. Array
//! resolution uses the tag to append whole element sequences without going
//! through the boxed encode closure.

use std::fmt;
use std::sync::Arc;

use crate::error::DomainError;
use crate::pack::{ByteOrder, Cursor, Native, NativeSeq};
use crate::types::Value;

/// Decodes one field's value, pulling its native slots from the cursor.
pub type DecodeFn =
    Arc<dyn Fn(&mut Cursor<'_>, ByteOrder) -> Result<Value, DomainError> + Send + Sync>;

/// Encodes one field's value, appending its native slots to the sink.
pub type EncodeFn =
    Arc<dyn Fn(&Value, &mut NativeSeq, ByteOrder) -> Result<(), DomainError> + Send + Sync>;

/// Identity conversion of a passthrough field: one value, one native slot,
/// no byte-order dependence.
pub type NativeFn = fn(&Value) -> Result<Native, DomainError>;

/// One field's compiled encoding: format fragment plus decode/encode.
#[derive(Clone)]
pub struct FieldEncoding {
    format: String,
    decode: DecodeFn,
    encode: EncodeFn,
    passthrough: Option<NativeFn>,
}

impl FieldEncoding {
    /// Builds a custom (non-passthrough) encoding.
    pub fn new(format: impl Into<String>, decode: DecodeFn, encode: EncodeFn) -> Self {
        Self {
            format: format.into(),
            decode,
            encode,
            passthrough: None,
        }
    }

    /// Builds a passthrough encoding: encode is derived from the identity
    /// conversion.
    pub(crate) fn passthrough(
        format: impl Into<String>,
        convert: NativeFn,
        decode: DecodeFn,
    ) -> Self {
        let encode: EncodeFn = Arc::new(move |value: &Value, sink: &mut NativeSeq, _order| {
            sink.push(convert(value)?);
            Ok(())
        });
        Self {
            format: format.into(),
            decode,
            encode,
            passthrough: Some(convert),
        }
    }

    /// Builds an encoding from explicit parts, preserving a passthrough tag
    /// taken from another encoding.
    pub(crate) fn from_parts(
        format: impl Into<String>,
        decode: DecodeFn,
        encode: EncodeFn,
        passthrough: Option<NativeFn>,
    ) -> Self {
        Self {
            format: format.into(),
            decode,
            encode,
            passthrough,
        }
    }

    /// Format fragment covering exactly this field's native slots.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// True when encode is the identity native conversion.
    pub fn is_passthrough(&self) -> bool {
        self.passthrough.is_some()
    }

    pub(crate) fn native_convert(&self) -> Option<NativeFn> {
        self.passthrough
    }

    pub(crate) fn decode_fn(&self) -> DecodeFn {
        Arc::clone(&self.decode)
    }

    pub(crate) fn encode_fn(&self) -> EncodeFn {
        Arc::clone(&self.encode)
    }

    /// Runs the decode function.
    pub fn decode(
        &self,
        cursor: &mut Cursor<'_>,
        order: ByteOrder,
    ) -> Result<Value, DomainError> {
        (self.decode)(cursor, order)
    }

    /// Runs the encode function.
    pub fn encode(
        &self,
        value: &Value,
        sink: &mut NativeSeq,
        order: ByteOrder,
    ) -> Result<(), DomainError> {
        (self.encode)(value, sink, order)
    }
}

impl fmt::Debug for FieldEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldEncoding")
            .field("format", &self.format)
            .field("passthrough", &self.is_passthrough())
            .finish_non_exhaustive()
    }
}

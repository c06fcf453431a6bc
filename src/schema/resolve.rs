//! # Type Resolution
//!
//! Turns one declared [`SemanticType`] (plus an optional codec annotation)
//! into an executable [`FieldEncoding`]. Resolution is purely structural and
//! deterministic: the same declaration always yields a semantically
//! identical encoding.
//!
//! ## Dispatch Order
//!
//! 1. Catalogue primitives resolve directly.
//! 2. Arrays and enums recurse into their inner/underlying type.
//! 3. Named types consult the registry: a compiled record wins, then an
//!    explicitly attached codec (validated against the declared name), then
//!    a registered codec; anything else is a missing-encoding error.
//!
//! A codec attached to a field whose declared type is not the codec's
//! target is a configuration error naming both sides.

use std::sync::Arc;

use crate::descriptor::CompiledDescriptor;
use crate::error::{ConfigError, DomainError};
use crate::pack::{Cursor, NativeSeq};
use crate::registry::{ExternalCodec, Registry};
use crate::types::{EnumType, SemanticType, Value};

use super::encoding::{DecodeFn, EncodeFn, FieldEncoding};
use super::primitives;

fn expect_array<'v>(value: &'v Value) -> Result<&'v [Value], DomainError> {
    value.as_array().ok_or(DomainError::ValueMismatch {
        expected: "array",
        found: value.kind(),
    })
}

/// Resolves one field declaration to its encoding.
pub(crate) fn resolve(
    registry: &Registry,
    ty: &SemanticType,
    codec: Option<&Arc<ExternalCodec>>,
) -> Result<FieldEncoding, ConfigError> {
    if let Some(codec) = codec {
        if !matches!(ty, SemanticType::Named(name) if name == codec.target()) {
            return Err(ConfigError::CodecMismatch {
                expected: ty.describe(),
                found: codec.target().to_string(),
            });
        }
    }

    match ty {
        SemanticType::Bool => Ok(primitives::boolean()),
        SemanticType::UInt(width) => Ok(primitives::unsigned(*width)),
        SemanticType::Int(width) => Ok(primitives::signed(*width)),
        SemanticType::Float(width) => Ok(primitives::float(*width)),
        SemanticType::Decimal => Ok(primitives::decimal()),
        SemanticType::Bytes(size) => {
            if *size == 0 {
                return Err(ConfigError::ZeroSizeField);
            }
            Ok(primitives::bytes(*size))
        }
        SemanticType::Text(size) => {
            if *size == 0 {
                return Err(ConfigError::ZeroSizeField);
            }
            Ok(primitives::text(*size))
        }
        SemanticType::Array { inner, len } => resolve_array(registry, inner, *len),
        SemanticType::Enum(enum_type) => resolve_enum(registry, enum_type),
        SemanticType::Named(name) => {
            if let Some(descriptor) = registry.descriptor(name) {
                Ok(record_encoding(&descriptor))
            } else if let Some(codec) = codec {
                Ok(codec.encoding().clone())
            } else if let Some(codec) = registry.codec(name) {
                Ok(codec.encoding().clone())
            } else {
                Err(ConfigError::MissingEncoding(name.clone()))
            }
        }
    }
}

/// Expands a fixed-length homogeneous array into one flat encoding.
///
/// Decode always walks elements one by one. Encode takes the bulk path when
/// the inner encoding is passthrough: a plain fn-pointer conversion per
/// element instead of the boxed closure. A supplied sequence of the wrong
/// length is caught by the packer's value-count check, never here.
fn resolve_array(
    registry: &Registry,
    inner: &SemanticType,
    len: usize,
) -> Result<FieldEncoding, ConfigError> {
    if len == 0 {
        return Err(ConfigError::ZeroLengthArray);
    }

    let inner_encoding = resolve(registry, inner, None)?;
    let format = inner_encoding.format().repeat(len);

    let decode: DecodeFn = {
        let inner_decode = inner_encoding.decode_fn();
        Arc::new(move |cursor: &mut Cursor<'_>, order| {
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(inner_decode(cursor, order)?);
            }
            Ok(Value::Array(items))
        })
    };

    let encode: EncodeFn = match inner_encoding.native_convert() {
        Some(convert) => Arc::new(move |value: &Value, sink: &mut NativeSeq, _order| {
            let items = expect_array(value)?;
            sink.reserve(items.len());
            for item in items {
                sink.push(convert(item)?);
            }
            Ok(())
        }),
        None => {
            let inner_encode = inner_encoding.encode_fn();
            Arc::new(move |value: &Value, sink: &mut NativeSeq, order| {
                for item in expect_array(value)? {
                    inner_encode(item, sink, order)?;
                }
                Ok(())
            })
        }
    };

    Ok(FieldEncoding::new(format, decode, encode))
}

/// Wraps an integer encoding with discriminant validation on decode.
///
/// The format fragment and the encode function are reused unchanged from
/// the underlying encoding, including its passthrough tag, so arrays of
/// enums keep the bulk encode path.
fn resolve_enum(
    registry: &Registry,
    enum_type: &Arc<EnumType>,
) -> Result<FieldEncoding, ConfigError> {
    if !enum_type.underlying().is_integer() {
        return Err(ConfigError::InvalidEnumUnderlying(
            enum_type.name().to_string(),
        ));
    }
    if enum_type.members().is_empty() {
        return Err(ConfigError::EmptyEnum(enum_type.name().to_string()));
    }

    let inner = resolve(registry, enum_type.underlying(), None)?;

    let decode: DecodeFn = {
        let inner_decode = inner.decode_fn();
        let enum_type = Arc::clone(enum_type);
        Arc::new(move |cursor: &mut Cursor<'_>, order| {
            let value = inner_decode(cursor, order)?;
            let discriminant = match &value {
                Value::UInt(v) => i128::try_from(*v).ok(),
                Value::Int(v) => Some(*v),
                Value::U256(v) => v.to_u128().and_then(|v| i128::try_from(v).ok()),
                Value::I256(v) => v.to_i128(),
                _ => None,
            };
            match discriminant {
                Some(d) if enum_type.contains(d) => Ok(value),
                Some(d) => Err(DomainError::InvalidDiscriminant {
                    name: enum_type.name().to_string(),
                    value: d.to_string(),
                }),
                None => Err(DomainError::InvalidDiscriminant {
                    name: enum_type.name().to_string(),
                    value: format!("{value:?}"),
                }),
            }
        })
    };

    Ok(FieldEncoding::from_parts(
        inner.format().to_string(),
        decode,
        inner.encode_fn(),
        inner.native_convert(),
    ))
}

/// Flattens a compiled record into a single field encoding: decode applies
/// the descriptor's field decoders positionally and reconstructs the nested
/// record, encode applies the field encoders positionally.
fn record_encoding(descriptor: &Arc<CompiledDescriptor>) -> FieldEncoding {
    let decode: DecodeFn = {
        let descriptor = Arc::clone(descriptor);
        Arc::new(move |cursor: &mut Cursor<'_>, order| descriptor.decode_fields(cursor, order))
    };

    let encode: EncodeFn = {
        let descriptor = Arc::clone(descriptor);
        Arc::new(move |value: &Value, sink: &mut NativeSeq, order| {
            descriptor.encode_fields(value, sink, order)
        })
    };

    FieldEncoding::new(descriptor.format().to_string(), decode, encode)
}

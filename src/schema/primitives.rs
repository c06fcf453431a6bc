//! # Primitive Encoding Table
//!
//! The fixed catalogue of built-in encodings. Each constructor returns a
//! [`FieldEncoding`] with a constant format fragment and slot count:
//!
//! | Semantic type | Fragment | Conversion |
//! |---------------|----------|------------|
//! | bool, u8–u64, i8–i64 | `?`, `B`–`Q`, `b`–`q` | identity (passthrough) |
//! | f32 / f64 | `f` / `d` | identity (passthrough) |
//! | u128/i128, u256/i256 | `16s` / `32s` | byte-order integer conversion |
//! | decimal | `16s` | raw i128 with 48 fractional bits |
//! | bytes(n) | `Ns` | identity (passthrough) |
//! | text(n) | `Ns` | UTF-8, trailing NULs stripped on decode |
//!
//! Widths up to 64 bits map onto single native integer slots, so the packer
//! already produces the correctly-typed value and the conversion only
//! bridges to the [`Value`] enum. Oversized integers and the decimal smuggle
//! their payload through an opaque byte slot and convert honoring the call's
//! byte order.

use std::sync::Arc;

use crate::error::DomainError;
use crate::pack::{ByteOrder, Cursor, Native, NativeSeq};
use crate::types::{FixedDecimal, FloatWidth, IntWidth, Value, I256, U256};

use super::encoding::{DecodeFn, EncodeFn, FieldEncoding};

pub(crate) fn expect_uint(value: &Value) -> Result<u128, DomainError> {
    value.as_uint().ok_or(DomainError::ValueMismatch {
        expected: "unsigned integer",
        found: value.kind(),
    })
}

pub(crate) fn expect_int(value: &Value) -> Result<i128, DomainError> {
    value.as_int().ok_or(DomainError::ValueMismatch {
        expected: "signed integer",
        found: value.kind(),
    })
}

fn fixed_slot<const N: usize>(bytes: &[u8]) -> Result<[u8; N], DomainError> {
    bytes.try_into().map_err(|_| DomainError::SlotWidth {
        expected: N,
        got: bytes.len(),
    })
}

fn out_of_range(value: impl ToString, bits: u32, signedness: &'static str) -> DomainError {
    DomainError::IntOutOfRange {
        value: value.to_string(),
        bits,
        signedness,
    }
}

fn push_bytes(sink: &mut NativeSeq, bytes: &[u8]) {
    sink.push(Native::Bytes(bytes.to_vec()));
}

pub(crate) fn boolean() -> FieldEncoding {
    fn convert(value: &Value) -> Result<Native, DomainError> {
        match value {
            Value::Bool(v) => Ok(Native::Bool(*v)),
            other => Err(DomainError::ValueMismatch {
                expected: "bool",
                found: other.kind(),
            }),
        }
    }

    let decode: DecodeFn = Arc::new(|cursor: &mut Cursor<'_>, _order| match cursor.take()? {
        Native::Bool(v) => Ok(Value::Bool(*v)),
        other => Err(DomainError::ValueMismatch {
            expected: "bool",
            found: other.kind(),
        }),
    });

    FieldEncoding::passthrough("?", convert, decode)
}

macro_rules! narrow_uint {
    ($name:ident, $ty:ty, $native:ident, $code:literal, $bits:literal) => {
        fn $name() -> FieldEncoding {
            fn convert(value: &Value) -> Result<Native, DomainError> {
                let v = expect_uint(value)?;
                <$ty>::try_from(v)
                    .map(Native::$native)
                    .map_err(|_| out_of_range(v, $bits, "unsigned"))
            }

            let decode: DecodeFn =
                Arc::new(|cursor: &mut Cursor<'_>, _order| match cursor.take()? {
                    Native::$native(v) => Ok(Value::UInt(u128::from(*v))),
                    other => Err(DomainError::ValueMismatch {
                        expected: "unsigned integer",
                        found: other.kind(),
                    }),
                });

            FieldEncoding::passthrough($code, convert, decode)
        }
    };
}

macro_rules! narrow_int {
    ($name:ident, $ty:ty, $native:ident, $code:literal, $bits:literal) => {
        fn $name() -> FieldEncoding {
            fn convert(value: &Value) -> Result<Native, DomainError> {
                let v = expect_int(value)?;
                <$ty>::try_from(v)
                    .map(Native::$native)
                    .map_err(|_| out_of_range(v, $bits, "signed"))
            }

            let decode: DecodeFn =
                Arc::new(|cursor: &mut Cursor<'_>, _order| match cursor.take()? {
                    Native::$native(v) => Ok(Value::Int(i128::from(*v))),
                    other => Err(DomainError::ValueMismatch {
                        expected: "signed integer",
                        found: other.kind(),
                    }),
                });

            FieldEncoding::passthrough($code, convert, decode)
        }
    };
}

narrow_uint!(uint8, u8, U8, "B", 8);
narrow_uint!(uint16, u16, U16, "H", 16);
narrow_uint!(uint32, u32, U32, "I", 32);
narrow_uint!(uint64, u64, U64, "Q", 64);

narrow_int!(int8, i8, I8, "b", 8);
narrow_int!(int16, i16, I16, "h", 16);
narrow_int!(int32, i32, I32, "i", 32);
narrow_int!(int64, i64, I64, "q", 64);

fn uint128() -> FieldEncoding {
    let decode: DecodeFn = Arc::new(|cursor: &mut Cursor<'_>, order| {
        let bytes = fixed_slot::<16>(cursor.take_bytes()?)?;
        let v = match order {
            ByteOrder::Little => u128::from_le_bytes(bytes),
            ByteOrder::Big => u128::from_be_bytes(bytes),
        };
        Ok(Value::UInt(v))
    });

    let encode: EncodeFn = Arc::new(|value: &Value, sink: &mut NativeSeq, order| {
        let v = expect_uint(value)?;
        let bytes = match order {
            ByteOrder::Little => v.to_le_bytes(),
            ByteOrder::Big => v.to_be_bytes(),
        };
        push_bytes(sink, &bytes);
        Ok(())
    });

    FieldEncoding::new("16s", decode, encode)
}

fn int128() -> FieldEncoding {
    let decode: DecodeFn = Arc::new(|cursor: &mut Cursor<'_>, order| {
        let bytes = fixed_slot::<16>(cursor.take_bytes()?)?;
        let v = match order {
            ByteOrder::Little => i128::from_le_bytes(bytes),
            ByteOrder::Big => i128::from_be_bytes(bytes),
        };
        Ok(Value::Int(v))
    });

    let encode: EncodeFn = Arc::new(|value: &Value, sink: &mut NativeSeq, order| {
        let v = expect_int(value)?;
        let bytes = match order {
            ByteOrder::Little => v.to_le_bytes(),
            ByteOrder::Big => v.to_be_bytes(),
        };
        push_bytes(sink, &bytes);
        Ok(())
    });

    FieldEncoding::new("16s", decode, encode)
}

fn uint256() -> FieldEncoding {
    let decode: DecodeFn = Arc::new(|cursor: &mut Cursor<'_>, order| {
        let bytes = fixed_slot::<32>(cursor.take_bytes()?)?;
        let v = match order {
            ByteOrder::Little => U256::from_le_bytes(bytes),
            ByteOrder::Big => U256::from_be_bytes(bytes),
        };
        Ok(Value::U256(v))
    });

    let encode: EncodeFn = Arc::new(|value: &Value, sink: &mut NativeSeq, order| {
        let v = match value {
            Value::U256(v) => *v,
            Value::UInt(v) => U256::from(*v),
            other => {
                return Err(DomainError::ValueMismatch {
                    expected: "unsigned integer",
                    found: other.kind(),
                })
            }
        };
        let bytes = match order {
            ByteOrder::Little => v.to_le_bytes(),
            ByteOrder::Big => v.to_be_bytes(),
        };
        push_bytes(sink, &bytes);
        Ok(())
    });

    FieldEncoding::new("32s", decode, encode)
}

fn int256() -> FieldEncoding {
    let decode: DecodeFn = Arc::new(|cursor: &mut Cursor<'_>, order| {
        let bytes = fixed_slot::<32>(cursor.take_bytes()?)?;
        let v = match order {
            ByteOrder::Little => I256::from_le_bytes(bytes),
            ByteOrder::Big => I256::from_be_bytes(bytes),
        };
        Ok(Value::I256(v))
    });

    let encode: EncodeFn = Arc::new(|value: &Value, sink: &mut NativeSeq, order| {
        let v = match value {
            Value::I256(v) => *v,
            Value::Int(v) => I256::from(*v),
            other => {
                return Err(DomainError::ValueMismatch {
                    expected: "signed integer",
                    found: other.kind(),
                })
            }
        };
        let bytes = match order {
            ByteOrder::Little => v.to_le_bytes(),
            ByteOrder::Big => v.to_be_bytes(),
        };
        push_bytes(sink, &bytes);
        Ok(())
    });

    FieldEncoding::new("32s", decode, encode)
}

pub(crate) fn unsigned(width: IntWidth) -> FieldEncoding {
    match width {
        IntWidth::W8 => uint8(),
        IntWidth::W16 => uint16(),
        IntWidth::W32 => uint32(),
        IntWidth::W64 => uint64(),
        IntWidth::W128 => uint128(),
        IntWidth::W256 => uint256(),
    }
}

pub(crate) fn signed(width: IntWidth) -> FieldEncoding {
    match width {
        IntWidth::W8 => int8(),
        IntWidth::W16 => int16(),
        IntWidth::W32 => int32(),
        IntWidth::W64 => int64(),
        IntWidth::W128 => int128(),
        IntWidth::W256 => int256(),
    }
}

pub(crate) fn float(width: FloatWidth) -> FieldEncoding {
    fn convert32(value: &Value) -> Result<Native, DomainError> {
        match value {
            Value::Float(v) => Ok(Native::F32(*v as f32)),
            other => Err(DomainError::ValueMismatch {
                expected: "float",
                found: other.kind(),
            }),
        }
    }

    fn convert64(value: &Value) -> Result<Native, DomainError> {
        match value {
            Value::Float(v) => Ok(Native::F64(*v)),
            other => Err(DomainError::ValueMismatch {
                expected: "float",
                found: other.kind(),
            }),
        }
    }

    match width {
        FloatWidth::W32 => {
            let decode: DecodeFn =
                Arc::new(|cursor: &mut Cursor<'_>, _order| match cursor.take()? {
                    Native::F32(v) => Ok(Value::Float(f64::from(*v))),
                    other => Err(DomainError::ValueMismatch {
                        expected: "float",
                        found: other.kind(),
                    }),
                });
            FieldEncoding::passthrough("f", convert32, decode)
        }
        FloatWidth::W64 => {
            let decode: DecodeFn =
                Arc::new(|cursor: &mut Cursor<'_>, _order| match cursor.take()? {
                    Native::F64(v) => Ok(Value::Float(*v)),
                    other => Err(DomainError::ValueMismatch {
                        expected: "float",
                        found: other.kind(),
                    }),
                });
            FieldEncoding::passthrough("d", convert64, decode)
        }
    }
}

pub(crate) fn decimal() -> FieldEncoding {
    let decode: DecodeFn = Arc::new(|cursor: &mut Cursor<'_>, order| {
        let bytes = fixed_slot::<16>(cursor.take_bytes()?)?;
        let raw = match order {
            ByteOrder::Little => i128::from_le_bytes(bytes),
            ByteOrder::Big => i128::from_be_bytes(bytes),
        };
        Ok(Value::Decimal(FixedDecimal::from_raw(raw)))
    });

    let encode: EncodeFn = Arc::new(|value: &Value, sink: &mut NativeSeq, order| {
        let v = value.as_decimal().ok_or(DomainError::ValueMismatch {
            expected: "decimal",
            found: value.kind(),
        })?;
        let bytes = match order {
            ByteOrder::Little => v.raw().to_le_bytes(),
            ByteOrder::Big => v.raw().to_be_bytes(),
        };
        push_bytes(sink, &bytes);
        Ok(())
    });

    FieldEncoding::new("16s", decode, encode)
}

pub(crate) fn bytes(size: usize) -> FieldEncoding {
    fn convert(value: &Value) -> Result<Native, DomainError> {
        match value {
            Value::Bytes(v) => Ok(Native::Bytes(v.clone())),
            other => Err(DomainError::ValueMismatch {
                expected: "bytes",
                found: other.kind(),
            }),
        }
    }

    let decode: DecodeFn = Arc::new(|cursor: &mut Cursor<'_>, _order| {
        Ok(Value::Bytes(cursor.take_bytes()?.to_vec()))
    });

    FieldEncoding::passthrough(format!("{size}s"), convert, decode)
}

pub(crate) fn text(size: usize) -> FieldEncoding {
    let decode: DecodeFn = Arc::new(|cursor: &mut Cursor<'_>, _order| {
        let raw = cursor.take_bytes()?;
        let end = raw
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |last| last + 1);
        Ok(Value::Text(String::from_utf8(raw[..end].to_vec())?))
    });

    let encode: EncodeFn = Arc::new(|value: &Value, sink: &mut NativeSeq, _order| {
        let v = value.as_text().ok_or(DomainError::ValueMismatch {
            expected: "text",
            found: value.kind(),
        })?;
        sink.push(Native::Bytes(v.as_bytes().to_vec()));
        Ok(())
    });

    FieldEncoding::new(format!("{size}s"), decode, encode)
}

//! Fuzz testing for descriptor decoding.
//!
//! Builds a record schema from arbitrary field types, compiles it, and
//! feeds arbitrary bytes to decode/decode_many to ensure malformed input
//! surfaces as errors, never as panics. Successfully decoded values are
//! re-encoded to check the round-trip invariant.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use packrec::{
    ByteOrder, EnumMember, EnumType, FieldDef, FloatWidth, IntWidth, RecordDef, Registry,
    SemanticType,
};

#[derive(Debug, Arbitrary)]
struct DecodeInput {
    fields: Vec<FuzzFieldType>,
    big_endian: bool,
    data: Vec<u8>,
}

#[derive(Debug, Arbitrary, Clone, Copy)]
enum FuzzFieldType {
    Bool,
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    I8,
    I16,
    I32,
    I64,
    I128,
    I256,
    F32,
    F64,
    Decimal,
    Bytes(u8),
    Text(u8),
    ArrayU8(u8),
    ArrayU32(u8),
    Enum,
}

impl From<FuzzFieldType> for SemanticType {
    fn from(ty: FuzzFieldType) -> Self {
        match ty {
            FuzzFieldType::Bool => SemanticType::Bool,
            FuzzFieldType::U8 => SemanticType::UInt(IntWidth::W8),
            FuzzFieldType::U16 => SemanticType::UInt(IntWidth::W16),
            FuzzFieldType::U32 => SemanticType::UInt(IntWidth::W32),
            FuzzFieldType::U64 => SemanticType::UInt(IntWidth::W64),
            FuzzFieldType::U128 => SemanticType::UInt(IntWidth::W128),
            FuzzFieldType::U256 => SemanticType::UInt(IntWidth::W256),
            FuzzFieldType::I8 => SemanticType::Int(IntWidth::W8),
            FuzzFieldType::I16 => SemanticType::Int(IntWidth::W16),
            FuzzFieldType::I32 => SemanticType::Int(IntWidth::W32),
            FuzzFieldType::I64 => SemanticType::Int(IntWidth::W64),
            FuzzFieldType::I128 => SemanticType::Int(IntWidth::W128),
            FuzzFieldType::I256 => SemanticType::Int(IntWidth::W256),
            FuzzFieldType::F32 => SemanticType::Float(FloatWidth::W32),
            FuzzFieldType::F64 => SemanticType::Float(FloatWidth::W64),
            FuzzFieldType::Decimal => SemanticType::Decimal,
            FuzzFieldType::Bytes(size) => SemanticType::Bytes(usize::from(size).max(1)),
            FuzzFieldType::Text(size) => SemanticType::Text(usize::from(size).max(1)),
            FuzzFieldType::ArrayU8(len) => SemanticType::array(
                SemanticType::UInt(IntWidth::W8),
                usize::from(len).clamp(1, 32),
            ),
            FuzzFieldType::ArrayU32(len) => SemanticType::array(
                SemanticType::UInt(IntWidth::W32),
                usize::from(len).clamp(1, 32),
            ),
            FuzzFieldType::Enum => SemanticType::Enum(EnumType::new(
                "FuzzEnum",
                SemanticType::UInt(IntWidth::W8),
                vec![EnumMember::new("A", 0), EnumMember::new("B", 1)],
            )),
        }
    }
}

fuzz_target!(|input: DecodeInput| {
    if input.fields.is_empty() || input.fields.len() > 32 {
        return;
    }

    let registry = Registry::new();
    let fields = input
        .fields
        .iter()
        .enumerate()
        .map(|(i, ty)| FieldDef::new(format!("f{i}"), SemanticType::from(*ty)))
        .collect();

    let Ok(descriptor) = registry.compile(&RecordDef::new("Fuzzed", fields)) else {
        return;
    };

    let order = if input.big_endian {
        ByteOrder::Big
    } else {
        ByteOrder::Little
    };

    if let Ok(value) = descriptor.decode(&input.data, order) {
        // Anything that decodes must re-encode without error, at the
        // descriptor's fixed size.
        let reencoded = descriptor.encode(&value, order).unwrap();
        assert_eq!(reencoded.len(), descriptor.byte_size());
    }

    let _ = descriptor.decode_many(&input.data, order);
});

//! Tests for schema resolution and compilation

use std::sync::Arc;

use crate::error::ConfigError;
use crate::registry::{ExternalCodec, Registry};
use crate::types::{EnumMember, EnumType, FloatWidth, IntWidth, SemanticType, Value};

use super::field::{FieldDef, RecordDef};
use super::primitives;
use super::resolve::resolve;

fn uint(width: IntWidth) -> SemanticType {
    SemanticType::UInt(width)
}

#[test]
fn compiled_format_concatenates_field_fragments() {
    let registry = Registry::new();
    let def = RecordDef::new(
        "AllPrimitives",
        vec![
            FieldDef::new("a", uint(IntWidth::W8)),
            FieldDef::new("b", SemanticType::Int(IntWidth::W8)),
            FieldDef::new("c", uint(IntWidth::W16)),
            FieldDef::new("d", SemanticType::Int(IntWidth::W16)),
            FieldDef::new("e", uint(IntWidth::W32)),
            FieldDef::new("f", SemanticType::Int(IntWidth::W32)),
            FieldDef::new("g", uint(IntWidth::W64)),
            FieldDef::new("h", SemanticType::Int(IntWidth::W64)),
            FieldDef::new("i", SemanticType::Bytes(16)),
        ],
    );

    let descriptor = registry.compile(&def).unwrap();
    assert_eq!(descriptor.format(), "BbHhIiQq16s");
    assert_eq!(descriptor.byte_size(), 1 + 1 + 2 + 2 + 4 + 4 + 8 + 8 + 16);
}

#[test]
fn both_packers_report_the_same_size() {
    let registry = Registry::new();
    let descriptor = registry
        .compile(&RecordDef::new(
            "Sized",
            vec![
                FieldDef::new("flag", SemanticType::Bool),
                FieldDef::new("value", uint(IntWidth::W128)),
            ],
        ))
        .unwrap();

    assert_eq!(
        descriptor.packer(crate::ByteOrder::Little).size(),
        descriptor.packer(crate::ByteOrder::Big).size(),
    );
    assert_eq!(descriptor.byte_size(), 17);
}

#[test]
fn field_names_keep_declaration_order() {
    let registry = Registry::new();
    let descriptor = registry
        .compile(&RecordDef::new(
            "Ordered",
            vec![
                FieldDef::new("first", uint(IntWidth::W8)),
                FieldDef::new("second", uint(IntWidth::W16)),
                FieldDef::new("third", uint(IntWidth::W32)),
            ],
        ))
        .unwrap();

    assert_eq!(descriptor.field_names(), &["first", "second", "third"]);
}

#[test]
fn bare_primitives_are_passthrough() {
    let registry = Registry::new();

    for ty in [
        SemanticType::Bool,
        uint(IntWidth::W8),
        uint(IntWidth::W64),
        SemanticType::Int(IntWidth::W32),
        SemanticType::Float(FloatWidth::W64),
        SemanticType::Bytes(4),
    ] {
        let encoding = resolve(&registry, &ty, None).unwrap();
        assert!(encoding.is_passthrough(), "{} should pass through", ty.describe());
    }
}

#[test]
fn converting_primitives_are_not_passthrough() {
    let registry = Registry::new();

    for ty in [
        uint(IntWidth::W128),
        uint(IntWidth::W256),
        SemanticType::Int(IntWidth::W128),
        SemanticType::Decimal,
        SemanticType::Text(8),
    ] {
        let encoding = resolve(&registry, &ty, None).unwrap();
        assert!(!encoding.is_passthrough(), "{} converts", ty.describe());
    }
}

#[test]
fn oversized_integers_use_opaque_slots() {
    let registry = Registry::new();

    assert_eq!(resolve(&registry, &uint(IntWidth::W128), None).unwrap().format(), "16s");
    assert_eq!(resolve(&registry, &uint(IntWidth::W256), None).unwrap().format(), "32s");
    assert_eq!(resolve(&registry, &SemanticType::Decimal, None).unwrap().format(), "16s");
}

#[test]
fn array_format_repeats_the_inner_fragment() {
    let registry = Registry::new();
    let ty = SemanticType::array(uint(IntWidth::W16), 4);

    let encoding = resolve(&registry, &ty, None).unwrap();
    assert_eq!(encoding.format(), "HHHH");
}

#[test]
fn zero_length_arrays_are_rejected() {
    let registry = Registry::new();
    let ty = SemanticType::array(uint(IntWidth::W8), 0);

    let err = resolve(&registry, &ty, None).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroLengthArray));
}

#[test]
fn zero_size_text_and_bytes_are_rejected() {
    let registry = Registry::new();

    assert!(matches!(
        resolve(&registry, &SemanticType::Bytes(0), None),
        Err(ConfigError::ZeroSizeField)
    ));
    assert!(matches!(
        resolve(&registry, &SemanticType::Text(0), None),
        Err(ConfigError::ZeroSizeField)
    ));
}

#[test]
fn enum_reuses_the_underlying_fragment_and_passthrough() {
    let registry = Registry::new();
    let ty = SemanticType::Enum(EnumType::new(
        "Side",
        uint(IntWidth::W8),
        vec![EnumMember::new("Bid", 1), EnumMember::new("Ask", 2)],
    ));

    let encoding = resolve(&registry, &ty, None).unwrap();
    assert_eq!(encoding.format(), "B");
    assert!(encoding.is_passthrough());
}

#[test]
fn enum_over_wide_integers_is_not_passthrough() {
    let registry = Registry::new();
    let ty = SemanticType::Enum(EnumType::new(
        "Wide",
        uint(IntWidth::W128),
        vec![EnumMember::new("A", 1)],
    ));

    let encoding = resolve(&registry, &ty, None).unwrap();
    assert_eq!(encoding.format(), "16s");
    assert!(!encoding.is_passthrough());
}

#[test]
fn enum_underlying_must_be_an_integer() {
    let registry = Registry::new();
    let ty = SemanticType::Enum(EnumType::new(
        "Bad",
        SemanticType::Text(4),
        vec![EnumMember::new("A", 1)],
    ));

    let err = resolve(&registry, &ty, None).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnumUnderlying(name) if name == "Bad"));
}

#[test]
fn enum_must_have_members() {
    let registry = Registry::new();
    let ty = SemanticType::Enum(EnumType::new("Empty", uint(IntWidth::W8), vec![]));

    let err = resolve(&registry, &ty, None).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyEnum(name) if name == "Empty"));
}

#[test]
fn unknown_named_types_are_missing_encodings() {
    let registry = Registry::new();

    let err = resolve(&registry, &SemanticType::named("Mystery"), None).unwrap_err();
    assert!(matches!(err, ConfigError::MissingEncoding(name) if name == "Mystery"));
}

#[test]
fn nested_records_flatten_into_the_parent_format() {
    let registry = Registry::new();
    registry
        .compile(&RecordDef::new(
            "Inner",
            vec![
                FieldDef::new("a", uint(IntWidth::W32)),
                FieldDef::new("b", uint(IntWidth::W32)),
            ],
        ))
        .unwrap();

    let outer = registry
        .compile(&RecordDef::new(
            "Outer",
            vec![
                FieldDef::new("first", SemanticType::named("Inner")),
                FieldDef::new("second", SemanticType::named("Inner")),
            ],
        ))
        .unwrap();

    assert_eq!(outer.format(), "IIII");
    assert_eq!(outer.byte_size(), 16);
}

#[test]
fn compiling_the_same_name_twice_is_an_error() {
    let registry = Registry::new();
    let def = RecordDef::new("Once", vec![FieldDef::new("v", uint(IntWidth::W8))]);

    registry.compile(&def).unwrap();
    let err = registry.compile(&def).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateRecord(name) if name == "Once"));
}

#[test]
fn empty_records_are_rejected() {
    let registry = Registry::new();
    let err = registry
        .compile(&RecordDef::new("Nothing", vec![]))
        .unwrap_err();
    assert!(matches!(err, ConfigError::EmptyRecord(name) if name == "Nothing"));
}

#[test]
fn failed_compilation_publishes_nothing() {
    let registry = Registry::new();
    let def = RecordDef::new(
        "Broken",
        vec![
            FieldDef::new("ok", uint(IntWidth::W8)),
            FieldDef::new("bad", SemanticType::named("Mystery")),
        ],
    );

    assert!(registry.compile(&def).is_err());
    assert!(registry.descriptor("Broken").is_none());
}

#[test]
fn codec_must_target_the_declared_type() {
    let registry = Registry::new();
    let codec = Arc::new(
        ExternalCodec::from_bytes(
            "Quaternion",
            4,
            |bytes, _order| Ok(Value::Bytes(bytes.to_vec())),
            |value, _order| Ok(value.as_bytes().unwrap_or_default().to_vec()),
        )
        .unwrap(),
    );

    let field_ty = SemanticType::named("Matrix");
    let err = resolve(&registry, &field_ty, Some(&codec)).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::CodecMismatch { expected, found }
            if expected == "Matrix" && found == "Quaternion"
    ));
}

#[test]
fn codec_on_a_structural_type_is_a_mismatch() {
    let registry = Registry::new();
    let codec = Arc::new(
        ExternalCodec::from_bytes(
            "Quaternion",
            4,
            |bytes, _order| Ok(Value::Bytes(bytes.to_vec())),
            |value, _order| Ok(value.as_bytes().unwrap_or_default().to_vec()),
        )
        .unwrap(),
    );

    let err = resolve(&registry, &uint(IntWidth::W32), Some(&codec)).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::CodecMismatch { expected, found }
            if expected == "u32" && found == "Quaternion"
    ));
}

#[test]
fn registered_codecs_resolve_like_primitives() {
    let registry = Registry::new();
    registry
        .register_codec(
            ExternalCodec::from_bytes(
                "Token",
                8,
                |bytes, _order| Ok(Value::Bytes(bytes.to_vec())),
                |value, _order| Ok(value.as_bytes().unwrap_or_default().to_vec()),
            )
            .unwrap(),
        )
        .unwrap();

    let encoding = resolve(&registry, &SemanticType::named("Token"), None).unwrap();
    assert_eq!(encoding.format(), "8s");
}

#[test]
fn duplicate_codec_registration_is_an_error() {
    let registry = Registry::new();
    let make = || {
        ExternalCodec::from_bytes(
            "Token",
            8,
            |bytes, _order| Ok(Value::Bytes(bytes.to_vec())),
            |value, _order| Ok(value.as_bytes().unwrap_or_default().to_vec()),
        )
        .unwrap()
    };

    registry.register_codec(make()).unwrap();
    let err = registry.register_codec(make()).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateCodec(name) if name == "Token"));
}

#[test]
fn resolution_is_deterministic_across_registries() {
    let first = Registry::new();
    let second = Registry::new();
    let fields = || {
        vec![
            FieldDef::new("a", uint(IntWidth::W16)),
            FieldDef::new("b", SemanticType::array(uint(IntWidth::W8), 3)),
            FieldDef::new("c", SemanticType::Decimal),
        ]
    };

    let one = first.compile(&RecordDef::new("Same", fields())).unwrap();
    let two = second.compile(&RecordDef::new("Same", fields())).unwrap();

    assert_eq!(one.format(), two.format());
    assert_eq!(one.byte_size(), two.byte_size());
}

#[test]
fn primitive_table_fragments_are_constant() {
    assert_eq!(primitives::boolean().format(), "?");
    assert_eq!(primitives::unsigned(IntWidth::W8).format(), "B");
    assert_eq!(primitives::unsigned(IntWidth::W16).format(), "H");
    assert_eq!(primitives::unsigned(IntWidth::W32).format(), "I");
    assert_eq!(primitives::unsigned(IntWidth::W64).format(), "Q");
    assert_eq!(primitives::signed(IntWidth::W8).format(), "b");
    assert_eq!(primitives::signed(IntWidth::W64).format(), "q");
    assert_eq!(primitives::float(FloatWidth::W32).format(), "f");
    assert_eq!(primitives::float(FloatWidth::W64).format(), "d");
    assert_eq!(primitives::bytes(11).format(), "11s");
    assert_eq!(primitives::text(20).format(), "20s");
}

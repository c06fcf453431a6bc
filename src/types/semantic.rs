//! # Semantic Type Descriptions
//!
//! [`SemanticType`] describes the binary encoding of one field: which
//! catalogue primitive it uses, or how it composes other types (fixed-length
//! array, integer-backed enum, named record or external codec). Resolution
//! (`schema::resolve`) turns a semantic type into an executable encoding;
//! this module only carries the declaration.
//!
//! ## Catalogue
//!
//! | Declaration | Packed size |
//! |-------------|-------------|
//! | `Bool` | 1 byte |
//! | `UInt(w)` / `Int(w)` | w/8 bytes, w ∈ {8,16,32,64,128,256} |
//! | `Float(w)` | 4 or 8 bytes |
//! | `Decimal` | 16 bytes (48 fractional bits) |
//! | `Bytes(n)` / `Text(n)` | n bytes, zero-filled |
//! | `Array { inner, len }` | len × size(inner) |
//! | `Enum(ty)` | size of the underlying integer |
//! | `Named(name)` | size of the registered record or codec |

use std::sync::Arc;

/// Bit width of an integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
    W128,
    W256,
}

impl IntWidth {
    pub fn bits(self) -> u32 {
        match self {
            IntWidth::W8 => 8,
            IntWidth::W16 => 16,
            IntWidth::W32 => 32,
            IntWidth::W64 => 64,
            IntWidth::W128 => 128,
            IntWidth::W256 => 256,
        }
    }

    pub fn bytes(self) -> usize {
        self.bits() as usize / 8
    }
}

/// Bit width of a float field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatWidth {
    W32,
    W64,
}

/// Declared binary encoding of one field.
#[derive(Debug, Clone, PartialEq)]
pub enum SemanticType {
    Bool,
    UInt(IntWidth),
    Int(IntWidth),
    Float(FloatWidth),
    Decimal,
    Bytes(usize),
    Text(usize),
    Array {
        inner: Box<SemanticType>,
        len: usize,
    },
    Enum(Arc<EnumType>),
    /// A named type resolved through the registry: a compiled record or an
    /// external codec.
    Named(String),
}

impl SemanticType {
    pub fn array(inner: SemanticType, len: usize) -> Self {
        SemanticType::Array {
            inner: Box::new(inner),
            len,
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        SemanticType::Named(name.into())
    }

    /// True for integer types of any width.
    pub fn is_integer(&self) -> bool {
        matches!(self, SemanticType::UInt(_) | SemanticType::Int(_))
    }

    /// Human-readable name used in error messages.
    pub fn describe(&self) -> String {
        match self {
            SemanticType::Bool => "bool".to_string(),
            SemanticType::UInt(w) => format!("u{}", w.bits()),
            SemanticType::Int(w) => format!("i{}", w.bits()),
            SemanticType::Float(FloatWidth::W32) => "f32".to_string(),
            SemanticType::Float(FloatWidth::W64) => "f64".to_string(),
            SemanticType::Decimal => "decimal".to_string(),
            SemanticType::Bytes(n) => format!("bytes[{n}]"),
            SemanticType::Text(n) => format!("text[{n}]"),
            SemanticType::Array { inner, len } => format!("[{}; {len}]", inner.describe()),
            SemanticType::Enum(ty) => format!("enum {}", ty.name()),
            SemanticType::Named(name) => name.clone(),
        }
    }
}

/// One named discriminant of an [`EnumType`].
#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    name: String,
    value: i128,
}

impl EnumMember {
    pub fn new(name: impl Into<String>, value: i128) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> i128 {
        self.value
    }
}

/// Declaration of an integer-backed enumeration.
///
/// The underlying type carries the wire encoding; members define the valid
/// discriminants. Validation happens at resolution time, so a malformed
/// declaration surfaces as a configuration error, never at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    name: String,
    underlying: SemanticType,
    members: Vec<EnumMember>,
}

impl EnumType {
    pub fn new(
        name: impl Into<String>,
        underlying: SemanticType,
        members: Vec<EnumMember>,
    ) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            underlying,
            members,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn underlying(&self) -> &SemanticType {
        &self.underlying
    }

    pub fn members(&self) -> &[EnumMember] {
        &self.members
    }

    /// Looks up the member with the given discriminant.
    pub fn member(&self, value: i128) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.value == value)
    }

    pub fn contains(&self, value: i128) -> bool {
        self.member(value).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_report_bits_and_bytes() {
        assert_eq!(IntWidth::W8.bits(), 8);
        assert_eq!(IntWidth::W256.bytes(), 32);
        assert_eq!(IntWidth::W128.bytes(), 16);
    }

    #[test]
    fn describe_names_compound_types() {
        let ty = SemanticType::array(SemanticType::UInt(IntWidth::W16), 4);
        assert_eq!(ty.describe(), "[u16; 4]");
        assert_eq!(SemanticType::Text(8).describe(), "text[8]");
        assert_eq!(SemanticType::named("Order").describe(), "Order");
    }

    #[test]
    fn enum_member_lookup() {
        let ty = EnumType::new(
            "Side",
            SemanticType::UInt(IntWidth::W8),
            vec![EnumMember::new("Bid", 1), EnumMember::new("Ask", 2)],
        );

        assert!(ty.contains(1));
        assert!(ty.contains(2));
        assert!(!ty.contains(3));
        assert_eq!(ty.member(1).map(EnumMember::name), Some("Bid"));
    }
}

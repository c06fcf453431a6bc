//! # packrec - Declarative Fixed-Layout Binary Codec
//!
//! packrec compiles a declarative record description (field names, semantic
//! types, per-field size/width metadata) into a reusable encoder/decoder
//! pair for a tightly packed, fixed-size byte layout. Compilation happens
//! once per record type; every later encode/decode call runs against the
//! precompiled descriptor with no re-introspection, for either byte order.
//!
//! ## Quick Start
//!
//! ```ignore
//! use packrec::{
//!     ByteOrder, FieldDef, FixedDecimal, IntWidth, RecordDef, Registry, SemanticType, Value,
//! };
//!
//! let registry = Registry::new();
//! let order = registry.compile(&RecordDef::new(
//!     "Order",
//!     vec![
//!         FieldDef::new("id", SemanticType::UInt(IntWidth::W64)),
//!         FieldDef::new("price", SemanticType::Decimal),
//!         FieldDef::new("symbol", SemanticType::Text(8)),
//!     ],
//! ))?;
//!
//! let value = Value::Record(vec![
//!     Value::UInt(42),
//!     Value::Decimal(FixedDecimal::from_int(1234)),
//!     Value::Text("ACME".into()),
//! ]);
//!
//! let data = order.encode(&value, ByteOrder::Little)?;
//! assert_eq!(data.len(), order.byte_size());
//! assert_eq!(order.decode(&data, ByteOrder::Little)?, value);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Registry (descriptors, external codecs) │
//! ├─────────────────────────────────────────┤
//! │  Schema Layer (resolution, compilation)  │
//! ├─────────────────────────────────────────┤
//! │  Compiled Descriptor (runtime ops)       │
//! ├─────────────────────────────────────────┤
//! │  Packing Layer (format slots, packers)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Records flatten completely at compile time: nested records and
//! fixed-length arrays contribute their slots to one linear layout with no
//! padding or alignment, so the packed form of a nested record is exactly
//! its own encoding spliced in at the right offset.
//!
//! ## Error Model
//!
//! Schema problems surface as [`ConfigError`] during compilation, never
//! later; invalid values and buffers surface as [`DomainError`] at the
//! call that hits them. The two kinds are separate types, so callers can
//! statically tell a broken schema from bad data.
//!
//! ## Concurrency
//!
//! Descriptors are immutable after compilation and freely shareable across
//! threads. The registry's guarded insert is the only synchronization
//! point in the crate.
//!
//! ## Module Overview
//!
//! - [`pack`]: format language, native packers, value cursor
//! - [`types`]: semantic types, dynamic values, fixed decimal, 256-bit ints
//! - [`schema`]: field declarations, resolution, record compilation
//! - [`descriptor`]: compiled descriptors and their runtime operations
//! - [`registry`]: descriptor/codec tables and the extension interface

pub mod descriptor;
pub mod error;
pub mod pack;
pub mod registry;
pub mod schema;
pub mod types;

pub use descriptor::CompiledDescriptor;
pub use error::{ConfigError, DomainError};
pub use pack::{ByteOrder, Cursor, Native, NativeSeq, Packer};
pub use registry::{ExternalCodec, Registry};
pub use schema::{FieldDef, FieldEncoding, RecordDef};
pub use types::{
    EnumMember, EnumType, FixedDecimal, FloatWidth, IntWidth, SemanticType, Value, I256, U256,
};

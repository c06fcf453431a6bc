//! # Schema Resolution and Compilation
//!
//! This module turns record declarations into compiled descriptors. The
//! pipeline runs once per record type:
//!
//! ```text
//! RecordDef ──compile──▶ resolve(field) per field, in declared order
//!                          │
//!                          ├── primitives: catalogue encodings
//!                          ├── arrays:     inner encoding repeated
//!                          ├── enums:      underlying + validation
//!                          └── named:      registry records / codecs
//!                          ▼
//!                        CompiledDescriptor (flat format, two packers,
//!                        positional decoder/encoder lists)
//! ```
//!
//! After compilation nothing here runs again; encode/decode calls touch
//! only the descriptor.
//!
//! ## Module Structure
//!
//! - `field`: `FieldDef` / `RecordDef` declarations
//! - `encoding`: `FieldEncoding` and the decode/encode function types
//! - `primitives`: the built-in encoding catalogue
//! - `resolve`: type resolution with array/enum/record composition
//! - `compile`: the record compiler

pub mod encoding;
pub mod field;

pub(crate) mod compile;
pub(crate) mod primitives;
pub(crate) mod resolve;

#[cfg(test)]
mod tests;

pub use encoding::{DecodeFn, EncodeFn, FieldEncoding};
pub use field::{FieldDef, RecordDef};

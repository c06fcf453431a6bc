//! # Record Compilation
//!
//! Walks a record declaration in field order, resolves every field to its
//! encoding, concatenates the format fragments, and builds the two native
//! packers. Compilation is eager and total: any unresolved field fails here,
//! before a descriptor exists, so a published descriptor is always fully
//! valid.

use crate::descriptor::CompiledDescriptor;
use crate::error::ConfigError;
use crate::pack::{ByteOrder, Packer};
use crate::registry::Registry;

use super::field::RecordDef;
use super::resolve::resolve;

/// Compiles a record declaration into its descriptor. Registration is the
/// caller's (the registry's) responsibility.
pub(crate) fn compile(
    registry: &Registry,
    def: &RecordDef,
) -> Result<CompiledDescriptor, ConfigError> {
    if def.fields().is_empty() {
        return Err(ConfigError::EmptyRecord(def.name().to_string()));
    }

    let mut format = String::new();
    let mut field_names = Vec::with_capacity(def.fields().len());
    let mut field_decoders = Vec::with_capacity(def.fields().len());
    let mut field_encoders = Vec::with_capacity(def.fields().len());

    for field in def.fields() {
        let encoding = resolve(registry, field.ty(), field.codec())?;
        format.push_str(encoding.format());
        field_names.push(field.name().to_string());
        field_decoders.push(encoding.decode_fn());
        field_encoders.push(encoding.encode_fn());
    }

    let little = Packer::new(&format, ByteOrder::Little)?;
    let big = Packer::new(&format, ByteOrder::Big)?;
    debug_assert_eq!(little.size(), big.size());

    Ok(CompiledDescriptor::new(
        def.name(),
        format,
        field_names,
        field_decoders,
        field_encoders,
        little,
        big,
    ))
}

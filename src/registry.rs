//! # Registry
//!
//! The registry associates record-type names with their compiled
//! descriptors, and external codec targets with their encodings. Entries
//! are written once, at declaration time, and live for the registry's
//! lifetime; there is no eviction and no re-registration.
//!
//! Compilation is the only mutating phase. The insert is guarded
//! (write-locked, double-checked), so concurrent compilation of different
//! types is safe; compiling the same type twice is a configuration error
//! no matter who races. All lookups after publication take the read lock
//! only.
//!
//! ## External Codecs
//!
//! Types that cannot declare their own fields participate through an
//! [`ExternalCodec`]: either a full `(target, format, decode, encode)`
//! tuple operating on the native cursor/sink, or a byte-patch form
//! ([`ExternalCodec::from_bytes`]) that adapts plain byte-slice conversion
//! functions to a single opaque slot. Once registered, a codec resolves
//! exactly like a built-in primitive.

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::descriptor::CompiledDescriptor;
use crate::error::{ConfigError, DomainError};
use crate::pack::{parse_format, ByteOrder, Cursor, Native, NativeSeq};
use crate::schema::compile::compile;
use crate::schema::{FieldEncoding, RecordDef};
use crate::types::Value;

/// Process-lifetime table of compiled descriptors and external codecs.
#[derive(Default)]
pub struct Registry {
    records: RwLock<HashMap<String, Arc<CompiledDescriptor>>>,
    codecs: RwLock<HashMap<String, Arc<ExternalCodec>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles a record declaration and registers the descriptor under the
    /// record's name. Compiling an already-registered name is a
    /// configuration error.
    pub fn compile(&self, def: &RecordDef) -> Result<Arc<CompiledDescriptor>, ConfigError> {
        if self.records.read().contains_key(def.name()) {
            return Err(ConfigError::DuplicateRecord(def.name().to_string()));
        }

        let descriptor = Arc::new(compile(self, def)?);

        let mut records = self.records.write();
        if records.contains_key(def.name()) {
            return Err(ConfigError::DuplicateRecord(def.name().to_string()));
        }
        records.insert(def.name().to_string(), Arc::clone(&descriptor));
        Ok(descriptor)
    }

    /// Looks up the compiled descriptor for a record-type name.
    pub fn descriptor(&self, name: &str) -> Option<Arc<CompiledDescriptor>> {
        self.records.read().get(name).cloned()
    }

    /// Registers an external codec under its target name. At most one codec
    /// per target.
    pub fn register_codec(&self, codec: ExternalCodec) -> Result<(), ConfigError> {
        let mut codecs = self.codecs.write();
        if codecs.contains_key(codec.target()) {
            return Err(ConfigError::DuplicateCodec(codec.target().to_string()));
        }
        codecs.insert(codec.target().to_string(), Arc::new(codec));
        Ok(())
    }

    pub(crate) fn codec(&self, name: &str) -> Option<Arc<ExternalCodec>> {
        self.codecs.read().get(name).cloned()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut records: Vec<String> = self.records.read().keys().cloned().collect();
        let mut codecs: Vec<String> = self.codecs.read().keys().cloned().collect();
        records.sort();
        codecs.sort();
        f.debug_struct("Registry")
            .field("records", &records)
            .field("codecs", &codecs)
            .finish()
    }
}

/// Externally supplied encoding for a type that cannot declare its own
/// fields.
pub struct ExternalCodec {
    target: String,
    encoding: FieldEncoding,
}

impl ExternalCodec {
    /// Builds a codec from a format fragment and cursor/sink functions. The
    /// decode must consume, and the encode append, exactly the native slots
    /// the fragment declares.
    pub fn new<D, E>(
        target: impl Into<String>,
        format: impl Into<String>,
        decode: D,
        encode: E,
    ) -> Result<Self, ConfigError>
    where
        D: Fn(&mut Cursor<'_>, ByteOrder) -> Result<Value, DomainError> + Send + Sync + 'static,
        E: Fn(&Value, &mut NativeSeq, ByteOrder) -> Result<(), DomainError>
            + Send
            + Sync
            + 'static,
    {
        let format = format.into();
        parse_format(&format)?;
        Ok(Self {
            target: target.into(),
            encoding: FieldEncoding::new(format, Arc::new(decode), Arc::new(encode)),
        })
    }

    /// Builds a codec over a single opaque byte slot from plain byte-slice
    /// conversion functions. The encode result must fit in `size` bytes
    /// (shorter payloads are zero-filled by the packer).
    pub fn from_bytes<D, E>(
        target: impl Into<String>,
        size: usize,
        decode: D,
        encode: E,
    ) -> Result<Self, ConfigError>
    where
        D: Fn(&[u8], ByteOrder) -> Result<Value, DomainError> + Send + Sync + 'static,
        E: Fn(&Value, ByteOrder) -> Result<Vec<u8>, DomainError> + Send + Sync + 'static,
    {
        if size == 0 {
            return Err(ConfigError::ZeroSizeField);
        }

        Self::new(
            target,
            format!("{size}s"),
            move |cursor: &mut Cursor<'_>, order| decode(cursor.take_bytes()?, order),
            move |value: &Value, sink: &mut NativeSeq, order| {
                sink.push(Native::Bytes(encode(value, order)?));
                Ok(())
            },
        )
    }

    /// Name of the type this codec encodes.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The codec's compiled encoding.
    pub fn encoding(&self) -> &FieldEncoding {
        &self.encoding
    }
}

impl fmt::Debug for ExternalCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalCodec")
            .field("target", &self.target)
            .field("format", &self.encoding.format())
            .finish()
    }
}

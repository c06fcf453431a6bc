//! # Record Declarations
//!
//! [`RecordDef`] is the declarative input to compilation: an ordered field
//! list, each field a name plus a [`SemanticType`] and optionally an
//! attached external codec. Field order is significant and becomes the
//! packed layout order.
//!
//! ## Usage
//!
//! ```ignore
//! let def = RecordDef::new(
//!     "Order",
//!     vec![
//!         FieldDef::new("id", SemanticType::UInt(IntWidth::W64)),
//!         FieldDef::new("price", SemanticType::Decimal),
//!         FieldDef::new("symbol", SemanticType::Text(8)),
//!     ],
//! );
//! let order = registry.compile(&def)?;
//! ```

use std::sync::Arc;

use crate::registry::ExternalCodec;
use crate::types::SemanticType;

/// One declared field: name, semantic type, optional codec annotation.
#[derive(Debug, Clone)]
pub struct FieldDef {
    name: String,
    ty: SemanticType,
    codec: Option<Arc<ExternalCodec>>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: SemanticType) -> Self {
        Self {
            name: name.into(),
            ty,
            codec: None,
        }
    }

    /// Declares a field encoded by an explicitly attached codec. The codec
    /// must target the field's declared type; resolution validates this.
    pub fn with_codec(
        name: impl Into<String>,
        ty: SemanticType,
        codec: Arc<ExternalCodec>,
    ) -> Self {
        Self {
            name: name.into(),
            ty,
            codec: Some(codec),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &SemanticType {
        &self.ty
    }

    pub fn codec(&self) -> Option<&Arc<ExternalCodec>> {
        self.codec.as_ref()
    }
}

/// One declared record type: a name and its ordered fields.
#[derive(Debug, Clone)]
pub struct RecordDef {
    name: String,
    fields: Vec<FieldDef>,
}

impl RecordDef {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }
}

//! # Compiled Record Descriptors
//!
//! A [`CompiledDescriptor`] is the artifact compilation produces for one
//! record type: the flat format string, the two precompiled packers (one
//! per byte order), and the positionally-aligned field decoder/encoder
//! lists. It is immutable after compilation and safe for unrestricted
//! concurrent use; every runtime operation is a pure function of its
//! arguments and the descriptor.
//!
//! ## Operations
//!
//! | Operation | Contract |
//! |-----------|----------|
//! | `encode` | record value → exactly `byte_size` bytes |
//! | `decode` | exactly `byte_size` bytes → record value |
//! | `decode_many` | buffer must be an exact multiple of `byte_size` |
//! | `read` / `read_many` | pull exactly `byte_size` (× count) from a stream |
//! | `write` / `write_many` | push encoded records to a stream |
//!
//! Packer failures (wrong buffer length, wrong value count) surface as
//! domain errors carrying the packer's description.

use std::fmt;
use std::io::{Read, Write};
use std::sync::Arc;

use crate::error::DomainError;
use crate::pack::{ByteOrder, Cursor, NativeSeq, Packer};
use crate::schema::{DecodeFn, EncodeFn};
use crate::types::Value;

/// Precompiled encoder/decoder pair for one record type.
pub struct CompiledDescriptor {
    name: Arc<str>,
    format: String,
    field_names: Vec<String>,
    field_decoders: Vec<DecodeFn>,
    field_encoders: Vec<EncodeFn>,
    little: Packer,
    big: Packer,
    size: usize,
}

impl CompiledDescriptor {
    pub(crate) fn new(
        name: &str,
        format: String,
        field_names: Vec<String>,
        field_decoders: Vec<DecodeFn>,
        field_encoders: Vec<EncodeFn>,
        little: Packer,
        big: Packer,
    ) -> Self {
        let size = little.size();
        Self {
            name: Arc::from(name),
            format,
            field_names,
            field_decoders,
            field_encoders,
            little,
            big,
            size,
        }
    }

    /// Record type name this descriptor was compiled for.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Flat format string covering every field in declaration order.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Field names in declaration (and layout) order.
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    pub fn field_count(&self) -> usize {
        self.field_names.len()
    }

    /// Packed size in bytes, identical for both byte orders.
    pub fn byte_size(&self) -> usize {
        self.size
    }

    /// The precompiled packer for one byte order.
    pub fn packer(&self, order: ByteOrder) -> &Packer {
        match order {
            ByteOrder::Little => &self.little,
            ByteOrder::Big => &self.big,
        }
    }

    /// Encodes a record value into a fresh buffer of exactly
    /// [`byte_size`](Self::byte_size) bytes.
    pub fn encode(&self, value: &Value, order: ByteOrder) -> Result<Vec<u8>, DomainError> {
        let mut sink = NativeSeq::new();
        self.encode_fields(value, &mut sink, order)?;
        Ok(self.packer(order).pack(&sink)?)
    }

    /// Decodes a buffer of exactly [`byte_size`](Self::byte_size) bytes.
    pub fn decode(&self, bytes: &[u8], order: ByteOrder) -> Result<Value, DomainError> {
        let natives = self.packer(order).unpack(bytes)?;
        let mut cursor = Cursor::new(&natives);
        self.decode_fields(&mut cursor, order)
    }

    /// Decodes back-to-back records from a buffer whose length must be an
    /// exact multiple of [`byte_size`](Self::byte_size).
    pub fn decode_many(&self, bytes: &[u8], order: ByteOrder) -> Result<Vec<Value>, DomainError> {
        let chunks = self.packer(order).iter_unpack(bytes)?;
        let mut records = Vec::with_capacity(chunks.len());
        for natives in chunks {
            let mut cursor = Cursor::new(&natives);
            records.push(self.decode_fields(&mut cursor, order)?);
        }
        Ok(records)
    }

    /// Reads exactly [`byte_size`](Self::byte_size) bytes and decodes one
    /// record.
    pub fn read<R: Read>(&self, reader: &mut R, order: ByteOrder) -> Result<Value, DomainError> {
        let mut buffer = vec![0u8; self.size];
        reader.read_exact(&mut buffer)?;
        self.decode(&buffer, order)
    }

    /// Reads and decodes `count` consecutive records.
    pub fn read_many<R: Read>(
        &self,
        reader: &mut R,
        count: usize,
        order: ByteOrder,
    ) -> Result<Vec<Value>, DomainError> {
        let mut buffer = vec![0u8; self.size * count];
        reader.read_exact(&mut buffer)?;
        self.decode_many(&buffer, order)
    }

    /// Encodes one record and writes it to the stream.
    pub fn write<W: Write>(
        &self,
        value: &Value,
        writer: &mut W,
        order: ByteOrder,
    ) -> Result<(), DomainError> {
        let data = self.encode(value, order)?;
        writer.write_all(&data)?;
        Ok(())
    }

    /// Encodes and writes every record in sequence.
    pub fn write_many<'a, W, I>(
        &self,
        values: I,
        writer: &mut W,
        order: ByteOrder,
    ) -> Result<(), DomainError>
    where
        W: Write,
        I: IntoIterator<Item = &'a Value>,
    {
        for value in values {
            self.write(value, writer, order)?;
        }
        Ok(())
    }

    /// Runs the field decoders positionally against a shared cursor and
    /// reconstructs the record value.
    pub(crate) fn decode_fields(
        &self,
        cursor: &mut Cursor<'_>,
        order: ByteOrder,
    ) -> Result<Value, DomainError> {
        let mut fields = Vec::with_capacity(self.field_decoders.len());
        for decode in &self.field_decoders {
            fields.push(decode(cursor, order)?);
        }
        Ok(Value::Record(fields))
    }

    /// Runs the field encoders positionally, appending every field's native
    /// slots to the sink.
    pub(crate) fn encode_fields(
        &self,
        value: &Value,
        sink: &mut NativeSeq,
        order: ByteOrder,
    ) -> Result<(), DomainError> {
        let fields = value.as_record().ok_or(DomainError::ValueMismatch {
            expected: "record",
            found: value.kind(),
        })?;

        if fields.len() != self.field_encoders.len() {
            return Err(DomainError::FieldCount {
                name: self.name.to_string(),
                expected: self.field_encoders.len(),
                found: fields.len(),
            });
        }

        for (encode, field) in self.field_encoders.iter().zip(fields) {
            encode(field, sink, order)?;
        }
        Ok(())
    }
}

impl fmt::Debug for CompiledDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledDescriptor")
            .field("name", &self.name)
            .field("format", &self.format)
            .field("field_names", &self.field_names)
            .field("byte_size", &self.size)
            .finish_non_exhaustive()
    }
}

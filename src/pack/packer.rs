//! # Packer
//!
//! A [`Packer`] is a format string compiled for one byte order: the slot
//! list, the total byte size, and the pack/unpack loops. Descriptors hold
//! two packers per record (little and big endian) and pick one per call.
//!
//! Packing is strict in both directions: the value sequence must match the
//! slot list exactly (count and kind), and unpack buffers must match the
//! format size exactly. There is no partial mode.

use super::format::{parse_format, FormatError, Slot};
use super::native::{Native, NativeSeq};

/// Byte order applied to every multi-byte slot of a packed buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    Little,
    Big,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PackError {
    #[error("format expects {expected} values, got {got}")]
    ValueCount { expected: usize, got: usize },

    #[error("unpack requires a buffer of {expected} bytes, got {got}")]
    BufferSize { expected: usize, got: usize },

    #[error("iterative unpack requires a buffer length that is a multiple of {size}, got {got}")]
    BufferStride { size: usize, got: usize },

    #[error("slot {index} expects a {expected} value, got {found}")]
    SlotKind {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{got} bytes do not fit in a {size}-byte slot")]
    Oversize { size: usize, got: usize },
}

/// A compiled format: slot list plus byte order.
#[derive(Debug, Clone)]
pub struct Packer {
    order: ByteOrder,
    slots: Vec<Slot>,
    size: usize,
}

macro_rules! write_int_slot {
    ($out:expr, $order:expr, $value:expr) => {
        match $order {
            ByteOrder::Little => $out.extend_from_slice(&$value.to_le_bytes()),
            ByteOrder::Big => $out.extend_from_slice(&$value.to_be_bytes()),
        }
    };
}

macro_rules! read_int_slot {
    ($ty:ty, $chunk:expr, $order:expr) => {{
        let mut bytes = [0u8; std::mem::size_of::<$ty>()];
        bytes.copy_from_slice($chunk);
        match $order {
            ByteOrder::Little => <$ty>::from_le_bytes(bytes),
            ByteOrder::Big => <$ty>::from_be_bytes(bytes),
        }
    }};
}

impl Packer {
    pub fn new(format: &str, order: ByteOrder) -> Result<Self, FormatError> {
        let slots = parse_format(format)?;
        let size = slots.iter().map(Slot::size).sum();
        Ok(Self { order, slots, size })
    }

    /// Total packed size in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of native slots in the format.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Packs one native value per slot into a fresh buffer.
    pub fn pack(&self, values: &[Native]) -> Result<Vec<u8>, PackError> {
        if values.len() != self.slots.len() {
            return Err(PackError::ValueCount {
                expected: self.slots.len(),
                got: values.len(),
            });
        }

        let mut out = Vec::with_capacity(self.size);
        for (index, (slot, value)) in self.slots.iter().zip(values).enumerate() {
            self.write_slot(index, *slot, value, &mut out)?;
        }
        Ok(out)
    }

    fn write_slot(
        &self,
        index: usize,
        slot: Slot,
        value: &Native,
        out: &mut Vec<u8>,
    ) -> Result<(), PackError> {
        match (slot, value) {
            (Slot::Bool, Native::Bool(v)) => out.push(u8::from(*v)),
            (Slot::U8, Native::U8(v)) => out.push(*v),
            (Slot::I8, Native::I8(v)) => out.push(*v as u8),
            (Slot::U16, Native::U16(v)) => write_int_slot!(out, self.order, v),
            (Slot::I16, Native::I16(v)) => write_int_slot!(out, self.order, v),
            (Slot::U32, Native::U32(v)) => write_int_slot!(out, self.order, v),
            (Slot::I32, Native::I32(v)) => write_int_slot!(out, self.order, v),
            (Slot::U64, Native::U64(v)) => write_int_slot!(out, self.order, v),
            (Slot::I64, Native::I64(v)) => write_int_slot!(out, self.order, v),
            (Slot::F32, Native::F32(v)) => write_int_slot!(out, self.order, v),
            (Slot::F64, Native::F64(v)) => write_int_slot!(out, self.order, v),
            (Slot::Bytes(size), Native::Bytes(payload)) => {
                if payload.len() > size {
                    return Err(PackError::Oversize {
                        size,
                        got: payload.len(),
                    });
                }
                out.extend_from_slice(payload);
                out.extend(std::iter::repeat_n(0u8, size - payload.len()));
            }
            (slot, value) => {
                return Err(PackError::SlotKind {
                    index,
                    expected: slot.kind(),
                    found: value.kind(),
                })
            }
        }
        Ok(())
    }

    /// Unpacks a buffer whose length exactly matches the format size.
    pub fn unpack(&self, bytes: &[u8]) -> Result<NativeSeq, PackError> {
        if bytes.len() != self.size {
            return Err(PackError::BufferSize {
                expected: self.size,
                got: bytes.len(),
            });
        }
        Ok(self.unpack_exact(bytes))
    }

    /// Unpacks consecutive records from a buffer that must be an exact
    /// multiple of the format size.
    pub fn iter_unpack<'p, 'b>(&'p self, bytes: &'b [u8]) -> Result<UnpackIter<'p, 'b>, PackError> {
        if self.size == 0 || bytes.len() % self.size != 0 {
            return Err(PackError::BufferStride {
                size: self.size,
                got: bytes.len(),
            });
        }
        Ok(UnpackIter {
            packer: self,
            chunks: bytes.chunks_exact(self.size),
        })
    }

    fn unpack_exact(&self, bytes: &[u8]) -> NativeSeq {
        let mut values = NativeSeq::with_capacity(self.slots.len());
        let mut offset = 0;

        for slot in &self.slots {
            let chunk = &bytes[offset..offset + slot.size()];
            offset += slot.size();

            let value = match slot {
                Slot::Bool => Native::Bool(chunk[0] != 0),
                Slot::U8 => Native::U8(chunk[0]),
                Slot::I8 => Native::I8(chunk[0] as i8),
                Slot::U16 => Native::U16(read_int_slot!(u16, chunk, self.order)),
                Slot::I16 => Native::I16(read_int_slot!(i16, chunk, self.order)),
                Slot::U32 => Native::U32(read_int_slot!(u32, chunk, self.order)),
                Slot::I32 => Native::I32(read_int_slot!(i32, chunk, self.order)),
                Slot::U64 => Native::U64(read_int_slot!(u64, chunk, self.order)),
                Slot::I64 => Native::I64(read_int_slot!(i64, chunk, self.order)),
                Slot::F32 => Native::F32(read_int_slot!(f32, chunk, self.order)),
                Slot::F64 => Native::F64(read_int_slot!(f64, chunk, self.order)),
                Slot::Bytes(_) => Native::Bytes(chunk.to_vec()),
            };
            values.push(value);
        }

        values
    }
}

/// Iterator over record-sized chunks of a multi-record buffer.
#[derive(Debug)]
pub struct UnpackIter<'p, 'b> {
    packer: &'p Packer,
    chunks: std::slice::ChunksExact<'b, u8>,
}

impl Iterator for UnpackIter<'_, '_> {
    type Item = NativeSeq;

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next().map(|chunk| self.packer.unpack_exact(chunk))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for UnpackIter<'_, '_> {}

//! # Native Packing Layer
//!
//! This module is the fixed-width pack/unpack primitive the schema layer is
//! compiled against. It knows nothing about records, fields, or semantic
//! types: it converts between flat sequences of [`Native`] values and packed
//! byte buffers, driven by a format string compiled once into a [`Packer`].
//!
//! ## Format Language
//!
//! A format string is a sequence of slot codes, each describing one native
//! value and a fixed number of bytes:
//!
//! | Code | Native value | Bytes |
//! |------|--------------|-------|
//! | `?`  | bool         | 1     |
//! | `B` / `b` | u8 / i8 | 1     |
//! | `H` / `h` | u16 / i16 | 2   |
//! | `I` / `i` | u32 / i32 | 4   |
//! | `Q` / `q` | u64 / i64 | 8   |
//! | `f` / `d` | f32 / f64 | 4 / 8 |
//! | `Ns` | N opaque bytes | N  |
//!
//! A decimal count before any code other than `s` repeats that slot
//! (`3B` == `BBB`); before `s` it is the byte size of the opaque slot. The
//! byte order of multi-byte slots belongs to the [`Packer`], not the format:
//! the same format string compiles into a little- and a big-endian packer of
//! identical size.
//!
//! ## Contract
//!
//! - `pack` consumes exactly one native value per slot and rejects short or
//!   long value sequences.
//! - `unpack` requires the buffer length to equal the format size exactly.
//! - `iter_unpack` requires an exact multiple and yields one value sequence
//!   per record-sized chunk.
//! - Opaque slots zero-fill unused trailing bytes and reject over-length
//!   payloads.

mod format;
mod native;
mod packer;

pub use format::{parse_format, FormatError, Slot};
pub use native::{Cursor, Native, NativeSeq};
pub use packer::{ByteOrder, PackError, Packer, UnpackIter};

//! # Format String Compilation
//!
//! Parses a slot format string into the [`Slot`] list a [`Packer`] executes.
//! Parsing happens once per record compilation; the resulting slots carry
//! their byte size and expected native kind so the pack/unpack loops never
//! re-inspect the format text.
//!
//! [`Packer`]: super::Packer

/// One fixed-width slot in a packed layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Bool,
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
    Bytes(usize),
}

impl Slot {
    /// Byte size of this slot in the packed buffer.
    pub fn size(&self) -> usize {
        match self {
            Slot::Bool | Slot::U8 | Slot::I8 => 1,
            Slot::U16 | Slot::I16 => 2,
            Slot::U32 | Slot::I32 | Slot::F32 => 4,
            Slot::U64 | Slot::I64 | Slot::F64 => 8,
            Slot::Bytes(n) => *n,
        }
    }

    /// Name of the native value kind this slot accepts, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Slot::Bool => "bool",
            Slot::U8 => "u8",
            Slot::I8 => "i8",
            Slot::U16 => "u16",
            Slot::I16 => "i16",
            Slot::U32 => "u32",
            Slot::I32 => "i32",
            Slot::U64 => "u64",
            Slot::I64 => "i64",
            Slot::F32 => "f32",
            Slot::F64 => "f64",
            Slot::Bytes(_) => "bytes",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("unknown format code `{0}`")]
    UnknownCode(char),

    #[error("dangling count at end of format string")]
    DanglingCount,
}

/// Compiles a format string into its slot list.
///
/// Counts larger than the format could ever need are still parsed with
/// saturating arithmetic; the resulting oversized `Bytes` slot simply makes
/// the packer demand a buffer that large.
pub fn parse_format(format: &str) -> Result<Vec<Slot>, FormatError> {
    let mut slots = Vec::with_capacity(format.len());
    let mut count: Option<usize> = None;

    for ch in format.chars() {
        if let Some(digit) = ch.to_digit(10) {
            let so_far = count.unwrap_or(0);
            count = Some(so_far.saturating_mul(10).saturating_add(digit as usize));
            continue;
        }

        let slot = match ch {
            '?' => Slot::Bool,
            'B' => Slot::U8,
            'b' => Slot::I8,
            'H' => Slot::U16,
            'h' => Slot::I16,
            'I' => Slot::U32,
            'i' => Slot::I32,
            'Q' => Slot::U64,
            'q' => Slot::I64,
            'f' => Slot::F32,
            'd' => Slot::F64,
            's' => Slot::Bytes(count.take().unwrap_or(1)),
            other => return Err(FormatError::UnknownCode(other)),
        };

        match count.take() {
            Some(repeat) => slots.extend(std::iter::repeat_n(slot, repeat)),
            None => slots.push(slot),
        }
    }

    if count.is_some() {
        return Err(FormatError::DanglingCount);
    }

    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_primitive_code() {
        let slots = parse_format("?BbHhIiQqfd").unwrap();
        assert_eq!(
            slots,
            vec![
                Slot::Bool,
                Slot::U8,
                Slot::I8,
                Slot::U16,
                Slot::I16,
                Slot::U32,
                Slot::I32,
                Slot::U64,
                Slot::I64,
                Slot::F32,
                Slot::F64,
            ]
        );
    }

    #[test]
    fn count_before_s_is_a_byte_size() {
        assert_eq!(parse_format("16s").unwrap(), vec![Slot::Bytes(16)]);
        assert_eq!(parse_format("s").unwrap(), vec![Slot::Bytes(1)]);
    }

    #[test]
    fn count_before_other_codes_repeats_the_slot() {
        assert_eq!(
            parse_format("3B").unwrap(),
            vec![Slot::U8, Slot::U8, Slot::U8]
        );
        assert_eq!(parse_format("2H").unwrap(), vec![Slot::U16, Slot::U16]);
    }

    #[test]
    fn multi_digit_counts_parse() {
        assert_eq!(parse_format("32s").unwrap(), vec![Slot::Bytes(32)]);
        assert_eq!(parse_format("12B").unwrap().len(), 12);
    }

    #[test]
    fn rejects_unknown_codes() {
        assert_eq!(parse_format("x"), Err(FormatError::UnknownCode('x')));
        assert_eq!(parse_format("B?z"), Err(FormatError::UnknownCode('z')));
    }

    #[test]
    fn rejects_dangling_counts() {
        assert_eq!(parse_format("16"), Err(FormatError::DanglingCount));
        assert_eq!(parse_format("B3"), Err(FormatError::DanglingCount));
    }

    #[test]
    fn slot_sizes_match_widths() {
        assert_eq!(Slot::Bool.size(), 1);
        assert_eq!(Slot::U16.size(), 2);
        assert_eq!(Slot::I32.size(), 4);
        assert_eq!(Slot::F32.size(), 4);
        assert_eq!(Slot::U64.size(), 8);
        assert_eq!(Slot::F64.size(), 8);
        assert_eq!(Slot::Bytes(16).size(), 16);
    }
}

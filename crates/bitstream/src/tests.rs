use super::*;
use std::io::Cursor;

fn write_fields(fields: &[(u32, u64)]) -> Vec<u8> {
    let mut w = BitWriter::new(Vec::new());
    for &(n, v) in fields {
        w.write(n, v).unwrap();
    }
    w.finish().unwrap()
}

// -------------------- Writer --------------------

#[test]
fn msb_first_packing() {
    let bytes = write_fields(&[(3, 0b101), (5, 0b00011)]);
    assert_eq!(bytes, vec![0b1010_0011]);
}

#[test]
fn full_bytes_are_flushed_immediately() {
    let mut w = BitWriter::new(Vec::new());
    w.write(12, 0xABC).unwrap();
    assert_eq!(w.get_ref(), &vec![0xAB]);
    assert_eq!(w.pending_bits(), 4);
    assert_eq!(w.bytes_written(), 1);
    assert_eq!(w.padded_len(), 2);
}

#[test]
fn partial_byte_is_padded_with_ones() {
    let bytes = write_fields(&[(3, 0b101)]);
    assert_eq!(bytes, vec![0b1011_1111]);
}

#[test]
fn finish_without_pending_bits_adds_nothing() {
    let bytes = write_fields(&[(16, 0xBEEF)]);
    assert_eq!(bytes, vec![0xBE, 0xEF]);
}

#[test]
fn empty_stream_finishes_empty() {
    let bytes = write_fields(&[]);
    assert!(bytes.is_empty());
}

#[test]
fn high_bits_of_value_are_ignored() {
    let bytes = write_fields(&[(4, 0xFFF5), (4, 0x0)]);
    assert_eq!(bytes, vec![0x50]);
}

#[test]
fn zero_width_write_is_noop() {
    let bytes = write_fields(&[(0, 0xFF), (8, 0x42)]);
    assert_eq!(bytes, vec![0x42]);
}

#[test]
fn wide_write_over_forty_bits() {
    let value = 0x00AB_CDEF_0123u64;
    let bytes = write_fields(&[(48, value)]);
    assert_eq!(bytes, vec![0x00, 0xAB, 0xCD, 0xEF, 0x01, 0x23]);
}

#[test]
fn too_wide_write_is_rejected() {
    let mut w = BitWriter::new(Vec::new());
    let err = w.write(MAX_BITS + 1, 0).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
}

#[test]
fn max_width_after_seven_pending_bits() {
    let mut w = BitWriter::new(Vec::new());
    w.write(7, 0).unwrap();
    w.write(MAX_BITS, low_mask(MAX_BITS)).unwrap();
    let bytes = w.finish().unwrap();

    let mut r = BitReader::new(Cursor::new(bytes));
    assert_eq!(r.read(7).unwrap(), Some(0));
    assert_eq!(r.read(MAX_BITS).unwrap(), Some(low_mask(MAX_BITS)));
}

// -------------------- Reader --------------------

#[test]
fn reads_fields_across_byte_boundaries() {
    let bytes = write_fields(&[(5, 0b10110), (7, 0b1010101), (9, 0x1FF), (3, 0)]);
    let mut r = BitReader::new(&bytes[..]);
    assert_eq!(r.read(5).unwrap(), Some(0b10110));
    assert_eq!(r.read(7).unwrap(), Some(0b1010101));
    assert_eq!(r.read(9).unwrap(), Some(0x1FF));
    assert_eq!(r.read(3).unwrap(), Some(0));
}

#[test]
fn read_past_end_signals_end_of_stream() {
    let mut r = BitReader::new(&[0xF0u8][..]);
    assert_eq!(r.read(4).unwrap(), Some(0xF));
    assert_eq!(r.read(5).unwrap(), None);
}

#[test]
fn exact_final_bits_are_readable() {
    let mut r = BitReader::new(&[0xA5u8][..]);
    assert_eq!(r.read(8).unwrap(), Some(0xA5));
    assert_eq!(r.read(1).unwrap(), None);
}

#[test]
fn empty_source_is_end_of_stream() {
    let mut r = BitReader::new(&[][..]);
    assert_eq!(r.read_bit().unwrap(), None);
}

#[test]
fn zero_width_read_returns_zero_even_at_end() {
    let mut r = BitReader::new(&[][..]);
    assert_eq!(r.read(0).unwrap(), Some(0));
}

#[test]
fn read_bit_sequence() {
    let mut r = BitReader::new(&[0b1100_0000u8][..]);
    assert_eq!(r.read_bit().unwrap(), Some(true));
    assert_eq!(r.read_bit().unwrap(), Some(true));
    assert_eq!(r.read_bit().unwrap(), Some(false));
    assert_eq!(r.buffered_bits(), 5);
}

#[test]
fn reader_pulls_one_byte_at_a_time() {
    let data = vec![0xFFu8, 0x00, 0x11];
    let mut r = BitReader::new(Cursor::new(data));
    assert_eq!(r.read(3).unwrap(), Some(0b111));
    let cursor = r.into_inner();
    assert_eq!(cursor.position(), 1);
}

#[test]
fn too_wide_read_is_rejected() {
    let mut r = BitReader::new(&[0u8; 16][..]);
    let err = r.read(MAX_BITS + 1).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
}

// -------------------- Debug --------------------

#[test]
fn debug_impls_work() {
    let w = BitWriter::new(Vec::new());
    assert!(format!("{:?}", w).contains("BitWriter"));
    let r = BitReader::new(&[][..]);
    assert!(format!("{:?}", r).contains("BitReader"));
}

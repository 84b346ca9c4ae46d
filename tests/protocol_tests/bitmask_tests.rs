//! Bitmask Tests
//!
//! Tests for variable-length bitmask encoding/decoding.

use binsensor_cc::protocol::{decode_bitmask, encode_bitmask};

#[test]
fn test_decode_skips_clear_bits() {
    assert_eq!(decode_bitmask(&[0b0000_0110], 0), vec![1, 2]);
}

#[test]
fn test_decode_empty() {
    assert!(decode_bitmask(&[], 0).is_empty());
    assert!(decode_bitmask(&[0x00, 0x00], 0).is_empty());
}

#[test]
fn test_decode_with_offset_and_second_byte() {
    assert_eq!(decode_bitmask(&[0b0000_0001, 0b1000_0000], 1), vec![1, 16]);
}

#[test]
fn test_encode_shortest_mask() {
    assert_eq!(encode_bitmask(&[2, 6, 12], 0), vec![0b0100_0100, 0b0001_0000]);
    assert_eq!(encode_bitmask(&[7], 0), vec![0b1000_0000]);
}

#[test]
fn test_encode_ignores_below_start() {
    assert_eq!(encode_bitmask(&[0, 1, 9], 1), vec![0b0000_0001, 0b0000_0001]);
    assert!(encode_bitmask(&[0], 1).is_empty());
    assert!(encode_bitmask(&[], 0).is_empty());
}

#[test]
fn test_decode_reverses_encode() {
    let indices = vec![1, 3, 8, 13];
    assert_eq!(decode_bitmask(&encode_bitmask(&indices, 0), 0), indices);
}

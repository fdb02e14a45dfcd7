//! Known-answer vectors for the wire codecs
//!
//! Pins the exact wire bytes of the codes so a refactor of the table
//! generation cannot silently change the transmission format.

use ttxcollect_core::hamming::{
    decode_hamming2418, decode_hamming84, decode_parity, encode_hamming2418, encode_hamming84,
    encode_parity,
};

/// Wire codeword per data nibble, LSB transmitted first.
const HAMMING_8_4_CODEWORDS: [u8; 16] = [
    0xA8, 0x40, 0x92, 0x7A, 0x26, 0xCE, 0x1C, 0xF4, 0x0B, 0xE3, 0x31, 0xD9, 0x85, 0x6D, 0xBF,
    0x57,
];

#[test]
fn test_hamming84_codeword_table() {
    for (nibble, &codeword) in HAMMING_8_4_CODEWORDS.iter().enumerate() {
        assert_eq!(encode_hamming84(nibble as u8), codeword);
        assert_eq!(decode_hamming84(codeword), Some(nibble as u8));
    }
}

#[test]
fn test_hamming84_known_corrections() {
    // Bytes at distance one from a codeword decode to its nibble.
    assert_eq!(decode_hamming84(0x00), Some(0x01));
    assert_eq!(decode_hamming84(0x03), Some(0x08));
    assert_eq!(decode_hamming84(0xFF), Some(0x0E));
}

#[test]
fn test_parity_known_bytes() {
    assert_eq!(encode_parity(b'A'), 0x83);
    assert_eq!(decode_parity(0x83), Some(b'A'));

    // 0x00 has even ones count, always rejected.
    assert_eq!(decode_parity(0x00), None);
}

#[test]
fn test_hamming2418_known_triplets() {
    assert_eq!(encode_hamming2418(0x00000), [0xD1, 0x01, 0x00]);
    assert_eq!(encode_hamming2418(0x3FFFF), [0x2E, 0xFE, 0xFF]);
    assert_eq!(encode_hamming2418(0x12345), [0xF4, 0x2D, 0x24]);

    assert_eq!(decode_hamming2418(0xD1, 0x01, 0x00), Some(0x00000));
    assert_eq!(decode_hamming2418(0x2E, 0xFE, 0xFF), Some(0x3FFFF));
    assert_eq!(decode_hamming2418(0xF4, 0x2D, 0x24), Some(0x12345));
}

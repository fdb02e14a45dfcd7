//! Hamming 8/4, Hamming 24/18 and odd-parity codecs from EN 300 706
//!
//! All teletext coded fields are transmitted LSB-first, so every byte is
//! bit-reversed before the parity equations of the standard are applied.
//! The decoders are pure functions over immutable tables and are safe to
//! call concurrently.
//!
//! - Hamming 8/4 protects 4 data bits with 4 parity bits: single-bit errors
//!   are corrected, double-bit errors are detected and rejected.
//! - Hamming 24/18 protects 18 data bits across three bytes with 6 parity
//!   bits: single-bit correction, double-bit detection.
//! - Odd parity protects 7 data bits with 1 parity bit: detection only.

/// Bit-reversed Hamming 8/4 codeword for a data nibble.
///
/// Reversed-domain layout is `P1 D1 P2 D2 P3 D3 P4 D4` (bit 0 first). The
/// parity groups are those of the EN 300 706 table 36 code: each group
/// covers three of the four data bits with odd parity, and P4 completes the
/// even parity of `D2 D3 D4`.
const fn codeword84_rev(nibble: u8) -> u8 {
    let d1 = nibble & 0x01;
    let d2 = (nibble >> 1) & 0x01;
    let d3 = (nibble >> 2) & 0x01;
    let d4 = (nibble >> 3) & 0x01;

    let p1 = 1 ^ d1 ^ d3 ^ d4;
    let p2 = 1 ^ d1 ^ d2 ^ d4;
    let p3 = 1 ^ d1 ^ d2 ^ d3;
    let p4 = d2 ^ d3 ^ d4;

    p1 | (d1 << 1) | (p2 << 2) | (d2 << 3) | (p3 << 4) | (d3 << 5) | (p4 << 6) | (d4 << 7)
}

/// Wire-order Hamming 8/4 codeword for a data nibble.
const fn codeword84(nibble: u8) -> u8 {
    codeword84_rev(nibble).reverse_bits()
}

/// Error sentinel in the 8/4 decode table.
const INVALID: u8 = 0xFF;

/// Decode table for the 8/4 code, generated from the parity equations.
///
/// The 16 codewords are pairwise at Hamming distance 4, so marking every
/// codeword and its eight single-bit perturbations yields exactly the
/// single-error-correcting, double-error-detecting decoder of the standard.
const fn build_decode84() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut nibble = 0u8;
    while nibble < 16 {
        let codeword = codeword84(nibble);
        table[codeword as usize] = nibble;
        let mut bit = 0;
        while bit < 8 {
            table[(codeword ^ (1 << bit)) as usize] = nibble;
            bit += 1;
        }
        nibble += 1;
    }
    table
}

static DECODE_8_4: [u8; 256] = build_decode84();

/// Parity test groups of the 24/18 code, as masks over the bit-reversed
/// 24-bit word (bit 0 = first transmitted bit).
///
/// Word layout: `P1 P2 D1 P3 D2 D3 D4 P4 | D5..D11 P5 | D12..D18 P6`.
const TEST_A: u32 = 0x0055_5555;
const TEST_B: u32 = 0x0066_6666;
const TEST_C: u32 = 0x0078_7878;
const TEST_D: u32 = 0x0000_7F80;
const TEST_E: u32 = 0x007F_8000;
const TEST_F: u32 = 0x00FF_FFFF;

/// Extract the 18 data bits from a bit-reversed 24/18 word.
const fn extract2418(word: u32) -> u32 {
    ((word >> 2) & 0x01)
        | (((word >> 4) & 0x07) << 1)
        | (((word >> 8) & 0x7F) << 4)
        | (((word >> 16) & 0x7F) << 11)
}

/// Decode a Hamming 8/4 coded byte to its 4 data bits.
///
/// Returns `None` when the byte carries an uncorrectable (double-bit) error.
///
/// ```
/// use ttxcollect_core::hamming::decode_hamming84;
///
/// assert_eq!(decode_hamming84(0x00), Some(0x01));
/// assert_eq!(decode_hamming84(0x03), Some(0x08));
/// assert_eq!(decode_hamming84(0xFF), Some(0x0E));
/// ```
pub fn decode_hamming84(byte: u8) -> Option<u8> {
    match DECODE_8_4[byte as usize] {
        INVALID => None,
        nibble => Some(nibble),
    }
}

/// Decode an odd-parity coded byte to its 7 data bits.
///
/// Returns `None` when the byte has even parity.
pub fn decode_parity(byte: u8) -> Option<u8> {
    let reversed = byte.reverse_bits();
    if reversed.count_ones() % 2 == 1 {
        Some(reversed & 0x7F)
    } else {
        None
    }
}

/// Decode a Hamming 24/18 coded triplet to its 18 data bits.
///
/// The five tests A-E locate a single bit in error; the overall test F
/// distinguishes single errors (corrected) from double errors (`None`).
pub fn decode_hamming2418(byte1: u8, byte2: u8, byte3: u8) -> Option<u32> {
    let word = (byte1.reverse_bits() as u32)
        | ((byte2.reverse_bits() as u32) << 8)
        | ((byte3.reverse_bits() as u32) << 16);

    // A test fails when its group has even parity.
    let mut syndrome = 0u32;
    let tests = [TEST_A, TEST_B, TEST_C, TEST_D, TEST_E, TEST_F];
    let mut i = 0;
    while i < 6 {
        if (word & tests[i]).count_ones() % 2 == 0 {
            syndrome |= 1 << i;
        }
        i += 1;
    }

    if syndrome == 0 {
        return Some(extract2418(word));
    }

    // Overall parity intact but some test failed: two bits are in error.
    if syndrome & 0x20 == 0 {
        return None;
    }

    // Single error; tests E..A name the transmitted bit position.
    let position = syndrome & 0x1F;
    match position {
        // P6 itself was hit, the data bits are intact.
        0 => Some(extract2418(word)),
        1..=23 => Some(extract2418(word ^ (1 << (position - 1)))),
        // Positions beyond the codeword cannot result from a single error.
        _ => None,
    }
}

/// Encode 4 data bits into a Hamming 8/4 wire byte.
pub fn encode_hamming84(nibble: u8) -> u8 {
    codeword84(nibble & 0x0F)
}

/// Encode 7 data bits into an odd-parity wire byte.
pub fn encode_parity(value: u8) -> u8 {
    let data = value & 0x7F;
    let parity = 1 ^ (data.count_ones() as u8 & 0x01);
    (data | (parity << 7)).reverse_bits()
}

/// Encode 18 data bits into a Hamming 24/18 wire triplet.
pub fn encode_hamming2418(value: u32) -> [u8; 3] {
    let data = value & 0x3FFFF;

    let mut word = ((data & 0x01) << 2)
        | (((data >> 1) & 0x07) << 4)
        | (((data >> 4) & 0x7F) << 8)
        | (((data >> 11) & 0x7F) << 16);

    // Odd parity per test group; P6 completes odd parity over all 24 bits.
    let groups = [
        (TEST_A, 0u32),
        (TEST_B, 1),
        (TEST_C, 3),
        (TEST_D, 7),
        (TEST_E, 15),
    ];
    for (mask, parity_bit) in groups {
        if (word & mask).count_ones() % 2 == 0 {
            word |= 1 << parity_bit;
        }
    }
    if (word & TEST_F).count_ones() % 2 == 0 {
        word |= 1 << 23;
    }

    [
        (word as u8).reverse_bits(),
        ((word >> 8) as u8).reverse_bits(),
        ((word >> 16) as u8).reverse_bits(),
    ]
}

/// Fixed Huffman literal/length code lengths (RFC 1951 section 3.2.6)
///
/// 0-143: 8 bits, 144-255: 9 bits, 256-279: 7 bits, 280-287: 8 bits.
/// Symbols 286 and 287 take part in code construction but never occur in
/// valid data.
pub const FIXED_LITERAL_LENGTHS: [u8; 288] = fixed_literal_lengths();

/// Fixed Huffman distance code lengths (all 5 bits, 30 and 31 unused)
pub const FIXED_DISTANCE_LENGTHS: [u8; 32] = [5; 32];

const fn fixed_literal_lengths() -> [u8; 288] {
    let mut lengths = [8u8; 288];
    let mut sym = 144;
    while sym < 256 {
        lengths[sym] = 9;
        sym += 1;
    }
    while sym < 280 {
        lengths[sym] = 7;
        sym += 1;
    }
    lengths
}

#![allow(dead_code)]

use rawinflate::{BitSource, Error, Result};

/// Bit source over a string of '0' and '1' characters, read left to right
///
/// Whitespace is ignored, so streams can be written field by field:
/// `"1 10 00110001 0000000"`.
pub struct BitString {
    bits: Vec<bool>,
    pos: usize,
}

impl BitString {
    pub fn new(s: &str) -> Self {
        let bits = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                '0' => false,
                '1' => true,
                other => panic!("invalid bit character {other:?}"),
            })
            .collect();
        Self { bits, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}

impl BitSource for BitString {
    fn read_bit(&mut self) -> Result<bool> {
        let bit = *self.bits.get(self.pos).ok_or(Error::UnexpectedEof)?;
        self.pos += 1;
        Ok(bit)
    }

    fn align_to_byte(&mut self) {
        self.pos = (self.pos + 7) / 8 * 8;
    }
}

/// Parse "05 14 23" style hex into bytes
pub fn hex(s: &str) -> Vec<u8> {
    let digits: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    assert!(digits.len() % 2 == 0, "odd number of hex digits");
    (0..digits.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&digits[i..i + 2], 16).expect("invalid hex"))
        .collect()
}

/// Generate random data using a simple PRNG
pub fn generate_random_data(size: usize, seed: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut state = seed;
    for _ in 0..size {
        // Simple xorshift PRNG
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        data.push((state & 0xFF) as u8);
    }
    data
}

/// Generate data with mixed patterns (moderate compression)
pub fn generate_mixed_data(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let patterns = [
        b"ACGTACGTACGTACGT".as_slice(),
        b"NNNNNNNNNNNNNNNN".as_slice(),
        b"ATATATATATATATAT".as_slice(),
    ];

    let mut pattern_idx = 0;
    while data.len() < size {
        let pattern = patterns[pattern_idx % patterns.len()];
        let remaining = size - data.len();
        let chunk_size = remaining.min(pattern.len());
        data.extend_from_slice(&pattern[..chunk_size]);
        pattern_idx += 1;
    }
    data
}

/// Text with long-range repeats, so back-references reach far into the window
pub fn generate_text_data(size: usize) -> Vec<u8> {
    let words = ["deflate ", "huffman ", "window ", "literal ", "distance ", "block\n"];
    let mut data = Vec::with_capacity(size);
    let mut state = 0x9E3779B97F4A7C15u64;
    while data.len() < size {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        data.extend_from_slice(words[(state % words.len() as u64) as usize].as_bytes());
    }
    data.truncate(size);
    data
}

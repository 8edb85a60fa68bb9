use super::tables::{FIXED_DISTANCE_LENGTHS, FIXED_LITERAL_LENGTHS};
use crate::bits::BitSource;
use crate::error::{Error, Result};
use std::sync::OnceLock;

/// Maximum Huffman code length allowed anywhere in DEFLATE
pub const MAX_CODE_LENGTH: u8 = 15;

/// Maximum code length for the code length alphabet (3-bit fields)
pub const MAX_CODE_LENGTH_CODE_LENGTH: u8 = 7;

/// The alphabet a canonical code is built for
///
/// Determines the longest permitted code length and which incomplete codes
/// are tolerated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alphabet {
    LiteralLength,
    Distance,
    CodeLength,
}

impl Alphabet {
    pub const fn max_code_length(self) -> u8 {
        match self {
            Alphabet::LiteralLength | Alphabet::Distance => MAX_CODE_LENGTH,
            Alphabet::CodeLength => MAX_CODE_LENGTH_CODE_LENGTH,
        }
    }
}

/// Canonical Huffman code, decoded one bit at a time
///
/// Codewords are assigned from code lengths alone: shorter codes first,
/// and within one length in increasing symbol order. For lengths
/// `[1, 0, 3, 2, 3]` the codes are `0`, (none), `110`, `10`, `111`.
///
/// A code is only constructed when its lengths fill the code space
/// exactly. The one exception is a distance code with a single used
/// symbol, where the rest of the code space stays unassigned and decoding
/// into it fails with [`Error::UnassignedCodeword`]. RFC 1951 describes
/// that symbol with a one-bit code, and zlib-style decoders only accept
/// that form. Here the lone symbol may have any length from 1 to 15; its
/// codeword is all zeros either way.
#[derive(Clone, Debug)]
pub struct CanonicalCode {
    /// For each symbol, its code length (0 = not used)
    code_lengths: Vec<u8>,
    /// Maximum code length
    max_bits: u8,
    /// Number of codes of each length
    counts: [u16; 16],
    /// For each bit length, (first_code, first_symbol_index)
    bit_info: [(u32, usize); 16],
    /// Symbols sorted by code length, then by symbol value
    symbols: Vec<u16>,
}

impl CanonicalCode {
    /// Build from code lengths, rejecting any set of lengths that does not
    /// form a complete prefix code for `alphabet`
    pub fn from_code_lengths(lengths: &[u8], alphabet: Alphabet) -> Result<Self> {
        let max = alphabet.max_code_length();
        if let Some(&length) = lengths.iter().find(|&&len| len > max) {
            return Err(Error::InvalidCodeLength { length, max });
        }

        let mut counts = [0u16; 16];
        for &len in lengths.iter().filter(|&&len| len > 0) {
            counts[len as usize] += 1;
        }

        let max_bits = (1..=MAX_CODE_LENGTH).rev().find(|&b| counts[b as usize] > 0).unwrap_or(0);
        if max_bits == 0 {
            return Err(Error::EmptyHuffmanCode);
        }

        // Kraft sum in units of 2^-max_bits
        let capacity = 1u32 << max_bits;
        let used: u32 =
            (1..=max_bits).map(|bits| (counts[bits as usize] as u32) << (max_bits - bits)).sum();

        if used > capacity {
            return Err(Error::HuffmanOversubscribed);
        }
        if used < capacity {
            let used_symbols: u16 = counts.iter().sum();
            if !(alphabet == Alphabet::Distance && used_symbols == 1) {
                return Err(Error::HuffmanIncomplete);
            }
        }

        Ok(Self::build(lengths, counts, max_bits))
    }

    /// Assign canonical codes; lengths must already be validated
    fn build(lengths: &[u8], counts: [u16; 16], max_bits: u8) -> Self {
        let mut bit_info = [(0u32, 0usize); 16];
        let mut code = 0u32;
        let mut symbol_idx = 0;
        for bits in 1..=MAX_CODE_LENGTH as usize {
            code = (code + counts[bits - 1] as u32) << 1;
            bit_info[bits] = (code, symbol_idx);
            symbol_idx += counts[bits] as usize;
        }

        let mut symbols: Vec<(u16, u8)> = lengths
            .iter()
            .enumerate()
            .filter(|(_, &len)| len > 0)
            .map(|(sym, &len)| (sym as u16, len))
            .collect();
        symbols.sort_by_key(|&(sym, len)| (len, sym));

        Self {
            code_lengths: lengths.to_vec(),
            max_bits,
            counts,
            bit_info,
            symbols: symbols.into_iter().map(|(sym, _)| sym).collect(),
        }
    }

    fn build_unchecked(lengths: &[u8]) -> Self {
        let mut counts = [0u16; 16];
        for &len in lengths.iter().filter(|&&len| len > 0) {
            counts[len as usize] += 1;
        }
        let max_bits = lengths.iter().copied().max().unwrap_or(0);
        Self::build(lengths, counts, max_bits)
    }

    /// Fixed literal/length code (RFC 1951 section 3.2.6)
    pub fn fixed_literal_length() -> &'static CanonicalCode {
        static CODE: OnceLock<CanonicalCode> = OnceLock::new();
        CODE.get_or_init(|| Self::build_unchecked(&FIXED_LITERAL_LENGTHS))
    }

    /// Fixed distance code
    pub fn fixed_distance() -> &'static CanonicalCode {
        static CODE: OnceLock<CanonicalCode> = OnceLock::new();
        CODE.get_or_init(|| Self::build_unchecked(&FIXED_DISTANCE_LENGTHS))
    }

    /// Decode next symbol from bitstream
    ///
    /// Codeword bits arrive most significant bit first.
    pub fn decode_symbol<S: BitSource + ?Sized>(&self, bits: &mut S) -> Result<u16> {
        let mut code = 0u32;
        for len in 1..=self.max_bits as usize {
            code = (code << 1) | bits.read_bit()? as u32;
            let (first_code, first_idx) = self.bit_info[len];
            let count = self.counts[len] as u32;

            if code >= first_code && code - first_code < count {
                return Ok(self.symbols[first_idx + (code - first_code) as usize]);
            }
        }

        Err(Error::UnassignedCodeword { code, length: self.max_bits })
    }

    /// The codeword assigned to `symbol` as (bits, length), if it has one
    pub fn codeword(&self, symbol: u16) -> Option<(u32, u8)> {
        let len = *self.code_lengths.get(symbol as usize)?;
        if len == 0 {
            return None;
        }
        let rank = self.code_lengths[..symbol as usize].iter().filter(|&&l| l == len).count();
        Some((self.bit_info[len as usize].0 + rank as u32, len))
    }

    /// Size of the alphabet this code was built over
    pub fn num_symbols(&self) -> usize {
        self.code_lengths.len()
    }

    pub fn max_length(&self) -> u8 {
        self.max_bits
    }
}

/// Distance code of a block, which may legitimately be absent
///
/// A dynamic block that declares a single distance code of length zero
/// carries only literals. Decoding a distance from such a block fails with
/// [`Error::MissingDistanceCode`].
#[derive(Clone, Debug)]
pub enum DistanceCode {
    Present(CanonicalCode),
    Absent,
}

impl DistanceCode {
    /// Build from the distance portion of a dynamic header
    pub fn from_code_lengths(lengths: &[u8]) -> Result<Self> {
        if lengths == [0] {
            return Ok(DistanceCode::Absent);
        }
        CanonicalCode::from_code_lengths(lengths, Alphabet::Distance).map(DistanceCode::Present)
    }

    pub fn fixed() -> &'static DistanceCode {
        static CODE: OnceLock<DistanceCode> = OnceLock::new();
        CODE.get_or_init(|| DistanceCode::Present(CanonicalCode::fixed_distance().clone()))
    }

    pub fn decode_symbol<S: BitSource + ?Sized>(&self, bits: &mut S) -> Result<u16> {
        match self {
            DistanceCode::Present(code) => code.decode_symbol(bits),
            DistanceCode::Absent => Err(Error::MissingDistanceCode),
        }
    }
}

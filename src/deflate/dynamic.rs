use super::tables::CODE_LENGTH_ORDER;
use crate::bits::BitSource;
use crate::error::{Error, Result};
use crate::huffman::{Alphabet, CanonicalCode, DistanceCode};

/// Counts declared at the start of a dynamic block header
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DynamicCounts {
    /// Number of literal/length code lengths (257-288)
    pub hlit: usize,
    /// Number of distance code lengths (1-32)
    pub hdist: usize,
    /// Number of code length code lengths (4-19)
    pub hclen: usize,
}

impl DynamicCounts {
    pub fn read<S: BitSource + ?Sized>(bits: &mut S) -> Result<Self> {
        let hlit = bits.read_bits(5)? as usize + 257;
        let hdist = bits.read_bits(5)? as usize + 1;
        let hclen = bits.read_bits(4)? as usize + 4;
        Ok(Self { hlit, hdist, hclen })
    }
}

/// Code length sequences for both alphabets of a dynamic block
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeLengths {
    pub literal_lengths: Vec<u8>,
    pub distance_lengths: Vec<u8>,
}

/// The Huffman codes a dynamic block's symbol stream is decoded with
#[derive(Clone, Debug)]
pub struct DynamicCodes {
    pub counts: DynamicCounts,
    pub literal_length: CanonicalCode,
    pub distance: DistanceCode,
}

impl DynamicCodes {
    /// Read a dynamic block header and build both codes
    pub fn read<S: BitSource + ?Sized>(bits: &mut S) -> Result<Self> {
        let counts = DynamicCounts::read(bits)?;
        tracing::trace!(
            hlit = counts.hlit,
            hdist = counts.hdist,
            hclen = counts.hclen,
            "dynamic header"
        );

        let code_length_code = read_code_length_code(bits, counts.hclen)?;
        let lengths = read_code_lengths(bits, &code_length_code, counts.hlit, counts.hdist)?;

        let literal_length =
            CanonicalCode::from_code_lengths(&lengths.literal_lengths, Alphabet::LiteralLength)?;
        let distance = DistanceCode::from_code_lengths(&lengths.distance_lengths)?;

        Ok(Self { counts, literal_length, distance })
    }
}

/// Read `hclen` 3-bit lengths in permuted order and build the code length code
pub fn read_code_length_code<S: BitSource + ?Sized>(
    bits: &mut S,
    hclen: usize,
) -> Result<CanonicalCode> {
    let mut code_length_lengths = [0u8; 19];
    for &sym in &CODE_LENGTH_ORDER[..hclen] {
        code_length_lengths[sym] = bits.read_bits(3)? as u8;
    }
    CanonicalCode::from_code_lengths(&code_length_lengths, Alphabet::CodeLength)
}

/// Decode the run-length coded literal/length and distance code lengths
///
/// Both sequences are coded as one flat run, so a repeat may cross from
/// the literal/length lengths into the distance lengths.
pub fn read_code_lengths<S: BitSource + ?Sized>(
    bits: &mut S,
    code_length_code: &CanonicalCode,
    hlit: usize,
    hdist: usize,
) -> Result<CodeLengths> {
    let total_codes = hlit + hdist;
    let mut all_lengths: Vec<u8> = Vec::with_capacity(total_codes);

    while all_lengths.len() < total_codes {
        let sym = code_length_code.decode_symbol(bits)?;

        let (value, repeat) = match sym {
            0..=15 => (sym as u8, 1),
            16 => {
                // Copy previous code length 3-6 times
                let prev = *all_lengths.last().ok_or(Error::RepeatWithoutPrevious)?;
                (prev, bits.read_bits(2)? as usize + 3)
            }
            // Repeat zero 3-10 times
            17 => (0, bits.read_bits(3)? as usize + 3),
            // Repeat zero 11-138 times
            18 => (0, bits.read_bits(7)? as usize + 11),
            _ => return Err(Error::InvalidCodeLengthSymbol(sym)),
        };

        let decoded = all_lengths.len() + repeat;
        if decoded > total_codes {
            return Err(Error::CodeLengthOverflow { decoded, declared: total_codes });
        }
        all_lengths.resize(decoded, value);
    }

    let distance_lengths = all_lengths.split_off(hlit);
    Ok(CodeLengths { literal_lengths: all_lengths, distance_lengths })
}

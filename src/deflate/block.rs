use super::tables::{distance_entry, length_entry, END_OF_BLOCK};
use super::tokens::Token;
use super::window::OutputWindow;
use crate::bits::BitSource;
use crate::error::{Error, Result};
use crate::huffman::{CanonicalCode, DistanceCode};

/// Decode one token from a Huffman block's symbol stream
pub fn decode_token<S: BitSource + ?Sized>(
    bits: &mut S,
    lit_code: &CanonicalCode,
    dist_code: &DistanceCode,
) -> Result<Token> {
    let sym = lit_code.decode_symbol(bits)?;

    match sym {
        0..=255 => Ok(Token::Literal(sym as u8)),
        END_OF_BLOCK => Ok(Token::EndOfBlock),
        _ => {
            let (base_len, extra_bits) = length_entry(sym)?;
            let length = base_len + bits.read_bits(extra_bits)? as u16;

            let dist_sym = dist_code.decode_symbol(bits)?;
            let (base_dist, dist_extra_bits) = distance_entry(dist_sym)?;
            let distance = base_dist + bits.read_bits(dist_extra_bits)? as u16;

            Ok(Token::Copy { length, distance })
        }
    }
}

/// Decode a Huffman coded block into `window`, up to and including its
/// end-of-block symbol
///
/// Returns the number of bytes the block produced.
pub fn inflate_huffman_block<S, W>(
    bits: &mut S,
    window: &mut W,
    lit_code: &CanonicalCode,
    dist_code: &DistanceCode,
) -> Result<u64>
where
    S: BitSource + ?Sized,
    W: OutputWindow + ?Sized,
{
    let mut produced = 0u64;

    loop {
        let token = decode_token(bits, lit_code, dist_code)?;
        match token {
            Token::Literal(byte) => window.push_byte(byte)?,
            Token::Copy { length, distance } => window.copy_match(distance, length)?,
            Token::EndOfBlock => return Ok(produced),
        }
        produced += token.uncompressed_size() as u64;
    }
}

/// Copy a stored block into `window`
///
/// Padding bits up to the byte boundary are discarded without inspection.
pub fn inflate_stored_block<S, W>(bits: &mut S, window: &mut W) -> Result<u64>
where
    S: BitSource + ?Sized,
    W: OutputWindow + ?Sized,
{
    bits.align_to_byte();

    let len = bits.read_bits(16)? as u16;
    let nlen = bits.read_bits(16)? as u16;

    if len != !nlen {
        return Err(Error::StoredBlockLengthMismatch { len, nlen });
    }

    for _ in 0..len {
        window.push_byte(bits.read_byte()?)?;
    }

    Ok(len as u64)
}

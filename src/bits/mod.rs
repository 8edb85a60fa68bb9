pub mod reader;
pub mod source;

pub use reader::BitReader;
pub use source::BitSource;

/// Pack a string of '0'/'1' into bytes, first bit in the LSB
#[cfg(test)]
pub(crate) fn pack_bits(bits: &str) -> Vec<u8> {
    let bits: Vec<bool> = bits.chars().filter(|c| !c.is_whitespace()).map(|c| c == '1').collect();
    let mut out = vec![0u8; (bits.len() + 7) / 8];
    for (i, &bit) in bits.iter().enumerate() {
        if bit {
            out[i / 8] |= 1 << (i % 8);
        }
    }
    out
}

use crate::bits::BitSource;
use crate::error::Result;

/// DEFLATE block type (BTYPE)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum BlockType {
    /// Raw bytes with a LEN/NLEN prefix
    Stored = 0,
    /// Huffman codes fixed by RFC 1951 section 3.2.6
    FixedHuffman = 1,
    /// Huffman codes transmitted in the block header
    DynamicHuffman = 2,
    /// BTYPE 11, never valid
    Reserved = 3,
}

impl BlockType {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Stored,
            1 => Self::FixedHuffman,
            2 => Self::DynamicHuffman,
            _ => Self::Reserved,
        }
    }
}

/// The 3-bit header at the start of every block
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockHeader {
    pub is_final: bool,
    pub block_type: BlockType,
}

impl BlockHeader {
    /// Read BFINAL then BTYPE
    ///
    /// A reserved block type is returned as-is; the block loop rejects it
    /// after logging the header.
    pub fn read<S: BitSource + ?Sized>(bits: &mut S) -> Result<Self> {
        let is_final = bits.read_bit()?;
        let block_type = BlockType::from_bits(bits.read_bits(2)? as u8);
        Ok(Self { is_final, block_type })
    }
}

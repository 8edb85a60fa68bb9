/// One decoded element of a Huffman block's symbol stream
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    /// A literal byte
    Literal(u8),
    /// A back-reference: copy `length` bytes from `distance` bytes back
    Copy { length: u16, distance: u16 },
    /// End of block marker
    EndOfBlock,
}

impl Token {
    /// Returns the uncompressed size this token represents
    pub fn uncompressed_size(&self) -> usize {
        match self {
            Token::Literal(_) => 1,
            Token::Copy { length, .. } => *length as usize,
            Token::EndOfBlock => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncompressed_size() {
        assert_eq!(Token::Literal(b'a').uncompressed_size(), 1);
        assert_eq!(Token::Copy { length: 258, distance: 1 }.uncompressed_size(), 258);
        assert_eq!(Token::EndOfBlock.uncompressed_size(), 0);
    }
}

use thiserror::Error;

/// Coarse classification of a decompression failure.
///
/// Callers that only need to know whether the input was truncated or
/// corrupt should match on this rather than on [`Error`] itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input ended while more bits were structurally required
    UnexpectedEndOfInput,
    /// The input was present but violates a DEFLATE format rule
    MalformedData,
    /// The underlying reader failed for a reason other than end of input
    Io,
}

#[derive(Error, Debug)]
pub enum Error {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected end of input")]
    UnexpectedEof,

    // Block header errors
    #[error("Invalid DEFLATE block type: {0}")]
    InvalidBlockType(u8),

    // Canonical code construction errors
    #[error("Invalid Huffman code length: {length} (max {max})")]
    InvalidCodeLength { length: u8, max: u8 },

    #[error("Huffman code oversubscribed: more codes than possible for bit length")]
    HuffmanOversubscribed,

    #[error("Huffman code incomplete: not all codes assigned")]
    HuffmanIncomplete,

    #[error("Huffman code has no symbols")]
    EmptyHuffmanCode,

    #[error("Bit pattern 0b{code:b} of length {length} is not assigned to any symbol")]
    UnassignedCodeword { code: u32, length: u8 },

    // Dynamic header errors
    #[error("Code length repeat with no previous length")]
    RepeatWithoutPrevious,

    #[error("Code length run overflows declared count: {decoded} > {declared}")]
    CodeLengthOverflow { decoded: usize, declared: usize },

    #[error("Invalid code length symbol: {0}")]
    InvalidCodeLengthSymbol(u16),

    // Symbol stream errors
    #[error("Invalid length code: {0}")]
    InvalidLengthCode(u16),

    #[error("Invalid distance code: {0}")]
    InvalidDistanceCode(u16),

    #[error("Length code used in a block that declares no distance codes")]
    MissingDistanceCode,

    #[error("Back-reference distance {distance} exceeds available window {available}")]
    InvalidBackReference { distance: u16, available: usize },

    #[error("Stored block length mismatch: LEN={len}, NLEN={nlen}")]
    StoredBlockLengthMismatch { len: u16, nlen: u16 },
}

impl Error {
    /// Classify this error as truncated input, malformed input, or an I/O failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnexpectedEof => ErrorKind::UnexpectedEndOfInput,
            Error::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                ErrorKind::UnexpectedEndOfInput
            }
            Error::Io(_) => ErrorKind::Io,
            _ => ErrorKind::MalformedData,
        }
    }

    pub fn is_unexpected_eof(&self) -> bool {
        self.kind() == ErrorKind::UnexpectedEndOfInput
    }

    pub fn is_malformed(&self) -> bool {
        self.kind() == ErrorKind::MalformedData
    }
}

pub type Result<T> = std::result::Result<T, Error>;

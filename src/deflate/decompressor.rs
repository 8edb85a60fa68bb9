use super::block::{inflate_huffman_block, inflate_stored_block};
use super::dynamic::DynamicCodes;
use super::header::{BlockHeader, BlockType};
use super::window::{BufferWindow, OutputWindow, StreamWindow};
use crate::bits::BitSource;
use crate::error::{Error, Result};
use crate::huffman::{CanonicalCode, DistanceCode};
use crate::DecompressConfig;
use std::io::Write;

/// Position of the block loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    ReadHeader,
    DecodeStored { is_final: bool },
    DecodeFixed { is_final: bool },
    DecodeDynamic { is_final: bool },
}

/// Statistics from one decompression call
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecompressStats {
    pub stored_blocks: u64,
    pub fixed_blocks: u64,
    pub dynamic_blocks: u64,
    pub output_bytes: u64,
}

impl DecompressStats {
    /// Total blocks decoded
    pub fn blocks(&self) -> u64 {
        self.stored_blocks + self.fixed_blocks + self.dynamic_blocks
    }
}

/// Decodes one raw DEFLATE stream from a [`BitSource`]
///
/// Blocks are decoded until the one flagged final. The bit source is left
/// positioned just after that block's last bit and can be recovered with
/// [`into_inner`](Self::into_inner), e.g. to read a container trailer.
pub struct Decompressor<S: BitSource> {
    bits: S,
    config: DecompressConfig,
    stats: DecompressStats,
}

impl<S: BitSource> Decompressor<S> {
    pub fn new(bits: S) -> Self {
        Self::with_config(bits, DecompressConfig::default())
    }

    pub fn with_config(bits: S, config: DecompressConfig) -> Self {
        Self { bits, config, stats: DecompressStats::default() }
    }

    /// Decompress the whole stream into a new buffer
    ///
    /// On failure nothing decoded so far is returned.
    pub fn decompress(&mut self) -> Result<Vec<u8>> {
        let mut window = BufferWindow::with_capacity(self.config.output_capacity_hint);
        self.run(&mut window)?;
        Ok(window.into_vec())
    }

    /// Decompress the whole stream into `writer`, returning the bytes written
    ///
    /// On failure, output already handed to `writer` is not retracted.
    pub fn decompress_to<W: Write>(&mut self, writer: W) -> Result<u64> {
        let mut window = StreamWindow::new(writer, self.config.writer_chunk_size);
        self.run(&mut window)?;
        let written = window.total_written();
        window.finish()?;
        Ok(written)
    }

    fn run<W: OutputWindow>(&mut self, window: &mut W) -> Result<()> {
        self.stats = DecompressStats::default();

        let mut state = State::ReadHeader;
        loop {
            state = match self.step(state, window) {
                Ok(Some(next)) => next,
                Ok(None) => break,
                Err(e) => {
                    tracing::debug!(
                        kind = ?e.kind(),
                        error = %e,
                        output_bytes = window.total_written(),
                        "DEFLATE stream rejected"
                    );
                    return Err(e);
                }
            };
        }

        self.stats.output_bytes = window.total_written();
        Ok(())
    }

    /// Advance by one header or block; `None` once the final block is done
    fn step<W: OutputWindow>(&mut self, state: State, window: &mut W) -> Result<Option<State>> {
        let is_final = match state {
            State::ReadHeader => return self.read_header().map(Some),
            State::DecodeStored { is_final } => {
                let produced = inflate_stored_block(&mut self.bits, window)?;
                self.stats.stored_blocks += 1;
                tracing::debug!(produced, is_final, "stored block");
                is_final
            }
            State::DecodeFixed { is_final } => {
                let produced = inflate_huffman_block(
                    &mut self.bits,
                    window,
                    CanonicalCode::fixed_literal_length(),
                    DistanceCode::fixed(),
                )?;
                self.stats.fixed_blocks += 1;
                tracing::debug!(produced, is_final, "fixed Huffman block");
                is_final
            }
            State::DecodeDynamic { is_final } => {
                let codes = DynamicCodes::read(&mut self.bits)?;
                let produced = inflate_huffman_block(
                    &mut self.bits,
                    window,
                    &codes.literal_length,
                    &codes.distance,
                )?;
                self.stats.dynamic_blocks += 1;
                tracing::debug!(produced, is_final, "dynamic Huffman block");
                is_final
            }
        };

        Ok((!is_final).then_some(State::ReadHeader))
    }

    fn read_header(&mut self) -> Result<State> {
        let header = BlockHeader::read(&mut self.bits)?;
        tracing::trace!(
            is_final = header.is_final,
            block_type = ?header.block_type,
            "block header"
        );

        let is_final = header.is_final;
        match header.block_type {
            BlockType::Stored => Ok(State::DecodeStored { is_final }),
            BlockType::FixedHuffman => Ok(State::DecodeFixed { is_final }),
            BlockType::DynamicHuffman => Ok(State::DecodeDynamic { is_final }),
            BlockType::Reserved => Err(Error::InvalidBlockType(BlockType::Reserved as u8)),
        }
    }

    /// Statistics for the most recent call
    pub fn stats(&self) -> &DecompressStats {
        &self.stats
    }

    /// Get the bit source back, positioned after the final block
    pub fn into_inner(self) -> S {
        self.bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::BitReader;
    use std::io::Write;

    #[test]
    fn test_stored_block() {
        // Stored block: BFINAL=1, BTYPE=00, LEN=5, NLEN=!5, "Hello"
        let data = vec![
            0b00000001, // BFINAL=1, BTYPE=00 (stored) - packed LSB first
            0x05, 0x00, // LEN = 5
            0xFA, 0xFF, // NLEN = !5 = 0xFFFA
            b'H', b'e', b'l', b'l', b'o',
        ];

        let mut decompressor = Decompressor::new(BitReader::new(data.as_slice()));
        assert_eq!(decompressor.decompress().unwrap(), b"Hello");
        assert_eq!(decompressor.stats().stored_blocks, 1);
        assert_eq!(decompressor.stats().output_bytes, 5);
    }

    #[test]
    fn test_real_deflate() {
        let mut encoder =
            flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(b"Hello, World! Hello, World! Hello, World!").unwrap();
        let compressed = encoder.finish().unwrap();

        let mut decompressor = Decompressor::new(BitReader::new(compressed.as_slice()));
        let output = decompressor.decompress().unwrap();

        assert_eq!(output, b"Hello, World! Hello, World! Hello, World!");
        assert!(decompressor.stats().blocks() >= 1);
    }

    #[test]
    fn test_reserved_block_type() {
        let mut decompressor = Decompressor::new(BitReader::new(&[0b111u8][..]));
        assert!(matches!(decompressor.decompress(), Err(Error::InvalidBlockType(3))));
    }

    #[test]
    fn test_reserved_block_type_after_stored_block() {
        // Non-final empty stored block, then BFINAL=1 BTYPE=11
        let data = [0x00, 0x00, 0x00, 0xFF, 0xFF, 0b111];
        let mut decompressor = Decompressor::new(BitReader::new(&data[..]));
        let err = decompressor.decompress().unwrap_err();
        assert!(matches!(err, Error::InvalidBlockType(3)));
        assert!(err.is_malformed());
        assert_eq!(decompressor.stats().stored_blocks, 1);
    }

    #[test]
    fn test_stream_and_buffer_agree() {
        let text: Vec<u8> = (0..100_000u32).map(|i| b"abcdefgh"[(i % 7) as usize]).collect();
        let mut encoder =
            flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::best());
        encoder.write_all(&text).unwrap();
        let compressed = encoder.finish().unwrap();

        let buffered =
            Decompressor::new(BitReader::new(compressed.as_slice())).decompress().unwrap();

        let config = DecompressConfig { writer_chunk_size: 1000, ..Default::default() };
        let mut streamed = Vec::new();
        let mut decompressor =
            Decompressor::with_config(BitReader::new(compressed.as_slice()), config);
        let written = decompressor.decompress_to(&mut streamed).unwrap();

        assert_eq!(written, text.len() as u64);
        assert_eq!(buffered, text);
        assert_eq!(streamed, text);
    }

    #[test]
    fn test_into_inner_after_final_block() {
        let mut encoder =
            flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(b"payload").unwrap();
        let mut data = encoder.finish().unwrap();
        data.extend_from_slice(&0xDEADBEEFu32.to_le_bytes());

        let mut decompressor = Decompressor::new(BitReader::new(data.as_slice()));
        assert_eq!(decompressor.decompress().unwrap(), b"payload");

        let mut reader = decompressor.into_inner();
        assert_eq!(reader.read_u32_le().unwrap(), 0xDEADBEEF);
    }
}

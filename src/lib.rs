//! Strict decoder for raw DEFLATE (RFC 1951) streams.
//!
//! Container formats such as zlib or gzip are left to the caller: hand the
//! payload to [`decompress`] through any [`BitSource`], then keep reading
//! the trailer from the same source.
//!
//! ```
//! let stored = [0x01, 0x03, 0x00, 0xFC, 0xFF, b'a', b'b', b'c'];
//! assert_eq!(rawinflate::decompress_bytes(&stored).unwrap(), b"abc");
//! ```

pub mod bits;
pub mod deflate;
pub mod error;
pub mod huffman;

pub use bits::{BitReader, BitSource};
pub use deflate::{DecompressStats, Decompressor};
pub use error::{Error, ErrorKind, Result};

use std::io::Write;

/// Resource hints for decompression
///
/// None of these affect the decoded bytes.
#[derive(Clone, Debug)]
pub struct DecompressConfig {
    /// Initial capacity of the output buffer (default: 0)
    pub output_capacity_hint: usize,
    /// Bytes collected before each write to the output writer (default: 64 KiB)
    pub writer_chunk_size: usize,
}

impl Default for DecompressConfig {
    fn default() -> Self {
        Self { output_capacity_hint: 0, writer_chunk_size: 64 * 1024 }
    }
}

/// Decompress one raw DEFLATE stream, returning the decoded bytes
///
/// Pass `&mut source` to keep using the source afterwards.
pub fn decompress<S: BitSource>(bits: S) -> Result<Vec<u8>> {
    Decompressor::new(bits).decompress()
}

/// Decompress a raw DEFLATE stream held in memory
///
/// Bytes after the final block are ignored.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    decompress(BitReader::new(data))
}

/// Decompress one raw DEFLATE stream into `writer`, returning the bytes written
pub fn decompress_to_writer<S: BitSource, W: Write>(bits: S, writer: W) -> Result<u64> {
    Decompressor::new(bits).decompress_to(writer)
}

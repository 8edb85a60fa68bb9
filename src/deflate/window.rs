use crate::error::{Error, Result};
use std::io::Write;

/// Largest distance a DEFLATE back-reference can express
pub const WINDOW_SIZE: usize = 32768;
const WINDOW_MASK: usize = WINDOW_SIZE - 1;

/// Destination for decoded bytes that also serves as the LZ77 history
pub trait OutputWindow {
    /// Total bytes ever written
    fn total_written(&self) -> u64;

    /// Append a single byte
    fn push_byte(&mut self, byte: u8) -> Result<()>;

    /// Append `length` bytes starting `distance` bytes behind the end
    ///
    /// The copy runs forward one byte at a time, so when `distance < length`
    /// later bytes repeat bytes produced earlier in the same copy.
    fn copy_match(&mut self, distance: u16, length: u16) -> Result<()>;

    /// Append a run of bytes
    fn push_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        for &b in bytes {
            self.push_byte(b)?;
        }
        Ok(())
    }
}

fn check_distance(distance: u16, total_written: u64) -> Result<()> {
    if distance == 0 || distance as u64 > total_written {
        return Err(Error::InvalidBackReference {
            distance,
            available: total_written.min(WINDOW_SIZE as u64) as usize,
        });
    }
    Ok(())
}

/// Growable window holding the entire output
#[derive(Debug, Default)]
pub struct BufferWindow {
    data: Vec<u8>,
}

impl BufferWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { data: Vec::with_capacity(capacity) }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl OutputWindow for BufferWindow {
    fn total_written(&self) -> u64 {
        self.data.len() as u64
    }

    #[inline]
    fn push_byte(&mut self, byte: u8) -> Result<()> {
        self.data.push(byte);
        Ok(())
    }

    fn copy_match(&mut self, distance: u16, length: u16) -> Result<()> {
        check_distance(distance, self.total_written())?;

        self.data.reserve(length as usize);
        let start = self.data.len() - distance as usize;
        for i in 0..length as usize {
            let byte = self.data[start + i];
            self.data.push(byte);
        }
        Ok(())
    }

    fn push_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.data.extend_from_slice(bytes);
        Ok(())
    }
}

/// 32KB circular buffer for LZ77 sliding window
pub struct SlidingWindow {
    buffer: Box<[u8; WINDOW_SIZE]>,
    /// Next write position (0-32767)
    write_pos: usize,
    /// Total bytes ever written
    total_written: u64,
}

impl SlidingWindow {
    pub fn new() -> Self {
        Self { buffer: Box::new([0u8; WINDOW_SIZE]), write_pos: 0, total_written: 0 }
    }

    #[inline]
    pub fn push_byte(&mut self, byte: u8) {
        self.buffer[self.write_pos] = byte;
        self.write_pos = (self.write_pos + 1) & WINDOW_MASK;
        self.total_written += 1;
    }

    /// Byte `distance` positions back (1 = most recently written)
    #[inline]
    pub fn byte_at(&self, distance: u16) -> u8 {
        debug_assert!((1..=WINDOW_SIZE).contains(&(distance as usize)));
        self.buffer[(self.write_pos + WINDOW_SIZE - distance as usize) & WINDOW_MASK]
    }

    /// Get total bytes written
    pub fn total_written(&self) -> u64 {
        self.total_written
    }
}

impl Default for SlidingWindow {
    fn default() -> Self {
        Self::new()
    }
}

/// Bounded window that streams decoded bytes to a writer
///
/// Only the most recent 32 KiB are retained, which is all a back-reference
/// can reach. Output is handed to the writer in chunks of `chunk_size`.
pub struct StreamWindow<W: Write> {
    history: SlidingWindow,
    pending: Vec<u8>,
    chunk_size: usize,
    writer: W,
}

impl<W: Write> StreamWindow<W> {
    pub fn new(writer: W, chunk_size: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            history: SlidingWindow::new(),
            pending: Vec::with_capacity(chunk_size),
            chunk_size,
            writer,
        }
    }

    fn flush_pending(&mut self) -> Result<()> {
        if !self.pending.is_empty() {
            self.writer.write_all(&self.pending)?;
            self.pending.clear();
        }
        Ok(())
    }

    /// Write out anything still buffered and return the writer
    pub fn finish(mut self) -> Result<W> {
        self.flush_pending()?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> OutputWindow for StreamWindow<W> {
    fn total_written(&self) -> u64 {
        self.history.total_written()
    }

    #[inline]
    fn push_byte(&mut self, byte: u8) -> Result<()> {
        self.history.push_byte(byte);
        self.pending.push(byte);
        if self.pending.len() >= self.chunk_size {
            self.flush_pending()?;
        }
        Ok(())
    }

    fn copy_match(&mut self, distance: u16, length: u16) -> Result<()> {
        check_distance(distance, self.total_written())?;

        for _ in 0..length {
            let byte = self.history.byte_at(distance);
            self.push_byte(byte)?;
        }
        Ok(())
    }
}

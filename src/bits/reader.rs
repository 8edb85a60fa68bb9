use super::BitSource;
use crate::error::{Error, Result};
use std::io::{self, Read};

/// Buffered [`BitSource`] over any byte reader
///
/// DEFLATE uses LSB-first bit ordering within bytes.
/// Bits are read from LSB to MSB within each byte.
///
/// Up to 8 bytes are read ahead of the current bit position. A container
/// layer that continues after the DEFLATE payload should keep reading
/// through this reader (see [`read_u32_le`](Self::read_u32_le)) rather than
/// from the inner reader.
pub struct BitReader<R: Read> {
    reader: R,
    /// Buffer holding up to 64 bits
    buffer: u64,
    /// Number of valid bits in buffer (0-64)
    bits_available: u8,
    /// Total bytes pulled from the inner reader
    bytes_read: u64,
}

impl<R: Read> BitReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, buffer: 0, bits_available: 0, bytes_read: 0 }
    }

    /// Ensure at least `n` bits are available in buffer
    ///
    /// One bulk `read` tops the buffer up first. A short read says nothing
    /// about end of input, so any shortfall is then pulled one byte at a
    /// time with `read_exact`, which fails with `UnexpectedEof` only when
    /// the reader is truly exhausted. End of input is therefore reported
    /// only when the stream really ends before bit `n`.
    fn fill_buffer(&mut self, n: u8) -> Result<()> {
        debug_assert!(n <= 57, "Cannot request more than 57 bits at once");

        if self.bits_available >= n {
            return Ok(());
        }

        let room = ((64 - self.bits_available) / 8) as usize;
        if room > 0 {
            let mut chunk = [0u8; 8];
            match self.reader.read(&mut chunk[..room]) {
                Ok(count) => self.append(&chunk[..count]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(Error::Io(e)),
            }
        }

        while self.bits_available < n {
            let mut byte = [0u8; 1];
            self.reader.read_exact(&mut byte).map_err(|e| match e.kind() {
                io::ErrorKind::UnexpectedEof => Error::UnexpectedEof,
                _ => Error::Io(e),
            })?;
            self.append(&byte);
        }
        Ok(())
    }

    /// Queue whole bytes above the bits already buffered
    #[inline]
    fn append(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.buffer |= (byte as u64) << self.bits_available;
            self.bits_available += 8;
        }
        self.bytes_read += bytes.len() as u64;
    }

    /// Read a 16-bit little-endian value (aligns to byte boundary first)
    pub fn read_u16_le(&mut self) -> Result<u16> {
        let mut bytes = [0u8; 2];
        self.read_bytes(&mut bytes)?;
        Ok(u16::from_le_bytes(bytes))
    }

    /// Read a 32-bit little-endian value (aligns to byte boundary first)
    pub fn read_u32_le(&mut self) -> Result<u32> {
        let mut bytes = [0u8; 4];
        self.read_bytes(&mut bytes)?;
        Ok(u32::from_le_bytes(bytes))
    }

    /// Read exactly `buf.len()` bytes (aligns to byte boundary first)
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        self.align_to_byte();
        for b in buf.iter_mut() {
            *b = self.read_bits(8)? as u8;
        }
        Ok(())
    }

    /// Number of bits consumed so far
    pub fn bit_position(&self) -> u64 {
        self.bytes_read * 8 - self.bits_available as u64
    }

    /// Total bytes pulled from the inner reader, including read-ahead
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Bits buffered but not yet consumed
    pub fn bits_available(&self) -> u8 {
        self.bits_available
    }

    /// Get the inner reader (consumes self, buffered bits are lost)
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> BitSource for BitReader<R> {
    #[inline]
    fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }

    fn align_to_byte(&mut self) {
        let discard = self.bits_available % 8;
        if discard > 0 {
            self.buffer >>= discard;
            self.bits_available -= discard;
        }
    }

    fn read_bits(&mut self, n: u8) -> Result<u32> {
        debug_assert!(n <= 32, "Cannot read more than 32 bits at once");

        self.fill_buffer(n)?;
        let value = self.buffer & ((1u64 << n) - 1);
        self.buffer >>= n;
        self.bits_available -= n;
        Ok(value as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_bits() {
        // Binary: 11010011 10101010 = 0xD3 0xAA
        let data = vec![0xD3, 0xAA];
        let mut reader = BitReader::new(data.as_slice());

        // bits 0-2: 011 = 3
        assert_eq!(reader.read_bits(3).unwrap(), 0b011);
        // bits 3-7: 11010 = 26
        assert_eq!(reader.read_bits(5).unwrap(), 0b11010);
        assert_eq!(reader.read_bits(8).unwrap(), 0xAA);
    }

    #[test]
    fn test_read_bit() {
        let data = vec![0b10110001];
        let mut reader = BitReader::new(data.as_slice());

        let bits: Vec<bool> = (0..8).map(|_| reader.read_bit().unwrap()).collect();
        assert_eq!(bits, [true, false, false, false, true, true, false, true]);
    }

    #[test]
    fn test_align_to_byte() {
        let data = vec![0xFF, 0xAB];
        let mut reader = BitReader::new(data.as_slice());

        reader.read_bits(3).unwrap();
        reader.align_to_byte();
        assert_eq!(reader.read_bits(8).unwrap(), 0xAB);
    }

    #[test]
    fn test_align_when_already_aligned() {
        let data = vec![0x12, 0x34];
        let mut reader = BitReader::new(data.as_slice());

        reader.align_to_byte();
        assert_eq!(reader.read_byte().unwrap(), 0x12);
        reader.align_to_byte();
        assert_eq!(reader.read_byte().unwrap(), 0x34);
    }

    #[test]
    fn test_read_u16_le() {
        let data = vec![0x34, 0x12];
        let mut reader = BitReader::new(data.as_slice());
        assert_eq!(reader.read_u16_le().unwrap(), 0x1234);
    }

    #[test]
    fn test_read_u32_le() {
        let data = vec![0x78, 0x56, 0x34, 0x12];
        let mut reader = BitReader::new(data.as_slice());
        assert_eq!(reader.read_u32_le().unwrap(), 0x12345678);
    }

    #[test]
    fn test_cross_byte_boundary() {
        let data = vec![0xFF, 0x00];
        let mut reader = BitReader::new(data.as_slice());

        assert_eq!(reader.read_bits(12).unwrap(), 0x0FF);
    }

    #[test]
    fn test_eof() {
        let data = vec![0xFF];
        let mut reader = BitReader::new(data.as_slice());

        assert!(matches!(reader.read_bits(9), Err(Error::UnexpectedEof)));
    }

    #[test]
    fn test_empty_input() {
        let mut reader = BitReader::new(&[][..]);
        assert!(matches!(reader.read_bit(), Err(Error::UnexpectedEof)));
    }

    #[test]
    fn test_bit_position() {
        let data = vec![0u8; 16];
        let mut reader = BitReader::new(data.as_slice());

        reader.read_bits(5).unwrap();
        assert_eq!(reader.bit_position(), 5);
        reader.align_to_byte();
        assert_eq!(reader.bit_position(), 8);
        reader.read_bits(20).unwrap();
        assert_eq!(reader.bit_position(), 28);
    }

    #[test]
    fn test_read_bytes() {
        let data = vec![0x01, 0xAA, 0xBB, 0xCC];
        let mut reader = BitReader::new(data.as_slice());

        reader.read_bit().unwrap();
        let mut buf = [0u8; 3];
        reader.read_bytes(&mut buf).unwrap();
        assert_eq!(buf, [0xAA, 0xBB, 0xCC]);
    }

    /// Hands out one byte per call, after an initial interruption
    struct Trickle<'a> {
        data: &'a [u8],
        interrupted: bool,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::ErrorKind::Interrupted.into());
            }
            match (self.data.split_first(), buf.first_mut()) {
                (Some((&byte, rest)), Some(slot)) => {
                    *slot = byte;
                    self.data = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    #[test]
    fn test_short_reads_fill_exactly() {
        let mut reader = BitReader::new(Trickle { data: &[0x34, 0x12, 0xFF], interrupted: false });

        assert_eq!(reader.read_bits(16).unwrap(), 0x1234);
        assert_eq!(reader.read_bits(8).unwrap(), 0xFF);
        assert_eq!(reader.bytes_read(), 3);
        assert!(matches!(reader.read_bit(), Err(Error::UnexpectedEof)));
    }
}

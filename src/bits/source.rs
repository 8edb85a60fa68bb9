use crate::error::Result;

/// Sequential source of DEFLATE bits
///
/// Bits are delivered LSB-first within each byte. Multi-bit values read
/// through [`read_bits`](BitSource::read_bits) are packed least significant
/// bit first, which is the order DEFLATE uses for header fields and extra
/// bits. Huffman codewords are assembled one bit at a time by the caller.
///
/// Implementors only need `read_bit` and `align_to_byte`; the remaining
/// methods have bit-at-a-time defaults that buffered readers override.
pub trait BitSource {
    /// Read one bit, failing with `UnexpectedEof` once the input is exhausted
    fn read_bit(&mut self) -> Result<bool>;

    /// Discard any bits left in the current byte
    fn align_to_byte(&mut self);

    /// Read `n` bits (0-32) as an unsigned value, least significant bit first
    fn read_bits(&mut self, n: u8) -> Result<u32> {
        debug_assert!(n <= 32, "Cannot read more than 32 bits at once");
        let mut value = 0u32;
        for i in 0..n {
            if self.read_bit()? {
                value |= 1 << i;
            }
        }
        Ok(value)
    }

    /// Read a complete byte (aligns to byte boundary first)
    fn read_byte(&mut self) -> Result<u8> {
        self.align_to_byte();
        self.read_bits(8).map(|v| v as u8)
    }
}

impl<S: BitSource + ?Sized> BitSource for &mut S {
    #[inline]
    fn read_bit(&mut self) -> Result<bool> {
        (**self).read_bit()
    }

    #[inline]
    fn align_to_byte(&mut self) {
        (**self).align_to_byte()
    }

    #[inline]
    fn read_bits(&mut self, n: u8) -> Result<u32> {
        (**self).read_bits(n)
    }

    #[inline]
    fn read_byte(&mut self) -> Result<u8> {
        (**self).read_byte()
    }
}

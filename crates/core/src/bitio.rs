//! Bit-level packing for the compressed payload.
//!
//! [`BitWriter`] appends codes MSB-first and [`BitReader`] hands them back one
//! bit at a time. Both follow the payload layout:
//!
//! - bits fill each byte from the most significant position down
//! - the final partial byte is left-aligned and zero-filled at the low end
//! - the number of zero bits added there (0-7) is the padding count
//!
//! # Example
//! ```
//! use huffpack_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b11, 2).unwrap();
//! let packed = writer.finish();
//! assert_eq!(packed.bytes, vec![0b1011_1000]);
//! assert_eq!(packed.padding_bits, 3);
//!
//! let reader = BitReader::new(&packed.bytes, packed.padding_bits).unwrap();
//! let bits: Vec<bool> = reader.collect();
//! assert_eq!(bits, [true, false, true, true, true]);
//! ```

use crate::codes::Code;
use crate::error::{BitIoError, Result};

/// Output of a finished [`BitWriter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBits {
    pub bytes: Vec<u8>,
    /// Zero bits appended to the last byte (0-7)
    pub padding_bits: u8,
    /// Bits written before padding
    pub bit_len: u64,
}

/// Packs bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `pending_len` is always < 8
#[derive(Debug, Clone)]
pub struct BitWriter {
    bytes: Vec<u8>,
    /// Partial byte, filled from bit 7 downward
    pending: u8,
    /// Bits held in `pending`
    pending_len: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Writer with room for `bit_len` bits.
    pub fn with_capacity(bit_len: u64) -> Self {
        Self {
            bytes: Vec::with_capacity(bit_len.div_ceil(8) as usize),
            pending: 0,
            pending_len: 0,
        }
    }

    /// Append the low `count` bits of `value`, highest of them first.
    ///
    /// # Errors
    /// `BitIoError::InvalidBitCount` if `count > 64`.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        let mut remaining = count;
        while remaining > 0 {
            let free = 8 - self.pending_len as usize;
            let take = remaining.min(free);
            let shift = remaining - take;
            let chunk = ((value >> shift) & ((1u64 << take) - 1)) as u8;

            self.pending |= chunk << (free - take);
            self.pending_len += take as u8;
            if self.pending_len == 8 {
                self.bytes.push(self.pending);
                self.pending = 0;
                self.pending_len = 0;
            }
            remaining = shift;
        }
        Ok(())
    }

    /// Append a code word.
    pub fn write_code(&mut self, code: Code) -> Result<()> {
        self.write_bits(code.bits, code.len as usize)
    }

    /// Bits written so far.
    pub fn bit_len(&self) -> u64 {
        self.bytes.len() as u64 * 8 + self.pending_len as u64
    }

    /// Flush the partial byte and report how much padding it needed.
    pub fn finish(mut self) -> PackedBits {
        let bit_len = self.bit_len();
        let padding_bits = if self.pending_len > 0 {
            self.bytes.push(self.pending);
            8 - self.pending_len
        } else {
            0
        };
        PackedBits {
            bytes: self.bytes,
            padding_bits,
            bit_len,
        }
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads payload bits MSB-first, stopping before the padding.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    position: usize,
    /// Bits that carry data (total minus padding)
    bit_len: usize,
}

impl<'a> BitReader<'a> {
    /// Reader over `data` whose last byte ends with `padding_bits` filler bits.
    ///
    /// # Errors
    /// `BitIoError::PaddingExceedsStream` if the padding is longer than the data.
    pub fn new(data: &'a [u8], padding_bits: u8) -> Result<Self> {
        let available = data.len() * 8;
        let padding = padding_bits as usize;
        if padding > available {
            return Err(BitIoError::PaddingExceedsStream {
                padding: padding_bits,
                available,
            }
            .into());
        }
        Ok(Self {
            data,
            position: 0,
            bit_len: available - padding,
        })
    }

    /// Next data bit, or `None` once only padding remains.
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.position >= self.bit_len {
            return None;
        }
        let byte = self.data[self.position / 8];
        let bit = (byte >> (7 - self.position % 8)) & 1 == 1;
        self.position += 1;
        Some(bit)
    }

    /// Data bits not yet read.
    pub fn bits_remaining(&self) -> usize {
        self.bit_len - self.position
    }

    /// Bits consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_empty(&self) -> bool {
        self.position >= self.bit_len
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.read_bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bits_remaining();
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_full_byte_has_no_padding() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b1011_0011, 8).unwrap();
        let packed = writer.finish();
        assert_eq!(packed.bytes, vec![0b1011_0011]);
        assert_eq!(packed.padding_bits, 0);
        assert_eq!(packed.bit_len, 8);
    }

    #[test]
    fn test_partial_byte_is_left_aligned() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b1, 1).unwrap();
        let packed = writer.finish();
        assert_eq!(packed.bytes, vec![0b1000_0000]);
        assert_eq!(packed.padding_bits, 7);
    }

    #[test]
    fn test_codes_span_bytes() {
        let mut writer = BitWriter::new();
        writer.write_code(Code { bits: 0b110, len: 3 }).unwrap();
        writer.write_code(Code { bits: 0b1_0101_0101, len: 9 }).unwrap();
        let packed = writer.finish();
        // 110 101010101 -> 11010101 0101(0000)
        assert_eq!(packed.bytes, vec![0b1101_0101, 0b0101_0000]);
        assert_eq!(packed.padding_bits, 4);
        assert_eq!(packed.bit_len, 12);
    }

    #[test]
    fn test_empty_code_writes_nothing() {
        let mut writer = BitWriter::new();
        writer.write_code(Code::default()).unwrap();
        let packed = writer.finish();
        assert!(packed.bytes.is_empty());
        assert_eq!(packed.padding_bits, 0);
    }

    #[test]
    fn test_64_bit_value() {
        let mut writer = BitWriter::new();
        writer.write_bits(0x8000_0000_0000_0001, 64).unwrap();
        let packed = writer.finish();
        assert_eq!(packed.bytes, vec![0x80, 0, 0, 0, 0, 0, 0, 0x01]);
    }

    #[test]
    fn test_too_many_bits() {
        let mut writer = BitWriter::new();
        assert!(matches!(
            writer.write_bits(0, 65),
            Err(Error::BitIo(BitIoError::InvalidBitCount(65)))
        ));
    }

    #[test]
    fn test_reader_skips_padding() {
        let data = [0b1011_1000];
        let mut reader = BitReader::new(&data, 3).unwrap();
        assert_eq!(reader.bits_remaining(), 5);
        let bits: Vec<bool> = reader.by_ref().collect();
        assert_eq!(bits, [true, false, true, true, true]);
        assert!(reader.is_empty());
        assert_eq!(reader.position(), 5);
    }

    #[test]
    fn test_reader_rejects_oversized_padding() {
        let result = BitReader::new(&[], 2);
        assert!(matches!(
            result,
            Err(Error::BitIo(BitIoError::PaddingExceedsStream { padding: 2, available: 0 }))
        ));
    }
}

//! Compression and decompression of whole buffers.
//!
//! Compress path: bytes → [`FrequencyTable`] → [`HuffmanTree`] → [`CodeTable`]
//! → header + packed payload. Decompress path: header → [`FrequencyTable`] →
//! [`HuffmanTree`] → payload walk → bytes. The code table is never stored; the
//! decoder rebuilds the same tree from the header's table.
//!
//! # Degenerate inputs
//!
//! - Empty input compresses to an empty buffer and an empty buffer
//!   decompresses to empty output.
//! - Input with a single distinct symbol `S` repeated `N` times has an empty
//!   code, so the payload is empty. The header entry `(S, N)` is enough to
//!   restore it: a one-entry header is decoded as `N` copies of `S`, and any
//!   payload bytes or padding in such a buffer are rejected.
//! - Counts above 65535 cannot be written to the header and fail with
//!   `Error::FrequencyOverflow` before anything is produced.

use tracing::debug;

use crate::bitio::{BitReader, BitWriter, PackedBits};
use crate::codes::CodeTable;
use crate::error::{FormatError, HuffmanError, Result};
use crate::format::{self, Header};
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;

/// Everything produced while compressing one buffer.
#[derive(Debug, Clone)]
pub struct Encoded {
    /// Header followed by payload
    pub bytes: Vec<u8>,
    pub table: FrequencyTable,
    pub codes: CodeTable,
    /// Payload bits before padding
    pub payload_bits: u64,
    pub padding_bits: u8,
}

impl Encoded {
    fn empty() -> Self {
        Self {
            bytes: Vec::new(),
            table: FrequencyTable::new(),
            codes: CodeTable::empty(),
            payload_bits: 0,
            padding_bits: 0,
        }
    }

    /// Length of the header portion of `bytes`.
    pub fn header_len(&self) -> usize {
        if self.table.is_empty() {
            0
        } else {
            format::header_len(self.table.len())
        }
    }
}

/// Compress `input` into a self-describing buffer.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    encode(input).map(|encoded| encoded.bytes)
}

/// Compress `input`, keeping the intermediate tables for reporting.
pub fn encode(input: &[u8]) -> Result<Encoded> {
    let table = FrequencyTable::from_bytes(input);
    if table.is_empty() {
        debug!("empty input, writing empty buffer");
        return Ok(Encoded::empty());
    }
    format::check_frequencies(&table)?;

    let tree = HuffmanTree::build(&table)?;
    let codes = CodeTable::from_tree(&tree)?;
    let packed = encode_payload(input, &codes)?;

    let mut bytes = Vec::with_capacity(format::header_len(table.len()) + packed.bytes.len());
    format::write_header(&table, packed.padding_bits, &mut bytes)?;
    bytes.extend_from_slice(&packed.bytes);

    debug!(
        input_len = input.len(),
        symbols = table.len(),
        payload_bits = packed.bit_len,
        padding_bits = packed.padding_bits,
        output_len = bytes.len(),
        "compressed buffer"
    );

    Ok(Encoded {
        bytes,
        table,
        codes,
        payload_bits: packed.bit_len,
        padding_bits: packed.padding_bits,
    })
}

/// Pack the code of every byte of `input`, in order.
///
/// # Errors
/// `HuffmanError::UnknownSymbol` if a byte has no code in `codes`.
pub fn encode_payload(input: &[u8], codes: &CodeTable) -> Result<PackedBits> {
    let bit_len = payload_bit_len(input, codes)?;
    let mut writer = BitWriter::with_capacity(bit_len);
    for &byte in input {
        let code = codes.get(byte).ok_or(HuffmanError::UnknownSymbol(byte))?;
        writer.write_code(code)?;
    }
    Ok(writer.finish())
}

fn payload_bit_len(input: &[u8], codes: &CodeTable) -> Result<u64> {
    let mut lengths = [0u64; 256];
    for &byte in input {
        lengths[byte as usize] += 1;
    }
    let mut bits = 0u64;
    for (symbol, &count) in lengths.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let code = codes
            .get(symbol as u8)
            .ok_or(HuffmanError::UnknownSymbol(symbol as u8))?;
        bits += count * code.len as u64;
    }
    Ok(bits)
}

/// Restore the bytes compressed into `buffer`.
///
/// # Errors
/// Any [`FormatError`] for a header or payload that does not describe a
/// complete stream.
pub fn decompress(buffer: &[u8]) -> Result<Vec<u8>> {
    if buffer.is_empty() {
        return Ok(Vec::new());
    }

    let (header, payload) = format::parse_header(buffer)?;
    let Header {
        table,
        padding_bits,
    } = header;
    let tree = HuffmanTree::build(&table)?;
    let output = decode_payload(&tree, payload, padding_bits, table.total())?;

    debug!(
        input_len = buffer.len(),
        symbols = table.len(),
        output_len = output.len(),
        "decompressed buffer"
    );
    Ok(output)
}

/// Walk `payload` through `tree`, emitting a symbol at every leaf.
///
/// `expected_len` is the total of the header frequencies; decoding stops with
/// an error as soon as the output would exceed it, and a shorter result is an
/// error as well.
pub fn decode_payload(
    tree: &HuffmanTree,
    payload: &[u8],
    padding_bits: u8,
    expected_len: u64,
) -> Result<Vec<u8>> {
    let root = tree.root();

    if let Some(symbol) = tree.symbol(root) {
        if !payload.is_empty() || padding_bits != 0 {
            return Err(FormatError::UnexpectedPayload {
                payload_bytes: payload.len(),
                padding_bits,
            }
            .into());
        }
        return Ok(vec![symbol; expected_len as usize]);
    }

    if padding_bits as usize > payload.len() * 8 {
        return Err(FormatError::PaddingExceedsPayload {
            padding_bits,
            payload_bytes: payload.len(),
        }
        .into());
    }

    let mut reader = BitReader::new(payload, padding_bits)?;
    let mut output = Vec::with_capacity(expected_len as usize);
    let mut current = root;

    while let Some(bit) = reader.read_bit() {
        // current is reset to the root after every leaf, so it is internal here
        current = tree.step(current, bit).unwrap_or(root);
        if let Some(symbol) = tree.symbol(current) {
            if output.len() as u64 == expected_len {
                return Err(FormatError::LengthMismatch {
                    expected: expected_len,
                    actual: output.len() as u64 + 1,
                }
                .into());
            }
            output.push(symbol);
            current = root;
        }
    }

    if current != root {
        return Err(FormatError::IncompleteCode {
            consumed: reader.position() as u64,
        }
        .into());
    }
    if output.len() as u64 != expected_len {
        return Err(FormatError::LengthMismatch {
            expected: expected_len,
            actual: output.len() as u64,
        }
        .into());
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_known_buffer() {
        // A=0 B=10 D=110 C=111
        // 0000 101010 111111 110 -> 00001010 10111111 110(00000)
        let bytes = compress(b"AAAABBBCCD").unwrap();
        assert_eq!(
            bytes,
            vec![
                3, 5, b'A', 0, 4, b'B', 0, 3, b'C', 0, 2, b'D', 0, 1, 0x0A, 0xBF, 0xC0
            ]
        );
        assert_eq!(decompress(&bytes).unwrap(), b"AAAABBBCCD");
    }

    #[test]
    fn test_encoded_metadata() {
        let encoded = encode(b"AAAABBBCCD").unwrap();
        assert_eq!(encoded.payload_bits, 19);
        assert_eq!(encoded.padding_bits, 5);
        assert_eq!(encoded.header_len(), 14);
        assert_eq!(encoded.codes.len(), 4);
        assert_eq!(encoded.table.total(), 10);
    }

    #[test]
    fn test_empty_round_trip() {
        let encoded = encode(b"").unwrap();
        assert!(encoded.bytes.is_empty());
        assert_eq!(encoded.header_len(), 0);
        assert_eq!(decompress(&[]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_single_symbol() {
        let bytes = compress(b"ZZZZZ").unwrap();
        assert_eq!(bytes, vec![0, 0, b'Z', 0, 5]);
        assert_eq!(decompress(&bytes).unwrap(), b"ZZZZZ");
    }

    #[test]
    fn test_single_symbol_rejects_payload() {
        let result = decompress(&[0, 0, b'Z', 0, 5, 0xFF]);
        assert!(matches!(
            result,
            Err(Error::Format(FormatError::UnexpectedPayload {
                payload_bytes: 1,
                padding_bits: 0
            }))
        ));
    }

    #[test]
    fn test_padding_without_payload() {
        let result = decompress(&[1, 3, b'a', 0, 1, b'b', 0, 1]);
        assert!(matches!(
            result,
            Err(Error::Format(FormatError::PaddingExceedsPayload {
                padding_bits: 3,
                payload_bytes: 0
            }))
        ));
    }

    #[test]
    fn test_payload_bits_match_code_lengths() {
        let input = b"the quick brown fox jumps over the lazy dog";
        let encoded = encode(input).unwrap();
        let expected: u64 = encoded
            .table
            .iter()
            .map(|e| e.count * encoded.codes.get(e.symbol).unwrap().len as u64)
            .sum();
        assert_eq!(encoded.payload_bits, expected);
        let payload_len = encoded.bytes.len() - encoded.header_len();
        assert_eq!(payload_len as u64, expected.div_ceil(8));
    }

    #[test]
    fn test_truncated_payload() {
        let mut bytes = compress(b"AAAABBBCCD").unwrap();
        bytes.pop();
        // 16 bits remain, minus 5 padding: stream stops inside a code or short
        assert!(matches!(decompress(&bytes), Err(Error::Format(_))));
    }

    #[test]
    fn test_stream_ending_inside_code() {
        // x:1 y:1 z:2 gives z=0 x=10 y=11; a lone "1" bit stops inside x or y
        let buffer = [2, 7, b'x', 0, 1, b'y', 0, 1, b'z', 0, 2, 0b1000_0000];
        assert!(matches!(
            decompress(&buffer),
            Err(Error::Format(FormatError::IncompleteCode { consumed: 1 }))
        ));
    }

    #[test]
    fn test_too_many_symbols() {
        // header says 2 symbols total, payload decodes to 8
        let buffer = [1, 0, b'a', 0, 1, b'b', 0, 1, 0x00];
        assert!(matches!(
            decompress(&buffer),
            Err(Error::Format(FormatError::LengthMismatch {
                expected: 2,
                actual: 3
            }))
        ));
    }

    #[test]
    fn test_unknown_symbol() {
        let codes = encode(b"ab").unwrap().codes;
        let result = encode_payload(b"abc", &codes);
        assert!(matches!(
            result,
            Err(Error::Huffman(HuffmanError::UnknownSymbol(b'c')))
        ));
    }
}

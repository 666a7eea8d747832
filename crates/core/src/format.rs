//! Compressed buffer header serialization and parsing.
//!
//! # Buffer Format
//!
//! ```text
//! +----------------------+
//! | symbols - 1 (1)      |  u8, 1..=256 distinct symbols
//! +----------------------+
//! | padding bits (1)     |  u8, 0..=7 zero bits at the end of the payload
//! +----------------------+
//! | symbol (1)           |  repeated once per distinct symbol,
//! | frequency (2)        |  u16 big-endian, in first-occurrence order
//! +----------------------+
//! | payload              |  packed codes, MSB-first
//! | (variable)           |
//! +----------------------+
//! ```
//!
//! An empty input is stored as an empty buffer: byte 0 cannot express zero
//! symbols, so no header is written at all.

use crate::error::{Error, FormatError, HuffmanError, Result};
use crate::frequency::FrequencyTable;

/// Fixed bytes before the symbol entries.
pub const PREFIX_LEN: usize = 2;

/// Bytes per `(symbol, frequency)` entry.
pub const ENTRY_LEN: usize = 3;

/// Largest frequency a header entry can hold.
pub const MAX_FREQUENCY: u64 = u16::MAX as u64;

/// Header length for a table with `symbols` entries.
pub fn header_len(symbols: usize) -> usize {
    PREFIX_LEN + symbols * ENTRY_LEN
}

/// A parsed header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub table: FrequencyTable,
    pub padding_bits: u8,
}

impl Header {
    /// Bytes this header occupies in the buffer.
    pub fn encoded_len(&self) -> usize {
        header_len(self.table.len())
    }
}

/// Reject tables the 16-bit frequency field cannot describe.
///
/// # Errors
/// `Error::FrequencyOverflow` naming the first symbol above 65535.
pub fn check_frequencies(table: &FrequencyTable) -> Result<()> {
    match table.iter().find(|e| e.count > MAX_FREQUENCY) {
        Some(entry) => Err(Error::FrequencyOverflow {
            symbol: entry.symbol,
            count: entry.count,
        }),
        None => Ok(()),
    }
}

/// Append the header for `table` to `out`.
///
/// # Errors
/// - `HuffmanError::EmptyFrequencyTable` for an empty table
/// - `Error::FrequencyOverflow` if any count exceeds 65535
/// - `FormatError::InvalidPadding` if `padding_bits > 7`
pub fn write_header(table: &FrequencyTable, padding_bits: u8, out: &mut Vec<u8>) -> Result<()> {
    if table.is_empty() {
        return Err(HuffmanError::EmptyFrequencyTable.into());
    }
    if padding_bits > 7 {
        return Err(FormatError::InvalidPadding(padding_bits).into());
    }
    check_frequencies(table)?;

    out.reserve(header_len(table.len()));
    out.push((table.len() - 1) as u8);
    out.push(padding_bits);
    for entry in table.iter() {
        out.push(entry.symbol);
        out.extend_from_slice(&(entry.count as u16).to_be_bytes());
    }
    Ok(())
}

/// Parse the header at the start of `bytes`, returning it with the payload.
///
/// # Errors
/// - `FormatError::HeaderTooShort` if fewer than two bytes are present
/// - `FormatError::InvalidPadding` if byte 1 exceeds 7
/// - `FormatError::HeaderTruncated` if byte 0 names more entries than fit
/// - `FormatError::DuplicateSymbol` / `FormatError::ZeroFrequency` for bad entries
pub fn parse_header(bytes: &[u8]) -> Result<(Header, &[u8])> {
    if bytes.len() < PREFIX_LEN {
        return Err(FormatError::HeaderTooShort {
            required: PREFIX_LEN,
            actual: bytes.len(),
        }
        .into());
    }

    let symbols = bytes[0] as usize + 1;
    let padding_bits = bytes[1];
    if padding_bits > 7 {
        return Err(FormatError::InvalidPadding(padding_bits).into());
    }

    let required = header_len(symbols);
    if bytes.len() < required {
        return Err(FormatError::HeaderTruncated {
            symbols,
            required,
            actual: bytes.len(),
        }
        .into());
    }

    let entries = bytes[PREFIX_LEN..required]
        .chunks_exact(ENTRY_LEN)
        .map(|entry| (entry[0], u16::from_be_bytes([entry[1], entry[2]]) as u64));
    let table = FrequencyTable::from_entries(entries)?;

    Ok((
        Header {
            table,
            padding_bits,
        },
        &bytes[required..],
    ))
}

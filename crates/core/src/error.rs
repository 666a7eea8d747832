//! Error types for the huffpack codec.
//!
//! Every fallible operation returns a structured error instead of panicking.
//! Failures are terminal for the call that produced them: nothing is retried
//! and no partial output is returned.

use thiserror::Error;

/// Top-level error type for all codec operations.
///
/// Each variant corresponds to a failure domain:
/// - Format: a compressed buffer whose header or payload is inconsistent
/// - Huffman: tree or code table construction failures
/// - Bit I/O: packing or unpacking the payload bit-stream
/// - Frequency overflow: an input the 16-bit header field cannot describe
#[derive(Debug, Error)]
pub enum Error {
    /// Compressed buffer is malformed
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Tree or code table construction failed
    #[error("huffman error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Bit-stream packing or unpacking failed
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// A symbol occurs more often than the header can record
    #[error("symbol {symbol:#04x} occurs {count} times, above the format limit of 65535")]
    FrequencyOverflow { symbol: u8, count: u64 },
}

/// Errors raised while parsing or decoding a compressed buffer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// Buffer is non-empty but shorter than the two fixed header bytes
    #[error("header too short: need at least {required} bytes, got {actual}")]
    HeaderTooShort { required: usize, actual: usize },

    /// Symbol count in byte 0 needs more triplets than the buffer holds
    #[error("header declares {symbols} symbols ({required} bytes), buffer has {actual}")]
    HeaderTruncated {
        symbols: usize,
        required: usize,
        actual: usize,
    },

    /// Padding count outside 0..=7
    #[error("invalid padding bit count {0}, expected 0..=7")]
    InvalidPadding(u8),

    /// Same symbol listed twice in the header
    #[error("symbol {0:#04x} appears more than once in the header")]
    DuplicateSymbol(u8),

    /// Header entry with a zero frequency
    #[error("symbol {0:#04x} has a zero frequency")]
    ZeroFrequency(u8),

    /// Single-symbol buffers carry no payload
    #[error("single-symbol stream carries {payload_bytes} payload bytes and {padding_bits} padding bits")]
    UnexpectedPayload {
        payload_bytes: usize,
        padding_bits: u8,
    },

    /// Padding count in byte 1 is longer than the payload that follows
    #[error("padding of {padding_bits} bits exceeds a payload of {payload_bytes} bytes")]
    PaddingExceedsPayload {
        padding_bits: u8,
        payload_bytes: usize,
    },

    /// Bit-stream ended part way through a code
    #[error("bit-stream ends inside a code after {consumed} bits")]
    IncompleteCode { consumed: u64 },

    /// Decoded symbol count disagrees with the header frequencies
    #[error("decoded length mismatch: header says {expected}, got {actual}")]
    LengthMismatch { expected: u64, actual: u64 },
}

/// Huffman tree and code table errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HuffmanError {
    /// No symbols to build a tree from
    #[error("empty frequency table: cannot build a tree")]
    EmptyFrequencyTable,

    /// Code deeper than the 64-bit code register
    #[error("code length {length} exceeds maximum 64")]
    CodeTooLong { length: usize },

    /// Input byte missing from the code table
    #[error("symbol {0:#04x} has no code")]
    UnknownSymbol(u8),
}

/// Bit-level I/O errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitIoError {
    /// More than 64 bits requested in one write
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),

    /// Padding larger than the stream it trims
    #[error("padding of {padding} bits exceeds a {available}-bit stream")]
    PaddingExceedsStream { padding: u8, available: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;

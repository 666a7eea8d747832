//! huffpack-core: byte-oriented Huffman compression
//!
//! This library compresses a byte buffer into a self-describing buffer and
//! restores it exactly:
//! - Counts symbols in first-occurrence order
//! - Builds a Huffman tree with a fixed, reproducible tie-break
//! - Packs each byte's code MSB-first behind a small header
//! - Rebuilds the same tree from the header alone to decode
//!
//! # Architecture
//!
//! - `frequency`: ordered symbol counts
//! - `tree`: arena-based Huffman tree
//! - `codes`: prefix-free code table
//! - `bitio`: bit packing and unpacking
//! - `format`: header layout
//! - `codec`: `compress` / `decompress`
//! - `metrics`: entropy, code efficiency, run statistics
//!
//! # Example
//! ```
//! let packed = huffpack_core::compress(b"AAAABBBCCD")?;
//! assert_eq!(huffpack_core::decompress(&packed)?, b"AAAABBBCCD");
//! # Ok::<(), huffpack_core::Error>(())
//! ```
//!
//! Every call builds its own tables from scratch and shares no state, so
//! independent buffers can be processed on independent threads.

pub mod bitio;
pub mod codec;
pub mod codes;
pub mod error;
pub mod format;
pub mod frequency;
pub mod metrics;
pub mod tree;

// Re-export commonly used types
pub use codec::{compress, decompress, encode, Encoded};
pub use codes::{Code, CodeTable};
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use metrics::{CodeStats, RunMetrics};
pub use tree::HuffmanTree;

//! Coding statistics and run metrics.
//!
//! [`CodeStats`] measures how close a code table comes to the source entropy:
//! - entropy `H = -Σ p(s)·log2 p(s)`
//! - mean code length `L = Σ p(s)·len(code(s))`
//! - efficiency `H / L` (at most 1 for a Huffman code)
//! - redundancy `1 - efficiency`
//!
//! These values are informational; nothing in the codec depends on them.
//!
//! [`RunMetrics`] tracks sizes and timing for one compress or decompress run.
//! It is a plain single-threaded struct updated explicitly by the caller.

use std::time::{Duration, Instant};

use crate::codes::CodeTable;
use crate::frequency::FrequencyTable;

/// Information-theoretic summary of a frequency table and its codes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodeStats {
    /// Bits per symbol of the source
    pub entropy: f64,
    /// Average code length in bits per symbol
    pub mean_length: f64,
    pub efficiency: f64,
    pub redundancy: f64,
}

impl CodeStats {
    /// Compute statistics for `table` coded with `codes`.
    ///
    /// An empty table yields all zeros. A single-symbol table has zero entropy
    /// and zero mean length; its efficiency is reported as 1.
    pub fn compute(table: &FrequencyTable, codes: &CodeTable) -> Self {
        let total = table.total();
        if total == 0 {
            return Self {
                entropy: 0.0,
                mean_length: 0.0,
                efficiency: 0.0,
                redundancy: 0.0,
            };
        }

        let total = total as f64;
        let mut entropy = 0.0;
        let mut mean_length = 0.0;
        for entry in table.iter() {
            let p = entry.count as f64 / total;
            entropy -= p * p.log2();
            let len = codes.get(entry.symbol).map_or(0, |c| c.len);
            mean_length += p * len as f64;
        }

        let efficiency = if mean_length == 0.0 {
            1.0
        } else {
            entropy / mean_length
        };

        Self {
            entropy,
            mean_length,
            efficiency,
            redundancy: 1.0 - efficiency,
        }
    }

    /// Print the statistics to stdout.
    pub fn print(&self) {
        println!("=== Coding ===");
        println!("Entropy:     {:.3} bits/symbol", self.entropy);
        println!("Mean length: {:.3} bits/symbol", self.mean_length);
        println!("Efficiency:  {:.3}", self.efficiency);
        println!("Redundancy:  {:.3}", self.redundancy);
        println!();
    }
}

/// Sizes and timing of a single run.
#[derive(Debug, Clone)]
pub struct RunMetrics {
    pub start_time: Instant,
    /// Set by [`RunMetrics::complete`]
    pub end_time: Option<Instant>,

    /// Uncompressed size in bytes
    pub original_bytes: u64,
    /// Compressed size in bytes, header included
    pub compressed_bytes: u64,

    pub unique_symbols: u64,
    pub header_bytes: u64,
    pub payload_bits: u64,
    pub padding_bits: u64,
}

impl RunMetrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            original_bytes: 0,
            compressed_bytes: 0,
            unique_symbols: 0,
            header_bytes: 0,
            payload_bits: 0,
            padding_bits: 0,
        }
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Total duration, or time elapsed so far if not complete.
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Original size over compressed size (`N` in `N:1`).
    ///
    /// Returns 0.0 if nothing was compressed.
    pub fn compression_ratio(&self) -> f64 {
        if self.compressed_bytes == 0 {
            0.0
        } else {
            self.original_bytes as f64 / self.compressed_bytes as f64
        }
    }

    /// Fraction of the original size saved.
    pub fn space_saving(&self) -> f64 {
        if self.original_bytes == 0 {
            0.0
        } else {
            1.0 - self.compressed_bytes as f64 / self.original_bytes as f64
        }
    }

    /// Original bytes processed per second.
    pub fn throughput_bps(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            self.original_bytes as f64 / duration_secs
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("=== Summary ===");
        println!("Time:       {:.3} ms", self.duration().as_secs_f64() * 1000.0);
        println!("Original:   {} bytes", self.original_bytes);
        println!(
            "Compressed: {} bytes ({} header, {} payload bits, {} padding bits)",
            self.compressed_bytes, self.header_bytes, self.payload_bits, self.padding_bits
        );
        println!("Symbols:    {}", self.unique_symbols);
        println!("Ratio:      {:.3}:1", self.compression_ratio());
        println!("Saving:     {:.1}%", self.space_saving() * 100.0);
        println!("Throughput: {:.2} MB/s", self.throughput_bps() / 1_000_000.0);
        println!();
    }

    /// Export metrics as `key=value` lines.
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             original_bytes={}\n\
             compressed_bytes={}\n\
             unique_symbols={}\n\
             header_bytes={}\n\
             payload_bits={}\n\
             padding_bits={}\n\
             compression_ratio={:.4}\n",
            self.duration().as_millis(),
            self.original_bytes,
            self.compressed_bytes,
            self.unique_symbols,
            self.header_bytes,
            self.payload_bits,
            self.padding_bits,
            self.compression_ratio(),
        )
    }
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}

//! Symbol frequency counting.
//!
//! A [`FrequencyTable`] lists every distinct byte of an input together with
//! its occurrence count, in the order each byte was first seen. That order is
//! written verbatim into the compressed header and seeds tree construction on
//! both the compress and decompress side, so two tables with the same counts
//! in a different order produce different trees.

use crate::error::{FormatError, Result};

/// Slot value for a symbol that has not been seen yet.
const ABSENT: u16 = u16::MAX;

/// One entry of a frequency table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolCount {
    pub symbol: u8,
    pub count: u64,
}

/// Ordered mapping from byte value to occurrence count.
///
/// # Invariants
/// - each symbol appears at most once
/// - every count is at least 1
/// - entries are in first-occurrence order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<SymbolCount>,
    /// Position of each symbol in `entries`, or `ABSENT`
    slots: [u16; 256],
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            slots: [ABSENT; 256],
        }
    }

    /// Count every byte of `bytes`, keeping first-occurrence order.
    ///
    /// Empty input yields an empty table.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in bytes {
            table.record(byte);
        }
        table
    }

    /// Rebuild a table from `(symbol, count)` pairs in the given order.
    ///
    /// This is the decoder's path: the pairs come from a header, so duplicates
    /// and zero counts are rejected as format errors.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut table = Self::new();
        for (symbol, count) in entries {
            if count == 0 {
                return Err(FormatError::ZeroFrequency(symbol).into());
            }
            if table.slots[symbol as usize] != ABSENT {
                return Err(FormatError::DuplicateSymbol(symbol).into());
            }
            table.slots[symbol as usize] = table.entries.len() as u16;
            table.entries.push(SymbolCount { symbol, count });
        }
        Ok(table)
    }

    fn record(&mut self, byte: u8) {
        match self.slots[byte as usize] {
            ABSENT => {
                self.slots[byte as usize] = self.entries.len() as u16;
                self.entries.push(SymbolCount {
                    symbol: byte,
                    count: 1,
                });
            }
            slot => self.entries[slot as usize].count += 1,
        }
    }

    /// Count for `symbol`, if it occurs.
    pub fn get(&self, symbol: u8) -> Option<u64> {
        match self.slots[symbol as usize] {
            ABSENT => None,
            slot => Some(self.entries[slot as usize].count),
        }
    }

    /// Entries in table order.
    pub fn entries(&self) -> &[SymbolCount] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolCount> {
        self.entries.iter()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the length of the counted input.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

//! Code table generation.
//!
//! Walking the tree from the root, a left edge appends `0` and a right edge
//! appends `1`; each leaf's accumulated path is its code. The result is
//! prefix-free because only leaves carry codes.
//!
//! A tree that is a single leaf gives that leaf the empty code. Encoding such
//! an input produces zero payload bits, and the decoder reproduces it from the
//! header count alone (see [`crate::codec`]).

use std::fmt;

use crate::error::{HuffmanError, Result};
use crate::tree::{HuffmanTree, NodeId, NodeKind};

/// Longest code the 64-bit register can hold.
pub const MAX_CODE_LEN: usize = 64;

/// A code word, right-aligned in `bits`, first bit most significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Code {
    pub bits: u64,
    pub len: u8,
}

impl Code {
    /// Render the code as a string of `0` and `1` characters.
    pub fn to_bit_string(&self) -> String {
        (0..self.len)
            .rev()
            .map(|i| if (self.bits >> i) & 1 == 1 { '1' } else { '0' })
            .collect()
    }

    /// Whether `self` is a prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len > other.len {
            return false;
        }
        let shift = other.len - self.len;
        // shift can be 64 when self is empty
        other.bits.checked_shr(shift as u32).unwrap_or(0) == self.bits
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bit_string())
    }
}

/// Mapping from byte value to its code, indexed by symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; 256],
}

impl CodeTable {
    /// Table with no codes, used for empty input.
    pub fn empty() -> Self {
        Self {
            codes: [None; 256],
        }
    }

    /// Derive codes for every leaf of `tree`.
    ///
    /// # Errors
    /// `HuffmanError::CodeTooLong` if a leaf sits deeper than 64 edges.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut table = Self::empty();
        table.assign(tree, tree.root(), Code::default())?;
        Ok(table)
    }

    fn assign(&mut self, tree: &HuffmanTree, id: NodeId, code: Code) -> Result<()> {
        match tree.node(id).kind {
            NodeKind::Leaf { symbol } => {
                self.codes[symbol as usize] = Some(code);
            }
            NodeKind::Internal { left, right } => {
                let len = code.len as usize + 1;
                if len > MAX_CODE_LEN {
                    return Err(HuffmanError::CodeTooLong { length: len }.into());
                }
                let len = len as u8;
                self.assign(tree, left, Code { bits: code.bits << 1, len })?;
                self.assign(tree, right, Code { bits: (code.bits << 1) | 1, len })?;
            }
        }
        Ok(())
    }

    /// Code for `symbol`, if it occurred in the input.
    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.map(|c| (symbol as u8, c)))
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries ordered by code length, then by code value.
    pub fn sorted_by_length(&self) -> Vec<(u8, Code)> {
        let mut entries: Vec<(u8, Code)> = self.iter().collect();
        entries.sort_by_key(|&(_, code)| (code.len, code.bits));
        entries
    }

    /// Check that no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let entries: Vec<(u8, Code)> = self.iter().collect();
        entries.iter().enumerate().all(|(i, (_, a))| {
            entries
                .iter()
                .enumerate()
                .all(|(j, (_, b))| i == j || !a.is_prefix_of(b))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;

    fn codes_for(input: &[u8]) -> CodeTable {
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(input)).unwrap();
        CodeTable::from_tree(&tree).unwrap()
    }

    #[test]
    fn test_known_codes() {
        let codes = codes_for(b"AAAABBBCCD");
        assert_eq!(codes.get(b'A').unwrap().to_bit_string(), "0");
        assert_eq!(codes.get(b'B').unwrap().to_bit_string(), "10");
        assert_eq!(codes.get(b'D').unwrap().to_bit_string(), "110");
        assert_eq!(codes.get(b'C').unwrap().to_bit_string(), "111");
        assert_eq!(codes.len(), 4);
        assert!(codes.is_prefix_free());
    }

    #[test]
    fn test_single_symbol_has_empty_code() {
        let codes = codes_for(b"ZZZZZ");
        let code = codes.get(b'Z').unwrap();
        assert_eq!(code.len, 0);
        assert_eq!(code.to_bit_string(), "");
        assert_eq!(codes.get(b'A'), None);
    }

    #[test]
    fn test_full_alphabet_is_prefix_free() {
        let input: Vec<u8> = (0..=255u8).flat_map(|b| vec![b; 1 + (b as usize % 7)]).collect();
        let codes = codes_for(&input);
        assert_eq!(codes.len(), 256);
        assert!(codes.is_prefix_free());
    }

    #[test]
    fn test_is_prefix_of() {
        let a = Code { bits: 0b10, len: 2 };
        let b = Code { bits: 0b101, len: 3 };
        let c = Code { bits: 0b111, len: 3 };
        assert!(a.is_prefix_of(&b));
        assert!(!a.is_prefix_of(&c));
        assert!(!b.is_prefix_of(&a));
        assert!(Code::default().is_prefix_of(&c));
    }

    #[test]
    fn test_sorted_by_length() {
        let codes = codes_for(b"AAAABBBCCD");
        let order: Vec<u8> = codes.sorted_by_length().iter().map(|&(s, _)| s).collect();
        assert_eq!(order, b"ABDC");
    }

    #[test]
    fn test_display() {
        let code = Code { bits: 0b0011, len: 4 };
        assert_eq!(code.to_string(), "0011");
    }
}

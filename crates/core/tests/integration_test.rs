//! Integration tests for the compress / decompress pipeline.
//!
//! These exercise the public API end to end: input -> compress -> buffer ->
//! decompress -> output, plus header-level checks on the produced buffer.

use huffpack_core::{
    codec::{decode_payload, encode_payload},
    compress, decompress, encode,
    error::{Error, FormatError},
    format::parse_header,
    CodeTable, FrequencyTable, HuffmanTree,
};

/// Four symbols with distinct weights round-trip exactly.
#[test]
fn test_weighted_text_round_trip() {
    let input = b"AAAABBBCCD";
    let packed = compress(input).expect("compression failed");
    let restored = decompress(&packed).expect("decompression failed");
    assert_eq!(restored, input);
}

/// Empty input gives an empty buffer and back.
#[test]
fn test_empty_input() {
    let packed = compress(b"").expect("compression failed");
    assert!(packed.is_empty());
    assert!(decompress(&packed).expect("decompression failed").is_empty());
}

/// One repeated byte survives even though its code is empty.
#[test]
fn test_single_repeated_byte() {
    let input = b"ZZZZZ";
    let packed = compress(input).expect("compression failed");
    assert_eq!(packed[0], 0, "one symbol is stored as count - 1 = 0");
    assert_eq!(packed.len(), 5, "no payload for a single symbol");
    assert_eq!(decompress(&packed).unwrap(), input);
}

/// Single byte input.
#[test]
fn test_one_byte() {
    let packed = compress(b"A").unwrap();
    assert_eq!(decompress(&packed).unwrap(), b"A");
}

/// Same alphabet, different weights: the codes must differ.
#[test]
fn test_codes_follow_frequencies() {
    let first = encode(b"aaaabbc").unwrap();
    let second = encode(b"abbbbcc").unwrap();

    let lengths = |codes: &CodeTable| -> Vec<u8> {
        [b'a', b'b', b'c']
            .iter()
            .map(|&s| codes.get(s).unwrap().len)
            .collect()
    };
    assert_eq!(lengths(&first.codes), vec![1, 2, 2]);
    assert_eq!(lengths(&second.codes), vec![2, 1, 2]);
    assert_ne!(first.bytes, second.bytes);
}

/// A symbol count larger than the buffer can hold is a format error.
#[test]
fn test_symbol_count_beyond_buffer() {
    let mut packed = compress(b"AAAABBBCCD").unwrap();
    packed[0] = 200;
    assert!(matches!(
        decompress(&packed),
        Err(Error::Format(FormatError::HeaderTruncated { symbols: 201, .. }))
    ));
}

/// A symbol count smaller than written shifts entries into the payload.
#[test]
fn test_symbol_count_below_written() {
    let mut packed = compress(b"AAAABBBCCD").unwrap();
    packed[0] = 2;
    assert!(matches!(decompress(&packed), Err(Error::Format(_))));
}

/// A truncated header is rejected.
#[test]
fn test_one_byte_buffer() {
    assert!(matches!(
        decompress(&[3]),
        Err(Error::Format(FormatError::HeaderTooShort { .. }))
    ));
}

/// Compressing twice yields identical output.
#[test]
fn test_deterministic_output() {
    let input = b"The quick brown fox jumps over the lazy dog. ".repeat(50);
    assert_eq!(compress(&input).unwrap(), compress(&input).unwrap());
}

/// All 256 byte values in one input.
#[test]
fn test_all_symbols() {
    let input: Vec<u8> = (0..=255u8).cycle().take(256 * 3 + 17).collect();
    let packed = compress(&input).unwrap();
    assert_eq!(packed[0], 255);

    let (header, _) = parse_header(&packed).unwrap();
    assert_eq!(header.table.len(), 256);
    assert_eq!(decompress(&packed).unwrap(), input);
}

/// The largest count the header can carry.
#[test]
fn test_frequency_limit() {
    let mut input = vec![b'x'; 65535];
    input.push(b'y');
    let packed = compress(&input).unwrap();
    assert_eq!(decompress(&packed).unwrap(), input);

    input.push(b'x');
    assert!(matches!(
        compress(&input),
        Err(Error::FrequencyOverflow {
            symbol: b'x',
            count: 65536
        })
    ));
}

/// The header reflects the input's first-occurrence order.
#[test]
fn test_header_preserves_order() {
    let packed = compress(b"cabbage").unwrap();
    let (header, _) = parse_header(&packed).unwrap();
    let order: Vec<u8> = header.table.iter().map(|e| e.symbol).collect();
    assert_eq!(order, b"cabge");
}

/// The pure pipeline functions compose without the buffer format.
#[test]
fn test_pipeline_functions() {
    let input = b"mississippi river";
    let table = FrequencyTable::from_bytes(input);
    let tree = HuffmanTree::build(&table).unwrap();
    let codes = CodeTable::from_tree(&tree).unwrap();
    let packed = encode_payload(input, &codes).unwrap();

    let decoded = decode_payload(&tree, &packed.bytes, packed.padding_bits, table.total()).unwrap();
    assert_eq!(decoded, input);
}

/// Larger mixed data round-trips.
#[test]
fn test_large_text() {
    let input: Vec<u8> = (0..50_000u32)
        .map(|i| b"etaoin shrdlu"[(i * i % 13) as usize])
        .collect();
    let packed = compress(&input).unwrap();
    assert!(packed.len() < input.len());
    assert_eq!(decompress(&packed).unwrap(), input);
}

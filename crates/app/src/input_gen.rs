//! Sample input generation for verify mode.
//!
//! When `--verify` runs without an input file, a sample is generated from a
//! seed. It mixes segments with very different symbol statistics so the
//! coding report shows something interesting:
//! - runs of a single byte (few symbols, heavily skewed)
//! - English-like text from a small word list (moderate skew)
//! - short repeating patterns (flat distribution over a few symbols)
//! - uniform random bytes (close to 8 bits of entropy)

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Bytes per generated segment.
const SEGMENT_BYTES: usize = 4096;

const WORDS: &[&[u8]] = &[
    b"the", b"of", b"and", b"to", b"in", b"huffman", b"code", b"tree", b"bit", b"symbol",
    b"frequency", b"a", b"is", b"prefix", b"entropy", b"header",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Run,
    Text,
    Pattern,
    Noise,
}

impl Segment {
    fn pick(rng: &mut ChaCha8Rng) -> Self {
        match rng.gen_range(0..10) {
            0..=1 => Segment::Run,
            2..=5 => Segment::Text,
            6..=7 => Segment::Pattern,
            _ => Segment::Noise,
        }
    }
}

/// Generate `size` bytes of mixed sample data from `seed`.
pub fn generate_sample(seed: u64, size: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size);

    while data.len() < size {
        let len = (size - data.len()).min(SEGMENT_BYTES);
        let segment = Segment::pick(&mut rng);
        let start = data.len();

        match segment {
            Segment::Run => {
                let byte: u8 = rng.gen();
                data.resize(start + len, byte);
            }
            Segment::Text => {
                while data.len() < start + len {
                    if let Some(word) = WORDS.choose(&mut rng) {
                        data.extend_from_slice(word);
                    }
                    data.push(if rng.gen_ratio(1, 12) { b'\n' } else { b' ' });
                }
                data.truncate(start + len);
            }
            Segment::Pattern => {
                let pattern: Vec<u8> = (0..rng.gen_range(3..=24)).map(|_| rng.gen()).collect();
                data.extend(pattern.iter().cycle().take(len));
            }
            Segment::Noise => {
                data.extend((0..len).map(|_| rng.gen::<u8>()));
            }
        }
    }

    data
}

//! Seen-set implementations for frontier deduplication
//!
//! The frontier only needs a test-and-set operation, so large crawls can swap
//! the exact set for a fixed-size bloom filter without touching the frontier.

use std::collections::HashSet;

/// A set of URLs that have been enqueued at least once
pub trait SeenSet: Send {
    /// Records `url` and returns true if it was not seen before
    ///
    /// Check and insert happen in one call so a caller never observes a gap
    /// between them.
    fn insert(&mut self, url: &str) -> bool;

    /// Returns true if `url` has (probably) been recorded
    fn contains(&self, url: &str) -> bool;

    /// Number of successful inserts
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Exact in-memory seen set
#[derive(Debug, Default)]
pub struct ExactSeenSet {
    urls: HashSet<String>,
}

impl ExactSeenSet {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SeenSet for ExactSeenSet {
    fn insert(&mut self, url: &str) -> bool {
        if self.urls.contains(url) {
            return false;
        }
        self.urls.insert(url.to_string())
    }

    fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    fn len(&self) -> usize {
        self.urls.len()
    }
}

const BLOOM_HASH_SEEDS: [u64; 3] = [
    0x517c_c1b7_2722_0a95,
    0x6d0f_27bd_ceb7_b067,
    0x9e37_79b1_85eb_ca87,
];

/// Bounded seen set backed by a bloom filter
///
/// Memory stays at `words * 8` bytes however many URLs are recorded. A false
/// positive makes the frontier drop a URL it never visited; it can never cause
/// a URL to be enqueued twice.
#[derive(Debug)]
pub struct BloomSeenSet {
    words: Vec<u64>,
    inserted: usize,
}

impl BloomSeenSet {
    /// Creates an empty filter of `words` 64-bit words (at least one)
    pub fn new(words: usize) -> Self {
        Self {
            words: vec![0; words.max(1)],
            inserted: 0,
        }
    }

    fn bit_positions(&self, url: &str) -> [(usize, u64); 3] {
        let bit_count = self.words.len() * 64;
        BLOOM_HASH_SEEDS.map(|seed| {
            let idx = (bloom_hash(url.as_bytes(), seed) % bit_count as u64) as usize;
            (idx / 64, 1u64 << (idx % 64))
        })
    }
}

impl SeenSet for BloomSeenSet {
    fn insert(&mut self, url: &str) -> bool {
        let mut fresh = false;
        for (word, mask) in self.bit_positions(url) {
            if self.words[word] & mask == 0 {
                fresh = true;
                self.words[word] |= mask;
            }
        }
        if fresh {
            self.inserted += 1;
        }
        fresh
    }

    fn contains(&self, url: &str) -> bool {
        self.bit_positions(url)
            .iter()
            .all(|&(word, mask)| self.words[word] & mask != 0)
    }

    fn len(&self) -> usize {
        self.inserted
    }
}

fn bloom_hash(data: &[u8], seed: u64) -> u64 {
    let mut hash = seed ^ data.len() as u64;
    for &byte in data {
        hash ^= (byte as u64).wrapping_mul(0x1000_0000_01b3);
        hash = hash.rotate_left(13).wrapping_mul(0xff51_afd7_ed55_8ccd);
    }
    hash ^ (hash >> 33)
}

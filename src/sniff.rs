//! Delimiter detection for uploads with no declared format.
//!
//! Counts candidate separator bytes over a bounded prefix of the raw buffer
//! and picks the most frequent one. Candidates are tried in a fixed order so
//! ties resolve the same way on every run.

pub const DEFAULT_CANDIDATES: &[u8] = &[b',', b'\t', b';', b'|'];
pub const DEFAULT_PREFIX_LIMIT: usize = 1024;
pub const FALLBACK_DELIMITER: u8 = b',';

/// Tuning knobs for [`sniff_delimiter`]. Callers pass this explicitly so the
/// detector has no ambient configuration.
#[derive(Debug, Clone)]
pub struct SniffConfig {
    /// Candidate bytes, in tie-break priority order.
    pub candidates: Vec<u8>,
    /// Maximum number of leading bytes to inspect.
    pub prefix_limit: usize,
}

impl Default for SniffConfig {
    fn default() -> Self {
        Self {
            candidates: DEFAULT_CANDIDATES.to_vec(),
            prefix_limit: DEFAULT_PREFIX_LIMIT,
        }
    }
}

/// Guesses the field delimiter from a raw byte buffer.
///
/// Only the first `prefix_limit` bytes are examined. The candidate with the
/// strictly greatest occurrence count wins; on a tie the earliest candidate
/// in `config.candidates` is chosen. An empty buffer, or one containing no
/// candidate at all, yields [`FALLBACK_DELIMITER`].
pub fn sniff_delimiter(bytes: &[u8], config: &SniffConfig) -> u8 {
    let window = &bytes[..bytes.len().min(config.prefix_limit)];
    let mut best = FALLBACK_DELIMITER;
    let mut best_count = 0usize;
    for &candidate in &config.candidates {
        let count = window.iter().filter(|&&b| b == candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

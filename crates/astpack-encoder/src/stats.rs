//! Per-run encode statistics.

use astpack_format::MAX_VAR_U32_LEN;
use serde::Serialize;

/// Counters collected during one encode.
///
/// Owned by the caller and filled in as the passes run. Observability only:
/// nothing in the encoder reads these back.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EncodeStats {
    /// Object and array nodes visited by discovery.
    pub nodes_visited: u64,
    pub strings: usize,
    pub shapes: usize,
    /// Object identities before dedup.
    pub objects_discovered: usize,
    pub objects_merged: usize,
    /// Object entries written.
    pub objects: usize,
    pub arrays: usize,
    pub tag_bytes: u64,
    /// `varint_sizes[n - 1]` counts n-byte varints.
    pub varint_sizes: [u64; MAX_VAR_U32_LEN],
    pub bytes_written: usize,
}

impl EncodeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of discovered objects removed by dedup, in percent.
    pub fn merge_ratio(&self) -> f64 {
        if self.objects_discovered == 0 {
            return 0.0;
        }
        self.objects_merged as f64 / self.objects_discovered as f64 * 100.0
    }
}

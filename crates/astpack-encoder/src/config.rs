//! Encoder configuration.

use astpack_format::IntEncoding;
use serde::{Deserialize, Serialize};

/// Knobs for one encode run.
///
/// Deserializes from a partial document: missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncoderConfig {
    /// How varuint32 slots are written. Recorded in the artifact's format name.
    pub int_encoding: IntEncoding,
    /// Finalize tables in discovery order. Required for byte-identical output.
    pub ordered: bool,
    /// Merge structurally identical objects before serializing.
    pub dedup: bool,
    /// Log discovery progress every N nodes. 0 disables.
    pub progress_interval: u32,
    /// Hard cap on artifact size in bytes. `None` lets the buffer grow.
    pub max_size: Option<usize>,
}

impl EncoderConfig {
    /// Fixed buffer size of the original encoder (32 MiB).
    pub const LEGACY_MAX_SIZE: usize = 32 * 1024 * 1024;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_int_encoding(mut self, int_encoding: IntEncoding) -> Self {
        self.int_encoding = int_encoding;
        self
    }

    pub fn with_ordered(mut self, ordered: bool) -> Self {
        self.ordered = ordered;
        self
    }

    pub fn with_dedup(mut self, dedup: bool) -> Self {
        self.dedup = dedup;
        self
    }

    pub fn with_progress_interval(mut self, interval: u32) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn with_max_size(mut self, max_size: Option<usize>) -> Self {
        self.max_size = max_size;
        self
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            int_encoding: IntEncoding::Varint,
            ordered: true,
            dedup: true,
            progress_interval: 10_000,
            max_size: None,
        }
    }
}

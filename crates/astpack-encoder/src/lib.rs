//! astpack encoder: shape-aware, deduplicating binary encoding of syntax trees.
//!
//! The pipeline runs three passes over one [`AstModule`]:
//! - `discover` - intern every reachable string, object and array and
//!   collect the distinct field-name shapes
//! - `dedup` - merge structurally identical objects
//! - `emit` - finalize the tables and write the artifact
//!
//! [`encode`] runs all of them; [`build_module`] stops before emission for
//! tooling such as [`dump`].

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod classify;
pub mod config;
pub mod dedup;
pub mod discover;
pub mod dump;
pub mod emit;
pub mod error;
pub mod module;
pub mod shapes;
pub mod stats;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod dedup_tests;
#[cfg(test)]
mod shapes_tests;

use astpack_core::Tree;

pub use config::EncoderConfig;
pub use dedup::deduplicate_objects;
pub use discover::discover;
pub use dump::dump;
pub use emit::serialize_module;
pub use error::{EncodeError, Result};
pub use module::AstModule;
pub use shapes::{Shape, ShapeRegistry};
pub use stats::EncodeStats;

/// Discover `tree` and, if enabled, merge duplicate objects.
pub fn build_module<'t>(
    tree: &'t Tree,
    config: &EncoderConfig,
    stats: &mut EncodeStats,
) -> Result<AstModule<'t>> {
    let mut module = discover(tree, config, stats)?;
    if config.dedup {
        deduplicate_objects(&mut module, stats)?;
    }
    Ok(module)
}

/// Encode `tree` into an artifact, recording counters in `stats`.
pub fn encode_with_stats(
    tree: &Tree,
    config: &EncoderConfig,
    stats: &mut EncodeStats,
) -> Result<Vec<u8>> {
    let mut module = build_module(tree, config, stats)?;
    serialize_module(&mut module, config, stats)
}

/// Encode `tree` into an artifact.
pub fn encode(tree: &Tree, config: &EncoderConfig) -> Result<Vec<u8>> {
    encode_with_stats(tree, config, &mut EncodeStats::new())
}

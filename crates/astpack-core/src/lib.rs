#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for astpack.
//!
//! - [`tree`]: the input tree model handed over by a parser (arena of object
//!   and array nodes addressed by `NodeId`)
//! - [`interner`]: intern tables mapping distinct values to stable identities,
//!   with dedup redirects and final index assignment

pub mod interner;
pub mod tree;


pub use interner::{Identity, InternError, InternTable};
pub use tree::{Fields, Node, NodeId, Tree, Value};

//! Artifact emission from a discovered module.
//!
//! This module handles:
//! - Table finalization and the fixed-size header
//! - String, shape, object and array table bodies
//! - Tagged value encoding

mod emitter;
mod value;


pub use emitter::serialize_module;
pub(crate) use value::{References, write_value};

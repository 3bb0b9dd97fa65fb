#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Wire format primitives for astpack artifacts.
//!
//! This crate contains:
//! - Format constants (magic, format names, integer encoding mode)
//! - Value tags
//! - LEB128 varint helpers
//! - The append-only [`ByteWriter`]
//!
//! Artifact layout (all integers little-endian):
//!
//! ```text
//! magic           4 bytes
//! format_name     LEB128 length + UTF-8 (LEB128 in both integer modes)
//! root_index      u32
//! counts          u32 × 4 (strings, shapes, objects, arrays)
//! string_table    u32 count, then [varuint32 len + UTF-8] × count
//! shape_table     u32 count, then [varuint32 len + UTF-8] × count
//! object_table    u32 count, then per entry: varuint32 shape, tagged value × fields
//! array_table     u32 count, then per entry: varuint32 len, tagged value × len
//! ```

mod constants;
mod tag;
pub mod varint;
mod writer;

#[cfg(test)]
mod tag_tests;
#[cfg(test)]
mod varint_tests;

pub use constants::{FORMAT_NAME, FORMAT_NAME_FIXED32, IntEncoding, MAGIC};
pub use tag::Tag;
pub use varint::{MAX_VAR_U32_LEN, decode_var_u32, encode_var_u32, var_u32_len};
pub use writer::{ByteWriter, WriteError};

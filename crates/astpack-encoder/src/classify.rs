//! Value classification shared by every pass.

use astpack_core::{Fields, Node, NodeId, Tree, Value};
use astpack_format::Tag;

use crate::error::{EncodeError, Result};

/// A value resolved to its wire kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Classified<'a> {
    String(&'a str),
    Int32(i32),
    Float64(f64),
    Null,
    True,
    False,
    Object(NodeId, &'a Fields),
    Array(NodeId, &'a [Value]),
}

impl Classified<'_> {
    pub fn tag(&self) -> Tag {
        match self {
            Classified::String(_) => Tag::String,
            Classified::Int32(_) => Tag::Int32,
            Classified::Float64(_) => Tag::Float64,
            Classified::Null => Tag::Null,
            Classified::True => Tag::True,
            Classified::False => Tag::False,
            Classified::Object(..) => Tag::Object,
            Classified::Array(..) => Tag::Array,
        }
    }
}

/// Classify a value. Numbers that survive a round-trip through `i32` are
/// Int32 (so `-0.0` becomes `0`), every other number is Float64.
pub fn classify<'a>(tree: &'a Tree, value: &'a Value) -> Result<Classified<'a>> {
    Ok(match value {
        Value::Null => Classified::Null,
        Value::Bool(true) => Classified::True,
        Value::Bool(false) => Classified::False,
        Value::Number(n) => classify_number(*n),
        Value::String(s) => Classified::String(s),
        Value::Node(id) => match tree.node(*id) {
            Some(Node::Object(fields)) => Classified::Object(*id, fields),
            Some(Node::Array(items)) => Classified::Array(*id, items),
            None => return Err(EncodeError::unresolved("node", id)),
        },
        Value::Other(kind) => {
            return Err(EncodeError::UnsupportedValueKind { kind: kind.clone() });
        }
    })
}

pub fn classify_number(n: f64) -> Classified<'static> {
    let i = n as i32;
    if i as f64 == n {
        Classified::Int32(i)
    } else {
        Classified::Float64(n)
    }
}

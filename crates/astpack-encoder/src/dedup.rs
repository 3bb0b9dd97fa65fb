//! Structural deduplication of object identities.
//!
//! Each live object gets a content signature built from its shape and its field
//! values. Objects with equal signatures are merged onto the first one seen.
//!
//! Signatures are structural (nested objects contribute a key derived from their
//! own signature, never their identity), so merging one object cannot change
//! the signature of another and a single pass finds every merge.
//!
//! Cycles: a node whose signature is still being computed contributes a per-run
//! placeholder instead of recursing. This terminates, but two cyclic structures
//! that differ only in where the cycle closes may not merge.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::rc::Rc;

use astpack_core::{Identity, Node, NodeId, Tree, Value};

use crate::classify::{Classified, classify};
use crate::error::{EncodeError, Result};
use crate::module::AstModule;
use crate::shapes::ShapeRegistry;
use crate::stats::EncodeStats;

/// Merge structurally identical objects. Returns the number of merges.
pub fn deduplicate_objects(module: &mut AstModule<'_>, stats: &mut EncodeStats) -> Result<usize> {
    let original_count = module.objects.get_count();
    let live: Vec<(Identity, NodeId)> = module
        .objects
        .iter_live()
        .map(|(id, node)| (id, *node))
        .collect();

    let mut signer = Signer::new(module.tree(), &module.shapes);
    let mut canonical: Vec<(Identity, Identity)> = Vec::new();
    let mut by_signature: HashMap<Rc<str>, Identity> = HashMap::new();

    for (id, node) in live {
        let signature = signer.signature(node)?;
        match by_signature.entry(signature) {
            Entry::Occupied(first) => canonical.push((id, *first.get())),
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }
    }

    let count = canonical.len();
    for (id, existing) in canonical {
        module.objects.dedupe(id, existing)?;
    }

    stats.objects_merged = count;
    let percent = if original_count == 0 {
        0.0
    } else {
        count as f64 / original_count as f64 * 100.0
    };
    tracing::info!("deduped {count} object(s) ({percent:.1}%)");

    Ok(count)
}

/// Per-run numeric key of a scalar, a cycle placeholder or a child signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum TempKey {
    String(String),
    Int32(i32),
    Float64(u64),
    Bool(bool),
    Node(NodeId),
    Signature(Rc<str>),
}

enum Slot {
    InProgress,
    Done(Rc<str>),
}

/// A node whose signature is being assembled.
struct Frame<'a> {
    node: NodeId,
    values: Vec<&'a Value>,
    next: usize,
    tokens: Vec<String>,
}

/// Computes and memoizes content signatures.
///
/// Nodes are signed in post-order with an explicit stack, so nesting depth is
/// bounded by memory rather than by the thread stack. A nested object or array
/// contributes `[#key]`, where `key` is the per-run key of its signature text,
/// so each signature stays proportional to the node's own width.
pub(crate) struct Signer<'a> {
    tree: &'a Tree,
    shapes: &'a ShapeRegistry,
    temp_keys: HashMap<TempKey, u32>,
    signatures: HashMap<NodeId, Slot>,
}

impl<'a> Signer<'a> {
    pub(crate) fn new(tree: &'a Tree, shapes: &'a ShapeRegistry) -> Self {
        Self {
            tree,
            shapes,
            temp_keys: HashMap::new(),
            signatures: HashMap::new(),
        }
    }

    /// Signature of an object or array node.
    pub(crate) fn signature(&mut self, id: NodeId) -> Result<Rc<str>> {
        match self.signatures.get(&id) {
            Some(Slot::Done(signature)) => return Ok(signature.clone()),
            Some(Slot::InProgress) => return Ok(self.cycle_token(id).into()),
            None => {}
        }

        let mut stack = vec![self.open(id)?];
        loop {
            let Some(frame) = stack.last_mut() else {
                return Err(EncodeError::unresolved("node", id));
            };

            if let Some(&value) = frame.values.get(frame.next) {
                frame.next += 1;
                let token = match classify(self.tree, value)? {
                    Classified::Object(child, _) | Classified::Array(child, _) => {
                        match self.signatures.get(&child) {
                            Some(Slot::Done(signature)) => {
                                let signature = signature.clone();
                                self.child_token(signature)
                            }
                            Some(Slot::InProgress) => self.cycle_token(child),
                            None => {
                                let child_frame = self.open(child)?;
                                stack.push(child_frame);
                                continue;
                            }
                        }
                    }
                    Classified::Null => "n".to_string(),
                    Classified::String(s) => self.scalar_token(TempKey::String(s.to_owned())),
                    Classified::Int32(i) => self.scalar_token(TempKey::Int32(i)),
                    Classified::Float64(f) => self.scalar_token(TempKey::Float64(f.to_bits())),
                    Classified::True => self.scalar_token(TempKey::Bool(true)),
                    Classified::False => self.scalar_token(TempKey::Bool(false)),
                };
                push_token(&mut stack, token);
                continue;
            }

            let Some(done) = stack.pop() else {
                return Err(EncodeError::unresolved("node", id));
            };
            let signature: Rc<str> = done.tokens.join(" ").into();
            self.signatures.insert(done.node, Slot::Done(signature.clone()));

            if stack.is_empty() {
                return Ok(signature);
            }
            let token = self.child_token(signature);
            push_token(&mut stack, token);
        }
    }

    /// Mark `id` in progress and collect its values in emit order.
    fn open(&mut self, id: NodeId) -> Result<Frame<'a>> {
        let tree = self.tree;
        let node = tree
            .node(id)
            .ok_or_else(|| EncodeError::unresolved("node", id))?;

        let (header, values) = match node {
            Node::Object(fields) => {
                let shapes = self.shapes;
                let shape = shapes
                    .find_shape(fields)
                    .ok_or(EncodeError::UnknownShape { node: id })?;
                let values = shape
                    .keys()
                    .iter()
                    .map(|key| fields.get(key).ok_or(EncodeError::UnknownShape { node: id }))
                    .collect::<Result<Vec<_>>>()?;
                (format!("k{:x}", shape.index()), values)
            }
            Node::Array(items) => (format!("a{:x}", items.len()), items.iter().collect()),
        };

        self.signatures.insert(id, Slot::InProgress);
        let mut tokens = Vec::with_capacity(values.len() + 1);
        tokens.push(header);
        Ok(Frame {
            node: id,
            values,
            next: 0,
            tokens,
        })
    }

    fn child_token(&mut self, signature: Rc<str>) -> String {
        format!("[#{:x}]", self.temp_key(TempKey::Signature(signature)))
    }

    fn cycle_token(&mut self, id: NodeId) -> String {
        format!("c{:x}", self.temp_key(TempKey::Node(id)))
    }

    fn scalar_token(&mut self, key: TempKey) -> String {
        format!("{:x}", self.temp_key(key))
    }

    fn temp_key(&mut self, key: TempKey) -> u32 {
        let next = self.temp_keys.len() as u32;
        *self.temp_keys.entry(key).or_insert(next)
    }
}

fn push_token(stack: &mut [Frame<'_>], token: String) {
    if let Some(frame) = stack.last_mut() {
        frame.tokens.push(token);
    }
}

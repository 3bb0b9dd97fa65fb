//! Tree discovery: intern every reachable value and collect shapes.

use std::collections::HashSet;

use astpack_core::{Node, NodeId, Tree, Value};

use crate::classify::{Classified, classify};
use crate::config::EncoderConfig;
use crate::error::{EncodeError, Result};
use crate::module::AstModule;
use crate::stats::EncodeStats;

/// Walk `tree` from its root and build a module.
///
/// Every node is visited once (tracked by `NodeId`, so shared subtrees and
/// cycles are fine). A node's children are interned before the node itself,
/// then visited depth-first in field order.
pub fn discover<'t>(
    tree: &'t Tree,
    config: &EncoderConfig,
    stats: &mut EncodeStats,
) -> Result<AstModule<'t>> {
    let root = root_object(tree)?;
    let mut module = AstModule::new(tree);

    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut stack = vec![root];
    visited.insert(root);
    let mut walked: u64 = 0;

    while let Some(id) = stack.pop() {
        let node = tree
            .node(id)
            .ok_or_else(|| EncodeError::unresolved("node", id))?;

        if let Node::Object(fields) = node {
            module.shapes.find_or_create_shape(fields);
        }

        let mut pending = Vec::new();
        for value in tree.children(id) {
            match classify(tree, value)? {
                Classified::String(s) => {
                    if !module.strings.contains(s) {
                        module.strings.add(s.to_owned());
                    }
                }
                Classified::Object(child, _) => {
                    module.objects.add(child);
                    if visited.insert(child) {
                        pending.push(child);
                    }
                }
                Classified::Array(child, _) => {
                    module.arrays.add(child);
                    if visited.insert(child) {
                        pending.push(child);
                    }
                }
                Classified::Int32(_)
                | Classified::Float64(_)
                | Classified::Null
                | Classified::True
                | Classified::False => {}
            }
        }

        match node {
            Node::Object(_) => module.objects.add(id),
            Node::Array(_) => module.arrays.add(id),
        };
        stack.extend(pending.into_iter().rev());

        walked += 1;
        if config.progress_interval != 0 && walked % config.progress_interval as u64 == 0 {
            tracing::info!("scanned {walked} nodes");
        }
    }

    module.root = module.objects.get_id(&root);

    stats.nodes_visited = walked;
    stats.strings = module.strings.get_count();
    stats.shapes = module.shapes.len();
    stats.objects_discovered = module.objects.get_count();
    stats.arrays = module.arrays.get_count();

    tracing::debug!(
        nodes = walked,
        strings = stats.strings,
        shapes = stats.shapes,
        objects = stats.objects_discovered,
        arrays = stats.arrays,
        "discovery finished"
    );

    Ok(module)
}

fn root_object(tree: &Tree) -> Result<NodeId> {
    let found = match tree.root() {
        None => "nothing".to_string(),
        Some(Value::Node(id)) => match tree.node(*id) {
            Some(Node::Object(_)) => return Ok(*id),
            Some(node) => node.kind_name().to_string(),
            None => return Err(EncodeError::unresolved("node", id)),
        },
        Some(value) => classify(tree, value)?.tag().name().to_string(),
    };
    Err(EncodeError::InvalidRoot { found })
}

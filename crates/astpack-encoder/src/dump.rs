//! Human-readable module dump for debugging.
//!
//! Lists every table in final index order, using the same indices the
//! artifact would carry:
//!
//! ```text
//! root O0
//! strings (1)
//!   S0 "x"
//! shapes (1)
//!   K0 ["a","b"]
//! objects (1)
//!   O0 K0 { a: 1, b: S0 }
//! arrays (0)
//! ```

use astpack_core::{Identity, InternTable, Node, NodeId, Tree, Value};

use crate::classify::{Classified, classify};
use crate::error::{EncodeError, Result};
use crate::module::AstModule;

/// Finalize `module` and render its tables.
pub fn dump(module: &mut AstModule<'_>, ordered: bool) -> Result<String> {
    let order = module.finalize(ordered);
    let ctx = DumpContext {
        tree: module.tree(),
        module,
    };

    let mut lines: Vec<String> = Vec::new();

    let root = match module.root().and_then(|id| module.objects().index_of(id)) {
        Some(index) => format!("O{index}"),
        None => "-".to_string(),
    };
    lines.push(format!("root {root}"));

    lines.push(format!("strings ({})", order.strings.len()));
    for (index, &id) in order.strings.iter().enumerate() {
        let text = module
            .strings()
            .get_value(id)
            .ok_or_else(|| EncodeError::unresolved(module.strings().name(), id))?;
        lines.push(format!("  S{index} {text:?}"));
    }

    lines.push(format!("shapes ({})", module.shapes().len()));
    for shape in module.shapes().iter() {
        lines.push(format!("  K{} {}", shape.index(), shape.canonical_text()));
    }

    lines.push(format!("objects ({})", order.objects.len()));
    for (index, &id) in order.objects.iter().enumerate() {
        let node = table_node(module.objects(), id)?;
        let Some(Node::Object(fields)) = ctx.tree.node(node) else {
            return Err(EncodeError::unresolved("node", node));
        };
        let shape = module
            .shapes()
            .find_shape(fields)
            .ok_or(EncodeError::UnknownShape { node })?;

        let mut rendered = Vec::with_capacity(shape.len());
        for key in shape.keys() {
            let value = fields
                .get(key)
                .ok_or(EncodeError::UnknownShape { node })?;
            rendered.push(format!("{key}: {}", ctx.format_value(value)?));
        }
        let body = if rendered.is_empty() {
            "{}".to_string()
        } else {
            format!("{{ {} }}", rendered.join(", "))
        };
        lines.push(format!("  O{index} K{} {body}", shape.index()));
    }

    lines.push(format!("arrays ({})", order.arrays.len()));
    for (index, &id) in order.arrays.iter().enumerate() {
        let node = table_node(module.arrays(), id)?;
        let Some(Node::Array(items)) = ctx.tree.node(node) else {
            return Err(EncodeError::unresolved("node", node));
        };
        let rendered = items
            .iter()
            .map(|value| ctx.format_value(value))
            .collect::<Result<Vec<_>>>()?;
        lines.push(format!("  A{index} [{}]", rendered.join(", ")));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}

struct DumpContext<'a, 't> {
    tree: &'t Tree,
    module: &'a AstModule<'t>,
}

impl DumpContext<'_, '_> {
    fn format_value(&self, value: &Value) -> Result<String> {
        Ok(match classify(self.tree, value)? {
            Classified::String(s) => {
                let index = self
                    .module
                    .strings()
                    .index_of_value(s)
                    .ok_or_else(|| EncodeError::unresolved(self.module.strings().name(), s))?;
                format!("S{index}")
            }
            Classified::Int32(i) => i.to_string(),
            Classified::Float64(f) => format!("{f:?}"),
            Classified::Null => "null".to_string(),
            Classified::True => "true".to_string(),
            Classified::False => "false".to_string(),
            Classified::Object(id, _) => {
                let index = self
                    .module
                    .objects()
                    .index_of_value(&id)
                    .ok_or_else(|| EncodeError::unresolved(self.module.objects().name(), id))?;
                format!("O{index}")
            }
            Classified::Array(id, _) => {
                let index = self
                    .module
                    .arrays()
                    .index_of_value(&id)
                    .ok_or_else(|| EncodeError::unresolved(self.module.arrays().name(), id))?;
                format!("A{index}")
            }
        })
    }
}

fn table_node(table: &InternTable<NodeId>, id: Identity) -> Result<NodeId> {
    table
        .get_value(id)
        .copied()
        .ok_or_else(|| EncodeError::unresolved(table.name(), id))
}

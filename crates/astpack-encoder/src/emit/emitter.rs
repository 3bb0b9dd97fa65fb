//! Core artifact emission logic.

use astpack_core::{Identity, InternTable, Node, NodeId};
use astpack_format::{ByteWriter, MAGIC};

use crate::config::EncoderConfig;
use crate::error::{EncodeError, Result};
use crate::module::{AstModule, FinalOrder};
use crate::stats::EncodeStats;

use super::{References, write_value};

/// Serialize a module into a complete artifact.
///
/// Finalizes the string, array and object tables (in discovery order when
/// `config.ordered` is set), then writes the header and the four tables.
pub fn serialize_module(
    module: &mut AstModule<'_>,
    config: &EncoderConfig,
    stats: &mut EncodeStats,
) -> Result<Vec<u8>> {
    let order = module.finalize(config.ordered);

    let writer = match config.max_size {
        Some(limit) => ByteWriter::with_limit(limit),
        None => ByteWriter::new(),
    };
    let mut out = writer.with_int_encoding(config.int_encoding);

    write_header(&mut out, module, &order)?;
    write_string_table(&mut out, module, &order.strings)?;
    write_shape_table(&mut out, module)?;
    write_object_table(&mut out, module, &order.objects)?;
    write_array_table(&mut out, module, &order.arrays)?;

    let varint_sizes = out.varint_sizes();
    tracing::debug!(
        tag_bytes = out.tag_bytes_written(),
        varint_sizes = ?varint_sizes,
        bytes = out.position(),
        "artifact written"
    );

    stats.objects = order.objects.len();
    stats.arrays = order.arrays.len();
    stats.strings = order.strings.len();
    stats.shapes = module.shapes.len();
    stats.tag_bytes = out.tag_bytes_written();
    stats.varint_sizes = varint_sizes;
    stats.bytes_written = out.position();

    Ok(out.into_bytes())
}

fn write_header(out: &mut ByteWriter, module: &AstModule<'_>, order: &FinalOrder) -> Result<()> {
    out.write_bytes(&MAGIC)?;
    // The format name is read before the integer encoding is known.
    let format_name = out.int_encoding().format_name();
    out.write_leb_utf8_str(format_name)?;

    let root = module
        .root
        .ok_or_else(|| EncodeError::unresolved(module.objects.name(), "root"))?;
    let root_index = module
        .objects
        .index_of(root)
        .ok_or_else(|| EncodeError::unresolved(module.objects.name(), root))?;
    out.write_u32(root_index)?;

    out.write_u32(order.strings.len() as u32)?;
    out.write_u32(module.shapes.len() as u32)?;
    out.write_u32(order.objects.len() as u32)?;
    out.write_u32(order.arrays.len() as u32)?;
    Ok(())
}

fn write_string_table(
    out: &mut ByteWriter,
    module: &AstModule<'_>,
    strings: &[Identity],
) -> Result<()> {
    out.write_u32(strings.len() as u32)?;
    for &id in strings {
        let text = module
            .strings
            .get_value(id)
            .ok_or_else(|| EncodeError::unresolved(module.strings.name(), id))?;
        out.write_utf8_str(text)?;
    }
    Ok(())
}

fn write_shape_table(out: &mut ByteWriter, module: &AstModule<'_>) -> Result<()> {
    out.write_u32(module.shapes.len() as u32)?;
    for shape in module.shapes.iter() {
        out.write_utf8_str(&shape.canonical_text())?;
    }
    Ok(())
}

fn write_object_table(
    out: &mut ByteWriter,
    module: &AstModule<'_>,
    objects: &[Identity],
) -> Result<()> {
    let tree = module.tree();
    let refs = references(module);

    out.write_u32(objects.len() as u32)?;
    for &id in objects {
        let node = table_node(&module.objects, id)?;
        let Some(Node::Object(fields)) = tree.node(node) else {
            return Err(EncodeError::unresolved("node", node));
        };

        let shape = module
            .shapes
            .find_shape(fields)
            .ok_or(EncodeError::UnknownShape { node })?;
        out.write_var_u32(shape.index())?;

        for key in shape.keys() {
            let value = fields
                .get(key)
                .ok_or(EncodeError::UnknownShape { node })?;
            write_value(out, tree, &refs, value)?;
        }
    }
    Ok(())
}

fn write_array_table(
    out: &mut ByteWriter,
    module: &AstModule<'_>,
    arrays: &[Identity],
) -> Result<()> {
    let tree = module.tree();
    let refs = references(module);

    out.write_u32(arrays.len() as u32)?;
    for &id in arrays {
        let node = table_node(&module.arrays, id)?;
        let Some(Node::Array(items)) = tree.node(node) else {
            return Err(EncodeError::unresolved("node", node));
        };

        out.write_var_u32(items.len() as u32)?;
        for value in items {
            write_value(out, tree, &refs, value)?;
        }
    }
    Ok(())
}

fn references<'m>(module: &'m AstModule<'_>) -> References<'m> {
    References {
        strings: &module.strings,
        objects: &module.objects,
        arrays: &module.arrays,
    }
}

fn table_node(table: &InternTable<NodeId>, id: Identity) -> Result<NodeId> {
    table
        .get_value(id)
        .copied()
        .ok_or_else(|| EncodeError::unresolved(table.name(), id))
}

//! Tagged value encoding.

use astpack_core::{InternTable, NodeId, Tree, Value};
use astpack_format::ByteWriter;

use crate::classify::{Classified, classify};
use crate::error::{EncodeError, Result};

/// Finalized tables a tagged value may reference.
pub(crate) struct References<'m> {
    pub strings: &'m InternTable<String>,
    pub objects: &'m InternTable<NodeId>,
    pub arrays: &'m InternTable<NodeId>,
}

/// Write one tag byte and its payload.
///
/// Strings, objects and arrays are written as a varuint32 index into their
/// table. A reference that was never interned, or was interned but has no
/// final index, is an error.
pub(crate) fn write_value(
    out: &mut ByteWriter,
    tree: &Tree,
    refs: &References<'_>,
    value: &Value,
) -> Result<()> {
    let classified = classify(tree, value)?;
    out.write_tag_byte(classified.tag())?;

    match classified {
        Classified::String(s) => {
            let index = refs
                .strings
                .index_of_value(s)
                .ok_or_else(|| EncodeError::unresolved(refs.strings.name(), s))?;
            out.write_var_u32(index)?;
        }
        Classified::Object(id, _) => {
            let index = reference_index(refs.objects, id)?;
            out.write_var_u32(index)?;
        }
        Classified::Array(id, _) => {
            let index = reference_index(refs.arrays, id)?;
            out.write_var_u32(index)?;
        }
        Classified::Int32(i) => out.write_i32(i)?,
        Classified::Float64(f) => out.write_f64(f)?,
        Classified::Null | Classified::True | Classified::False => {}
    }
    Ok(())
}

fn reference_index(table: &InternTable<NodeId>, id: NodeId) -> Result<u32> {
    table
        .index_of_value(&id)
        .ok_or_else(|| EncodeError::unresolved(table.name(), id))
}


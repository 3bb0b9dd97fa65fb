//! The in-memory module: every table an artifact is written from.

use astpack_core::{Identity, InternTable, NodeId, Tree};

use crate::shapes::ShapeRegistry;

/// Tables discovered from one tree.
///
/// Built by discovery, mutated by dedup, finalized and written by the
/// serializer, then dropped. The module is the only owner of its identities.
#[derive(Debug, Clone)]
pub struct AstModule<'t> {
    tree: &'t Tree,
    pub(crate) strings: InternTable<String>,
    pub(crate) objects: InternTable<NodeId>,
    pub(crate) arrays: InternTable<NodeId>,
    pub(crate) shapes: ShapeRegistry,
    pub(crate) root: Option<Identity>,
}

impl<'t> AstModule<'t> {
    pub fn new(tree: &'t Tree) -> Self {
        Self {
            tree,
            strings: InternTable::new("string"),
            objects: InternTable::new("object"),
            arrays: InternTable::new("array"),
            shapes: ShapeRegistry::new(),
            root: None,
        }
    }

    /// The tree the module's node identities point into.
    pub fn tree(&self) -> &'t Tree {
        self.tree
    }

    pub fn strings(&self) -> &InternTable<String> {
        &self.strings
    }

    pub fn objects(&self) -> &InternTable<NodeId> {
        &self.objects
    }

    pub fn arrays(&self) -> &InternTable<NodeId> {
        &self.arrays
    }

    pub fn shapes(&self) -> &ShapeRegistry {
        &self.shapes
    }

    /// Object identity of the tree root.
    pub fn root(&self) -> Option<Identity> {
        self.root
    }

    /// Finalize all three intern tables.
    pub(crate) fn finalize(&mut self, ordered: bool) -> FinalOrder {
        FinalOrder {
            strings: self.strings.finalize(ordered),
            arrays: self.arrays.finalize(ordered),
            objects: self.objects.finalize(ordered),
        }
    }
}

/// Live identities of each table in final index order.
#[derive(Debug, Clone)]
pub(crate) struct FinalOrder {
    pub strings: Vec<Identity>,
    pub arrays: Vec<Identity>,
    pub objects: Vec<Identity>,
}

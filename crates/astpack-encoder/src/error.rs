//! Error types for encoding.

use astpack_core::{Identity, InternError, NodeId};
use astpack_format::WriteError;

/// Fatal encode failure. Any error aborts the whole encode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The output buffer hit its size limit.
    #[error(transparent)]
    CapacityExceeded(#[from] WriteError),

    /// A value whose runtime kind has no encoding.
    #[error("unsupported value kind: {kind}")]
    UnsupportedValueKind { kind: String },

    /// An object's field set matches no discovered shape.
    #[error("no shape matches the fields of node {node:?}")]
    UnknownShape { node: NodeId },

    /// A value used as a table reference was never interned, or has no index.
    #[error("unresolved {table} reference: {reference}")]
    UnresolvedReference {
        table: &'static str,
        reference: String,
    },

    /// Dedup tried to redirect an identity onto itself.
    #[error("identity {0:?} redirected onto itself")]
    SelfRedirect(Identity),

    /// The tree root is missing or is not an object node.
    #[error("root must be an object node, found {found}")]
    InvalidRoot { found: String },
}

impl EncodeError {
    pub(crate) fn unresolved(table: &'static str, reference: impl std::fmt::Debug) -> Self {
        Self::UnresolvedReference {
            table,
            reference: format!("{reference:?}"),
        }
    }
}

impl From<InternError> for EncodeError {
    fn from(err: InternError) -> Self {
        match err {
            InternError::SelfRedirect(id) => Self::SelfRedirect(id),
            InternError::UnknownIdentity(id) => Self::unresolved("identity", id),
        }
    }
}

/// Result type for encode operations.
pub type Result<T> = std::result::Result<T, EncodeError>;

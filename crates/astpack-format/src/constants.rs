use serde::{Deserialize, Serialize};

/// Magic bytes at the start of every artifact.
pub const MAGIC: [u8; 4] = *b"ASTP";

/// Format name for artifacts whose varuint32 slots use LEB128.
pub const FORMAT_NAME: &str = "astpack-v1";

/// Format name for artifacts whose varuint32 slots are fixed 4-byte integers.
pub const FORMAT_NAME_FIXED32: &str = "astpack-v1-fixed32";

/// How `varuint32` slots are written.
///
/// Fixed for a whole artifact and recorded in its format name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntEncoding {
    /// Little-endian base-128 with continuation bits.
    #[default]
    Varint,
    /// Plain 4-byte little-endian. Handy when bisecting size regressions.
    Fixed32,
}

impl IntEncoding {
    pub fn format_name(self) -> &'static str {
        match self {
            IntEncoding::Varint => FORMAT_NAME,
            IntEncoding::Fixed32 => FORMAT_NAME_FIXED32,
        }
    }

    pub fn from_format_name(name: &str) -> Option<Self> {
        match name {
            FORMAT_NAME => Some(IntEncoding::Varint),
            FORMAT_NAME_FIXED32 => Some(IntEncoding::Fixed32),
            _ => None,
        }
    }
}

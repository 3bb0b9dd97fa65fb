/// One-byte discriminator written before every value slot.
///
/// Each tag is the first character of its kind symbol, so dumps stay readable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    String = b's',
    Int32 = b'i',
    Float64 = b'd',
    Object = b'o',
    Array = b'a',
    Null = b'N',
    True = b'T',
    False = b'F',
}

impl Tag {
    pub const ALL: [Tag; 8] = [
        Tag::String,
        Tag::Int32,
        Tag::Float64,
        Tag::Object,
        Tag::Array,
        Tag::Null,
        Tag::True,
        Tag::False,
    ];

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(byte: u8) -> Option<Self> {
        Some(match byte {
            b's' => Tag::String,
            b'i' => Tag::Int32,
            b'd' => Tag::Float64,
            b'o' => Tag::Object,
            b'a' => Tag::Array,
            b'N' => Tag::Null,
            b'T' => Tag::True,
            b'F' => Tag::False,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Tag::String => "string",
            Tag::Int32 => "int",
            Tag::Float64 => "double",
            Tag::Object => "object",
            Tag::Array => "array",
            Tag::Null => "null",
            Tag::True => "true",
            Tag::False => "false",
        }
    }

    /// Whether the payload is a varuint32 table index.
    pub fn is_reference(self) -> bool {
        matches!(self, Tag::String | Tag::Object | Tag::Array)
    }
}

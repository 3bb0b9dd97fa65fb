use crate::{FORMAT_NAME, FORMAT_NAME_FIXED32, IntEncoding, Tag};

#[test]
fn tags_are_first_letters_of_kind_symbols() {
    let bytes: Vec<u8> = Tag::ALL.iter().map(|t| t.as_u8()).collect();
    assert_eq!(bytes, b"sidoaNTF");
}

#[test]
fn from_u8_inverts_as_u8() {
    for tag in Tag::ALL {
        assert_eq!(Tag::from_u8(tag.as_u8()), Some(tag));
    }
    assert_eq!(Tag::from_u8(b'x'), None);
    assert_eq!(Tag::from_u8(0), None);
}

#[test]
fn reference_tags() {
    let refs: Vec<Tag> = Tag::ALL.into_iter().filter(|t| t.is_reference()).collect();
    assert_eq!(refs, [Tag::String, Tag::Object, Tag::Array]);
}

#[test]
fn format_name_records_int_encoding() {
    assert_eq!(IntEncoding::Varint.format_name(), FORMAT_NAME);
    assert_eq!(IntEncoding::Fixed32.format_name(), FORMAT_NAME_FIXED32);
    assert_eq!(
        IntEncoding::from_format_name(FORMAT_NAME_FIXED32),
        Some(IntEncoding::Fixed32)
    );
    assert_eq!(IntEncoding::from_format_name("astpack-v0"), None);
}

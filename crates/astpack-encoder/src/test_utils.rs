//! Test utilities: fixtures and an artifact reader for round-trip checks.

use astpack_core::Tree;
use astpack_format::{IntEncoding, MAGIC, Tag, decode_var_u32};
use serde_json::{Map, Value as Json};

/// Build a tree from JSON text.
pub fn tree(json: &str) -> Tree {
    let value: Json = serde_json::from_str(json).expect("fixture must be valid JSON");
    Tree::from_json(&value)
}

/// One decoded tagged value.
#[derive(Clone, Debug, PartialEq)]
pub enum Slot {
    String(u32),
    Int32(i32),
    Float64(f64),
    Object(u32),
    Array(u32),
    Null,
    True,
    False,
}

/// A fully decoded artifact.
#[derive(Clone, Debug, PartialEq)]
pub struct Artifact {
    pub format_name: String,
    pub root: u32,
    /// Header counts: strings, shapes, objects, arrays.
    pub counts: [u32; 4],
    pub strings: Vec<String>,
    pub shapes: Vec<Vec<String>>,
    /// Shape index and values in shape key order.
    pub objects: Vec<(u32, Vec<Slot>)>,
    pub arrays: Vec<Vec<Slot>>,
}

impl Artifact {
    /// Decode an artifact, panicking on any malformed input or trailing bytes.
    pub fn read(bytes: &[u8]) -> Self {
        let mut r = Reader {
            bytes,
            pos: 0,
            int_encoding: IntEncoding::Varint,
        };

        assert_eq!(r.take(4), MAGIC, "bad magic");
        let len = r.leb();
        let format_name = String::from_utf8(r.take(len as usize).to_vec()).expect("format name");
        r.int_encoding = IntEncoding::from_format_name(&format_name).expect("known format name");

        let root = r.u32();
        let counts = [r.u32(), r.u32(), r.u32(), r.u32()];

        let strings = (0..r.u32()).map(|_| r.string()).collect();
        let shapes: Vec<Vec<String>> = (0..r.u32())
            .map(|_| serde_json::from_str(&r.string()).expect("shape text is a JSON array"))
            .collect();
        let objects = (0..r.u32())
            .map(|_| {
                let shape = r.var();
                let arity = shapes[shape as usize].len();
                (shape, (0..arity).map(|_| r.slot()).collect())
            })
            .collect();
        let arrays = (0..r.u32())
            .map(|_| {
                let len = r.var();
                (0..len).map(|_| r.slot()).collect()
            })
            .collect();
        assert_eq!(r.pos, bytes.len(), "trailing bytes");

        Artifact {
            format_name,
            root,
            counts,
            strings,
            shapes,
            objects,
            arrays,
        }
    }

    /// Rebuild the JSON value rooted at the artifact's root object.
    ///
    /// Only for acyclic artifacts. Fields come out in shape (sorted) order.
    pub fn to_json(&self) -> Json {
        self.object_json(self.root)
    }

    fn object_json(&self, index: u32) -> Json {
        let (shape, values) = &self.objects[index as usize];
        let keys = &self.shapes[*shape as usize];
        let mut map = Map::new();
        for (key, slot) in keys.iter().zip(values) {
            map.insert(key.clone(), self.slot_json(slot));
        }
        Json::Object(map)
    }

    fn slot_json(&self, slot: &Slot) -> Json {
        match slot {
            Slot::String(i) => Json::from(self.strings[*i as usize].clone()),
            Slot::Int32(i) => Json::from(*i),
            Slot::Float64(f) => Json::from(*f),
            Slot::Object(i) => self.object_json(*i),
            Slot::Array(i) => Json::Array(
                self.arrays[*i as usize]
                    .iter()
                    .map(|slot| self.slot_json(slot))
                    .collect(),
            ),
            Slot::Null => Json::Null,
            Slot::True => Json::Bool(true),
            Slot::False => Json::Bool(false),
        }
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
    int_encoding: IntEncoding,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> &'a [u8] {
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        slice
    }

    fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.take(4).try_into().expect("4 bytes"))
    }

    fn leb(&mut self) -> u32 {
        let (value, len) = decode_var_u32(&self.bytes[self.pos..]).expect("valid varint");
        self.pos += len;
        value
    }

    fn var(&mut self) -> u32 {
        match self.int_encoding {
            IntEncoding::Varint => self.leb(),
            IntEncoding::Fixed32 => self.u32(),
        }
    }

    fn string(&mut self) -> String {
        let len = self.var() as usize;
        String::from_utf8(self.take(len).to_vec()).expect("valid UTF-8")
    }

    fn slot(&mut self) -> Slot {
        let tag = self.take(1)[0];
        match Tag::from_u8(tag).expect("known tag") {
            Tag::String => Slot::String(self.var()),
            Tag::Int32 => Slot::Int32(i32::from_le_bytes(self.take(4).try_into().expect("4 bytes"))),
            Tag::Float64 => Slot::Float64(f64::from_le_bytes(self.take(8).try_into().expect("8 bytes"))),
            Tag::Object => Slot::Object(self.var()),
            Tag::Array => Slot::Array(self.var()),
            Tag::Null => Slot::Null,
            Tag::True => Slot::True,
            Tag::False => Slot::False,
        }
    }
}

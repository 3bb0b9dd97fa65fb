//! Shape (keyset) registry.
//!
//! A shape is the set of field names shared by a class of object nodes. Objects
//! are written as a shape index followed by their values in the shape's field
//! order, so field names appear once per shape instead of once per object.

use astpack_core::Fields;

/// One distinct field-name set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shape {
    index: u32,
    /// Field names, sorted. Also the order values are written in.
    keys: Vec<String>,
}

impl Shape {
    fn from_fields(fields: &Fields, index: u32) -> Self {
        let mut keys: Vec<String> = fields.keys().cloned().collect();
        keys.sort();
        Self { index, keys }
    }

    /// Discovery-order index, also the on-wire shape index.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Exact name-set match: every field of `fields` is a key and no key is missing.
    pub fn matches(&self, fields: &Fields) -> bool {
        // Field names are unique, so equal sizes plus containment is set equality.
        fields.len() == self.keys.len() && self.keys.iter().all(|k| fields.contains_key(k))
    }

    /// Canonical text stored in the shape table: a JSON array of the sorted names.
    pub fn canonical_text(&self) -> String {
        serde_json::Value::from(self.keys.clone()).to_string()
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Shape {}>", self.canonical_text())
    }
}

/// Shapes in discovery order.
#[derive(Clone, Debug, Default)]
pub struct ShapeRegistry {
    shapes: Vec<Shape>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// First shape whose name set equals the object's.
    ///
    /// Linear scan: distinct shapes are few compared to nodes.
    pub fn find_shape(&self, fields: &Fields) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.matches(fields))
    }

    pub fn find_or_create_shape(&mut self, fields: &Fields) -> &Shape {
        let position = match self.shapes.iter().position(|shape| shape.matches(fields)) {
            Some(position) => position,
            None => {
                let shape = Shape::from_fields(fields, self.shapes.len() as u32);
                self.shapes.push(shape);
                self.shapes.len() - 1
            }
        };
        &self.shapes[position]
    }

    pub fn get(&self, index: u32) -> Option<&Shape> {
        self.shapes.get(index as usize)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }
}

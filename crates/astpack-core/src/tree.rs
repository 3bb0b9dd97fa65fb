//! Input tree model.
//!
//! The encoder treats the parser's output as an opaque arena of nodes. Each
//! node is either an object (an ordered list of uniquely named fields) or an
//! array. Node identity is the `NodeId`, so shared substructure and cycles are
//! expressed by referring to the same id twice.

use indexmap::IndexMap;

/// Identity of a node inside a [`Tree`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A field or element value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Node(NodeId),
    /// A host value of a kind the encoder cannot represent (`undefined`,
    /// functions, big integers, ...). Carries the kind name for diagnostics.
    Other(String),
}

impl Value {
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Value::Node(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<NodeId> for Value {
    fn from(id: NodeId) -> Self {
        Value::Node(id)
    }
}

/// Own fields of an object node, in declaration order.
pub type Fields = IndexMap<String, Value>;

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Object(Fields),
    Array(Vec<Value>),
}

impl Node {
    pub fn is_array(&self) -> bool {
        matches!(self, Node::Array(_))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Object(_) => "object",
            Node::Array(_) => "array",
        }
    }
}

/// Arena of nodes plus the root value.
#[derive(Clone, Debug, Default)]
pub struct Tree {
    nodes: Vec<Node>,
    root: Option<Value>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object node. Later duplicates of a field name replace earlier ones.
    pub fn add_object<N, V>(&mut self, fields: impl IntoIterator<Item = (N, V)>) -> NodeId
    where
        N: Into<String>,
        V: Into<Value>,
    {
        let fields = fields
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        self.push(Node::Object(fields))
    }

    pub fn add_array<V: Into<Value>>(&mut self, items: impl IntoIterator<Item = V>) -> NodeId {
        self.push(Node::Array(items.into_iter().map(Into::into).collect()))
    }

    /// Insert or replace a field on an object node.
    ///
    /// # Panics
    /// Panics if `id` is not an object node of this tree.
    pub fn set_field(&mut self, id: NodeId, name: impl Into<String>, value: impl Into<Value>) {
        match &mut self.nodes[id.index()] {
            Node::Object(fields) => {
                fields.insert(name.into(), value.into());
            }
            Node::Array(_) => panic!("set_field on array node {id:?}"),
        }
    }

    /// Append an element to an array node.
    ///
    /// # Panics
    /// Panics if `id` is not an array node of this tree.
    pub fn push_element(&mut self, id: NodeId, value: impl Into<Value>) {
        match &mut self.nodes[id.index()] {
            Node::Array(items) => items.push(value.into()),
            Node::Object(_) => panic!("push_element on object node {id:?}"),
        }
    }

    pub fn set_root(&mut self, root: impl Into<Value>) {
        self.root = Some(root.into());
    }

    pub fn root(&self) -> Option<&Value> {
        self.root.as_ref()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Every child value of a node, in field or element order.
    pub fn children(&self, id: NodeId) -> Box<dyn Iterator<Item = &Value> + '_> {
        match self.nodes.get(id.index()) {
            Some(Node::Object(fields)) => Box::new(fields.values()),
            Some(Node::Array(items)) => Box::new(items.iter()),
            None => Box::new(std::iter::empty()),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Build a tree from a JSON document. The document itself becomes the root.
    pub fn from_json(json: &serde_json::Value) -> Self {
        let mut tree = Tree::new();
        let root = tree.json_value(json);
        tree.set_root(root);
        tree
    }

    fn json_value(&mut self, json: &serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            // Integers beyond 2^53 lose precision.
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => {
                let items: Vec<Value> = items.iter().map(|v| self.json_value(v)).collect();
                Value::Node(self.push(Node::Array(items)))
            }
            serde_json::Value::Object(map) => {
                let fields: Fields = map
                    .iter()
                    .map(|(k, v)| (k.clone(), self.json_value(v)))
                    .collect();
                Value::Node(self.push(Node::Object(fields)))
            }
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The inferred shape of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
}

impl NodeKind {
    /// Classifies a scalar. Anything that is not a number or boolean,
    /// including `null`, is a string.
    pub fn of_scalar(value: &Value) -> Self {
        match value {
            Value::Number(_) => NodeKind::Number,
            Value::Bool(_) => NodeKind::Boolean,
            _ => NodeKind::String,
        }
    }

    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Object | NodeKind::Array)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeKind::Object => "object",
            NodeKind::Array => "array",
            NodeKind::String => "string",
            NodeKind::Number => "number",
            NodeKind::Boolean => "boolean",
        };
        f.write_str(s)
    }
}

/// One field or element of an inferred schema.
///
/// `path` is the lookup key within a tree. `name` is the display name: for
/// attributes the `@_` marker is stripped from `name` but kept in `path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    pub name: String,
    pub path: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SchemaNode>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_attribute: bool,
}

impl SchemaNode {
    /// Children for container kinds, `None` for scalars.
    pub fn children(&self) -> Option<&[SchemaNode]> {
        self.kind.is_container().then_some(self.children.as_slice())
    }
}

/// Pre-order traversal produced by [`walk`].
pub struct Descendants<'a> {
    stack: Vec<&'a SchemaNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SchemaNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Pre-order traversal over a whole tree (a top-level node sequence).
pub fn walk(nodes: &[SchemaNode]) -> Descendants<'_> {
    Descendants {
        stack: nodes.iter().rev().collect(),
    }
}

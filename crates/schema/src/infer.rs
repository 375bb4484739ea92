//! Structural inference from a generic document value into schema nodes.
use crate::node::{NodeKind, SchemaNode};
use fieldmap_path::ATTRIBUTE_MARKER;
use serde_json::Value;

/// Infers the schema of a parsed document.
///
/// The result is the node sequence for the document's top-level entries; the
/// document value itself is not represented as a node. Array shapes are taken
/// from their first element only.
pub fn infer(document: &Value) -> Vec<SchemaNode> {
    build_nodes(document, "")
}

fn build_nodes(value: &Value, parent_path: &str) -> Vec<SchemaNode> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, v)| build_node(key, v, parent_path))
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| build_node(&i.to_string(), v, parent_path))
            .collect(),
        _ => Vec::new(),
    }
}

fn build_node(key: &str, value: &Value, parent_path: &str) -> SchemaNode {
    let path = if parent_path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent_path, key)
    };
    let (name, is_attribute) = match key.strip_prefix(ATTRIBUTE_MARKER) {
        Some(stripped) => (stripped.to_string(), true),
        None => (key.to_string(), false),
    };

    let (kind, children) = match value {
        Value::Array(items) => {
            // Only an object first element contributes children; nested
            // arrays stay opaque and are addressed by index paths.
            let children = match items.first() {
                Some(first @ Value::Object(_)) => build_nodes(first, &path),
                _ => Vec::new(),
            };
            (NodeKind::Array, children)
        }
        Value::Object(_) => (NodeKind::Object, build_nodes(value, &path)),
        scalar => (NodeKind::of_scalar(scalar), Vec::new()),
    };

    SchemaNode {
        name,
        path,
        kind,
        children,
        is_attribute,
    }
}

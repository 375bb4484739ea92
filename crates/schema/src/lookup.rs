//! Path-based queries over an inferred tree.
use crate::node::{NodeKind, SchemaNode};
use fieldmap_path::{split_path, strip_predicate};

/// Finds the node addressed by `path`. Predicates on segments are ignored.
pub fn find_node<'a>(nodes: &'a [SchemaNode], path: &str) -> Option<&'a SchemaNode> {
    ancestry(nodes, path).and_then(|chain| chain.last().copied())
}

/// True if any proper ancestor of the node at `path` is an array.
pub fn is_child_of_array(nodes: &[SchemaNode], path: &str) -> bool {
    match ancestry(nodes, path) {
        Some(chain) => chain
            .iter()
            .take(chain.len().saturating_sub(1))
            .any(|n| n.kind == NodeKind::Array),
        None => false,
    }
}

/// Attribute names (without marker) among the siblings of the node at `path`.
pub fn attribute_suggestions(nodes: &[SchemaNode], path: &str) -> Vec<String> {
    let siblings = match ancestry(nodes, path) {
        Some(chain) if chain.len() >= 2 => chain[chain.len() - 2].children.as_slice(),
        Some(_) => nodes,
        None => return Vec::new(),
    };
    siblings
        .iter()
        .filter(|n| n.is_attribute)
        .map(|n| n.name.clone())
        .collect()
}

/// The prompt text offered when asking for an array filter predicate.
pub fn predicate_prompt(suggestions: &[String]) -> String {
    let example = suggestions.first().map(String::as_str).unwrap_or("attribute");
    format!(
        "Enter array filter predicate (e.g., @{}='value' or leave empty):",
        example
    )
}

/// Root-to-node chain for `path`, or `None` if any step is missing.
fn ancestry<'a>(nodes: &'a [SchemaNode], path: &str) -> Option<Vec<&'a SchemaNode>> {
    let segments = split_path(path);
    if segments.is_empty() {
        return None;
    }

    let mut chain = Vec::with_capacity(segments.len());
    let mut level = nodes;
    let mut prefix = String::new();
    for segment in segments {
        if !prefix.is_empty() {
            prefix.push('.');
        }
        prefix.push_str(strip_predicate(segment));
        let node = level.iter().find(|n| n.path == prefix)?;
        chain.push(node);
        level = &node.children;
    }
    Some(chain)
}

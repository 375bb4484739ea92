//! Translation of field paths into absolute XPath 1.0 location paths.
use fieldmap_path::{Segment, split_path};

/// Converts a dot path into an XPath selecting the same node.
///
/// Elements become `/prefix:name` steps with any predicate kept verbatim,
/// `@_attr` becomes `/@attr`, and index segments are dropped. An empty path
/// selects the document root.
pub fn to_xpath(path: &str, prefix: &str) -> String {
    let mut xpath = String::new();
    for segment in split_path(path).into_iter().map(Segment::parse) {
        match segment {
            Segment::Attribute(name) => {
                xpath.push_str("/@");
                xpath.push_str(&name);
            }
            Segment::Index(_) => {}
            Segment::Element { name, predicate } => {
                xpath.push('/');
                xpath.push_str(prefix);
                xpath.push(':');
                xpath.push_str(&name);
                if let Some(p) = predicate {
                    xpath.push('[');
                    xpath.push_str(&p);
                    xpath.push(']');
                }
            }
        }
    }
    if xpath.is_empty() { "/".to_string() } else { xpath }
}

/// Builds a match pattern from element names only (predicates and indices
/// removed, attributes skipped), e.g. `ns:Order/ns:Lines`.
pub fn to_match_pattern(path: &str, prefix: &str) -> String {
    let steps: Vec<String> = split_path(path)
        .into_iter()
        .map(Segment::parse)
        .filter_map(|segment| match segment {
            Segment::Element { name, .. } => Some(format!("{}:{}", prefix, name)),
            _ => None,
        })
        .collect();
    if steps.is_empty() { "/".to_string() } else { steps.join("/") }
}

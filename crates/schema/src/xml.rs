//! Converts XML markup into the generic object/array/scalar shape that
//! [`crate::infer`] walks.
//!
//! Conventions:
//! - the document element becomes the single top-level key,
//! - attributes become `@_name` keys holding strings,
//! - repeated child elements with the same name collapse into an array placed
//!   where the first occurrence appeared,
//! - an element with only text becomes a scalar; with attributes or children,
//!   non-empty text is kept under `#text`.
//!
//! Element names are local names. The XML declaration, comments, processing
//! instructions and namespace declarations are not represented.

use crate::error::SchemaError;
use fieldmap_path::ATTRIBUTE_MARKER;
use roxmltree::Node;
use serde_json::{Map, Number, Value};

/// Key under which mixed-content text is stored.
pub const TEXT_KEY: &str = "#text";

/// Parses XML text into a generic document value.
pub fn xml_to_value(text: &str) -> Result<Value, SchemaError> {
    let doc = roxmltree::Document::parse(text.trim())?;
    let root = doc.root_element();
    let mut map = Map::new();
    map.insert(root.tag_name().name().to_string(), element_value(root));
    Ok(Value::Object(map))
}

fn element_value(node: Node<'_, '_>) -> Value {
    let mut fields = Map::new();
    for attr in node.attributes() {
        fields.insert(
            format!("{}{}", ATTRIBUTE_MARKER, attr.name()),
            Value::String(attr.value().to_string()),
        );
    }

    let mut text = String::new();
    for child in node.children() {
        if child.is_element() {
            let key = child.tag_name().name().to_string();
            let value = element_value(child);
            match fields.get_mut(&key) {
                // Element values are never arrays, so an array here is a
                // previous collapse of repeated siblings.
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    fields.insert(key, value);
                }
            }
        } else if child.is_text() {
            text.push_str(child.text().unwrap_or("").trim());
        }
    }

    if fields.is_empty() {
        return scalar_from_text(&text);
    }
    if !text.is_empty() {
        fields.insert(TEXT_KEY.to_string(), scalar_from_text(&text));
    }
    Value::Object(fields)
}

/// Types element text: `true`/`false` become booleans, plain decimal numbers
/// become numbers, everything else stays a string. Numbers with a leading
/// zero (`007`) or a sign prefix of `+` are kept as strings to avoid losing
/// identifier formatting.
pub fn scalar_from_text(text: &str) -> Value {
    match text {
        "" => return Value::String(String::new()),
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if looks_numeric(text) {
        if let Ok(i) = text.parse::<i64>() {
            return Value::Number(i.into());
        }
        if let Some(n) = text.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(n);
        }
    }
    Value::String(text.to_string())
}

fn looks_numeric(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let Some(first) = unsigned.chars().next() else {
        return false;
    };
    if !first.is_ascii_digit() {
        return false;
    }
    let leading_zero = unsigned.len() > 1
        && unsigned.starts_with('0')
        && !unsigned[1..].starts_with('.');
    if leading_zero {
        return false;
    }
    unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '-' | '+'))
}

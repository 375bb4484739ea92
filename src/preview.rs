//! In-process evaluation of a mapping list against a real document.
//!
//! Resolution follows the generated script's `get_value` and
//! `set_nested_value` helpers step for step, so a preview shows what the
//! script would emit for the same input.
use crate::error::MapperError;
use fieldmap_path::{ATTRIBUTE_MARKER, Segment, parse_predicate, split_path};
use fieldmap_rules::{MappingRule, RuleSource};
use fieldmap_schema::{DocumentFormat, SchemaError, parse_value};
use roxmltree::{Document, Node};
use serde_json::{Map, Value};

/// Applies `rules` in order to `input` and returns the output object.
pub fn preview(
    rules: &[MappingRule],
    input: &str,
    format: DocumentFormat,
) -> Result<Value, MapperError> {
    let mut output = Value::Object(Map::new());
    match format {
        DocumentFormat::Xml => {
            let doc = Document::parse(input.trim()).map_err(SchemaError::from)?;
            let root = doc.root_element();
            for rule in rules {
                let value = match &rule.source {
                    RuleSource::Constant { constant_value } => Value::String(constant_value.clone()),
                    RuleSource::Direct { source_path } => {
                        resolve_xml(root, source_path).map_or(Value::Null, Value::String)
                    }
                };
                set_nested_value(&mut output, &rule.output_path, value);
            }
        }
        DocumentFormat::Json => {
            let data = parse_value(input, DocumentFormat::Json)?;
            for rule in rules {
                let value = match &rule.source {
                    RuleSource::Constant { constant_value } => Value::String(constant_value.clone()),
                    RuleSource::Direct { source_path } => {
                        resolve_json(&data, source_path).unwrap_or(Value::Null)
                    }
                };
                set_nested_value(&mut output, &rule.output_path, value);
            }
        }
    }
    log::debug!("Previewed {} mappings against {} input", rules.len(), format);
    Ok(output)
}

/// Follows `path` through objects and arrays. A non-numeric segment applied
/// to an array reads from the array's first element.
pub fn resolve_json(data: &Value, path: &str) -> Option<Value> {
    let mut current = data;
    for key in split_path(path) {
        current = match current {
            Value::Object(map) => map.get(key)?,
            Value::Array(items) => match key.parse::<usize>() {
                Ok(index) if is_digits(key) => items.get(index)?,
                _ => match items.first() {
                    Some(Value::Object(first)) => first.get(key)?,
                    _ => return None,
                },
            },
            _ => return None,
        };
        if current.is_null() {
            return None;
        }
    }
    Some(current.clone())
}

/// Follows `path` from the root element and returns the attribute value or
/// the leading text of the element reached.
///
/// A first segment naming the root itself is skipped. Predicates select the
/// first child whose attribute matches; no match resolves to `None`.
pub fn resolve_xml(root: Node<'_, '_>, path: &str) -> Option<String> {
    let namespace = root.tag_name().namespace();
    let mut current = root;
    for (i, raw) in split_path(path).into_iter().enumerate() {
        if let Some(name) = raw.strip_prefix(ATTRIBUTE_MARKER) {
            return current.attribute(name).map(str::to_string);
        }
        if is_digits(raw) {
            continue;
        }

        let mut key = raw;
        if let Segment::Element {
            name,
            predicate: Some(body),
        } = Segment::parse(raw)
        {
            match parse_predicate(&body) {
                Ok(predicate) => {
                    current = element_children(current, namespace, &name)
                        .into_iter()
                        .find(|c| c.attribute(predicate.attribute.as_str()) == Some(predicate.value.as_str()))?;
                    continue;
                }
                Err(_) => key = strip_name(raw),
            }
        }

        if i == 0 && key == root.tag_name().name() {
            continue;
        }
        current = element_children(current, namespace, key).into_iter().next()?;
    }
    current.text().map(str::to_string)
}

/// Writes `value` at `path`, creating objects for named segments and arrays
/// for numeric ones. Arrays are padded with empty objects up to the index.
pub fn set_nested_value(target: &mut Value, path: &str, value: Value) {
    let keys = split_path(path);
    let Some((last, parents)) = keys.split_last() else {
        return;
    };

    let mut current = target;
    for (i, key) in parents.iter().enumerate() {
        let next_key = keys[i + 1];
        let Some(slot) = slot_mut(current, key) else {
            return;
        };
        let replace = match slot {
            Value::Object(map) => map.is_empty() && is_digits(next_key),
            Value::Array(_) => false,
            _ => true,
        };
        if replace {
            *slot = empty_container(next_key);
        }
        current = slot;
    }
    if let Some(slot) = slot_mut(current, last) {
        *slot = value;
    }
}

fn slot_mut<'v>(current: &'v mut Value, key: &str) -> Option<&'v mut Value> {
    match current {
        Value::Array(items) => {
            if !is_digits(key) {
                return None;
            }
            let index: usize = key.parse().ok()?;
            while items.len() <= index {
                items.push(Value::Object(Map::new()));
            }
            items.get_mut(index)
        }
        Value::Object(map) => Some(map.entry(key.to_string()).or_insert(Value::Null)),
        _ => None,
    }
}

fn empty_container(next_key: &str) -> Value {
    if is_digits(next_key) {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    }
}

/// Child elements named `name`, preferring the root's namespace and falling
/// back to un-namespaced children.
fn element_children<'a, 'input>(
    parent: Node<'a, 'input>,
    namespace: Option<&str>,
    name: &str,
) -> Vec<Node<'a, 'input>> {
    let named = |ns: Option<&str>| -> Vec<Node<'a, 'input>> {
        parent
            .children()
            .filter(|c| c.is_element() && c.tag_name().name() == name && c.tag_name().namespace() == ns)
            .collect()
    };
    let preferred = named(namespace);
    if preferred.is_empty() && namespace.is_some() {
        named(None)
    } else {
        preferred
    }
}

fn strip_name(raw: &str) -> &str {
    raw.find('[').map_or(raw, |open| &raw[..open])
}

fn is_digits(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

//! Schema inference from sample XML and JSON documents.
//!
//! Document text is first parsed into a generic `serde_json::Value` (XML via
//! the attribute-marker convention in [`xml`]) and then walked by [`infer`]
//! into a tree of [`SchemaNode`]s addressed by dot paths.

pub mod error;
pub mod format;
pub mod infer;
pub mod lookup;
pub mod node;
pub mod xml;

pub use error::SchemaError;
pub use format::DocumentFormat;
pub use infer::infer;
pub use lookup::{attribute_suggestions, find_node, is_child_of_array, predicate_prompt};
pub use node::{NodeKind, SchemaNode, walk};

use serde_json::Value;

/// Parses XML text and infers its schema.
pub fn parse_xml(text: &str) -> Result<Vec<SchemaNode>, SchemaError> {
    let value = xml::xml_to_value(text)?;
    let nodes = infer(&value);
    log::debug!("Inferred {} nodes from XML sample", walk(&nodes).count());
    Ok(nodes)
}

/// Parses JSON text and infers its schema.
pub fn parse_json(text: &str) -> Result<Vec<SchemaNode>, SchemaError> {
    let value: Value = serde_json::from_str(text)?;
    let nodes = infer(&value);
    log::debug!("Inferred {} nodes from JSON sample", walk(&nodes).count());
    Ok(nodes)
}

/// Dispatches to [`parse_xml`] or [`parse_json`].
pub fn parse_document(text: &str, format: DocumentFormat) -> Result<Vec<SchemaNode>, SchemaError> {
    match format {
        DocumentFormat::Xml => parse_xml(text),
        DocumentFormat::Json => parse_json(text),
    }
}

/// Parses document text into the generic value shape without inferring.
pub fn parse_value(text: &str, format: DocumentFormat) -> Result<Value, SchemaError> {
    match format {
        DocumentFormat::Xml => xml::xml_to_value(text),
        DocumentFormat::Json => Ok(serde_json::from_str(text)?),
    }
}

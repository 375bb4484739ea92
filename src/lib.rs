//! Schema mapping between sample XML and JSON documents.
//!
//! Load a sample input and a sample output, declare field-to-field or
//! constant mappings between their inferred schemas, and generate either a
//! Python transform script or an XSLT 1.0 stylesheet that performs the
//! mapping on real documents.
//!
//! ```
//! use fieldmap::{DocumentFormat, MappingStore};
//!
//! let input = fieldmap::parse_xml(r#"<Order code="Z"><Id>7</Id></Order>"#).unwrap();
//! assert_eq!(input[0].path, "Order");
//!
//! let mappings = MappingStore::new()
//!     .with_direct("order.code", "Order.@_code")
//!     .unwrap();
//! let script = fieldmap::generate_script(
//!     mappings.rules(),
//!     DocumentFormat::Xml,
//!     DocumentFormat::Json,
//!     "",
//! );
//! assert!(script.contains("get_value(data, \"Order.@_code\")"));
//! ```

pub mod config;
pub mod error;
pub mod preview;
pub mod session;
pub mod state;

// --- Public API ---
pub use config::MapperConfig;
pub use error::{MapperError, Side};
pub use preview::preview;
pub use session::{MappingPrompt, PredicateRequest, Selection, Session};
pub use state::{AppState, GeneratedCode};

pub use fieldmap_path::{FieldPath, PathError, Predicate, Segment, splice_predicate, split_path};
pub use fieldmap_rules::{MappingRule, MappingStore, RuleError, RuleId, RuleSource, RuleType};
pub use fieldmap_schema::{DocumentFormat, NodeKind, SchemaError, SchemaNode};
pub use fieldmap_xslt::XsltOptions;

/// Infers the schema of an XML sample.
pub fn parse_xml(text: &str) -> Result<Vec<SchemaNode>, MapperError> {
    Ok(fieldmap_schema::parse_xml(text)?)
}

/// Infers the schema of a JSON sample.
pub fn parse_json(text: &str) -> Result<Vec<SchemaNode>, MapperError> {
    Ok(fieldmap_schema::parse_json(text)?)
}

pub fn generate_script(
    rules: &[MappingRule],
    input: DocumentFormat,
    output: DocumentFormat,
    notes: &str,
) -> String {
    fieldmap_script::generate_script(rules, input, output, notes)
}

pub fn generate_xslt(rules: &[MappingRule], notes: &str, copy_input_structure: bool) -> String {
    fieldmap_xslt::generate_xslt(rules, notes, copy_input_structure)
}

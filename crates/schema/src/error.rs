use thiserror::Error;

/// Failure to turn sample document text into a schema tree.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("XML parsing error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown document format '{0}' (expected 'xml' or 'json')")]
    UnknownFormat(String),
}

use fieldmap_rules::RuleError;
use fieldmap_schema::{DocumentFormat, SchemaError};
use thiserror::Error;

/// Which sample document a state transition refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Input,
    Output,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Side::Input => "input",
            Side::Output => "output",
        })
    }
}

/// A comprehensive error type for the mapping application.
#[derive(Error, Debug)]
pub enum MapperError {
    #[error("Failed to parse sample document: {0}")]
    Schema(#[from] SchemaError),

    #[error("Invalid mapping: {0}")]
    Rule(#[from] RuleError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{generator} generation is not available for {input} -> {output} with {mappings} mapping(s)")]
    GenerationUnavailable {
        generator: &'static str,
        input: DocumentFormat,
        output: DocumentFormat,
        mappings: usize,
    },

    #[error("No {side} schema node at path '{path}'")]
    UnknownNode { side: Side, path: String },

    #[error("No {0} document format has been selected")]
    MissingFormat(Side),
}

use crate::rule::RuleId;
use fieldmap_path::PathError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuleError {
    #[error("Invalid output path '{path}': {source}")]
    InvalidOutputPath {
        path: String,
        #[source]
        source: PathError,
    },

    #[error("Invalid source path '{path}': {source}")]
    InvalidSourcePath {
        path: String,
        #[source]
        source: PathError,
    },

    #[error("Constant rule '{0}' has an empty value")]
    EmptyConstant(RuleId),

    #[error("Duplicate rule id '{0}'")]
    DuplicateId(RuleId),

    #[error("Invalid mapping file: {0}")]
    Json(#[from] serde_json::Error),
}

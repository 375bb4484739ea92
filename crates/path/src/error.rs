use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Path is empty")]
    Empty,

    #[error("Unbalanced brackets in path '{0}'")]
    UnbalancedBrackets(String),

    #[error("Invalid predicate '{0}': {1}")]
    Predicate(String, String),
}

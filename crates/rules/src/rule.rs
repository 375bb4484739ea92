use crate::error::RuleError;
use fieldmap_path::FieldPath;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Creation-time derived identifier of a rule, unique within a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(String);

impl RuleId {
    pub fn new(id: impl Into<String>) -> Self {
        RuleId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RuleId {
    fn from(s: &str) -> Self {
        RuleId(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleType {
    Direct,
    Constant,
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleType::Direct => f.write_str("direct"),
            RuleType::Constant => f.write_str("constant"),
        }
    }
}

/// Where a rule's value comes from. Serialized inline with the rule as
/// `"ruleType": "direct", "sourcePath": ...` or
/// `"ruleType": "constant", "constantValue": ...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "ruleType", rename_all = "lowercase")]
pub enum RuleSource {
    Direct {
        #[serde(rename = "sourcePath")]
        source_path: String,
    },
    Constant {
        #[serde(rename = "constantValue")]
        constant_value: String,
    },
}

/// One declared correspondence between an output field and its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRule {
    pub id: RuleId,
    pub output_path: String,
    #[serde(flatten)]
    pub source: RuleSource,
}

impl MappingRule {
    pub fn direct(id: RuleId, output_path: impl Into<String>, source_path: impl Into<String>) -> Self {
        MappingRule {
            id,
            output_path: output_path.into(),
            source: RuleSource::Direct {
                source_path: source_path.into(),
            },
        }
    }

    pub fn constant(id: RuleId, output_path: impl Into<String>, value: impl Into<String>) -> Self {
        MappingRule {
            id,
            output_path: output_path.into(),
            source: RuleSource::Constant {
                constant_value: value.into(),
            },
        }
    }

    pub fn rule_type(&self) -> RuleType {
        match self.source {
            RuleSource::Direct { .. } => RuleType::Direct,
            RuleSource::Constant { .. } => RuleType::Constant,
        }
    }

    pub fn source_path(&self) -> Option<&str> {
        match &self.source {
            RuleSource::Direct { source_path } => Some(source_path),
            RuleSource::Constant { .. } => None,
        }
    }

    pub fn constant_value(&self) -> Option<&str> {
        match &self.source {
            RuleSource::Constant { constant_value } => Some(constant_value),
            RuleSource::Direct { .. } => None,
        }
    }

    /// Checks that both paths are well-formed and constants are non-empty.
    pub fn validate(&self) -> Result<(), RuleError> {
        FieldPath::parse(&self.output_path).map_err(|source| RuleError::InvalidOutputPath {
            path: self.output_path.clone(),
            source,
        })?;
        match &self.source {
            RuleSource::Direct { source_path } => {
                FieldPath::parse(source_path).map_err(|source| RuleError::InvalidSourcePath {
                    path: source_path.clone(),
                    source,
                })?;
            }
            RuleSource::Constant { constant_value } => {
                if constant_value.is_empty() {
                    return Err(RuleError::EmptyConstant(self.id.clone()));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for MappingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            RuleSource::Direct { source_path } => {
                write!(f, "{} <- {}", self.output_path, source_path)
            }
            RuleSource::Constant { constant_value } => {
                write!(f, "{} <- \"{}\"", self.output_path, constant_value)
            }
        }
    }
}

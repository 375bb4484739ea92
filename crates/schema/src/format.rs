use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// The syntax of a sample or real document. Chosen explicitly, never sniffed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Xml,
    Json,
}

impl DocumentFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentFormat::Xml => "xml",
            DocumentFormat::Json => "json",
        }
    }

    /// Guesses the format from a file extension. Only a hint for callers that
    /// want a default; the chosen format is always explicit.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "xml" | "xsd" | "xsl" | "xslt" => Some(DocumentFormat::Xml),
            "json" => Some(DocumentFormat::Json),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentFormat {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xml" => Ok(DocumentFormat::Xml),
            "json" => Ok(DocumentFormat::Json),
            _ => Err(SchemaError::UnknownFormat(s.to_string())),
        }
    }
}

use fieldmap_schema::DocumentFormat;
use fieldmap_xslt::{NAMESPACE_PREFIX, TARGET_NAMESPACE, XsltOptions};
use serde::{Deserialize, Serialize};

/// Settings that shape code generation for one mapping session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapperConfig {
    pub input_format: DocumentFormat,
    pub output_format: DocumentFormat,
    /// Free text copied into generated artifacts as a comment.
    pub notes: String,
    /// Selects the identity-with-overrides stylesheet mode.
    pub copy_input_structure: bool,
    pub namespace_uri: String,
    pub namespace_prefix: String,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            input_format: DocumentFormat::Xml,
            output_format: DocumentFormat::Json,
            notes: String::new(),
            copy_input_structure: false,
            namespace_uri: TARGET_NAMESPACE.to_string(),
            namespace_prefix: NAMESPACE_PREFIX.to_string(),
        }
    }
}

impl MapperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_formats(mut self, input: DocumentFormat, output: DocumentFormat) -> Self {
        self.input_format = input;
        self.output_format = output;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_copy_input_structure(mut self, copy: bool) -> Self {
        self.copy_input_structure = copy;
        self
    }

    /// Binds the stylesheet prefix to a different namespace URI.
    pub fn with_namespace(mut self, uri: impl Into<String>) -> Self {
        self.namespace_uri = uri.into();
        self
    }

    pub fn xslt_options(&self) -> XsltOptions {
        XsltOptions {
            notes: self.notes.clone(),
            copy_input_structure: self.copy_input_structure,
            namespace_uri: self.namespace_uri.clone(),
            namespace_prefix: self.namespace_prefix.clone(),
        }
    }
}

//! The application state container.
//!
//! Every transition takes `&self` and returns a new [`AppState`]; nothing is
//! mutated in place. A failed transition leaves the previous state intact.
use crate::config::MapperConfig;
use crate::error::{MapperError, Side};
use crate::session::Selection;
use fieldmap_rules::{MappingStore, RuleId};
use fieldmap_schema::{DocumentFormat, SchemaNode, parse_document};

/// The most recently generated artifacts. Each generator has its own slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedCode {
    pub script: Option<String>,
    pub xslt: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub config: MapperConfig,
    pub input_schema: Vec<SchemaNode>,
    pub output_schema: Vec<SchemaNode>,
    pub mappings: MappingStore,
    pub generated: GeneratedCode,
    pub selection: Selection,
}

impl AppState {
    pub fn new(config: MapperConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn schema(&self, side: Side) -> &[SchemaNode] {
        match side {
            Side::Input => &self.input_schema,
            Side::Output => &self.output_schema,
        }
    }

    pub fn format(&self, side: Side) -> DocumentFormat {
        match side {
            Side::Input => self.config.input_format,
            Side::Output => self.config.output_format,
        }
    }

    /// Selects the format used to parse the next upload on `side`.
    /// Already loaded schemas are kept.
    pub fn with_format(&self, side: Side, format: DocumentFormat) -> Self {
        let mut next = self.clone();
        match side {
            Side::Input => next.config.input_format = format,
            Side::Output => next.config.output_format = format,
        }
        next
    }

    pub fn with_notes(&self, notes: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.config.notes = notes.into();
        next
    }

    pub fn with_copy_input_structure(&self, copy: bool) -> Self {
        let mut next = self.clone();
        next.config.copy_input_structure = copy;
        next
    }

    /// Installs a freshly inferred schema for `side`.
    ///
    /// All mappings and generated code are discarded. Loading the input
    /// sample also drops any pending input selection. On a parse error the
    /// current state is unaffected.
    pub fn load_sample(&self, side: Side, text: &str) -> Result<Self, MapperError> {
        let format = self.format(side);
        let schema = parse_document(text, format)?;
        log::info!(
            "Loaded {} {} sample ({} top-level nodes); clearing {} mappings",
            side,
            format,
            schema.len(),
            self.mappings.len()
        );

        let mut next = self.clone();
        match side {
            Side::Input => {
                next.input_schema = schema;
                next.selection = Selection::Idle;
            }
            Side::Output => next.output_schema = schema,
        }
        next.mappings = MappingStore::new();
        next.generated = GeneratedCode::default();
        Ok(next)
    }

    pub fn with_mappings(&self, mappings: MappingStore) -> Self {
        let mut next = self.clone();
        next.mappings = mappings;
        next
    }

    pub fn with_selection(&self, selection: Selection) -> Self {
        let mut next = self.clone();
        next.selection = selection;
        next
    }

    pub fn delete_mapping(&self, id: &RuleId) -> Self {
        self.with_mappings(self.mappings.without(id))
    }

    /// Scripts are offered for every format pair except XML to XML.
    pub fn can_generate_script(&self) -> bool {
        !self.mappings.is_empty()
            && !(self.config.input_format == DocumentFormat::Xml
                && self.config.output_format == DocumentFormat::Xml)
    }

    /// Stylesheets are only offered for XML to XML.
    pub fn can_generate_xslt(&self) -> bool {
        !self.mappings.is_empty()
            && self.config.input_format == DocumentFormat::Xml
            && self.config.output_format == DocumentFormat::Xml
    }

    pub fn generate_script(&self) -> Result<Self, MapperError> {
        if !self.can_generate_script() {
            return Err(self.unavailable("script"));
        }
        let script = fieldmap_script::generate_script(
            self.mappings.rules(),
            self.config.input_format,
            self.config.output_format,
            &self.config.notes,
        );
        let mut next = self.clone();
        next.generated.script = Some(script);
        Ok(next)
    }

    pub fn generate_xslt(&self) -> Result<Self, MapperError> {
        if !self.can_generate_xslt() {
            return Err(self.unavailable("XSLT"));
        }
        let xslt = fieldmap_xslt::generate_with_options(
            self.mappings.rules(),
            &self.config.xslt_options(),
        );
        let mut next = self.clone();
        next.generated.xslt = Some(xslt);
        Ok(next)
    }

    fn unavailable(&self, generator: &'static str) -> MapperError {
        MapperError::GenerationUnavailable {
            generator,
            input: self.config.input_format,
            output: self.config.output_format,
            mappings: self.mappings.len(),
        }
    }
}

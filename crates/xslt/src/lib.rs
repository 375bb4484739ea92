//! XSLT 1.0 stylesheet generation from mapping rules.
//!
//! Two modes are supported:
//!
//! - **Reconstruction** (`copy_input_structure = false`): one root template
//!   that writes the output document purely from the mapped fields. Output
//!   elements are nested following the output paths; predicates on output
//!   segments become literal attributes.
//! - **Identity with overrides** (`copy_input_structure = true`): the input
//!   document is copied unchanged and one override template per distinct
//!   grandparent path appends the mapped parent/child element pairs.
//!
//! Source paths are translated to XPath with every element step qualified by
//! a single namespace prefix bound to the target namespace.

mod identity;
mod markup;
mod reconstruct;
mod tree;
pub mod xpath;

pub use xpath::{to_match_pattern, to_xpath};

use fieldmap_rules::MappingRule;

/// Namespace every generated stylesheet binds its element steps to.
pub const TARGET_NAMESPACE: &str = "http://schema.infor.com/InforOAGIS/2";
/// Prefix bound to [`TARGET_NAMESPACE`].
pub const NAMESPACE_PREFIX: &str = "ns";
/// Extension given to stylesheet files written without one.
pub const FILE_EXTENSION: &str = "xsl";

/// Generator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XsltOptions {
    /// Free text placed in a comment after the XML declaration.
    pub notes: String,
    /// Selects the identity-with-overrides mode.
    pub copy_input_structure: bool,
    pub namespace_uri: String,
    pub namespace_prefix: String,
}

impl Default for XsltOptions {
    fn default() -> Self {
        Self {
            notes: String::new(),
            copy_input_structure: false,
            namespace_uri: TARGET_NAMESPACE.to_string(),
            namespace_prefix: NAMESPACE_PREFIX.to_string(),
        }
    }
}

/// Generates a stylesheet with the default namespace binding.
pub fn generate_xslt(rules: &[MappingRule], notes: &str, copy_input_structure: bool) -> String {
    let options = XsltOptions {
        notes: notes.to_string(),
        copy_input_structure,
        ..XsltOptions::default()
    };
    generate_with_options(rules, &options)
}

pub fn generate_with_options(rules: &[MappingRule], options: &XsltOptions) -> String {
    let stylesheet = if options.copy_input_structure {
        identity::render(rules, options)
    } else {
        reconstruct::render(rules, options)
    };
    log::debug!(
        "Generated {} stylesheet for {} mappings ({} bytes)",
        if options.copy_input_structure { "identity" } else { "reconstruction" },
        rules.len(),
        stylesheet.len()
    );
    stylesheet
}

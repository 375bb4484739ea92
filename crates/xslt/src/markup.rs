//! Stylesheet text fragments shared by both generation modes.
use crate::XsltOptions;
use crate::xpath::to_xpath;
use fieldmap_path::Segment;
use fieldmap_rules::{MappingRule, RuleSource};
use quick_xml::escape::{escape, partial_escape};

pub(crate) fn header(options: &XsltOptions) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    if !options.notes.trim().is_empty() {
        // "--" is not allowed inside an XML comment.
        let mut notes = options.notes.clone();
        while notes.contains("--") {
            notes = notes.replace("--", "- -");
        }
        out.push_str(&format!("<!-- Mapping Notes:\n{}\n-->\n", notes));
    }
    out.push_str(&format!(
        "<xsl:stylesheet version=\"1.0\"\n  xmlns:xsl=\"http://www.w3.org/1999/XSL/Transform\"\n  xmlns:{prefix}=\"{uri}\"\n  exclude-result-prefixes=\"{prefix}\">\n  <xsl:output method=\"xml\" encoding=\"UTF-8\" indent=\"yes\"/>\n",
        prefix = options.namespace_prefix,
        uri = escape(options.namespace_uri.as_str()),
    ));
    out
}

pub(crate) const FOOTER: &str = "</xsl:stylesheet>\n";

/// Escapes text for use inside a double-quoted attribute value.
pub(crate) fn attr_escape(text: &str) -> String {
    partial_escape(text).replace('"', "&quot;")
}

pub(crate) fn text_escape(text: &str) -> String {
    partial_escape(text).into_owned()
}

/// Renders a segment's predicate as a literal attribute (` name="value"`),
/// or nothing when the predicate is absent or malformed.
pub(crate) fn predicate_attribute(segment: &Segment) -> String {
    match segment.predicate() {
        Some(p) => format!(" {}=\"{}\"", p.attribute, attr_escape(&p.value)),
        None => String::new(),
    }
}

/// Renders a predicate as an `xsl:attribute` instruction.
pub(crate) fn predicate_instruction(segment: &Segment) -> Option<String> {
    segment.predicate().map(|p| {
        format!(
            "<xsl:attribute name=\"{}\">{}</xsl:attribute>",
            p.attribute,
            text_escape(&p.value)
        )
    })
}

/// The content that produces a rule's value: escaped literal text for
/// constants, a `value-of` selection for direct rules.
pub(crate) fn rule_value(rule: &MappingRule, prefix: &str) -> String {
    match &rule.source {
        RuleSource::Constant { constant_value } => text_escape(constant_value),
        RuleSource::Direct { source_path } => value_of(source_path, prefix),
    }
}

pub(crate) fn value_of(source_path: &str, prefix: &str) -> String {
    format!(
        "<xsl:value-of select=\"{}\"/>",
        attr_escape(&to_xpath(source_path, prefix))
    )
}

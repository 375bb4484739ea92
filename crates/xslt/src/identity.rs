//! Identity transform with overrides: the input document is copied as-is and
//! each mapped field is appended under its grandparent element.
use crate::XsltOptions;
use crate::markup::{FOOTER, attr_escape, header, predicate_instruction, rule_value};
use crate::xpath::to_match_pattern;
use fieldmap_path::{Segment, split_path};
use fieldmap_rules::MappingRule;
use indexmap::IndexMap;

const IDENTITY_TEMPLATE: &str = "  <!-- Identity transform: copy everything -->
  <xsl:template match=\"@*|node()\">
    <xsl:copy>
      <xsl:apply-templates select=\"@*|node()\"/>
    </xsl:copy>
  </xsl:template>
";

struct Member<'r> {
    rule: &'r MappingRule,
    segments: Vec<Segment>,
}

pub(crate) fn render(rules: &[MappingRule], options: &XsltOptions) -> String {
    let groups = group_by_grandparent(rules);
    let overrides: Vec<String> = groups
        .iter()
        .map(|(grandparent, members)| override_template(grandparent, members, options))
        .collect();

    let mut out = header(options);
    out.push('\n');
    out.push_str(IDENTITY_TEMPLATE);
    out.push_str("\n  <!-- Append mapped elements -->\n");
    out.push_str(&overrides.join("\n\n"));
    if !overrides.is_empty() {
        out.push('\n');
    }
    out.push_str(FOOTER);
    out
}

/// Groups rules by their output path minus the last two segments, in the
/// order each grandparent is first seen. Index segments are ignored.
fn group_by_grandparent(rules: &[MappingRule]) -> IndexMap<String, Vec<Member<'_>>> {
    let mut groups: IndexMap<String, Vec<Member<'_>>> = IndexMap::new();
    for rule in rules {
        let segments: Vec<Segment> = split_path(&rule.output_path)
            .into_iter()
            .map(Segment::parse)
            .filter(|s| !s.is_index())
            .collect();
        if segments.is_empty() {
            continue;
        }
        let cut = segments.len().saturating_sub(2);
        let grandparent = segments[..cut]
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".");
        groups
            .entry(grandparent)
            .or_default()
            .push(Member { rule, segments });
    }
    log::debug!("{} rules grouped under {} ancestors", rules.len(), groups.len());
    groups
}

fn override_template(grandparent: &str, members: &[Member<'_>], options: &XsltOptions) -> String {
    let pattern = to_match_pattern(grandparent, &options.namespace_prefix);
    let children: Vec<String> = members
        .iter()
        .map(|m| appended_elements(m, options))
        .collect();
    format!(
        "  <xsl:template match=\"{}\">\n    <xsl:copy>\n      <xsl:apply-templates select=\"@*|node()\"/>\n{}\n    </xsl:copy>\n  </xsl:template>",
        attr_escape(&pattern),
        children.join("\n")
    )
}

/// The parent/child element pair written for one rule.
fn appended_elements(member: &Member<'_>, options: &XsltOptions) -> String {
    let namespace = attr_escape(&options.namespace_uri);
    let value = rule_value(member.rule, &options.namespace_prefix);
    let (child, parent) = match member.segments.as_slice() {
        [.., parent, child] => (child, Some(parent)),
        [child] => (child, None),
        [] => return String::new(),
    };

    let indent = if parent.is_some() { "        " } else { "      " };
    let inner = match child {
        Segment::Attribute(name) => {
            format!("{indent}<xsl:attribute name=\"{name}\">{value}</xsl:attribute>")
        }
        _ => element_block(child, &namespace, indent, &value),
    };

    match parent {
        Some(parent) => {
            let name = parent.name().unwrap_or_default();
            let mut out = format!("      <xsl:element name=\"{name}\" namespace=\"{namespace}\">\n");
            if let Some(attr) = predicate_instruction(parent) {
                out.push_str(&format!("        {}\n", attr));
            }
            out.push_str(&inner);
            out.push_str("\n      </xsl:element>");
            out
        }
        None => inner,
    }
}

fn element_block(segment: &Segment, namespace: &str, indent: &str, value: &str) -> String {
    let name = segment.name().unwrap_or_default();
    let mut out = format!("{indent}<xsl:element name=\"{name}\" namespace=\"{namespace}\">\n");
    if let Some(attr) = predicate_instruction(segment) {
        out.push_str(&format!("{indent}  {}\n", attr));
    }
    out.push_str(&format!("{indent}  {}\n", value));
    out.push_str(&format!("{indent}</xsl:element>"));
    out
}

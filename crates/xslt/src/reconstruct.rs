//! Structural reconstruction: a single root template that writes the whole
//! output document from the mapped fields.
use crate::XsltOptions;
use crate::markup::{FOOTER, header, predicate_attribute, rule_value};
use crate::tree::{Level, OutputNode, build_tree};
use fieldmap_path::Segment;

pub(crate) fn render(rules: &[fieldmap_rules::MappingRule], options: &XsltOptions) -> String {
    let tree = build_tree(rules);
    let mut body = String::new();
    render_level(&tree, "", &options.namespace_prefix, &mut body);

    let mut out = header(options);
    out.push_str("\n  <xsl:template match=\"/\">\n");
    out.push_str(&body);
    out.push_str("  </xsl:template>\n");
    out.push_str(FOOTER);
    out
}

fn render_level(level: &Level<'_>, indent: &str, prefix: &str, out: &mut String) {
    let pad = format!("{}    ", indent);

    // Attributes must precede child elements in the result tree.
    for (key, node) in level {
        let Segment::Attribute(name) = Segment::parse(key) else {
            continue;
        };
        match node {
            OutputNode::Leaf(rule) => push_attribute(out, &pad, &name, &rule_value(rule, prefix)),
            OutputNode::Fanout(rules) => {
                for rule in rules {
                    push_attribute(out, &pad, &name, &rule_value(rule, prefix));
                }
            }
            OutputNode::Branch(_) => {
                log::warn!("Attribute '{}' cannot contain child fields; skipped", name);
            }
        }
    }

    for (key, node) in level {
        let segment = Segment::parse(key);
        if segment.is_attribute() {
            continue;
        }
        let name = segment.name().unwrap_or(key);
        let attrs = predicate_attribute(&segment);
        match node {
            OutputNode::Fanout(rules) => {
                for rule in rules {
                    out.push_str(&format!("{pad}<{name}{attrs}>\n"));
                    out.push_str(&format!("{pad}  {}\n", rule_value(rule, prefix)));
                    out.push_str(&format!("{pad}</{name}>\n"));
                }
            }
            OutputNode::Leaf(rule) => {
                out.push_str(&format!(
                    "{pad}<{name}{attrs}>{}</{name}>\n",
                    rule_value(rule, prefix)
                ));
            }
            OutputNode::Branch(children) => {
                out.push_str(&format!("{pad}<{name}{attrs}>\n"));
                render_level(children, &format!("{}  ", indent), prefix, out);
                out.push_str(&format!("{pad}</{name}>\n"));
            }
        }
    }
}

fn push_attribute(out: &mut String, pad: &str, name: &str, value: &str) {
    out.push_str(&format!(
        "{pad}<xsl:attribute name=\"{name}\">{value}</xsl:attribute>\n"
    ));
}

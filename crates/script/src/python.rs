//! Assembles the sections of a generated Python transform.
use crate::runtime::{GET_VALUE, PARSE_PREDICATE, SET_NESTED_VALUE, SPLIT_PATH};
use fieldmap_rules::{MappingRule, RuleSource};
use fieldmap_schema::DocumentFormat;
use serde_json::Value;

/// Name of the variable the caller binds to the raw input text.
pub const INPUT_VARIABLE: &str = "input_var_1";
/// Name of the variable that receives the serialized output.
pub const OUTPUT_VARIABLE: &str = "output_var_1";

pub(crate) fn notes_block(notes: &str) -> String {
    if notes.trim().is_empty() {
        return String::new();
    }
    format!(
        "\"\"\"\nMapping Notes:\n{}\n\"\"\"\n\n",
        notes
            .replace('\\', "\\\\")
            .replace("\"\"\"", "\\\"\\\"\\\"")
    )
}

pub(crate) fn imports(input: DocumentFormat, output: DocumentFormat) -> String {
    let mut lines = Vec::new();
    if input == DocumentFormat::Xml || output == DocumentFormat::Xml {
        lines.push("import xml.etree.ElementTree as ET");
    }
    lines.push("import json");
    lines.join("\n")
}

pub(crate) fn input_parser(input: DocumentFormat) -> String {
    match input {
        DocumentFormat::Xml => format!(
            "def parse_input({var}):\n    root = ET.fromstring({var}.strip())\n    return root",
            var = INPUT_VARIABLE
        ),
        DocumentFormat::Json => format!(
            "def parse_input({var}):\n    return json.loads({var})",
            var = INPUT_VARIABLE
        ),
    }
}

pub(crate) fn helpers() -> String {
    [SPLIT_PATH, PARSE_PREDICATE, GET_VALUE, SET_NESTED_VALUE].join("\n\n\n")
}

pub(crate) fn assignment(rule: &MappingRule) -> String {
    let target = py_str(&rule.output_path);
    match &rule.source {
        RuleSource::Constant { constant_value } => {
            format!("    set_nested_value(output, {}, {})", target, py_str(constant_value))
        }
        RuleSource::Direct { source_path } => format!(
            "    set_nested_value(output, {}, get_value(data, {}))",
            target,
            py_str(source_path)
        ),
    }
}

pub(crate) fn transform_function(rules: &[MappingRule]) -> String {
    let body: Vec<String> = rules.iter().map(assignment).collect();
    let mut out = String::from("def transform(data):\n    output = {}\n\n");
    if !body.is_empty() {
        out.push_str(&body.join("\n"));
        out.push_str("\n\n");
    }
    out.push_str("    return json.dumps(output, indent=2)");
    out
}

pub(crate) fn entry_point() -> String {
    format!(
        "# Execute transformation\ndata = parse_input({})\n{} = transform(data)\n",
        INPUT_VARIABLE, OUTPUT_VARIABLE
    )
}

/// Quotes text as a Python string literal. JSON string syntax is a subset of
/// Python's, so the JSON encoding is reused.
pub(crate) fn py_str(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}

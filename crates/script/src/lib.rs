//! Generates a self-contained Python transform from an ordered rule list.
//!
//! The script defines `parse_input(input_var_1)` and `transform(data)` and
//! ends with two statements that read `input_var_1` and bind the JSON text
//! result to `output_var_1`. Unresolvable source paths produce `null` fields
//! at run time rather than errors.

mod python;
pub mod runtime;

pub use python::{INPUT_VARIABLE, OUTPUT_VARIABLE};

use fieldmap_rules::MappingRule;
use fieldmap_schema::DocumentFormat;

/// Generates the transform script. Output depends only on the arguments.
pub fn generate_script(
    rules: &[MappingRule],
    input: DocumentFormat,
    output: DocumentFormat,
    notes: &str,
) -> String {
    let sections = [
        python::imports(input, output),
        python::input_parser(input),
        python::helpers(),
        python::transform_function(rules),
        python::entry_point(),
    ];
    let script = format!("{}{}", python::notes_block(notes), sections.join("\n\n\n"));
    log::debug!(
        "Generated {}->{} script for {} mappings ({} bytes)",
        input,
        output,
        rules.len(),
        script.len()
    );
    script
}

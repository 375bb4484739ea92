//! Command-line interface for schema inspection, code generation and preview.

use clap::{Parser, Subcommand};
use fieldmap::{
    DocumentFormat, MapperConfig, MapperError, MappingStore, SchemaNode, Side,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "fieldmap", version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the schema inferred from a sample document
    Schema {
        /// Sample XML or JSON document
        file: PathBuf,

        /// Document format; guessed from the extension when omitted
        #[arg(short, long)]
        format: Option<DocumentFormat>,

        /// Print the tree as JSON instead of an indented listing
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Generate a Python transform script from a mapping file
    Script {
        #[arg(long)]
        input_format: DocumentFormat,

        #[arg(long)]
        output_format: DocumentFormat,

        /// JSON array of mapping rules
        #[arg(short, long)]
        mappings: PathBuf,

        #[arg(long, default_value = "")]
        notes: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate an XSLT 1.0 stylesheet from a mapping file
    Xslt {
        #[arg(short, long)]
        mappings: PathBuf,

        #[arg(long, default_value = "")]
        notes: String,

        /// Copy the input document and append mapped elements
        #[arg(long, default_value_t = false)]
        copy_input_structure: bool,

        /// Namespace URI bound to the `ns` prefix
        #[arg(long)]
        namespace: Option<String>,

        /// Write to this file instead of stdout; `.xsl` is added when it has no extension
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Apply a mapping file to a document and print the resulting JSON
    Preview {
        /// Document to transform
        input: PathBuf,

        #[arg(long)]
        input_format: Option<DocumentFormat>,

        #[arg(short, long)]
        mappings: PathBuf,
    },
}

pub fn run(cli: Cli) -> Result<(), MapperError> {
    match cli.command {
        Commands::Schema { file, format, json } => {
            let format = resolve_format(&file, format)?;
            let schema = fieldmap_schema::parse_document(&read(&file)?, format)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&schema)?);
            } else {
                let mut listing = String::new();
                render_tree(&schema, 0, &mut listing);
                print!("{}", listing);
            }
        }
        Commands::Script {
            input_format,
            output_format,
            mappings,
            notes,
            output,
        } => {
            let store = load_mappings(&mappings)?;
            let script = fieldmap::generate_script(store.rules(), input_format, output_format, &notes);
            emit(&script, output.as_deref())?;
        }
        Commands::Xslt {
            mappings,
            notes,
            copy_input_structure,
            namespace,
            output,
        } => {
            let store = load_mappings(&mappings)?;
            let mut config = MapperConfig::new()
                .with_notes(notes)
                .with_copy_input_structure(copy_input_structure);
            if let Some(uri) = namespace {
                config = config.with_namespace(uri);
            }
            let xslt = fieldmap_xslt::generate_with_options(store.rules(), &config.xslt_options());
            let output = output.map(|path| match path.extension() {
                Some(_) => path,
                None => path.with_extension(fieldmap_xslt::FILE_EXTENSION),
            });
            emit(&xslt, output.as_deref())?;
        }
        Commands::Preview {
            input,
            input_format,
            mappings,
        } => {
            let format = resolve_format(&input, input_format)?;
            let store = load_mappings(&mappings)?;
            let result = fieldmap::preview(store.rules(), &read(&input)?, format)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }
    Ok(())
}

fn resolve_format(path: &Path, explicit: Option<DocumentFormat>) -> Result<DocumentFormat, MapperError> {
    explicit
        .or_else(|| DocumentFormat::from_extension(path))
        .ok_or(MapperError::MissingFormat(Side::Input))
}

fn read(path: &Path) -> Result<String, MapperError> {
    fs::read_to_string(path).map_err(|e| {
        MapperError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read '{}': {}", path.display(), e),
        ))
    })
}

fn load_mappings(path: &Path) -> Result<MappingStore, MapperError> {
    let store = MappingStore::from_json(&read(path)?)?;
    log::info!("Loaded {} mappings from {}", store.len(), path.display());
    Ok(store)
}

fn emit(text: &str, output: Option<&Path>) -> Result<(), MapperError> {
    match output {
        Some(path) => {
            fs::write(path, text)?;
            log::info!("Wrote {} bytes to {}", text.len(), path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn render_tree(nodes: &[SchemaNode], depth: usize, out: &mut String) {
    for node in nodes {
        let marker = if node.is_attribute { "@" } else { "" };
        out.push_str(&format!(
            "{}{}{} ({})  {}\n",
            "  ".repeat(depth),
            marker,
            node.name,
            node.kind,
            node.path
        ));
        render_tree(&node.children, depth + 1, out);
    }
}

//! `jnode`: inspect, convert and describe JSON documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Re-indent a document (stdin → stdout)
//! echo '{"name":"Alice","age":30}' | jnode format --indent two
//!
//! # Read one value by dotted path, converting it in compatible mode
//! echo '{"items":[{"price":"12.5"}]}' | jnode get items.-1.price --to f64
//!
//! # Same, but refuse to coerce
//! echo '{"items":[{"price":"12.5"}]}' | jnode get items.0.price --to f64 --strict
//!
//! # Infer a JSON Schema for an object document
//! jnode schema -i order.json --max-depth 3 --description "purchase order"
//!
//! # Log what happens along the way
//! RUST_LOG=json_node=trace jnode get a.b --to i32 -i doc.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use json_node::{
    create_schema_from_object, ConvertTarget, IndentStyle, JsonNode, ObjectNode, SchemaOptions,
};
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "jnode",
    version,
    about = "Inspect, convert and describe JSON documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and write it back with the chosen indentation
    Format {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// minified, empty, tab, one, two, four or eight
        #[arg(long, default_value = "two")]
        indent: IndentStyle,
    },
    /// Print the value at a dotted path (negative positions count from the end)
    Get {
        /// Dotted path, e.g. `items.0.name`; empty selects the whole document
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Convert the value to this type (i32, f64, bool, string, datetime, ...)
        #[arg(long)]
        to: Option<String>,
        /// Require the value's kind to match the target exactly
        #[arg(long, requires = "to")]
        strict: bool,
    },
    /// Infer a JSON Schema from an object document
    Schema {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// JSON file with schema options (`maxDepth`, `description`)
        #[arg(long)]
        config: Option<String>,
        /// Object/array levels the schema may span, the root included
        #[arg(long)]
        max_depth: Option<usize>,
        /// Description of the root schema
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value = "two")]
        indent: IndentStyle,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Format {
            input,
            output,
            indent,
        } => {
            let doc = read_document(input.as_deref())?;
            write_output(output.as_deref(), &render(&doc, indent)?)?;
        }
        Commands::Get {
            path,
            input,
            to,
            strict,
        } => {
            let doc = read_document(input.as_deref())?;
            let value = doc.select(&path);
            if value.is_undefined() {
                anyhow::bail!("No value at path '{}'", path);
            }
            let value = match to {
                Some(target) => {
                    let target: ConvertTarget = target.parse()?;
                    debug!(%target, strict, "converting selected value");
                    value
                        .convert_to(target, strict)
                        .with_context(|| format!("Failed to convert '{}' to {}", path, target))?
                }
                None => value.clone(),
            };
            write_output(None, &render(&value, IndentStyle::Minified)?)?;
        }
        Commands::Schema {
            input,
            output,
            config,
            max_depth,
            description,
            indent,
        } => {
            let mut options = load_schema_options(config.as_deref())?;
            if let Some(max_depth) = max_depth {
                options.max_depth = max_depth;
            }
            if description.is_some() {
                options.description = description;
            }
            let text = read_input(input.as_deref())?;
            let obj = ObjectNode::parse(&text).context("Schema input must be a JSON object")?;
            let schema = create_schema_from_object(&obj, &options, None);
            write_output(output.as_deref(), &render(&schema.to_node(), indent)?)?;
        }
    }

    Ok(())
}

/// `--verbose` forces debug output; otherwise `RUST_LOG` decides, defaulting to warnings.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_schema_options(path: Option<&str>) -> Result<SchemaOptions> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Invalid schema options in {}", path))
        }
        None => Ok(SchemaOptions::default()),
    }
}

fn render(node: &JsonNode, indent: IndentStyle) -> Result<String> {
    let mut text = node
        .to_json_string(indent)
        .context("Failed to serialize JSON")?;
    text.push('\n');
    Ok(text)
}

fn read_document(path: Option<&str>) -> Result<JsonNode> {
    let text = read_input(path)?;
    JsonNode::parse(&text).context("Failed to parse JSON input")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}

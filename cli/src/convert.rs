#![deny(missing_docs)]

//! # Convert Command
//!
//! Argument surface and pipeline orchestration: read the input, run the core
//! conversion, and write the XSD only once it is fully assembled, so a
//! failed run leaves no partial output on the destination.

use crate::nameset::resolve_name_set;
use clap::Parser;
use oas2xsd_core::{convert_str, AppResult, DocumentFormat, FilterConfig};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Convert an OpenAPI (SS12000) document to an XML Schema (XSD) document.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct ConvertArgs {
    /// Input OpenAPI document (YAML or JSON); defaults to standard input.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output path for the XSD document; defaults to standard output.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Force the input format instead of inferring it from the content.
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Exclude types reachable only from request bodies.
    #[arg(long)]
    pub exclude_request_body_types: bool,

    /// Only emit these types (comma-separated list or path to a
    /// newline-delimited file). Overrides --exclude and
    /// --exclude-request-body-types.
    #[arg(long)]
    pub include: Option<String>,

    /// Types to drop from the output (comma-separated list or path to a
    /// newline-delimited file).
    #[arg(long)]
    pub exclude: Option<String>,

    /// Types to inline at every reference site instead of defining them
    /// standalone (same format as --exclude).
    #[arg(long)]
    pub expand: Option<String>,
}

/// Input format flag values.
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum FormatArg {
    /// Treat the input as YAML.
    Yaml,
    /// Treat the input as JSON.
    Json,
}

impl From<FormatArg> for DocumentFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Yaml => DocumentFormat::Yaml,
            FormatArg::Json => DocumentFormat::Json,
        }
    }
}

/// Runs the conversion pipeline.
pub fn execute(args: &ConvertArgs) -> AppResult<()> {
    let content = read_input(args.input.as_deref())?;
    let config = build_config(args)?;

    let xsd = convert_str(&content, args.format.map(Into::into), &config)?;

    write_output(args.output.as_deref(), &xsd)
}

fn build_config(args: &ConvertArgs) -> AppResult<FilterConfig> {
    Ok(FilterConfig {
        include: resolve_name_set(args.include.as_deref())?,
        exclude: resolve_name_set(args.exclude.as_deref())?,
        expand: resolve_name_set(args.expand.as_deref())?,
        exclude_request_body_types: args.exclude_request_body_types,
    })
}

fn read_input(path: Option<&Path>) -> AppResult<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            Ok(content)
        }
    }
}

fn write_output(path: Option<&Path>, xsd: &str) -> AppResult<()> {
    match path {
        Some(path) => fs::write(path, xsd)?,
        None => io::stdout().write_all(xsd.as_bytes())?,
    }
    Ok(())
}

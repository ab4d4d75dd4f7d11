#![deny(missing_docs)]

//! # oas2xsd CLI
//!
//! Converts an OpenAPI (SS12000) document into an XML Schema document.
//!
//! The run is one blocking pipeline:
//! load -> classify usage -> resolve filters -> map types -> serialize.

use clap::Parser;

mod convert;
mod nameset;

fn main() {
    // Warnings go to stderr, keeping stdout clean for the emitted XSD.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = convert::ConvertArgs::parse();
    if let Err(error) = convert::execute(&args) {
        eprintln!("error: {}", error);
        std::process::exit(1);
    }
}

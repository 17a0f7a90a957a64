#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for stream table border finalization.
//!
//! Reads a stream table description (border seeds, strokes, fills) as
//! JSON, finalizes every border, and writes the finalized borders and
//! reclassified strokes back out as JSON.

mod pipeline;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gridline_table::settings;

/// Finalize stream table borders.
#[derive(Parser)]
#[command(name = "gridline")]
#[command(about = "Finalize stream table borders from strokes, shadings, and layout")]
struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Finalize all borders of a stream table.
    Finalize {
        /// JSON stream table description.
        #[arg(long)]
        input: PathBuf,

        /// Where to write the JSON report (default: stdout).
        #[arg(long)]
        output: Option<PathBuf>,

        /// TOML settings file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Range tolerance, overriding the settings file.
        #[arg(long)]
        margin: Option<f64>,

        /// Pretty-print the JSON report.
        #[arg(long)]
        pretty: bool,
    },

    /// Validate the border linkage of a stream table.
    Check {
        /// JSON stream table description.
        #[arg(long)]
        input: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Finalize {
            input,
            output,
            config,
            margin,
            pretty,
        } => {
            let mut finalize_settings = match config {
                Some(path) => settings::load_settings(&path)?,
                None => settings::parse_settings_toml(settings::DEFAULT_SETTINGS_TOML)?,
            };
            if let Some(margin) = margin {
                finalize_settings.margin = margin;
            }

            let table = pipeline::finalize(pipeline::read_input(&input)?, finalize_settings)?;
            let json = pipeline::to_json(&table, pretty)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    log::info!("Wrote {} border(s) to {}", table.borders.len(), path.display());
                }
                None => println!("{json}"),
            }
        }
        Commands::Check { input } => {
            let count = pipeline::check(&pipeline::read_input(&input)?)?;
            println!("{}: {count} border(s), linkage OK", input.display());
        }
    }

    Ok(())
}

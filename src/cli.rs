//! CLI interface for the approval finder

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "approval-finder")]
#[command(about = "Find which students of a roster appear as approved in PDF result sheets")]
#[command(long_about = "Match a roster of student names, one per line, against the ALL-CAPS names printed in PDF result sheets and export the approved students as CSV or PDF")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check roster names against one or more result sheets
    Check {
        /// Roster file with one student name per line, `-` for stdin
        #[arg(short, long)]
        roster: PathBuf,

        /// Result sheets to check (PDF, TXT)
        documents: Vec<PathBuf>,

        /// Output format: console, json
        #[arg(short, long)]
        format: Option<String>,

        /// Export the approved students as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Export the approved students as a PDF report
        #[arg(long)]
        pdf: Option<PathBuf>,

        /// Write both exports into this directory using default file names
        #[arg(long)]
        export_dir: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Do not draw charts
        #[arg(long)]
        no_charts: bool,
    },

    /// List the names extracted from a single result sheet
    Extract {
        /// Result sheet (PDF, TXT)
        document: PathBuf,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        _ => Err(format!("Invalid output format: {}. Supported: console, json", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

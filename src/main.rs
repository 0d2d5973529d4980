//! Approval finder: match a student roster against PDF result sheets

use approval_finder::cli::{self, Cli, Commands, ConfigAction};
use approval_finder::config::{Config, OutputFormat};
use approval_finder::error::{ApprovalFinderError, Result};
use approval_finder::input::manager::{InputManager, STDIN_PATH};
use approval_finder::output::export::{self, ExportKind};
use approval_finder::output::formatter::ReportGenerator;
use approval_finder::output::report::ApprovalReport;
use approval_finder::processing::checker::{ApprovalChecker, RunSummary};
use approval_finder::processing::extractor::NameExtractor;
use approval_finder::processing::progress::{IndicatifProgress, NullProgress, ProgressCallback};
use clap::Parser;
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "txt"];

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Check {
            roster,
            documents,
            format,
            csv,
            pdf,
            export_dir,
            no_color,
            no_charts,
        } => {
            let output_format = match format {
                Some(format) => cli::parse_output_format(&format).map_err(ApprovalFinderError::InvalidInput)?,
                None => config.output.format,
            };
            if no_color {
                config.output.color_output = false;
            }
            if no_charts {
                config.output.show_charts = false;
            }

            for document in &documents {
                if let Err(e) = cli::validate_file_extension(document, DOCUMENT_EXTENSIONS) {
                    warn!("{}: {}", document.display(), e);
                }
            }

            let started = Instant::now();
            let mut manager = InputManager::new();
            let roster_list = manager.load_roster(&roster).await?;
            let roster_source = if roster.as_os_str() == STDIN_PATH {
                STDIN_PATH.to_string()
            } else {
                roster.display().to_string()
            };

            let summary = if roster_list.is_empty() || documents.is_empty() {
                info!("Nothing to do: roster has {} name(s), {} document(s) given", roster_list.len(), documents.len());
                RunSummary::empty()
            } else {
                let checker = ApprovalChecker::new(roster_list).with_filter(config.name_filter());
                let progress: Box<dyn ProgressCallback> = match output_format {
                    OutputFormat::Console => Box::new(IndicatifProgress::documents_bar()),
                    OutputFormat::Json => Box::new(NullProgress),
                };
                checker.process_paths(&mut manager, &documents, progress.as_ref()).await
            };

            let report = ApprovalReport::from_summary(
                summary,
                config.output.report_title.clone(),
                roster_source,
                u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            );

            let generator = ReportGenerator::with_options(
                config.output.color_output,
                config.output.show_charts,
                config.output.chart_width,
                true,
            );
            println!("{}", generator.generate_report(&report, &output_format)?);

            let timestamp = config.output.timestamp_filenames;
            let csv_path = csv.or_else(|| {
                export_dir
                    .as_ref()
                    .map(|dir| dir.join(export::suggest_filename(ExportKind::Csv, timestamp)))
            });
            let pdf_path = pdf.or_else(|| {
                export_dir
                    .as_ref()
                    .map(|dir| dir.join(export::suggest_filename(ExportKind::Pdf, timestamp)))
            });

            export::export_reports(&report, csv_path.as_deref(), pdf_path.as_deref())?;
        }

        Commands::Extract { document } => {
            let mut manager = InputManager::new();
            let loaded = manager.load_document(&document).await?;
            let extractor = NameExtractor::new().with_filter(config.name_filter());

            let mut names: Vec<String> = extractor.extract(&loaded).into_iter().collect();
            names.sort();

            println!("{} name(s) found in {}", names.len(), loaded.id);
            for (idx, name) in names.iter().enumerate() {
                println!("{:>4}. {}", idx + 1, name);
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration\n");
                    println!("Config file: {}", path.display());
                    println!("\nMatching:");
                    println!("  Minimum words per name: {}", describe_bound(config.matching.min_words));
                    println!("  Maximum words per name: {}", describe_bound(config.matching.max_words));
                    println!("\nOutput:");
                    println!("  Format: {:?}", config.output.format);
                    println!("  Colors: {}", config.output.color_output);
                    println!("  Charts: {} (width {})", config.output.show_charts, config.output.chart_width);
                    println!("  Report title: {}", config.output.report_title);
                    println!("  Timestamped file names: {}", config.output.timestamp_filenames);
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save_to(&path)?;
                    println!("✅ Configuration reset successfully!");
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}

fn describe_bound(bound: Option<usize>) -> String {
    bound.map_or_else(|| "none".to_string(), |b| b.to_string())
}

//! Command implementations for the measurement processor CLI
//!
//! This module contains the command execution logic, result reporting,
//! and error handling for the CLI interface.

use crate::app::adapters::storage::{InMemoryStore, MeasurementStore};
use crate::app::models::{FileUpload, SummaryFilter};
use crate::app::services::processing::DataPipeline;
use crate::cli::args::{Args, Commands, ProcessArgs};
use crate::constants::RECENT_RECORDS_LIMIT;
use crate::{Error, Result};
use colored::Colorize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Main command runner for the measurement processor
///
/// Orchestrates one CLI invocation:
/// 1. Set up logging and configuration
/// 2. Read the input file
/// 3. Run the ingestion pipeline (or a dry run for `check`)
/// 4. Report the outcome
pub async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Process(process_args)) => execute(process_args, false).await,
        Some(Commands::Check(check_args)) => execute(check_args, true).await,
        None => {
            // Unreachable in practice: main prints help when no command is given
            Err(Error::configuration("no command specified"))
        }
    }
}

async fn execute(args: ProcessArgs, dry_run: bool) -> Result<()> {
    let start_time = Instant::now();

    setup_logging(&args)?;

    info!("Starting measurement processor");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = args.build_config()?;
    debug!("Validation thresholds: {:?}", config);

    let upload = read_upload(&args).await?;
    let file_identity = upload.file_name.clone();

    let store = Arc::new(InMemoryStore::new());
    let pipeline = DataPipeline::with_default_parsers(config, store.clone())?;

    let result = if dry_run {
        pipeline.check_upload(Some(upload)).await
    } else {
        pipeline.process_upload(Some(upload)).await
    };

    match result {
        Ok(count) => {
            report_success(&file_identity, count, dry_run, start_time, &store).await?;
            Ok(())
        }
        Err(error) => {
            report_rejection(&file_identity, &error);
            Err(error)
        }
    }
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &ProcessArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("measurement_processor={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Read the input file into an upload named after the file itself
async fn read_upload(args: &ProcessArgs) -> Result<FileUpload> {
    let file_name = args
        .file
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            Error::configuration(format!(
                "Input path has no usable file name: {}",
                args.file.display()
            ))
        })?
        .to_string();

    let contents = tokio::fs::read(&args.file)
        .await
        .map_err(|e| Error::io(format!("failed to read {}", args.file.display()), e))?;

    debug!("Read {} bytes from {}", contents.len(), args.file.display());
    Ok(FileUpload::new(file_name, contents))
}

/// Print the success report, including the stored summary statistics
async fn report_success(
    file_identity: &str,
    count: usize,
    dry_run: bool,
    start_time: Instant,
    store: &InMemoryStore,
) -> Result<()> {
    if dry_run {
        println!(
            "{} '{}' is clean: {} record(s) would be committed ({} ms)",
            "OK".green().bold(),
            file_identity,
            count,
            start_time.elapsed().as_millis()
        );
        return Ok(());
    }

    println!(
        "{} '{}': {} record(s) committed ({} ms)",
        "OK".green().bold(),
        file_identity,
        count,
        start_time.elapsed().as_millis()
    );

    let filter = SummaryFilter {
        file_identity: Some(file_identity.to_string()),
        ..Default::default()
    };
    if let Some(summary) = store.summaries(&filter).await?.first() {
        println!();
        println!("Summary statistics:");
        println!("  First measurement:   {}", summary.min_date);
        println!("  Time span:           {} s", summary.time_delta_seconds);
        println!("  Avg execution time:  {}", summary.avg_execution_time);
        println!("  Avg value:           {}", summary.avg_value);
        println!("  Median value:        {}", summary.median_value);
        println!("  Min value:           {}", summary.min_value);
        println!("  Max value:           {}", summary.max_value);
    }

    let recent = store
        .recent_records(file_identity, RECENT_RECORDS_LIMIT)
        .await?;
    if !recent.is_empty() {
        println!();
        println!("Most recent measurements:");
        for record in &recent {
            println!(
                "  {}  execution_time={}  value={}",
                record.timestamp, record.execution_time, record.value
            );
        }
    }

    Ok(())
}

/// Print the rejection report, one line per error in report order
///
/// Non-rejection failures (I/O, storage) are left for the caller to print.
fn report_rejection(file_identity: &str, error: &Error) {
    if let Some(report) = error.rejection_report() {
        eprintln!(
            "{} '{}' rejected with {} error(s):",
            "FAILED".red().bold(),
            file_identity,
            report.len()
        );
        for item in report {
            eprintln!("  {}", item.to_string().red());
        }
    }
}

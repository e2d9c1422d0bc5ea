use clap::Parser;
use measurement_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    match runtime.block_on(commands::run(args)) {
        Ok(()) => process::exit(0),
        Err(error) => {
            // Rejection reports are printed by the command itself
            if error.rejection_report().is_none() {
                eprintln!("Error: {}", error);
            }
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Measurement Processor - Delimited Measurement File Ingestion");
    println!("============================================================");
    println!();
    println!("Parses ;-delimited measurement files (timestamp;execution_time;value),");
    println!("validates every record, computes per-file statistics and commits clean");
    println!("files to storage. Files with any error are rejected with a full report.");
    println!();
    println!("USAGE:");
    println!("    measurement-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Parse, validate and commit a measurement file");
    println!("    check       Validate a measurement file without committing anything");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Ingest a measurement file with default thresholds:");
    println!("    measurement-processor process measurements.csv");
    println!();
    println!("    # Validate only, with a custom year threshold:");
    println!("    measurement-processor check measurements.csv --min-year 2010");
    println!();
    println!("    # Use a TOML config file and verbose logging:");
    println!("    measurement-processor process measurements.csv -c config.toml -vv");
    println!();
    println!("For detailed help on any command, use:");
    println!("    measurement-processor <COMMAND> --help");
}

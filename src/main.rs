// Care History Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/care-history-simulator
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/care-history-simulator --homes 4 --seed 7 --anchor 2025-01-01T00:00:00Z --verbose
// ```

use anyhow::{Context, Result};
use care_history_simulator::simulation::{
    DatasetWriter, GenerationOutput, GenerationStatistics, LoggingConfig, SimulationOrchestrator,
    Verbosity,
};
use care_history_simulator::types::config::CliArgs;
use care_history_simulator::types::SimulationConfig;
use clap::Parser;
use std::process;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        let printed = SimulationConfig::from_cli_args(args.clone())
            .map_err(anyhow::Error::from)
            .and_then(|config| config.print_json().map_err(anyhow::Error::from));
        match printed {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize configuration: {:#}", e);
                process::exit(1);
            }
        }
    }

    // Initialize logging based on CLI flags
    let mut logging = LoggingConfig::for_verbosity(Verbosity::from_flags(args.verbose, args.debug));
    if args.log_json {
        logging = logging.with_json_format();
    }
    if args.no_color {
        logging = logging.without_ansi();
    }
    if let Some(directory) = &args.log_dir {
        logging = logging.with_log_directory(directory);
    }

    let _logging_guard = match logging.init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    info!("Starting Care History Simulator");

    // Load configuration from CLI arguments and optional config file
    let config = match SimulationConfig::from_cli_args(args.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        process::exit(1);
    }

    info!("Configuration loaded and validated successfully");

    // Handle dry run mode
    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - no data will be generated.");
        print_configuration_summary(&config);
        return;
    }

    // Print startup banner and configuration
    print_startup_banner(&config);

    if let Err(e) = run_generation(config) {
        error!("Generation failed: {:#}", e);
        eprintln!("Generation failed: {:#}", e);
        process::exit(1);
    }

    info!("Care History Simulator completed successfully");
}

/// Generate the dataset and write it to the output directory
fn run_generation(config: SimulationConfig) -> Result<()> {
    eprintln!("Initializing generator...");
    let orchestrator =
        SimulationOrchestrator::new(config.clone()).context("Failed to create orchestrator")?;

    let horizon = orchestrator.horizon();
    eprintln!("Generating history from {} to {}...", horizon.start_date(), horizon.end_date());
    let GenerationOutput { dataset, rendered_documents, statistics } =
        orchestrator.run().context("Dataset generation failed")?;

    eprintln!("Writing collections to {}...", config.output_directory);
    let writer = DatasetWriter::new(&config.output_directory);
    let written = writer
        .write(&dataset)
        .with_context(|| format!("Failed to write dataset to '{}'", config.output_directory))?;
    info!("Wrote {} files to {}", written.len(), config.output_directory);

    if !rendered_documents.is_empty() {
        let documents = writer
            .write_documents(&rendered_documents)
            .context("Failed to write rendered documents")?;
        info!("Wrote {} documents", documents.len());
    }

    print_final_statistics(&statistics);
    Ok(())
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &SimulationConfig) {
    eprintln!("Care History Simulator");
    eprintln!("======================");
    eprintln!("Synthetic operational history for residential care homes");
    eprintln!();

    print_configuration_summary(config);
}

/// Print configuration summary
fn print_configuration_summary(config: &SimulationConfig) {
    eprintln!("Configuration:");
    eprintln!("  Random Seed: {}", config.seed);
    match config.anchor {
        Some(anchor) => eprintln!("  Horizon End: {}", anchor.to_rfc3339()),
        None => eprintln!("  Horizon End: now"),
    }
    eprintln!("  Horizon Days: {}", config.horizon_days);
    eprintln!("  Homes: {}", config.home_count);
    eprintln!("  Beds per Home: {} - {}", config.min_beds_per_home, config.max_beds_per_home);
    eprintln!(
        "  Caregivers per Home: {} - {}",
        config.min_caregivers_per_home, config.max_caregivers_per_home
    );
    eprintln!("  Cross-Home Assignment: {:.1}%", config.cross_home_assignment_probability * 100.0);
    if config.upcoming_appointment_days > 0 {
        eprintln!("  Upcoming Appointments: {} days", config.upcoming_appointment_days);
    }
    eprintln!("  Render Documents: {}", config.render_documents);
    eprintln!("  Output Directory: {}", config.output_directory);

    eprintln!("\nEstimated Scale:");
    let avg_beds = (config.min_beds_per_home + config.max_beds_per_home) / 2;
    eprintln!("  Total Beds: ~{}", config.home_count * avg_beds);
    eprintln!();
}

/// Print the run report
fn print_final_statistics(statistics: &GenerationStatistics) {
    eprintln!();
    eprintln!("{}", statistics.generate_summary_report());
    eprintln!("Summary: {}", statistics.summary());
}

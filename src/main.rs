use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hurricane_track_cleaner::config::Config;
use hurricane_track_cleaner::pipeline::{CleanOptions, CoordinatePolicy, TrackCleaner};

#[derive(Parser)]
#[command(name = "hurricane-track-cleaner")]
#[command(about = "Flatten a hurricane track archive export into an analysis-ready CSV", long_about = None)]
struct Cli {
    /// Source workbook (first sheet is read); overrides HURRICANE_INPUT_PATH
    #[arg(long)]
    input: Option<PathBuf>,

    /// Destination CSV, overwritten if it exists; overrides HURRICANE_OUTPUT_PATH
    #[arg(long)]
    output: Option<PathBuf>,

    /// Skip rows with unparseable coordinates instead of aborting
    #[arg(long)]
    skip_invalid_coordinates: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    summary_json: bool,
}

fn main() -> ExitCode {
    // Load .env file if it exists (ignore errors if not found)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,hurricane_track_cleaner=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::from_env()?;
    if let Some(input) = cli.input {
        config.input_path = input;
    }
    if let Some(output) = cli.output {
        config.output_path = output;
    }
    if cli.skip_invalid_coordinates {
        config.coordinate_policy = CoordinatePolicy::SkipRow;
    }
    info!("Configuration: {:?}", config);

    let cleaner = TrackCleaner::new(CleanOptions {
        coordinate_policy: config.coordinate_policy,
    });
    let summary = cleaner.run(&config.input_path, &config.output_path)?;

    if cli.summary_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    println!("Done!");

    Ok(())
}

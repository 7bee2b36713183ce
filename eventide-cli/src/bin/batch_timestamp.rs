//! Estimates the end timestamp [microseconds] of batches of events from an
//! event recording.
//!
//! Prints one line per completed batch with its last timestamp; a trailing
//! partial batch, if any, is printed last.

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use eventide_cli::RecordingReader;
use eventide_core::{Event, Pipeline};

#[derive(Parser)]
#[command(
    name = "batch_timestamp",
    version,
    about = "Estimates the end timestamp [microseconds] of batches of events from an event recording"
)]
struct Cli {
    /// Path to the input recording
    input: PathBuf,

    /// Initial time decay [microseconds]
    #[arg(short = 't', long, default_value_t = 10_000.0)]
    time_decay_first: f32,

    /// Weight threshold that splits the batches
    #[arg(short = 'e', long, default_value_t = 0.1)]
    weight_threshold: f32,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let file = File::open(&cli.input)?;
    let mut reader = RecordingReader::new(BufReader::new(file))?;

    let mut pipeline = Pipeline::new(
        cli.time_decay_first,
        cli.weight_threshold,
        |_| {},
        |batch: Vec<Event>| {
            if let Some(last) = batch.last() {
                println!("{}", last.t);
            }
        },
    )?;

    for event in &mut reader {
        pipeline.process(event?);
    }

    if let Some(last) = pipeline.into_pending().last() {
        println!("{}", last.t);
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    eventide_cli::logging::init(&cli.log_level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("batch_timestamp: {err}");
            ExitCode::FAILURE
        }
    }
}

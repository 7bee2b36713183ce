//! Estimates the size of batches of events from an event recording.
//!
//! Prints one line per completed batch with its event count; a trailing
//! partial batch, if any, is printed last.

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use eventide_cli::{CropWindow, RecordingReader};
use eventide_core::{Event, Pipeline};
use tracing::{debug, info};

#[derive(Parser)]
#[command(
    name = "batch_size",
    version,
    about = "Estimates the size of batches of events from an event recording"
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

    /// Crop window left coordinate
    #[arg(long, default_value_t = 0)]
    crop_left: u16,

    /// Crop window right coordinate; defaults to the sensor width
    #[arg(long)]
    crop_right: Option<u16>,

    /// Crop window bottom coordinate
    #[arg(long, default_value_t = 0)]
    crop_bottom: u16,

    /// Crop window top coordinate; defaults to the sensor height
    #[arg(long)]
    crop_top: Option<u16>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let file = File::open(&cli.input)?;
    let mut reader = RecordingReader::new(BufReader::new(file))?;
    let header = reader.header();
    info!(
        width = header.width,
        height = header.height,
        "opened recording"
    );

    let crop = CropWindow {
        left: cli.crop_left,
        right: cli.crop_right.unwrap_or(header.width),
        bottom: cli.crop_bottom,
        top: cli.crop_top.unwrap_or(header.height),
    };

    let mut pipeline = Pipeline::new(
        cli.time_decay_first,
        cli.weight_threshold,
        |_| {},
        |batch: Vec<Event>| println!("{}", batch.len()),
    )?;

    let mut dropped = 0u64;
    for event in &mut reader {
        let event = event?;
        if !crop.contains(&event) {
            dropped += 1;
            continue;
        }
        pipeline.process(event);
    }
    debug!(dropped, "events outside the crop window");

    let pending = pipeline.into_pending();
    if !pending.is_empty() {
        println!("{}", pending.len());
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    eventide_cli::logging::init(&cli.log_level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("batch_size: {err}");
            ExitCode::FAILURE
        }
    }
}

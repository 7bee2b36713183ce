//! Computes aggregate statistics and the final decay state of an event
//! recording, timing the run.

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use eventide_cli::RecordingReader;
use eventide_core::{DecayEstimator, Event, StreamStatistics, StreamTracker};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "stream_stats",
    version,
    about = "Computes aggregate statistics and the final decay state of an event recording"
)]
struct Cli {
    /// Path to the input recording
    input: PathBuf,

    /// Initial time decay [microseconds]
    #[arg(short = 't', long, default_value_t = 10_000.0)]
    time_decay_first: f32,

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

    let mut statistics = StreamStatistics::default();
    let mut decay = DecayEstimator::new(cli.time_decay_first, |_| {})?;

    let start = Instant::now();
    {
        let mut tracker =
            StreamTracker::new(StreamStatistics::project::<Event>, |s| statistics = s);
        for event in &mut reader {
            let event = event?;
            tracker.process(&event);
            decay.process(&event);
        }
    }
    let elapsed_us = start.elapsed().as_secs_f64() * 1e6;

    let state = decay.state();
    println!(
        "t: {}, decay: {}, n decay: {}, t decay: {}, rate: {}",
        state.t, state.decay, state.n_decay, state.t_decay, state.rate
    );

    println!(
        "sequence duration: {} [sec]",
        1e-6 * statistics.duration as f64
    );
    println!("number of events: {}", statistics.number_events);
    println!("elapsed time: {} [sec]", 1e-6 * elapsed_us);
    if statistics.number_events > 0 {
        println!(
            "elapsed time per event: {} [microsec]",
            elapsed_us / statistics.number_events as f64
        );
        println!(
            "real-time factor: {} (>1 means real-time)",
            statistics.duration as f64 / elapsed_us
        );
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    eventide_cli::logging::init(&cli.log_level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("stream_stats: {err}");
            ExitCode::FAILURE
        }
    }
}

//! wave2text command line interface
//!
//! Asks for a waveform and an output path, then writes one sample per line.
//! With `--bpm` it also prints a tempo estimate.

use clap::Parser;
use log::{debug, info};
use std::io;
use std::path::PathBuf;
use wave_to_text::filter::ChannelMode;
use wave_to_text::processor::{ConvertOptions, convert};
use wave_to_text::prompt::{OUTPUT_PROMPT, Prompter, WAVE_PROMPT};

#[derive(Parser)]
#[command(name = "wave2text")]
#[command(about = "Write the samples of a waveform file as lines of text", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// How to reduce multi-channel input: mix, interleave, or a channel index
    #[arg(short, long, default_value = "mix")]
    channels: ChannelMode,

    /// Estimate the tempo of the decoded samples and print it
    #[arg(long)]
    bpm: bool,

    /// Waveform file (prompted for when omitted)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Text file to write (prompted for when omitted)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    debug!("wave2text {}", wave_to_text::VERSION);

    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
    let input = prompter.resolve(cli.input, WAVE_PROMPT, "wave file")?;
    let output = prompter.resolve(cli.output, OUTPUT_PROMPT, "output file")?;

    let options = ConvertOptions {
        channel_mode: cli.channels,
        detect_tempo: cli.bpm,
    };
    let stats = convert(&input, &output, &options)?;
    if let Some(tempo) = stats.tempo {
        println!("BPM = {}", tempo.bpm);
    }
    info!(
        "Done: {} frames, {} lines",
        stats.frames_processed, stats.samples_processed
    );

    Ok(())
}

#![warn(missing_docs)]

//! # wave-to-text: dump audio samples as text
//!
//! Decodes a waveform file and writes every sample as a decimal line of
//! text, in stream order.
//!
//! ## Features
//!
//! - **Decode** - PCM WAVE through hound, anything else symphonia can probe
//! - **Remix** - mix channels down to mono, keep them interleaved, or pick one
//! - **Write** - one `f64` per line, shortest text that parses back exactly
//! - **Tempo** - optional energy-based BPM estimate of the decoded samples
//! - **CLI** - prompts for paths on stdin when they are not given as arguments
//!
//! ## Quick Start
//!
//! ```ignore
//! use wave_to_text::processor::{convert, ConvertOptions};
//!
//! let stats = convert("tone.wav", "tone.txt", &ConvertOptions::default())?;
//! println!("{} samples written", stats.samples_processed);
//! ```

/// Core audio types and structures
pub mod core;
/// Error types for conversion
pub mod error;
/// Audio decoder implementations
pub mod decoder;
/// Channel filters
pub mod filter;
/// Sample writers
pub mod encoder;
/// Conversion pipeline
pub mod processor;
/// Prompted path input
pub mod prompt;
/// Waveform analysis
pub mod analysis;

pub use crate::core::{AudioFrame, AudioMetadata, BitDepth, Channels, Waveform};
pub use crate::error::{AudioError, AudioResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

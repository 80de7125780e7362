//! Analysis run over a decoded waveform

/// Energy-based tempo estimation
pub mod bpm;

pub use bpm::{BeatDetector, TempoEstimate};

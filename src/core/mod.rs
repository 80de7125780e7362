//! Core audio types and structures

/// Audio frame and metadata types
pub mod audio;

pub use audio::{AudioFrame, AudioMetadata, BitDepth, Channels, Waveform};

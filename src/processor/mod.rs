//! End-to-end conversion

/// Decode-then-write pipeline
pub mod convert;

pub use convert::{ConvertOptions, convert};

use crate::analysis::TempoEstimate;

/// Counts reported after a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    /// Sample frames (one per time step) written
    pub frames_processed: u64,
    /// Lines written to the output file
    pub samples_processed: u64,
    /// Tempo of the decoded samples, when requested
    pub tempo: Option<TempoEstimate>,
}

//! Filters applied to decoded frames

/// Channel selection and mix-down
pub mod remix;

pub use remix::{ChannelMode, Remix};

use crate::core::AudioFrame;
use crate::error::AudioResult;

/// Trait for audio filters
pub trait Filter {
    /// Process an audio frame through this filter
    fn process(&mut self, frame: &AudioFrame) -> AudioResult<AudioFrame>;
}

use crate::error::{AudioError, AudioResult};
use std::time::Duration;

/// Channel count of an audio stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channels(u16);

impl Channels {
    /// Single channel
    pub const MONO: Channels = Channels(1);
    /// Two channels, left then right
    pub const STEREO: Channels = Channels(2);

    /// Create Channels from channel count
    pub fn from_count(count: u32) -> AudioResult<Self> {
        match u16::try_from(count) {
            Ok(n) if n > 0 => Ok(Channels(n)),
            _ => Err(AudioError::InvalidChannels {
                expected: 1,
                got: count,
            }),
        }
    }

    /// Get the number of channels
    pub fn count(&self) -> u32 {
        self.0 as u32
    }

    /// Get channel layout name
    pub fn name(&self) -> String {
        match self.0 {
            1 => "Mono".to_string(),
            2 => "Stereo".to_string(),
            n => format!("{n} channels"),
        }
    }
}

/// Bit depth of the stored samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitDepth {
    /// Integer PCM with the given number of bits
    Int(u16),
    /// 32-bit floating point
    F32,
}

impl BitDepth {
    /// Divisor that maps an integer sample into [-1.0, 1.0); `None` for
    /// float samples, which are stored in that range already
    pub fn full_scale(&self) -> Option<f64> {
        match self {
            BitDepth::Int(bits) => Some((1u64 << bits.saturating_sub(1)) as f64),
            BitDepth::F32 => None,
        }
    }
}

/// Block of interleaved samples produced by a decoder
#[derive(Debug, Clone)]
pub struct AudioFrame {
    /// Interleaved samples, nominally -1.0 to 1.0
    samples: Vec<f64>,
    sample_rate: u32,
    channels: Channels,
    /// Position of this frame in the decoded stream
    frame_number: u64,
}

impl AudioFrame {
    /// Create a new audio frame
    pub fn new(
        samples: Vec<f64>,
        sample_rate: u32,
        channels: Channels,
        frame_number: u64,
    ) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: sample_rate });
        }

        if samples.len() % channels.count() as usize != 0 {
            return Err(AudioError::DecodeError(format!(
                "{} samples do not divide into {} channels",
                samples.len(),
                channels.count()
            )));
        }

        Ok(AudioFrame {
            samples,
            sample_rate,
            channels,
            frame_number,
        })
    }

    /// Get reference to the samples
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Get owned samples (consumes frame)
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    /// Get sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get channel configuration
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Get number of samples per channel
    pub fn samples_per_channel(&self) -> usize {
        self.samples.len() / self.channels.count() as usize
    }

    /// Get frame number
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }
}

/// Stream parameters reported by a decoder
#[derive(Debug, Clone)]
pub struct AudioMetadata {
    /// Total duration, if the container states it
    pub duration: Option<Duration>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: Channels,
    /// Codec name (e.g. "PCM", "FLAC")
    pub codec: String,
    /// Bit depth if known
    pub bit_depth: Option<BitDepth>,
}

impl AudioMetadata {
    /// Create new metadata
    pub fn new(sample_rate: u32, channels: Channels, codec: String) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: sample_rate });
        }

        Ok(AudioMetadata {
            duration: None,
            sample_rate,
            channels,
            codec,
            bit_depth: None,
        })
    }

    /// Set duration from a frame count
    pub fn with_frames(mut self, frames: u64) -> Self {
        self.duration = Some(Duration::from_secs_f64(
            frames as f64 / self.sample_rate as f64,
        ));
        self
    }

    /// Set bit depth
    pub fn with_bit_depth(mut self, bit_depth: BitDepth) -> Self {
        self.bit_depth = Some(bit_depth);
        self
    }

    /// Get duration in seconds
    pub fn duration_secs(&self) -> Option<f64> {
        self.duration.map(|d| d.as_secs_f64())
    }
}

/// The complete decoded sample sequence of one file
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    /// Samples in temporal order
    pub samples: Vec<f64>,
    /// Source sample rate in Hz
    pub sample_rate: u32,
    /// Channels interleaved in `samples`
    pub channels: Channels,
}

impl Waveform {
    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when nothing was decoded
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_from_count() {
        assert_eq!(Channels::from_count(1).unwrap(), Channels::MONO);
        assert_eq!(Channels::from_count(2).unwrap(), Channels::STEREO);
        assert_eq!(Channels::from_count(3).unwrap().count(), 3);
        assert!(Channels::from_count(0).is_err());
        assert!(Channels::from_count(70_000).is_err());
    }

    #[test]
    fn test_channels_name() {
        assert_eq!(Channels::MONO.name(), "Mono");
        assert_eq!(Channels::from_count(6).unwrap().name(), "6 channels");
    }

    #[test]
    fn test_bit_depth_full_scale() {
        assert_eq!(BitDepth::Int(16).full_scale(), Some(32768.0));
        assert_eq!(BitDepth::Int(8).full_scale(), Some(128.0));
        assert_eq!(BitDepth::Int(24).full_scale(), Some(8_388_608.0));
        assert_eq!(BitDepth::F32.full_scale(), None);
    }

    #[test]
    fn test_audio_frame_creation() {
        let samples = vec![0.1, 0.2, 0.3, 0.4];
        let frame = AudioFrame::new(samples, 44100, Channels::STEREO, 0).unwrap();

        assert_eq!(frame.sample_rate(), 44100);
        assert_eq!(frame.channels(), Channels::STEREO);
        assert_eq!(frame.samples_per_channel(), 2);
        assert_eq!(frame.frame_number(), 0);
    }

    #[test]
    fn test_audio_frame_invalid_samples() {
        // Odd number of samples for stereo should fail
        let samples = vec![0.1, 0.2, 0.3];
        let result = AudioFrame::new(samples, 44100, Channels::STEREO, 0);
        assert!(result.is_err());
    }

    #[test]
    fn test_audio_frame_zero_rate() {
        let result = AudioFrame::new(vec![0.0], 0, Channels::MONO, 0);
        assert!(matches!(result, Err(AudioError::InvalidSampleRate { rate: 0 })));
    }

    #[test]
    fn test_audio_metadata() {
        let metadata = AudioMetadata::new(48000, Channels::STEREO, "PCM".to_string())
            .unwrap()
            .with_frames(96000)
            .with_bit_depth(BitDepth::Int(16));

        assert_eq!(metadata.sample_rate, 48000);
        assert_eq!(metadata.duration_secs(), Some(2.0));
        assert_eq!(metadata.bit_depth, Some(BitDepth::Int(16)));
    }
}

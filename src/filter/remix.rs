use crate::core::{AudioFrame, Channels};
use crate::error::{AudioError, AudioResult};
use std::str::FromStr;

/// Which samples of a multi-channel frame end up in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelMode {
    /// Average every channel into one sample
    #[default]
    Mix,
    /// Keep all channels, interleaved
    Interleave,
    /// Keep a single zero-based channel
    Channel(u16),
}

impl FromStr for ChannelMode {
    type Err = AudioError;

    fn from_str(s: &str) -> AudioResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mix" | "mono" => Ok(ChannelMode::Mix),
            "interleave" | "all" => Ok(ChannelMode::Interleave),
            other => other.parse::<u16>().map(ChannelMode::Channel).map_err(|_| {
                AudioError::ConfigError(format!(
                    "channel mode must be mix, interleave or a channel index, got {s:?}"
                ))
            }),
        }
    }
}

/// Channel remixer applied between decoder and encoder
pub struct Remix {
    input_channels: Channels,
    mode: ChannelMode,
}

impl Remix {
    /// Create a remixer for frames with `input_channels`
    pub fn new(input_channels: Channels, mode: ChannelMode) -> AudioResult<Self> {
        if let ChannelMode::Channel(index) = mode
            && index as u32 >= input_channels.count()
        {
            return Err(AudioError::InvalidChannels {
                expected: index as u32 + 1,
                got: input_channels.count(),
            });
        }

        Ok(Remix {
            input_channels,
            mode,
        })
    }

    /// Channel layout of the frames this remixer emits
    pub fn output_channels(&self) -> Channels {
        match self.mode {
            ChannelMode::Interleave => self.input_channels,
            ChannelMode::Mix | ChannelMode::Channel(_) => Channels::MONO,
        }
    }

    /// Average each group of `width` samples
    fn mix_down(input: &[f64], width: usize) -> Vec<f64> {
        input
            .chunks_exact(width)
            .map(|frame| frame.iter().sum::<f64>() / width as f64)
            .collect()
    }

    /// Pick sample `index` out of each group of `width`
    fn extract(input: &[f64], width: usize, index: usize) -> Vec<f64> {
        input.chunks_exact(width).map(|frame| frame[index]).collect()
    }
}

impl super::Filter for Remix {
    fn process(&mut self, frame: &AudioFrame) -> AudioResult<AudioFrame> {
        if frame.channels() != self.input_channels {
            return Err(AudioError::InvalidChannels {
                expected: self.input_channels.count(),
                got: frame.channels().count(),
            });
        }

        let width = self.input_channels.count() as usize;
        let samples = frame.samples();

        let output_samples = match self.mode {
            _ if width == 1 => samples.to_vec(),
            ChannelMode::Interleave => samples.to_vec(),
            ChannelMode::Mix => Self::mix_down(samples, width),
            ChannelMode::Channel(index) => Self::extract(samples, width, index as usize),
        };

        AudioFrame::new(
            output_samples,
            frame.sample_rate(),
            self.output_channels(),
            frame.frame_number(),
        )
    }
}

use crate::core::{AudioFrame, AudioMetadata, BitDepth, Channels};
use crate::error::{AudioError, AudioResult};
use hound::{SampleFormat, WavReader};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Frames handed out per `decode_frame` call
const FRAMES_PER_BLOCK: usize = 4096;

/// PCM WAVE decoder backed by hound
pub struct WavDecoder {
    reader: WavReader<BufReader<File>>,
    metadata: AudioMetadata,
    /// Samples not yet read, across all channels
    remaining: usize,
    frame_count: u64,
}

impl WavDecoder {
    /// Open a WAVE file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AudioResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| AudioError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(BufReader::new(file))
    }

    fn new(input: BufReader<File>) -> AudioResult<Self> {
        let reader = WavReader::new(input)?;
        let spec = reader.spec();

        let bit_depth = match spec.sample_format {
            SampleFormat::Int => BitDepth::Int(spec.bits_per_sample),
            SampleFormat::Float if spec.bits_per_sample == 32 => BitDepth::F32,
            SampleFormat::Float => return Err(hound::Error::Unsupported.into()),
        };

        let channels = Channels::from_count(spec.channels as u32)?;
        let metadata = AudioMetadata::new(spec.sample_rate, channels, "PCM".to_string())?
            .with_frames(reader.duration() as u64)
            .with_bit_depth(bit_depth);

        log::debug!(
            "WAVE stream: {} Hz, {}, {:?}, {} frames",
            spec.sample_rate,
            channels.name(),
            bit_depth,
            reader.duration()
        );

        Ok(WavDecoder {
            remaining: reader.len() as usize,
            reader,
            metadata,
            frame_count: 0,
        })
    }

    fn read_block(&mut self, count: usize) -> AudioResult<Vec<f64>> {
        let depth = self
            .metadata
            .bit_depth
            .ok_or_else(|| AudioError::InvalidMetadata("Unknown bit depth".to_string()))?;

        let block = match depth.full_scale() {
            Some(scale) => self
                .reader
                .samples::<i32>()
                .take(count)
                .map(|s| s.map(|v| v as f64 / scale))
                .collect::<Result<Vec<_>, _>>()?,
            None => self
                .reader
                .samples::<f32>()
                .take(count)
                .map(|s| s.map(f64::from))
                .collect::<Result<Vec<_>, _>>()?,
        };

        if block.len() < count {
            return Err(AudioError::DecodeError(format!(
                "data chunk ended {} samples early",
                count - block.len()
            )));
        }
        Ok(block)
    }
}

impl super::Decoder for WavDecoder {
    fn decode_frame(&mut self) -> AudioResult<Option<AudioFrame>> {
        if self.remaining == 0 {
            return Ok(None);
        }

        let width = self.metadata.channels.count() as usize;
        let count = self.remaining.min(FRAMES_PER_BLOCK * width);
        let samples = self.read_block(count)?;
        self.remaining -= count;

        let frame = AudioFrame::new(
            samples,
            self.metadata.sample_rate,
            self.metadata.channels,
            self.frame_count,
        )?;
        self.frame_count += 1;
        Ok(Some(frame))
    }

    fn metadata(&self) -> &AudioMetadata {
        &self.metadata
    }
}

//! Audio decoder implementations

/// Symphonia-backed decoding for arbitrary containers
pub mod symphonia;
/// hound-backed PCM WAVE decoding
pub mod wav;

pub use self::symphonia::SymphoniaDecoder;
pub use wav::WavDecoder;

use crate::core::{AudioFrame, AudioMetadata, Waveform};
use crate::error::{AudioError, AudioResult};
use crate::filter::{ChannelMode, Filter, Remix};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Trait for audio decoders
pub trait Decoder: Send {
    /// Get next audio frame from the stream
    fn decode_frame(&mut self) -> AudioResult<Option<AudioFrame>>;

    /// Stream parameters found while probing
    fn metadata(&self) -> &AudioMetadata;
}

/// True for a RIFF container whose form type is WAVE
fn is_riff_wave(header: &[u8]) -> bool {
    header.len() == 12 && &header[0..4] == b"RIFF" && &header[8..12] == b"WAVE"
}

/// Create a decoder from a file path.
///
/// PCM WAVE goes through hound; any other container, or a WAVE encoding
/// hound does not handle, is probed by symphonia.
pub fn from_file<P: AsRef<Path>>(path: P) -> AudioResult<Box<dyn Decoder>> {
    let path = path.as_ref();

    let mut header = Vec::with_capacity(12);
    File::open(path)
        .and_then(|file| file.take(12).read_to_end(&mut header))
        .map_err(|source| AudioError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    if is_riff_wave(&header) {
        match WavDecoder::from_file(path) {
            Ok(decoder) => return Ok(Box::new(decoder)),
            Err(AudioError::UnsupportedFormat(reason)) => {
                log::debug!("Falling back to symphonia for {}: {}", path.display(), reason);
            }
            Err(e) => return Err(e),
        }
    }

    SymphoniaDecoder::from_file(path).map(|d| Box::new(d) as Box<dyn Decoder>)
}

/// Decode a whole file into one sample sequence, remixed per `mode`
pub fn read_waveform<P: AsRef<Path>>(path: P, mode: ChannelMode) -> AudioResult<Waveform> {
    let mut decoder = from_file(path)?;
    let metadata = decoder.metadata().clone();
    if let Some(secs) = metadata.duration_secs() {
        log::debug!("{} stream of {:.3} s", metadata.codec, secs);
    }
    let mut remix = Remix::new(metadata.channels, mode)?;

    let mut samples = Vec::new();
    while let Some(frame) = decoder.decode_frame()? {
        samples.extend(remix.process(&frame)?.into_samples());
    }

    log::debug!(
        "Decoded {} samples ({} Hz, {} in, {} out)",
        samples.len(),
        metadata.sample_rate,
        metadata.channels.name(),
        remix.output_channels().name()
    );

    Ok(Waveform {
        samples,
        sample_rate: metadata.sample_rate,
        channels: remix.output_channels(),
    })
}

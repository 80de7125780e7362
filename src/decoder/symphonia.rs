use crate::core::{AudioFrame, AudioMetadata, BitDepth, Channels};
use crate::error::{AudioError, AudioResult};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decoder for any container symphonia can probe
pub struct SymphoniaDecoder {
    reader: Box<dyn FormatReader>,
    decoder: Box<dyn symphonia::core::codecs::Decoder>,
    /// Track being decoded
    track_id: u32,
    metadata: AudioMetadata,
    frame_count: u64,
    /// Packets dropped after a recoverable decode error
    skipped_packets: u64,
    finished: bool,
}

/// A stream that only produced undecodable packets is a decode failure
fn check_stream_end(frames: u64, skipped_packets: u64) -> AudioResult<()> {
    if frames == 0 && skipped_packets > 0 {
        return Err(AudioError::DecodeError(format!(
            "none of {} packets could be decoded",
            skipped_packets
        )));
    }
    if skipped_packets > 0 {
        log::warn!("Skipped {} undecodable packets", skipped_packets);
    }
    Ok(())
}

impl SymphoniaDecoder {
    /// Create decoder from file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> AudioResult<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|source| AudioError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| AudioError::UnsupportedFormat(e.to_string()))?;
        let reader = probed.format;

        // First track with a real codec
        let track = reader
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| AudioError::InvalidMetadata("No audio track found".to_string()))?
            .clone();
        let params = &track.codec_params;

        let sample_rate = params
            .sample_rate
            .ok_or_else(|| AudioError::InvalidMetadata("Unknown sample rate".to_string()))?;
        let channels = match params.channels {
            Some(layout) => Channels::from_count(layout.count() as u32)?,
            None => {
                return Err(AudioError::InvalidMetadata(
                    "Unknown channel count".to_string(),
                ));
            }
        };

        let codec = symphonia::default::get_codecs()
            .get_codec(params.codec)
            .map(|d| d.short_name.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let mut metadata = AudioMetadata::new(sample_rate, channels, codec)?;
        if let Some(frames) = params.n_frames {
            metadata = metadata.with_frames(frames);
        }
        if let Some(bits) = params.bits_per_sample {
            metadata = metadata.with_bit_depth(BitDepth::Int(bits as u16));
        }

        let decoder = symphonia::default::get_codecs()
            .make(params, &DecoderOptions::default())
            .map_err(|e| AudioError::UnsupportedFormat(e.to_string()))?;

        log::debug!(
            "{} stream: {} Hz, {}",
            metadata.codec,
            sample_rate,
            channels.name()
        );

        Ok(SymphoniaDecoder {
            reader,
            decoder,
            track_id: track.id,
            metadata,
            frame_count: 0,
            skipped_packets: 0,
            finished: false,
        })
    }

    fn end_of_stream(&mut self) -> AudioResult<Option<AudioFrame>> {
        self.finished = true;
        check_stream_end(self.frame_count, self.skipped_packets)?;
        Ok(None)
    }
}

impl super::Decoder for SymphoniaDecoder {
    fn decode_frame(&mut self) -> AudioResult<Option<AudioFrame>> {
        if self.finished {
            return Ok(None);
        }

        loop {
            let packet = match self.reader.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    return self.end_of_stream();
                }
                Err(SymphoniaError::ResetRequired) => return self.end_of_stream(),
                Err(e) => return Err(e.into()),
            };

            if packet.track_id() != self.track_id {
                continue;
            }

            let decoded = match self.decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::DecodeError(msg)) => {
                    log::debug!("Skipping undecodable packet: {}", msg);
                    self.skipped_packets += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            if decoded.frames() == 0 {
                continue;
            }

            let spec = *decoded.spec();
            let mut buffer = SampleBuffer::<f64>::new(decoded.capacity() as u64, spec);
            buffer.copy_interleaved_ref(decoded);

            let frame = AudioFrame::new(
                buffer.samples().to_vec(),
                spec.rate,
                Channels::from_count(spec.channels.count() as u32)?,
                self.frame_count,
            )?;
            self.frame_count += 1;

            return Ok(Some(frame));
        }
    }

    fn metadata(&self) -> &AudioMetadata {
        &self.metadata
    }
}

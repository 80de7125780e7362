use super::ProcessingStats;
use crate::analysis::BeatDetector;
use crate::core::AudioFrame;
use crate::decoder;
use crate::encoder::{Encoder, TextEncoder};
use crate::error::AudioResult;
use crate::filter::ChannelMode;
use std::path::Path;

/// Knobs for a single conversion
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// How multi-channel input is reduced
    pub channel_mode: ChannelMode,
    /// Run beat detection over the decoded samples
    pub detect_tempo: bool,
}

/// Decode `input` and write its samples to `output`, one per line.
///
/// The whole input is decoded before `output` is touched, so a missing
/// or corrupt waveform leaves the output path alone. If writing fails
/// part way, the partial file is removed. Tempo detection, when asked
/// for, also runs before the output is created.
pub fn convert<P, Q>(input: P, output: Q, options: &ConvertOptions) -> AudioResult<ProcessingStats>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let (input, output) = (input.as_ref(), output.as_ref());

    let waveform = decoder::read_waveform(input, options.channel_mode)?;
    log::info!("Decoded {} samples from {}", waveform.len(), input.display());

    let tempo = if options.detect_tempo {
        let estimate = BeatDetector::new(waveform.sample_rate)?.analyze(&waveform)?;
        log::info!("Estimated {} BPM from {} beats", estimate.bpm, estimate.beats);
        Some(estimate)
    } else {
        None
    };

    let frame = AudioFrame::new(waveform.samples, waveform.sample_rate, waveform.channels, 0)?;
    let mut encoder = TextEncoder::create(output)?;

    let written = encoder.encode(&frame).and_then(|_| encoder.finalize());
    if let Err(e) = written {
        drop(encoder);
        match std::fs::remove_file(output) {
            Ok(()) => log::warn!("Removed partial output {}", output.display()),
            Err(rm) => log::warn!("Could not remove partial output {}: {}", output.display(), rm),
        }
        return Err(e);
    }

    let stats = ProcessingStats {
        frames_processed: frame.samples_per_channel() as u64,
        samples_processed: encoder.lines_written(),
        tempo,
    };
    log::info!("Wrote {} lines to {}", stats.samples_processed, output.display());
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AudioError;
    use hound::{SampleFormat, WavSpec, WavWriter};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_wave(dir: &TempDir, name: &str, samples: &[i16]) -> PathBuf {
        let path = dir.path().join(name);
        let spec = WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
        path
    }

    fn parse_lines(path: &Path) -> Vec<f64> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| l.parse().unwrap())
            .collect()
    }

    #[test]
    fn test_one_line_per_sample_in_order() {
        let dir = TempDir::new().unwrap();
        let input: Vec<i16> = (0..5000).map(|i| ((i * 37) % 65536 - 32768) as i16).collect();
        let wave = write_wave(&dir, "in.wav", &input);
        let out = dir.path().join("out.txt");

        let stats = convert(&wave, &out, &ConvertOptions::default()).unwrap();
        assert_eq!(stats.samples_processed, 5000);
        assert_eq!(stats.frames_processed, 5000);

        let expected: Vec<f64> = input.iter().map(|&s| s as f64 / 32768.0).collect();
        assert_eq!(parse_lines(&out), expected);
    }

    #[test]
    fn test_round_trip_matches_decoder() {
        let dir = TempDir::new().unwrap();
        let wave = write_wave(&dir, "in.wav", &[512, -1, 7, 32767, -32768]);
        let out = dir.path().join("out.txt");

        convert(&wave, &out, &ConvertOptions::default()).unwrap();
        let decoded = decoder::read_waveform(&wave, ChannelMode::Mix).unwrap();
        assert_eq!(parse_lines(&out), decoded.samples);
    }

    #[test]
    fn test_empty_wave_gives_empty_file() {
        let dir = TempDir::new().unwrap();
        let wave = write_wave(&dir, "silent.wav", &[]);
        let out = dir.path().join("out.txt");

        let stats = convert(&wave, &out, &ConvertOptions::default()).unwrap();
        assert_eq!(stats.samples_processed, 0);
        assert!(out.exists());
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "");
    }

    #[test]
    fn test_missing_input_leaves_output_alone() {
        let dir = TempDir::new().unwrap();
        let fresh = dir.path().join("fresh.txt");
        let existing = dir.path().join("existing.txt");
        std::fs::write(&existing, "keep me\n").unwrap();

        let missing = dir.path().join("missing.wav");
        assert!(matches!(
            convert(&missing, &fresh, &ConvertOptions::default()),
            Err(AudioError::Open { .. })
        ));
        assert!(!fresh.exists());

        assert!(convert(&missing, &existing, &ConvertOptions::default()).is_err());
        assert_eq!(std::fs::read_to_string(&existing).unwrap(), "keep me\n");
    }

    #[test]
    fn test_unwritable_output_fails_after_decode() {
        let dir = TempDir::new().unwrap();
        let wave = write_wave(&dir, "in.wav", &[1, 2, 3]);
        let neighbour = dir.path().join("neighbour.txt");
        std::fs::write(&neighbour, "untouched\n").unwrap();

        let out = dir.path().join("missing_dir").join("out.txt");
        let result = convert(&wave, &out, &ConvertOptions::default());

        assert!(matches!(result, Err(AudioError::Create { .. })));
        assert_eq!(std::fs::read_to_string(&neighbour).unwrap(), "untouched\n");
        assert!(wave.exists());
    }

    #[test]
    fn test_rerun_truncates() {
        let dir = TempDir::new().unwrap();
        let long = write_wave(&dir, "long.wav", &[100; 50]);
        let short = write_wave(&dir, "short.wav", &[16384, -16384]);
        let out = dir.path().join("out.txt");

        convert(&long, &out, &ConvertOptions::default()).unwrap();
        assert_eq!(parse_lines(&out).len(), 50);

        convert(&short, &out, &ConvertOptions::default()).unwrap();
        assert_eq!(parse_lines(&out), vec![0.5, -0.5]);
    }

    #[test]
    fn test_tempo_reported_for_click_track() {
        let dir = TempDir::new().unwrap();
        // One 4096-sample click at the start of each of 5 seconds
        let mut input = vec![0i16; 5 * 44100];
        for second in 0..5 {
            for s in &mut input[second * 44100..second * 44100 + 4096] {
                *s = 16384;
            }
        }
        let wave = write_wave(&dir, "clicks.wav", &input);
        let out = dir.path().join("out.txt");

        let options = ConvertOptions {
            detect_tempo: true,
            ..Default::default()
        };
        let stats = convert(&wave, &out, &options).unwrap();
        let tempo = stats.tempo.unwrap();
        assert_eq!(tempo.beats, 5);
        assert_eq!(tempo.bpm, 60);
        assert_eq!(parse_lines(&out).len(), 5 * 44100);

        let plain = convert(&wave, &out, &ConvertOptions::default()).unwrap();
        assert!(plain.tempo.is_none());
    }

    #[test]
    fn test_tempo_on_interleaved_input_rejected_before_output() {
        let dir = TempDir::new().unwrap();
        let wave = dir.path().join("stereo.wav");
        let spec = WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&wave, spec).unwrap();
        for s in [1i16, 2, 3, 4] {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
        let out = dir.path().join("out.txt");

        let options = ConvertOptions {
            channel_mode: ChannelMode::Interleave,
            detect_tempo: true,
        };
        assert!(matches!(
            convert(&wave, &out, &options),
            Err(AudioError::InvalidChannels { .. })
        ));
        assert!(!out.exists());
    }

    #[test]
    fn test_channel_out_of_range_rejected_before_output() {
        let dir = TempDir::new().unwrap();
        let wave = write_wave(&dir, "mono.wav", &[1, 2]);
        let out = dir.path().join("out.txt");

        let options = ConvertOptions {
            channel_mode: ChannelMode::Channel(1),
            ..Default::default()
        };
        assert!(matches!(
            convert(&wave, &out, &options),
            Err(AudioError::InvalidChannels { .. })
        ));
        assert!(!out.exists());
    }
}

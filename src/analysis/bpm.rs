use crate::core::{Channels, Waveform};
use crate::error::{AudioError, AudioResult};

/// Samples summed into one energy block
pub const BLOCK_SIZE: usize = 1024;

/// Consecutive loud blocks that count as one beat
const BEAT_RUN: u32 = 4;

/// Sensitivity is `SLOPE * variance + INTERCEPT`
const SENSITIVITY_SLOPE: f64 = -0.0000015;
const SENSITIVITY_INTERCEPT: f64 = 1.5142857;

/// Result of a tempo scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempoEstimate {
    /// Beats per minute, rounded down
    pub bpm: u64,
    /// Beats found
    pub beats: u64,
    /// One-second windows scanned
    pub windows: u64,
    /// Samples in the input, including the trailing partial window
    pub total_samples: u64,
}

/// Energy-based beat detector.
///
/// The input is cut into one-second windows. Each window is split into
/// blocks of `BLOCK_SIZE` samples whose energy is the sum of `2 * s^2`;
/// samples past the last whole block of a window are ignored. A block is
/// loud when its energy exceeds `c * avg`, where `avg` and `variance` are
/// taken over the window's blocks and `c` shrinks as the variance grows.
/// Every run of four loud blocks is one beat. The run counter carries
/// across window boundaries.
#[derive(Debug, Clone)]
pub struct BeatDetector {
    /// Samples per window (one second)
    window: usize,
    block_size: usize,
}

impl BeatDetector {
    /// Detector for audio at `sample_rate`
    pub fn new(sample_rate: u32) -> AudioResult<Self> {
        Self::with_block_size(sample_rate, BLOCK_SIZE)
    }

    /// Detector with a custom block length
    pub fn with_block_size(sample_rate: u32, block_size: usize) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: sample_rate });
        }
        if block_size == 0 || block_size > sample_rate as usize {
            return Err(AudioError::ConfigError(format!(
                "Block size must be between 1 and {}, got {}",
                sample_rate, block_size
            )));
        }

        Ok(BeatDetector {
            window: sample_rate as usize,
            block_size,
        })
    }

    /// Blocks per one-second window (43 at 44.1 kHz)
    pub fn blocks_per_window(&self) -> usize {
        self.window / self.block_size
    }

    /// Estimate the tempo of a mono waveform
    pub fn analyze(&self, waveform: &Waveform) -> AudioResult<TempoEstimate> {
        if waveform.channels != Channels::MONO {
            return Err(AudioError::InvalidChannels {
                expected: 1,
                got: waveform.channels.count(),
            });
        }
        if waveform.sample_rate as usize != self.window {
            return Err(AudioError::InvalidSampleRate {
                rate: waveform.sample_rate,
            });
        }
        Ok(self.estimate(&waveform.samples))
    }

    /// Estimate the tempo of mono samples at this detector's rate
    pub fn estimate(&self, samples: &[f64]) -> TempoEstimate {
        let mut run = 0;
        let mut beats = 0u64;
        let mut windows = 0u64;

        for window in samples.chunks_exact(self.window) {
            let energies = self.block_energies(window);
            let threshold = Self::threshold(&energies);

            for &energy in &energies {
                if energy > threshold {
                    run += 1;
                    if run == BEAT_RUN {
                        beats += 1;
                        run = 0;
                    }
                } else {
                    run = 0;
                }
            }
            windows += 1;
        }

        let total_samples = samples.len() as u64;
        let bpm = if total_samples == 0 {
            0
        } else {
            beats * self.window as u64 * 60 / total_samples
        };

        log::debug!(
            "{} beats in {} windows over {} samples",
            beats,
            windows,
            total_samples
        );

        TempoEstimate {
            bpm,
            beats,
            windows,
            total_samples,
        }
    }

    fn block_energies(&self, window: &[f64]) -> Vec<f64> {
        window
            .chunks_exact(self.block_size)
            .take(self.blocks_per_window())
            .map(|block| block.iter().map(|&s| 2.0 * s * s).sum())
            .collect()
    }

    /// Energy a block must exceed to be loud
    fn threshold(energies: &[f64]) -> f64 {
        let n = energies.len() as f64;
        let avg = energies.iter().sum::<f64>() / n;
        let variance = energies.iter().map(|&e| (avg - e) * (avg - e)).sum::<f64>() / n;
        (SENSITIVITY_SLOPE * variance + SENSITIVITY_INTERCEPT) * avg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: usize = 44100;

    /// `seconds` of silence with a 0.5 burst of four blocks
    /// at each of `offsets` (in blocks) inside every second
    fn click_track(seconds: usize, offsets: &[usize]) -> Vec<f64> {
        let mut samples = vec![0.0; seconds * RATE];
        for second in 0..seconds {
            for &block in offsets {
                let start = second * RATE + block * BLOCK_SIZE;
                for s in &mut samples[start..start + 4 * BLOCK_SIZE] {
                    *s = 0.5;
                }
            }
        }
        samples
    }

    #[test]
    fn test_blocks_per_window() {
        assert_eq!(BeatDetector::new(44100).unwrap().blocks_per_window(), 43);
        assert_eq!(BeatDetector::new(22050).unwrap().blocks_per_window(), 21);
    }

    #[test]
    fn test_one_click_per_second_is_60_bpm() {
        let detector = BeatDetector::new(44100).unwrap();
        let estimate = detector.estimate(&click_track(10, &[0]));

        assert_eq!(estimate.windows, 10);
        assert_eq!(estimate.beats, 10);
        assert_eq!(estimate.bpm, 60);
    }

    #[test]
    fn test_two_clicks_per_second_is_120_bpm() {
        let detector = BeatDetector::new(44100).unwrap();
        let estimate = detector.estimate(&click_track(10, &[0, 22]));

        assert_eq!(estimate.beats, 20);
        assert_eq!(estimate.bpm, 120);
    }

    #[test]
    fn test_trailing_partial_window_counts_toward_length() {
        let detector = BeatDetector::new(44100).unwrap();
        let mut samples = click_track(4, &[0]);
        samples.extend(std::iter::repeat_n(0.0, RATE));

        let estimate = detector.estimate(&samples[..4 * RATE + RATE / 2]);
        assert_eq!(estimate.windows, 4);
        assert_eq!(estimate.beats, 4);
        // 4 * 44100 * 60 / 198450
        assert_eq!(estimate.bpm, 53);
    }

    #[test]
    fn test_steady_tone_has_no_beats() {
        let detector = BeatDetector::new(44100).unwrap();
        let estimate = detector.estimate(&vec![0.5; 3 * RATE]);
        assert_eq!(estimate.beats, 0);
        assert_eq!(estimate.bpm, 0);
    }

    #[test]
    fn test_shorter_than_one_window() {
        let detector = BeatDetector::new(44100).unwrap();

        let short = detector.estimate(&vec![0.5; 1000]);
        assert_eq!(short.windows, 0);
        assert_eq!(short.bpm, 0);

        let empty = detector.estimate(&[]);
        assert_eq!(empty.total_samples, 0);
        assert_eq!(empty.bpm, 0);
    }

    #[test]
    fn test_analyze_rejects_interleaved() {
        let detector = BeatDetector::new(44100).unwrap();
        let waveform = Waveform {
            samples: vec![0.0; 4],
            sample_rate: 44100,
            channels: Channels::STEREO,
        };
        assert!(matches!(
            detector.analyze(&waveform),
            Err(AudioError::InvalidChannels { .. })
        ));
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(BeatDetector::new(0).is_err());
        assert!(BeatDetector::with_block_size(8000, 0).is_err());
        assert!(BeatDetector::with_block_size(8000, 8001).is_err());
    }
}

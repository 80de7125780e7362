use crate::core::AudioFrame;
use crate::error::{AudioError, AudioResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes one decimal sample per line
pub struct TextEncoder<W: Write> {
    writer: Option<W>,
    lines_written: u64,
}

impl TextEncoder<BufWriter<File>> {
    /// Create (or truncate) the file at `path`
    pub fn create<P: AsRef<Path>>(path: P) -> AudioResult<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| AudioError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TextEncoder<W> {
    /// Wrap any byte sink
    pub fn new(writer: W) -> Self {
        TextEncoder {
            writer: Some(writer),
            lines_written: 0,
        }
    }

    /// Write a single sample line
    pub fn write_sample(&mut self, sample: f64) -> AudioResult<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| AudioError::EncodeError("Encoder already finalized".to_string()))?;
        writeln!(writer, "{}", sample)?;
        self.lines_written += 1;
        Ok(())
    }

    /// Number of lines written so far
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }
}

impl<W: Write> super::Encoder for TextEncoder<W> {
    fn encode(&mut self, frame: &AudioFrame) -> AudioResult<()> {
        for &sample in frame.samples() {
            self.write_sample(sample)?;
        }
        Ok(())
    }

    fn finalize(&mut self) -> AudioResult<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }
}

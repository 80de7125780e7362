use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for conversion operations
pub type AudioResult<T> = Result<T, AudioError>;

/// Everything that can go wrong between reading the prompts and the last line written
#[derive(Error, Debug)]
pub enum AudioError {
    /// IO error not tied to a particular path
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input waveform could not be opened
    #[error("Cannot open {}: {source}", .path.display())]
    Open {
        /// Path that was opened
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// The output file could not be created
    #[error("Cannot create {}: {source}", .path.display())]
    Create {
        /// Path that was created
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Standard input ended before a token was read
    #[error("Input ended before the {expected} was given")]
    InputExhausted {
        /// What the missing token should have named
        expected: &'static str,
    },

    /// Container or codec not understood
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// Stream parameters missing or nonsensical
    #[error("Invalid audio metadata: {0}")]
    InvalidMetadata(String),

    /// Decoding failed
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Writing samples failed
    #[error("Encode error: {0}")]
    EncodeError(String),

    /// Invalid channel configuration
    #[error("Invalid channel configuration: expected {expected}, got {got}")]
    InvalidChannels {
        /// Expected number of channels
        expected: u32,
        /// Got number of channels
        got: u32,
    },

    /// Invalid sample rate
    #[error("Invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate
        rate: u32,
    },

    /// Bad command-line option
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<symphonia::core::errors::Error> for AudioError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        use symphonia::core::errors::Error;
        match err {
            Error::IoError(e) => AudioError::Io(e),
            Error::Unsupported(what) => AudioError::UnsupportedFormat(what.to_string()),
            e => AudioError::DecodeError(e.to_string()),
        }
    }
}

impl From<hound::Error> for AudioError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(e) => AudioError::Io(e),
            hound::Error::Unsupported => {
                AudioError::UnsupportedFormat("WAVE encoding not handled by hound".to_string())
            }
            e => AudioError::DecodeError(e.to_string()),
        }
    }
}

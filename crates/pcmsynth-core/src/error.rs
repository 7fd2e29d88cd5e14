//! Error types for the synthesis pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors that can occur while rendering, encoding or playing audio.
#[derive(Debug, Error)]
pub enum SynthError {
    /// Note name is not present in the frequency table.
    #[error("unknown note: '{name}'")]
    UnknownNote {
        /// The name that failed to resolve.
        name: String,
    },

    /// Duration fraction in a melody token could not be used.
    #[error("malformed duration in '{token}': {reason}")]
    MalformedDuration {
        /// The offending melody token.
        token: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A recorded sample could not be loaded.
    #[error("failed to load sample '{}': {message}", path.display())]
    SampleLoad {
        /// Path of the recording.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Container uses a bit depth, channel layout or encoding the codec does not handle.
    #[error("unsupported WAV format: {message}")]
    UnsupportedFormat {
        /// Error message.
        message: String,
    },

    /// Container is structurally broken (bad magic, truncated, oversized chunk).
    #[error("malformed WAV data: {message}")]
    MalformedWav {
        /// Error message.
        message: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// The playback service could not start or stop a sound.
    #[error("playback error: {message}")]
    Playback {
        /// Error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SynthError {
    /// Creates an unknown note error.
    pub fn unknown_note(name: impl Into<String>) -> Self {
        Self::UnknownNote { name: name.into() }
    }

    /// Creates a malformed duration error.
    pub fn malformed_duration(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDuration {
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// Creates a sample load error.
    pub fn sample_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SampleLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates an unsupported format error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            message: message.into(),
        }
    }

    /// Creates a malformed container error.
    pub fn malformed_wav(message: impl Into<String>) -> Self {
        Self::MalformedWav {
            message: message.into(),
        }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a playback error.
    pub fn playback(message: impl Into<String>) -> Self {
        Self::Playback {
            message: message.into(),
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            SynthError::UnknownNote { .. } => "SYNTH_001",
            SynthError::MalformedDuration { .. } => "SYNTH_002",
            SynthError::SampleLoad { .. } => "SYNTH_003",
            SynthError::UnsupportedFormat { .. } => "SYNTH_004",
            SynthError::MalformedWav { .. } => "SYNTH_005",
            SynthError::InvalidParameter { .. } => "SYNTH_006",
            SynthError::Playback { .. } => "SYNTH_007",
            SynthError::Io(_) => "SYNTH_008",
        }
    }
}

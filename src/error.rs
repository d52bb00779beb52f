//! Errors raised by the audio engine

use thiserror::Error;
use tidewave_core::SynthError;

/// Errors from output devices and playback sessions
#[derive(Debug, Error)]
pub enum EngineError {
    /// The host has no default output device
    #[error("no output device available")]
    NoOutputDevice,

    /// The device reports a sample format the renderer cannot write
    #[error("unsupported sample format: {0}")]
    UnsupportedSampleFormat(String),

    /// The device failed to open, start or stop
    #[error("audio device error: {0}")]
    Device(String),

    /// The session was closed and can no longer play
    #[error("playback session is closed")]
    Closed,

    #[error(transparent)]
    Synth(#[from] SynthError),
}

impl EngineError {
    /// Wrap any displayable device failure
    pub fn device(err: impl std::fmt::Display) -> Self {
        EngineError::Device(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

use thiserror::Error;

/// Errors raised while planning voices, building their automation or
/// writing patterns
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SynthError {
    /// Tempo must be finite and positive to derive a beat duration
    #[error("invalid tempo: {0} BPM")]
    InvalidTempo(f32),

    /// Exponential ramps are undefined toward zero (and toward non-finite values)
    #[error("exponential ramp target must be non-zero and finite, got {0}")]
    ExponentialRampTarget(f32),

    #[error("unknown key '{0}', expected a note name such as C, F# or Bb")]
    UnknownKey(String),
}

//! Transport state and the observable view of a playback session

use std::fmt;
use std::ops::RangeInclusive;

/// Allowed master volume range
pub const VOLUME_RANGE: RangeInclusive<f32> = 0.0..=1.0;

/// Allowed tempo range in beats per minute
pub const BPM_RANGE: RangeInclusive<f32> = 60.0..=200.0;

/// Volume a new session starts at
pub const DEFAULT_VOLUME: f32 = 0.7;

/// Tempo a new session starts at
pub const DEFAULT_BPM: f32 = 120.0;

/// Lifecycle of a playback session
///
/// `Uninitialized -> Initializing -> Ready <-> Playing`, `Ready/Playing ->
/// Suspended` on pause, and any state to `Closed` on teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TransportState {
    #[default]
    Uninitialized,
    Initializing,
    Ready,
    Playing,
    Suspended,
    Closed,
}

impl TransportState {
    /// Whether an output device is held in this state
    pub fn has_device(&self) -> bool {
        matches!(
            self,
            TransportState::Ready | TransportState::Playing | TransportState::Suspended
        )
    }
}

impl fmt::Display for TransportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportState::Uninitialized => "uninitialized",
            TransportState::Initializing => "initializing",
            TransportState::Ready => "ready",
            TransportState::Playing => "playing",
            TransportState::Suspended => "suspended",
            TransportState::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// What a front end observes about a session
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SessionSnapshot {
    pub is_playing: bool,
    pub volume: f32,
    pub bpm: f32,
    pub error: Option<String>,
    pub is_initialized: bool,
}

/// Clamp a volume into [`VOLUME_RANGE`]. NaN yields `None`.
pub fn clamp_volume(volume: f32) -> Option<f32> {
    if volume.is_nan() {
        return None;
    }
    Some(volume.clamp(*VOLUME_RANGE.start(), *VOLUME_RANGE.end()))
}

/// Clamp a tempo into [`BPM_RANGE`]. NaN yields `None`.
pub fn clamp_bpm(bpm: f32) -> Option<f32> {
    if bpm.is_nan() {
        return None;
    }
    Some(bpm.clamp(*BPM_RANGE.start(), *BPM_RANGE.end()))
}

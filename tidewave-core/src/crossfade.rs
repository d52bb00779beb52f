//! Two-channel crossfader
//!
//! Position 0 is full preview, 100 full master. The crossfader only scales
//! the volumes it reports; it never changes either channel's stored volume.

use std::ops::RangeInclusive;

pub const CROSSFADER_RANGE: RangeInclusive<f32> = 0.0..=100.0;

pub const DEFAULT_CROSSFADER: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crossfader {
    position: f32,
}

impl Default for Crossfader {
    fn default() -> Self {
        Self {
            position: DEFAULT_CROSSFADER,
        }
    }
}

impl Crossfader {
    /// Crossfader at `position`, clamped. NaN falls back to the centre.
    pub fn new(position: f32) -> Self {
        let mut fader = Self::default();
        fader.set(position);
        fader
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    /// Move the fader, clamping into [`CROSSFADER_RANGE`]. NaN is ignored.
    pub fn set(&mut self, position: f32) -> f32 {
        if !position.is_nan() {
            self.position = position.clamp(*CROSSFADER_RANGE.start(), *CROSSFADER_RANGE.end());
        }
        self.position
    }

    /// Share of the preview channel, 0..=1
    pub fn preview_share(&self) -> f32 {
        (100.0 - self.position) / 100.0
    }

    /// Share of the master channel, 0..=1
    pub fn master_share(&self) -> f32 {
        self.position / 100.0
    }

    /// Effective `(preview, master)` volumes for the given channel volumes
    pub fn effective_volumes(&self, preview_volume: f32, master_volume: f32) -> (f32, f32) {
        (
            self.preview_share() * preview_volume,
            self.master_share() * master_volume,
        )
    }
}

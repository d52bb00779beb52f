//! Oscillator configuration types
//!
//! Pure data shared by the voice planner and the renderer. Nothing here
//! touches an audio device, so the core crate stays free of I/O dependencies.

/// Oscillator waveform of a voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Waveform {
    #[default]
    Sine,
    Triangle,
    Square,
    Saw,
}

impl Waveform {
    /// Parse waveform from string (case-insensitive)
    pub fn from_name(s: &str) -> Option<Waveform> {
        match s.to_lowercase().as_str() {
            "sine" | "sin" => Some(Waveform::Sine),
            "saw" | "sawtooth" => Some(Waveform::Saw),
            "square" | "sq" => Some(Waveform::Square),
            "triangle" | "tri" => Some(Waveform::Triangle),
            _ => None,
        }
    }

    /// Get display name, matching the oscillator type names of the pattern notation
    pub fn name(&self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Triangle => "triangle",
            Waveform::Square => "square",
            Waveform::Saw => "sawtooth",
        }
    }

    /// Evaluate the waveform at a normalized phase in `[0, 1)`.
    ///
    /// Output is in `[-1, 1]` for every waveform.
    #[inline]
    pub fn sample(&self, phase: f32) -> f32 {
        match self {
            // smooth, pure tone
            Waveform::Sine => (std::f32::consts::TAU * phase).sin(),
            // odd harmonics, linear ramp up then down
            Waveform::Triangle => {
                if phase < 0.5 {
                    4.0 * phase - 1.0
                } else {
                    3.0 - 4.0 * phase
                }
            }
            // odd harmonics only
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            // all harmonics, ramps from -1 to 1 then resets
            Waveform::Saw => 2.0 * phase - 1.0,
        }
    }
}

impl std::fmt::Display for Waveform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

//! Sample-name tokens
//!
//! `s("bd sd hh")` names drum-machine samples with short TidalCycles-style
//! mnemonics. The engine has no sample bank, so each recognised mnemonic maps
//! to an oscillator voicing instead; unknown names get a plain sine.

use super::audio_config::Waveform;
use std::fmt;

/// Percussion sound named by a sample token
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SampleKind {
    /// Bass drum ("bd")
    Kick,
    /// Snare ("sd")
    Snare,
    /// Hand clap ("cp")
    Clap,
    /// Closed hi-hat ("hh")
    HiHat,
    /// Open hi-hat ("oh")
    OpenHiHat,
    /// Any other sample name, kept verbatim
    Other(String),
}

/// Oscillator frequency over the life of a voice
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrequencyContour {
    /// Constant frequency in Hz
    Fixed(f32),
    /// Exponential sweep from `from` to `to` Hz over `seconds` after the voice starts
    Sweep { from: f32, to: f32, seconds: f64 },
}

impl FrequencyContour {
    /// Frequency at the start of the voice
    pub fn initial(&self) -> f32 {
        match self {
            FrequencyContour::Fixed(hz) => *hz,
            FrequencyContour::Sweep { from, .. } => *from,
        }
    }
}

impl SampleKind {
    /// Map a sample token to its kind. Matching is exact: `BD` is not a kick.
    pub fn from_name(name: &str) -> SampleKind {
        match name {
            "bd" => SampleKind::Kick,
            "sd" => SampleKind::Snare,
            "cp" => SampleKind::Clap,
            "hh" => SampleKind::HiHat,
            "oh" => SampleKind::OpenHiHat,
            other => SampleKind::Other(other.to_string()),
        }
    }

    /// Short display name (the mnemonic it was parsed from)
    pub fn short_name(&self) -> &str {
        match self {
            SampleKind::Kick => "bd",
            SampleKind::Snare => "sd",
            SampleKind::Clap => "cp",
            SampleKind::HiHat => "hh",
            SampleKind::OpenHiHat => "oh",
            SampleKind::Other(name) => name,
        }
    }

    /// Waveform and pitch contour used to imitate this sample
    pub fn voicing(&self) -> (Waveform, FrequencyContour) {
        match self {
            // pitch drop gives the thump
            SampleKind::Kick => (
                Waveform::Sine,
                FrequencyContour::Sweep {
                    from: 150.0,
                    to: 40.0,
                    seconds: 0.1,
                },
            ),
            SampleKind::Snare | SampleKind::Clap => {
                (Waveform::Triangle, FrequencyContour::Fixed(200.0))
            }
            SampleKind::HiHat | SampleKind::OpenHiHat => {
                (Waveform::Square, FrequencyContour::Fixed(800.0))
            }
            SampleKind::Other(_) => (Waveform::Sine, FrequencyContour::Fixed(440.0)),
        }
    }
}

impl fmt::Display for SampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_parsing() {
        assert_eq!(SampleKind::from_name("bd"), SampleKind::Kick);
        assert_eq!(SampleKind::from_name("sd"), SampleKind::Snare);
        assert_eq!(SampleKind::from_name("cp"), SampleKind::Clap);
        assert_eq!(SampleKind::from_name("hh"), SampleKind::HiHat);
        assert_eq!(SampleKind::from_name("oh"), SampleKind::OpenHiHat);
        assert_eq!(
            SampleKind::from_name("BD"),
            SampleKind::Other("BD".to_string())
        );
        assert_eq!(
            SampleKind::from_name("bd*4"),
            SampleKind::Other("bd*4".to_string())
        );
    }

    #[test]
    fn test_voicings() {
        assert_eq!(
            SampleKind::Kick.voicing(),
            (
                Waveform::Sine,
                FrequencyContour::Sweep {
                    from: 150.0,
                    to: 40.0,
                    seconds: 0.1
                }
            )
        );
        assert_eq!(
            SampleKind::Clap.voicing(),
            (Waveform::Triangle, FrequencyContour::Fixed(200.0))
        );
        assert_eq!(
            SampleKind::OpenHiHat.voicing(),
            (Waveform::Square, FrequencyContour::Fixed(800.0))
        );
        assert_eq!(
            SampleKind::from_name("piano").voicing(),
            (Waveform::Sine, FrequencyContour::Fixed(440.0))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", SampleKind::Kick), "bd");
        assert_eq!(format!("{}", SampleKind::from_name("arpy")), "arpy");
    }
}

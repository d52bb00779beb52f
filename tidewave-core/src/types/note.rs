//! Note name to frequency resolution
//!
//! Note tokens look like `c4`, `eb3`, `F#2` or just `a`. Frequencies use
//! 12-tone equal temperament referenced to A4 = 440 Hz.

use lazy_static::lazy_static;
use regex::Regex;

/// Concert pitch reference (A4)
pub const A4_FREQUENCY: f32 = 440.0;

/// Octave assumed when a token carries no octave digits
pub const DEFAULT_OCTAVE: i32 = 4;

lazy_static! {
    static ref NOTE_NAME: Regex =
        Regex::new(r"([a-g])([#b]?)(\d+)?").expect("note name regex is valid");
}

/// A parsed note name: pitch class offset and octave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pitch {
    /// Semitones above C within the octave, after the accidental.
    /// `cb` gives -1 and `b#` gives 12, exactly as spelled.
    pub semitone: i32,
    pub octave: i32,
}

impl Pitch {
    /// Parse the first note name found in `token` (case-insensitive).
    ///
    /// Returns `None` when no letter `a`-`g` appears at all.
    pub fn parse(token: &str) -> Option<Pitch> {
        let lowered = token.to_lowercase();
        let caps = NOTE_NAME.captures(&lowered)?;

        let mut semitone = match caps.get(1).map(|m| m.as_str()) {
            Some("c") => 0,
            Some("d") => 2,
            Some("e") => 4,
            Some("f") => 5,
            Some("g") => 7,
            Some("a") => 9,
            Some("b") => 11,
            _ => return None,
        };
        match caps.get(2).map(|m| m.as_str()) {
            Some("#") => semitone += 1,
            Some("b") => semitone -= 1,
            _ => {}
        }

        // Octaves too long for an i32 fall back like a missing octave
        let octave = caps
            .get(3)
            .and_then(|m| m.as_str().parse::<i32>().ok())
            .unwrap_or(DEFAULT_OCTAVE);

        Some(Pitch { semitone, octave })
    }

    /// Signed distance from A4 in semitones
    pub fn semitones_from_a4(&self) -> i64 {
        self.semitone as i64 - 9 + (self.octave as i64 - DEFAULT_OCTAVE as i64) * 12
    }

    /// Frequency in Hz
    pub fn frequency(&self) -> f32 {
        let exponent = self.semitones_from_a4() as f64 / 12.0;
        (A4_FREQUENCY as f64 * 2f64.powf(exponent)) as f32
    }
}

/// Resolve a note token to a frequency in Hz.
///
/// Tokens without a recognizable note name resolve to 440 Hz rather than
/// failing; a typo in a live-coded pattern should still make a sound.
pub fn resolve_frequency(token: &str) -> f32 {
    Pitch::parse(token)
        .map(|pitch| pitch.frequency())
        .unwrap_or(A4_FREQUENCY)
}

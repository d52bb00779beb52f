//! Music theory helpers for writing patterns
//!
//! Scales, chords and progressions spelled as note tokens, Euclidean and
//! polyrhythmic drum bodies, and genre templates that assemble a complete
//! piece of pattern code. Everything produced here is plain code text the
//! extractor can play.

pub mod generate;
pub mod harmony;
pub mod rhythm;

pub use generate::{generate, GenerateOptions, Genre};
pub use harmony::{
    chord_notes, progression, progressions, scale_notes, ChordQuality, Progression,
    ProgressionStyle, Scale,
};
pub use rhythm::{bjorklund, euclidean_body, polyrhythm_body};

use crate::error::SynthError;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Pitch class names as written in generated code (sharps, lowercase)
pub const PITCH_CLASS_NAMES: [&str; 12] = [
    "c", "c#", "d", "d#", "e", "f", "f#", "g", "g#", "a", "a#", "b",
];

lazy_static! {
    static ref KEY_NAME: Regex = Regex::new(r"^([a-g])([#b]?)$").expect("key name regex is valid");
    static ref NOTE_CALL_BODY: Regex =
        Regex::new(r#"note\("([^"]*)"\)"#).expect("note call body regex is valid");
    static ref NOTE_WITH_OCTAVE: Regex =
        Regex::new(r"([a-g])([#b]?)(\d+)").expect("note with octave regex is valid");
}

/// A tonic pitch class, 0 = C
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Key(u8);

impl Key {
    pub const C: Key = Key(0);

    pub fn from_pitch_class(pitch_class: u8) -> Self {
        Key(pitch_class % 12)
    }

    pub fn pitch_class(&self) -> u8 {
        self.0
    }

    pub fn name(&self) -> &'static str {
        PITCH_CLASS_NAMES[self.0 as usize]
    }

    /// Signed shift from C that keeps a transposed line closest to where it
    /// was written: up to a tritone up, otherwise down.
    pub fn shift_from_c(&self) -> i32 {
        let pc = self.0 as i32;
        if pc > 6 {
            pc - 12
        } else {
            pc
        }
    }
}

impl FromStr for Key {
    type Err = SynthError;

    /// Parse `C`, `f#`, `Bb` and the like
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let caps = KEY_NAME
            .captures(&lowered)
            .ok_or_else(|| SynthError::UnknownKey(s.to_string()))?;
        let natural = match &caps[1] {
            "c" => 0,
            "d" => 2,
            "e" => 4,
            "f" => 5,
            "g" => 7,
            "a" => 9,
            _ => 11,
        };
        let pc = match &caps[2] {
            "#" => natural + 1,
            "b" => natural + 11,
            _ => natural,
        };
        Ok(Key::from_pitch_class(pc as u8))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name().to_uppercase())
    }
}

/// Spell the note `semitones` above C0 as a token, e.g. 57 → `a4`
pub fn note_name(semitones: i32) -> String {
    let octave = semitones.div_euclid(12);
    let pc = semitones.rem_euclid(12) as usize;
    format!("{}{}", PITCH_CLASS_NAMES[pc], octave)
}

/// Shift every note that carries an octave inside `note("...")` bodies by
/// `semitones`. Other calls and text outside the bodies are left alone.
pub fn transpose_notes(code: &str, semitones: i32) -> String {
    if semitones == 0 {
        return code.to_string();
    }
    NOTE_CALL_BODY
        .replace_all(code, |caps: &regex::Captures| {
            let body = NOTE_WITH_OCTAVE.replace_all(&caps[1], |note: &regex::Captures| {
                transpose_token(note, semitones)
            });
            format!("note(\"{}\")", body)
        })
        .into_owned()
}

fn transpose_token(note: &regex::Captures, semitones: i32) -> String {
    let natural = match &note[1] {
        "c" => 0,
        "d" => 2,
        "e" => 4,
        "f" => 5,
        "g" => 7,
        "a" => 9,
        _ => 11,
    };
    let accidental = match &note[2] {
        "#" => 1,
        "b" => -1,
        _ => 0,
    };
    match note[3].parse::<i32>() {
        Ok(octave) => note_name(octave * 12 + natural + accidental + semitones),
        Err(_) => note[0].to_string(),
    }
}

//! Scales, chords and chord progressions

use super::{note_name, Key};
use std::fmt;

/// Interval sets a scale can be built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Scale {
    Major,
    Minor,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Locrian,
    Pentatonic,
    Blues,
    Chromatic,
    WholeTone,
    Diminished,
}

impl Scale {
    pub const ALL: [Scale; 12] = [
        Scale::Major,
        Scale::Minor,
        Scale::Dorian,
        Scale::Phrygian,
        Scale::Lydian,
        Scale::Mixolydian,
        Scale::Locrian,
        Scale::Pentatonic,
        Scale::Blues,
        Scale::Chromatic,
        Scale::WholeTone,
        Scale::Diminished,
    ];

    /// Parse scale from string (case-insensitive)
    pub fn from_name(s: &str) -> Option<Scale> {
        let lowered = s.to_lowercase();
        Scale::ALL
            .into_iter()
            .find(|scale| scale.name().to_lowercase() == lowered)
            .or(match lowered.as_str() {
                "ionian" => Some(Scale::Major),
                "aeolian" => Some(Scale::Minor),
                "whole" => Some(Scale::WholeTone),
                _ => None,
            })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Scale::Major => "major",
            Scale::Minor => "minor",
            Scale::Dorian => "dorian",
            Scale::Phrygian => "phrygian",
            Scale::Lydian => "lydian",
            Scale::Mixolydian => "mixolydian",
            Scale::Locrian => "locrian",
            Scale::Pentatonic => "pentatonic",
            Scale::Blues => "blues",
            Scale::Chromatic => "chromatic",
            Scale::WholeTone => "wholeTone",
            Scale::Diminished => "diminished",
        }
    }

    /// Semitones above the root
    pub fn intervals(&self) -> &'static [i32] {
        match self {
            Scale::Major => &[0, 2, 4, 5, 7, 9, 11],
            Scale::Minor => &[0, 2, 3, 5, 7, 8, 10],
            Scale::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            Scale::Phrygian => &[0, 1, 3, 5, 7, 8, 10],
            Scale::Lydian => &[0, 2, 4, 6, 7, 9, 11],
            Scale::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            Scale::Locrian => &[0, 1, 3, 5, 6, 8, 10],
            Scale::Pentatonic => &[0, 2, 4, 7, 9],
            Scale::Blues => &[0, 3, 5, 6, 7, 10],
            Scale::Chromatic => &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
            Scale::WholeTone => &[0, 2, 4, 6, 8, 10],
            Scale::Diminished => &[0, 2, 3, 5, 6, 8, 9, 11],
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ChordQuality {
    Major,
    Minor,
    Dim,
    Aug,
    Sus2,
    Sus4,
    Dom7,
    Maj7,
    Min7,
    Dim7,
    M7b5,
    Add9,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 12] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Dim,
        ChordQuality::Aug,
        ChordQuality::Sus2,
        ChordQuality::Sus4,
        ChordQuality::Dom7,
        ChordQuality::Maj7,
        ChordQuality::Min7,
        ChordQuality::Dim7,
        ChordQuality::M7b5,
        ChordQuality::Add9,
    ];

    /// Parse chord quality from string (case-insensitive), with the usual
    /// shorthand symbols
    pub fn from_name(s: &str) -> Option<ChordQuality> {
        if s == "M" {
            return Some(ChordQuality::Major);
        }
        let lowered = s.to_lowercase();
        ChordQuality::ALL
            .into_iter()
            .find(|quality| quality.name() == lowered)
            .or(match lowered.as_str() {
                "maj" => Some(ChordQuality::Major),
                "m" | "min" => Some(ChordQuality::Minor),
                "7" => Some(ChordQuality::Dom7),
                "m7" => Some(ChordQuality::Min7),
                _ => None,
            })
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChordQuality::Major => "major",
            ChordQuality::Minor => "minor",
            ChordQuality::Dim => "dim",
            ChordQuality::Aug => "aug",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::Dom7 => "dom7",
            ChordQuality::Maj7 => "maj7",
            ChordQuality::Min7 => "min7",
            ChordQuality::Dim7 => "dim7",
            ChordQuality::M7b5 => "m7b5",
            ChordQuality::Add9 => "add9",
        }
    }

    /// Semitones above the root
    pub fn intervals(&self) -> &'static [i32] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Dim => &[0, 3, 6],
            ChordQuality::Aug => &[0, 4, 8],
            ChordQuality::Sus2 => &[0, 2, 7],
            ChordQuality::Sus4 => &[0, 5, 7],
            ChordQuality::Dom7 => &[0, 4, 7, 10],
            ChordQuality::Maj7 => &[0, 4, 7, 11],
            ChordQuality::Min7 => &[0, 3, 7, 10],
            ChordQuality::Dim7 => &[0, 3, 6, 9],
            ChordQuality::M7b5 => &[0, 3, 6, 10],
            ChordQuality::Add9 => &[0, 4, 7, 14],
        }
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn spell(root: Key, octave: i32, intervals: &[i32]) -> Vec<String> {
    let base = octave * 12 + root.pitch_class() as i32;
    intervals.iter().map(|i| note_name(base + i)).collect()
}

/// Notes of `scale` ascending from `root` in `octave`. Notes past B carry
/// into the next octave.
pub fn scale_notes(root: Key, scale: Scale, octave: i32) -> Vec<String> {
    spell(root, octave, scale.intervals())
}

/// Notes of a chord ascending from `root` in `octave`
pub fn chord_notes(root: Key, quality: ChordQuality, octave: i32) -> Vec<String> {
    spell(root, octave, quality.intervals())
}

/// Family a progression belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ProgressionStyle {
    Pop,
    Jazz,
    Blues,
    Ambient,
    Edm,
}

impl ProgressionStyle {
    pub const ALL: [ProgressionStyle; 5] = [
        ProgressionStyle::Pop,
        ProgressionStyle::Jazz,
        ProgressionStyle::Blues,
        ProgressionStyle::Ambient,
        ProgressionStyle::Edm,
    ];

    pub fn from_name(s: &str) -> Option<Self> {
        let lowered = s.to_lowercase();
        Self::ALL.into_iter().find(|style| style.name() == lowered)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProgressionStyle::Pop => "pop",
            ProgressionStyle::Jazz => "jazz",
            ProgressionStyle::Blues => "blues",
            ProgressionStyle::Ambient => "ambient",
            ProgressionStyle::Edm => "edm",
        }
    }
}

impl fmt::Display for ProgressionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named sequence of Roman-numeral chords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Progression {
    pub name: &'static str,
    pub numerals: &'static [&'static str],
    pub description: &'static str,
}

const POP: &[Progression] = &[
    Progression {
        name: "I-V-vi-IV",
        numerals: &["I", "V", "vi", "IV"],
        description: "The most popular progression in modern pop",
    },
    Progression {
        name: "I-IV-V-I",
        numerals: &["I", "IV", "V", "I"],
        description: "Classic rock/pop progression",
    },
    Progression {
        name: "vi-IV-I-V",
        numerals: &["vi", "IV", "I", "V"],
        description: "Sad pop progression",
    },
];

const JAZZ: &[Progression] = &[
    Progression {
        name: "ii-V-I",
        numerals: &["ii", "V", "I"],
        description: "Most common jazz progression",
    },
    Progression {
        name: "I-vi-ii-V",
        numerals: &["I", "vi", "ii", "V"],
        description: "Rhythm changes",
    },
    Progression {
        name: "iii-vi-ii-V",
        numerals: &["iii", "vi", "ii", "V"],
        description: "Extended turnaround",
    },
];

const BLUES: &[Progression] = &[Progression {
    name: "12-bar",
    numerals: &["I", "I", "I", "I", "IV", "IV", "I", "I", "V", "IV", "I", "V"],
    description: "Standard 12-bar blues",
}];

const AMBIENT: &[Progression] = &[
    Progression {
        name: "I-bVII-IV",
        numerals: &["I", "bVII", "IV"],
        description: "Dreamy modal progression",
    },
    Progression {
        name: "i-VI-III-VII",
        numerals: &["i", "VI", "III", "VII"],
        description: "Epic ambient progression",
    },
];

const EDM: &[Progression] = &[
    Progression {
        name: "i-VI-III-VII",
        numerals: &["i", "VI", "III", "VII"],
        description: "EDM anthem progression",
    },
    Progression {
        name: "i-iv-VI-V",
        numerals: &["i", "iv", "VI", "V"],
        description: "Dark EDM progression",
    },
];

/// Every progression of a style. Never empty.
pub fn progressions(style: ProgressionStyle) -> &'static [Progression] {
    match style {
        ProgressionStyle::Pop => POP,
        ProgressionStyle::Jazz => JAZZ,
        ProgressionStyle::Blues => BLUES,
        ProgressionStyle::Ambient => AMBIENT,
        ProgressionStyle::Edm => EDM,
    }
}

/// Root offset from the tonic and chord quality of a numeral such as `IV`,
/// `vi` or `bVII`. Lowercase numerals are minor sevenths, uppercase major
/// sevenths. Unknown numerals read as the tonic.
fn numeral_chord(numeral: &str) -> (i32, ChordQuality) {
    let (flat, letters) = match numeral.strip_prefix('b') {
        Some(rest) if !rest.is_empty() => (1, rest),
        _ => (0, numeral),
    };
    let quality = if letters.chars().all(|c| c.is_lowercase()) {
        ChordQuality::Min7
    } else {
        ChordQuality::Maj7
    };
    let degree = match letters.to_uppercase().as_str() {
        "II" => 1,
        "III" => 2,
        "IV" => 3,
        "V" => 4,
        "VI" => 5,
        "VII" => 6,
        _ => 0,
    };
    (Scale::Major.intervals()[degree] - flat, quality)
}

/// Chords of the progression called `name` in `style`, rooted on `key` in
/// octave 4. An unknown or missing name picks the style's first progression.
pub fn progression(key: Key, style: ProgressionStyle, name: Option<&str>) -> (Progression, Vec<Vec<String>>) {
    let table = progressions(style);
    let chosen = name
        .and_then(|name| table.iter().find(|p| p.name.eq_ignore_ascii_case(name)))
        .unwrap_or(&table[0]);

    let chords = chosen
        .numerals
        .iter()
        .map(|numeral| {
            let (offset, quality) = numeral_chord(numeral);
            let root = Key::from_pitch_class((key.pitch_class() as i32 + offset).rem_euclid(12) as u8);
            chord_notes(root, quality, 4)
        })
        .collect();
    (*chosen, chords)
}

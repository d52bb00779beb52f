//! Built-in catalogue of example patterns
//!
//! Snippets a user can drop into a channel's code buffer. Some use notation
//! the engine does not interpret (stacks, effects chains); they still play
//! their first pattern call.

use std::fmt;

/// Grouping of presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PatternCategory {
    Beats,
    Bass,
    Synth,
    Effects,
    Melody,
}

impl PatternCategory {
    pub const ALL: [PatternCategory; 5] = [
        PatternCategory::Beats,
        PatternCategory::Bass,
        PatternCategory::Synth,
        PatternCategory::Effects,
        PatternCategory::Melody,
    ];

    /// Parse category from string (case-insensitive)
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "beats" | "drums" => Some(PatternCategory::Beats),
            "bass" => Some(PatternCategory::Bass),
            "synth" => Some(PatternCategory::Synth),
            "effects" | "fx" => Some(PatternCategory::Effects),
            "melody" => Some(PatternCategory::Melody),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PatternCategory::Beats => "beats",
            PatternCategory::Bass => "bass",
            PatternCategory::Synth => "synth",
            PatternCategory::Effects => "effects",
            PatternCategory::Melody => "melody",
        }
    }
}

impl fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named example pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PatternPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub code: &'static str,
    pub category: PatternCategory,
    pub description: &'static str,
}

const PRESETS: &[PatternPreset] = &[
    PatternPreset {
        id: "basic-beat",
        name: "Basic Beat",
        code: r#"s("bd sd bd sd")"#,
        category: PatternCategory::Beats,
        description: "Simple 4/4 kick-snare pattern",
    },
    PatternPreset {
        id: "four-floor",
        name: "Four on Floor",
        code: r#"s("bd*4")"#,
        category: PatternCategory::Beats,
        description: "Classic house kick pattern",
    },
    PatternPreset {
        id: "hihats",
        name: "Hi-Hats",
        code: r#"s("hh*8").gain(0.4)"#,
        category: PatternCategory::Beats,
        description: "Eighth note hi-hats",
    },
    PatternPreset {
        id: "drum-pattern",
        name: "Full Drums",
        code: "stack(\n  s(\"bd sd bd sd\"),\n  s(\"hh*8\").gain(0.3),\n  s(\"~ cp ~ cp\").gain(0.5)\n)",
        category: PatternCategory::Beats,
        description: "Complete drum loop with kick, snare, hats, and clap",
    },
    PatternPreset {
        id: "euclidean",
        name: "Euclidean",
        code: r#"s("bd(3,8) sd(2,8,1)")"#,
        category: PatternCategory::Beats,
        description: "Euclidean rhythm pattern",
    },
    PatternPreset {
        id: "simple-bass",
        name: "Simple Bass",
        code: r#"note("c2 ~ c2 ~ e2 ~ g1 ~").sound("sawtooth").lpf(400)"#,
        category: PatternCategory::Bass,
        description: "Basic bass line",
    },
    PatternPreset {
        id: "acid-bass",
        name: "Acid Bass",
        code: "note(\"c2 c2 c3 c2 eb2 c2 g2 c2\")\n  .sound(\"sawtooth\")\n  .lpf(sine.range(200, 2000).slow(4))\n  .lpq(8)",
        category: PatternCategory::Bass,
        description: "Classic acid bass with filter sweep",
    },
    PatternPreset {
        id: "sub-bass",
        name: "Sub Bass",
        code: r#"note("c1 ~ ~ c1 ~ ~ c1 ~").sound("sine").gain(0.8)"#,
        category: PatternCategory::Bass,
        description: "Deep sub bass",
    },
    PatternPreset {
        id: "pad",
        name: "Synth Pad",
        code: "note(\"<c3 e3 g3> <e3 g3 b3>\")\n  .sound(\"sawtooth\")\n  .lpf(800)\n  .room(0.5)\n  .slow(2)",
        category: PatternCategory::Synth,
        description: "Ambient pad sound",
    },
    PatternPreset {
        id: "arp",
        name: "Arpeggio",
        code: r#"note("c4 e4 g4 b4").sound("triangle").fast(2)"#,
        category: PatternCategory::Synth,
        description: "Simple arpeggio pattern",
    },
    PatternPreset {
        id: "pluck",
        name: "Pluck Synth",
        code: "note(\"c4 ~ e4 ~ g4 ~ a4 ~\")\n  .sound(\"sawtooth\")\n  .decay(0.1)\n  .sustain(0)",
        category: PatternCategory::Synth,
        description: "Plucky synth melody",
    },
    PatternPreset {
        id: "melody-1",
        name: "Simple Melody",
        code: r#"note("c4 d4 e4 g4 e4 d4 c4 ~")"#,
        category: PatternCategory::Melody,
        description: "Basic melodic phrase",
    },
    PatternPreset {
        id: "melody-2",
        name: "Jazz Melody",
        code: "note(\"c4 eb4 g4 bb4 ab4 g4 eb4 c4\")\n  .sound(\"piano\")\n  .slow(2)",
        category: PatternCategory::Melody,
        description: "Jazz-influenced melody",
    },
    PatternPreset {
        id: "delay",
        name: "Add Delay",
        code: ".delay(0.5).delaytime(0.25).delayfeedback(0.5)",
        category: PatternCategory::Effects,
        description: "Delay effect chain",
    },
    PatternPreset {
        id: "reverb",
        name: "Add Reverb",
        code: ".room(0.8).size(0.9)",
        category: PatternCategory::Effects,
        description: "Spacious reverb",
    },
    PatternPreset {
        id: "filter",
        name: "Filter Sweep",
        code: ".lpf(sine.range(200, 4000).slow(8))",
        category: PatternCategory::Effects,
        description: "Low-pass filter modulation",
    },
    PatternPreset {
        id: "pan",
        name: "Auto Pan",
        code: ".pan(sine.range(0, 1).slow(2))",
        category: PatternCategory::Effects,
        description: "Automatic panning",
    },
];

/// Every preset, in catalogue order
pub fn presets() -> &'static [PatternPreset] {
    PRESETS
}

/// Look up a preset by id
pub fn find(id: &str) -> Option<&'static PatternPreset> {
    PRESETS.iter().find(|preset| preset.id == id)
}

/// Presets of one category, in catalogue order
pub fn by_category(category: PatternCategory) -> impl Iterator<Item = &'static PatternPreset> {
    PRESETS
        .iter()
        .filter(move |preset| preset.category == category)
}

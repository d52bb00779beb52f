//! Genre templates
//!
//! Each genre has a drum line, a bass line and a lead line written in C.
//! [`generate`] stacks the chosen lines, transposes the pitched ones into the
//! requested key and prefixes the tempo.

use super::{transpose_notes, Key};
use crate::types::Waveform;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Genre {
    #[default]
    Techno,
    House,
    Dnb,
    Ambient,
    Trap,
}

/// A pitched line: note body, oscillator and effect chain
#[derive(Debug, Clone, Copy, PartialEq)]
struct Line {
    notes: &'static str,
    waveform: Waveform,
    chain: &'static str,
}

impl Line {
    fn code(&self, waveform: Waveform) -> String {
        format!("note(\"{}\").s(\"{}\"){}", self.notes, waveform.name(), self.chain)
    }
}

struct Template {
    drums: &'static str,
    bass: Line,
    lead: Line,
    effects: &'static str,
}

impl Genre {
    pub const ALL: [Genre; 5] = [Genre::Techno, Genre::House, Genre::Dnb, Genre::Ambient, Genre::Trap];

    pub fn from_name(s: &str) -> Option<Genre> {
        match s.to_lowercase().as_str() {
            "techno" => Some(Genre::Techno),
            "house" => Some(Genre::House),
            "dnb" | "drum-and-bass" | "drumandbass" => Some(Genre::Dnb),
            "ambient" => Some(Genre::Ambient),
            "trap" => Some(Genre::Trap),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Genre::Techno => "techno",
            Genre::House => "house",
            Genre::Dnb => "dnb",
            Genre::Ambient => "ambient",
            Genre::Trap => "trap",
        }
    }

    fn template(&self) -> Template {
        match self {
            Genre::Techno => Template {
                drums: r#"s("bd*4, ~ cp ~ cp, hh*8")"#,
                bass: Line {
                    notes: "c2 c2 c2 c3",
                    waveform: Waveform::Saw,
                    chain: ".lpf(800)",
                },
                lead: Line {
                    notes: "c4 eb4 g4 bb4",
                    waveform: Waveform::Square,
                    chain: ".lpf(2000).room(0.2)",
                },
                effects: ".room(0.1).delay(0.125)",
            },
            Genre::House => Template {
                drums: r#"s("bd*4, ~ cp ~ cp, [~ hh]*8")"#,
                bass: Line {
                    notes: "c2 ~ eb2 ~",
                    waveform: Waveform::Triangle,
                    chain: ".lpf(600)",
                },
                lead: Line {
                    notes: "<c4 eb4 g4> <eb4 g4 bb4>",
                    waveform: Waveform::Saw,
                    chain: ".lpf(1500)",
                },
                effects: ".room(0.2).delay(0.25)",
            },
            Genre::Dnb => Template {
                drums: r#"s("bd ~ [~ bd] ~, ~ ~ cp ~, hh*16")"#,
                bass: Line {
                    notes: "c1 ~ c1 c2",
                    waveform: Waveform::Saw,
                    chain: ".lpf(400)",
                },
                lead: Line {
                    notes: "c5 eb5 ~ g5",
                    waveform: Waveform::Square,
                    chain: ".lpf(3000)",
                },
                effects: ".room(0.15).delay(0.0625)",
            },
            Genre::Ambient => Template {
                drums: r#"s("~ ~ ~ ~, ~ [hh ~] ~ ~")"#,
                bass: Line {
                    notes: "c2 ~ ~ eb2",
                    waveform: Waveform::Sine,
                    chain: ".lpf(200).room(0.8)",
                },
                lead: Line {
                    notes: "<c4 eb4 g4 bb4>",
                    waveform: Waveform::Triangle,
                    chain: ".lpf(800).room(0.9)",
                },
                effects: ".room(0.9).delay(0.5)",
            },
            Genre::Trap => Template {
                drums: r#"s("bd ~ ~ bd, ~ ~ cp ~, [hh hh hh]*4")"#,
                bass: Line {
                    notes: "c1 ~ ~ c1",
                    waveform: Waveform::Sine,
                    chain: ".lpf(100)",
                },
                lead: Line {
                    notes: "c4 ~ eb4 ~",
                    waveform: Waveform::Square,
                    chain: ".lpf(2500)",
                },
                effects: ".room(0.2).delay(0.125)",
            },
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What to put in a generated piece
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerateOptions {
    pub genre: Genre,
    pub key: Key,
    pub bpm: f32,
    /// Replaces the genre's lead oscillator
    pub lead: Option<Waveform>,
    pub drums: bool,
    pub bass: bool,
    pub synth: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            genre: Genre::Techno,
            key: Key::C,
            bpm: 120.0,
            lead: None,
            drums: true,
            bass: true,
            synth: true,
        }
    }
}

/// Assemble pattern code from a genre template.
///
/// The first line sets the tempo; the selected parts follow in one `stack`
/// with the genre's shared effects. When both pitched lines are left out the
/// drums play; otherwise the first pitched line is what the extractor picks.
pub fn generate(options: &GenerateOptions) -> String {
    let template = options.genre.template();
    let mut parts = Vec::new();
    if options.drums {
        parts.push(template.drums.to_string());
    }
    if options.bass {
        parts.push(template.bass.code(template.bass.waveform));
    }
    if options.synth {
        parts.push(template.lead.code(options.lead.unwrap_or(template.lead.waveform)));
    }

    let mut code = format!("setcpm({})", options.bpm);
    if !parts.is_empty() {
        let stack = format!("stack(\n  {}\n){}", parts.join(",\n  "), template.effects);
        code.push('\n');
        code.push_str(&transpose_notes(&stack, options.key.shift_from_c()));
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{extract, CallKind};

    #[test]
    fn test_default_techno() {
        let code = generate(&GenerateOptions::default());
        assert_eq!(
            code,
            "setcpm(120)\nstack(\n  s(\"bd*4, ~ cp ~ cp, hh*8\"),\n  \
             note(\"c2 c2 c2 c3\").s(\"sawtooth\").lpf(800),\n  \
             note(\"c4 eb4 g4 bb4\").s(\"square\").lpf(2000).room(0.2)\n\
             ).room(0.1).delay(0.125)"
        );
    }

    #[test]
    fn test_bass_line_plays_first() {
        let code = generate(&GenerateOptions::default());
        let call = extract(&code).unwrap();
        assert_eq!(call.kind, CallKind::Note);
        assert_eq!(call.tokens, vec!["c2", "c2", "c2", "c3"]);
    }

    #[test]
    fn test_key_transposes_pitched_lines() {
        let options = GenerateOptions {
            genre: Genre::Trap,
            key: "d".parse().unwrap(),
            bass: false,
            ..GenerateOptions::default()
        };
        let call = extract(&generate(&options)).unwrap();
        assert_eq!(call.tokens, vec!["d4", "f4"]);

        // keys above F# move the line down
        let options = GenerateOptions {
            key: "a".parse().unwrap(),
            ..GenerateOptions::default()
        };
        let code = generate(&options);
        assert!(code.contains(r#"note("a1 a1 a1 a2")"#));
        assert!(code.contains(r#"s("bd*4, ~ cp ~ cp, hh*8")"#));
    }

    #[test]
    fn test_parts_and_lead_override() {
        let drums_only = GenerateOptions {
            genre: Genre::House,
            bass: false,
            synth: false,
            ..GenerateOptions::default()
        };
        let call = extract(&generate(&drums_only)).unwrap();
        assert_eq!(call.kind, CallKind::Sound);

        let lead = GenerateOptions {
            genre: Genre::Dnb,
            lead: Some(Waveform::Sine),
            ..GenerateOptions::default()
        };
        assert!(generate(&lead).contains(r#"note("c5 eb5 ~ g5").s("sine")"#));

        let nothing = GenerateOptions {
            bpm: 90.5,
            drums: false,
            bass: false,
            synth: false,
            ..GenerateOptions::default()
        };
        assert_eq!(generate(&nothing), "setcpm(90.5)");
    }

    #[test]
    fn test_every_genre_plays() {
        for genre in Genre::ALL {
            assert_eq!(Genre::from_name(genre.name()), Some(genre));
            let code = generate(&GenerateOptions {
                genre,
                ..GenerateOptions::default()
            });
            assert!(!extract(&code).unwrap().is_empty(), "{} plays nothing", genre);
        }
    }
}

//! Pattern-writing commands (generate, scale, chord, progression, euclid, poly)
//!
//! `generate` replaces the active buffer with a complete piece; the others
//! add one line to it the way `insert` adds a preset.

use crate::audio::device::AudioBackend;
use crate::commands::{CommandContext, CommandResult};
use colored::*;
use tidewave_core::theory::{
    chord_notes, euclidean_body, generate, polyrhythm_body, progression, progressions,
    scale_notes, ChordQuality, GenerateOptions, Genre, Key, ProgressionStyle, Scale,
};
use tidewave_core::types::Waveform;

/// Largest step count `euclid` accepts
const MAX_EUCLID_STEPS: usize = 64;

fn insert_line<B: AudioBackend>(line: String, ctx: &mut CommandContext<B>) -> CommandResult {
    let deck = ctx.deck();
    ctx.booth.insert_pattern(deck, &line);
    CommandResult::Message(format!("➕ {} → {}", line.cyan(), deck))
}

fn parse_key(arg: &str) -> Result<Key, CommandResult> {
    arg.parse::<Key>()
        .map_err(|e| CommandResult::Error(e.to_string()))
}

fn parse_octave(arg: Option<&str>) -> Result<i32, CommandResult> {
    match arg {
        None => Ok(4),
        Some(arg) => match arg.parse::<i32>() {
            Ok(octave) if (0..=8).contains(&octave) => Ok(octave),
            _ => Err(CommandResult::Error(format!("Invalid octave '{}'. Use 0-8", arg))),
        },
    }
}

fn parse_count(arg: Option<&str>, what: &str) -> Result<usize, CommandResult> {
    arg.and_then(|arg| arg.parse::<usize>().ok())
        .ok_or_else(|| CommandResult::Error(format!("Expected a whole number of {}", what)))
}

fn genre_list() -> String {
    Genre::ALL.map(|genre| genre.name()).join(", ")
}

/// Handle `generate <genre> [key] [bpm] [waveform] [nodrums|nobass|nolead]`
pub fn cmd_generate<B: AudioBackend>(args: &str, ctx: &mut CommandContext<B>) -> CommandResult {
    let mut words = args.split_whitespace();
    let Some(genre_name) = words.next() else {
        return CommandResult::Error(format!(
            "Usage: generate <genre> [key] [bpm] [waveform]. Genres: {}",
            genre_list()
        ));
    };
    let Some(genre) = Genre::from_name(genre_name) else {
        return CommandResult::Error(format!(
            "Unknown genre '{}'. Use {}",
            genre_name,
            genre_list()
        ));
    };

    let deck = ctx.deck();
    let mut options = GenerateOptions {
        genre,
        bpm: ctx.booth.session(deck).bpm(),
        ..GenerateOptions::default()
    };
    for word in words {
        match word.to_lowercase().as_str() {
            "nodrums" => options.drums = false,
            "nobass" => options.bass = false,
            "nolead" | "nosynth" => options.synth = false,
            _ => {
                if let Some(waveform) = Waveform::from_name(word) {
                    options.lead = Some(waveform);
                } else if let Ok(bpm) = word.parse::<f32>() {
                    if !bpm.is_finite() {
                        return CommandResult::Error(format!("Invalid tempo '{}'", word));
                    }
                    options.bpm = bpm;
                } else {
                    match parse_key(word) {
                        Ok(key) => options.key = key,
                        Err(e) => return e,
                    }
                }
            }
        }
    }

    // the deck's tempo is what actually paces playback
    options.bpm = ctx.booth.session_mut(deck).set_bpm(options.bpm);
    let code = generate(&options);
    ctx.booth.set_code(deck, code.as_str());
    CommandResult::Message(format!(
        "{}\n{}",
        format!(
            "✨ Created a {} pattern at {} BPM in {} on {}",
            genre, options.bpm, options.key, deck
        )
        .bright_green(),
        code
    ))
}

/// Handle `scale <root> [scale] [octave]`
pub fn cmd_scale<B: AudioBackend>(args: &str, ctx: &mut CommandContext<B>) -> CommandResult {
    let mut words = args.split_whitespace();
    let root = match words.next() {
        Some(root) => root,
        None => {
            let names: Vec<&str> = Scale::ALL.iter().map(|s| s.name()).collect();
            return CommandResult::Error(format!(
                "Usage: scale <root> [scale] [octave]. Scales: {}",
                names.join(", ")
            ));
        }
    };
    let root = match parse_key(root) {
        Ok(root) => root,
        Err(e) => return e,
    };
    let scale = match words.next() {
        None => Scale::Major,
        Some(name) => match Scale::from_name(name) {
            Some(scale) => scale,
            None => return CommandResult::Error(format!("Unknown scale '{}'", name)),
        },
    };
    let octave = match parse_octave(words.next()) {
        Ok(octave) => octave,
        Err(e) => return e,
    };
    let notes = scale_notes(root, scale, octave);
    insert_line(format!("note(\"{}\")", notes.join(" ")), ctx)
}

/// Handle `chord <root> [quality] [octave]`
pub fn cmd_chord<B: AudioBackend>(args: &str, ctx: &mut CommandContext<B>) -> CommandResult {
    let mut words = args.split_whitespace();
    let Some(root) = words.next() else {
        let names: Vec<&str> = ChordQuality::ALL.iter().map(|q| q.name()).collect();
        return CommandResult::Error(format!(
            "Usage: chord <root> [quality] [octave]. Qualities: {}",
            names.join(", ")
        ));
    };
    let root = match parse_key(root) {
        Ok(root) => root,
        Err(e) => return e,
    };
    let quality = match words.next() {
        None => ChordQuality::Major,
        Some(name) => match ChordQuality::from_name(name) {
            Some(quality) => quality,
            None => return CommandResult::Error(format!("Unknown chord quality '{}'", name)),
        },
    };
    let octave = match parse_octave(words.next()) {
        Ok(octave) => octave,
        Err(e) => return e,
    };
    let notes = chord_notes(root, quality, octave);
    insert_line(format!("note(\"{}\")", notes.join(" ")), ctx)
}

/// Handle `progression [key] [style] [name]`. Without arguments, lists them.
pub fn cmd_progression<B: AudioBackend>(args: &str, ctx: &mut CommandContext<B>) -> CommandResult {
    let mut words = args.split_whitespace();
    let Some(key) = words.next() else {
        let mut lines = Vec::new();
        for style in ProgressionStyle::ALL {
            lines.push(style.name().to_uppercase().green().to_string());
            for p in progressions(style) {
                lines.push(format!("  {:<14} {}", p.name.cyan(), p.description.dimmed()));
            }
        }
        return CommandResult::Message(lines.join("\n"));
    };
    let key = match parse_key(key) {
        Ok(key) => key,
        Err(e) => return e,
    };
    let style = match words.next() {
        None => ProgressionStyle::Pop,
        Some(name) => match ProgressionStyle::from_name(name) {
            Some(style) => style,
            None => return CommandResult::Error(format!("Unknown style '{}'", name)),
        },
    };

    let (chosen, chords) = progression(key, style, words.next());
    let body: Vec<String> = chords
        .iter()
        .map(|chord| format!("<{}>", chord.join(" ")))
        .collect();
    let result = insert_line(format!("note(\"{}\")", body.join(" ")), ctx);
    match result {
        CommandResult::Message(msg) => {
            CommandResult::Message(format!("{} ({} in {})\n{}", chosen.name.bold(), style, key, msg))
        }
        other => other,
    }
}

/// Handle `euclid <hits> <steps> [rotation] [sound]`
pub fn cmd_euclid<B: AudioBackend>(args: &str, ctx: &mut CommandContext<B>) -> CommandResult {
    let words: Vec<&str> = args.split_whitespace().collect();
    if words.len() < 2 {
        return CommandResult::Error("Usage: euclid <hits> <steps> [rotation] [sound]".to_string());
    }
    let hits = match parse_count(words.first().copied(), "hits") {
        Ok(hits) => hits,
        Err(e) => return e,
    };
    let steps = match parse_count(words.get(1).copied(), "steps") {
        Ok(steps) if (1..=MAX_EUCLID_STEPS).contains(&steps) => steps,
        Ok(_) => {
            return CommandResult::Error(format!("Steps must be between 1 and {}", MAX_EUCLID_STEPS))
        }
        Err(e) => return e,
    };
    // an optional rotation, then an optional sound, in either order
    let mut rotation = 0;
    let mut sound = "bd";
    for word in words[2..].iter().copied() {
        match word.parse::<usize>() {
            Ok(r) => rotation = r,
            Err(_) => sound = word,
        }
    }
    insert_line(
        format!("s(\"{}\")", euclidean_body(hits, steps, rotation, sound)),
        ctx,
    )
}

/// Handle `poly <a> <b>`
pub fn cmd_poly<B: AudioBackend>(args: &str, ctx: &mut CommandContext<B>) -> CommandResult {
    let mut words = args.split_whitespace();
    let (a, b) = match (parse_count(words.next(), "beats"), parse_count(words.next(), "beats")) {
        (Ok(a), Ok(b)) if a > 0 && b > 0 => (a, b),
        _ => return CommandResult::Error("Usage: poly <a> <b>, both at least 1".to_string()),
    };
    insert_line(format!("s(\"{}\")", polyrhythm_body(a, b)), ctx)
}

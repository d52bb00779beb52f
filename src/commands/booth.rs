//! Booth commands (deck, code, show, insert, patterns, swap, xfade)

use crate::audio::booth::Deck;
use crate::audio::device::AudioBackend;
use crate::commands::{CommandContext, CommandResult};
use colored::*;
use tidewave_core::library::{self, PatternCategory, PatternPreset};

/// Handle `deck [preview|master]`
pub fn cmd_deck<B: AudioBackend>(args: &str, ctx: &mut CommandContext<B>) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!("Active deck: {}", ctx.deck()));
    }
    match Deck::from_name(args) {
        Some(deck) => {
            ctx.booth.set_active(deck);
            CommandResult::Message(format!("🎧 Editing {} deck", deck).cyan().to_string())
        }
        None => CommandResult::Error(format!("Unknown deck '{}'. Use preview or master", args)),
    }
}

/// Handle `code <text>`: replace the active buffer without playing it
pub fn cmd_code<B: AudioBackend>(args: &str, ctx: &mut CommandContext<B>) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: code <text>".to_string());
    }
    let deck = ctx.deck();
    ctx.booth.set_code(deck, args);
    CommandResult::Message(format!("Code set on {}", deck))
}

/// Handle `show [deck]`
pub fn cmd_show<B: AudioBackend>(args: &str, ctx: &mut CommandContext<B>) -> CommandResult {
    let deck = if args.is_empty() {
        ctx.deck()
    } else {
        match Deck::from_name(args) {
            Some(deck) => deck,
            None => return CommandResult::Error(format!("Unknown deck '{}'", args)),
        }
    };
    CommandResult::Message(format!(
        "{}\n{}",
        format!("── {} ──", deck).bold(),
        ctx.booth.code(deck)
    ))
}

/// Handle `insert <preset-id>`
pub fn cmd_insert<B: AudioBackend>(args: &str, ctx: &mut CommandContext<B>) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: insert <preset-id> (see 'patterns')".to_string());
    }
    match library::find(args) {
        Some(preset) => {
            let deck = ctx.deck();
            ctx.booth.insert_pattern(deck, preset.code);
            CommandResult::Message(
                format!("➕ Inserted '{}' into {}", preset.name, deck)
                    .bright_green()
                    .to_string(),
            )
        }
        None => CommandResult::Error(format!("Unknown pattern '{}'", args)),
    }
}

fn format_preset(preset: &PatternPreset) -> String {
    format!(
        "  {:<14} {:<16} {}",
        preset.id.cyan(),
        preset.name,
        preset.description.dimmed()
    )
}

/// Handle `patterns [category]`
pub fn cmd_patterns<B: AudioBackend>(args: &str, _ctx: &mut CommandContext<B>) -> CommandResult {
    let categories: Vec<PatternCategory> = if args.is_empty() {
        PatternCategory::ALL.to_vec()
    } else {
        match PatternCategory::from_name(args) {
            Some(category) => vec![category],
            None => {
                return CommandResult::Error(format!(
                    "Unknown category '{}'. Use beats, bass, synth, effects or melody",
                    args
                ))
            }
        }
    };

    let mut lines = Vec::new();
    for category in categories {
        lines.push(category.name().to_uppercase().green().to_string());
        lines.extend(library::by_category(category).map(format_preset));
    }
    CommandResult::Message(lines.join("\n"))
}

/// Handle `swap`: copy preview code to master
pub fn cmd_swap<B: AudioBackend>(_args: &str, ctx: &mut CommandContext<B>) -> CommandResult {
    ctx.booth.swap_to_master();
    CommandResult::Message("🔀 Preview code moved to master".bright_green().to_string())
}

/// Handle `xfade [0-100]`
pub fn cmd_xfade<B: AudioBackend>(args: &str, ctx: &mut CommandContext<B>) -> CommandResult {
    if !args.is_empty() {
        match args.parse::<f32>() {
            Ok(position) if position.is_finite() => {
                ctx.booth.set_crossfader(position);
            }
            _ => return CommandResult::Error("Invalid crossfader. Use a value between 0 and 100".to_string()),
        }
    }
    CommandResult::Message(format!(
        "🎚 Crossfader {:.0}: preview {:.0}%, master {:.0}%",
        ctx.booth.crossfader(),
        ctx.booth.effective_volume(Deck::Preview) * 100.0,
        ctx.booth.effective_volume(Deck::Master) * 100.0
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;

    #[test]
    fn test_deck_switch_redirects_editing() {
        let mut ctx = context();
        cmd_deck("master", &mut ctx);
        cmd_code(r#"s("cp")"#, &mut ctx);
        assert_eq!(ctx.booth.code(Deck::Master), r#"s("cp")"#);
        assert!(ctx.booth.code(Deck::Preview).starts_with("// Preview Channel"));
        assert!(matches!(cmd_deck("side", &mut ctx), CommandResult::Error(_)));
    }

    #[test]
    fn test_insert_preset() {
        let mut ctx = context();
        cmd_insert("four-floor", &mut ctx);
        assert_eq!(ctx.booth.code(Deck::Preview), r#"s("bd*4")"#);
        cmd_insert("reverb", &mut ctx);
        assert_eq!(ctx.booth.code(Deck::Preview), "s(\"bd*4\")\n\n.room(0.8).size(0.9)");
        assert!(matches!(cmd_insert("nope", &mut ctx), CommandResult::Error(_)));
    }

    #[test]
    fn test_patterns_listing() {
        let mut ctx = context();
        let CommandResult::Message(listing) = cmd_patterns("bass", &mut ctx) else {
            panic!("expected a listing");
        };
        assert!(listing.contains("acid-bass"));
        assert!(!listing.contains("basic-beat"));
        assert!(matches!(cmd_patterns("polka", &mut ctx), CommandResult::Error(_)));
    }

    #[test]
    fn test_swap_and_xfade() {
        let mut ctx = context();
        cmd_code(r#"note("a4")"#, &mut ctx);
        cmd_swap("", &mut ctx);
        assert_eq!(ctx.booth.code(Deck::Master), r#"note("a4")"#);

        cmd_xfade("0", &mut ctx);
        assert_eq!(ctx.booth.crossfader(), 0.0);
        assert_eq!(ctx.booth.effective_volume(Deck::Master), 0.0);
        assert!(matches!(cmd_xfade("wide", &mut ctx), CommandResult::Error(_)));
    }
}

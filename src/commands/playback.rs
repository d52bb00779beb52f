//! Transport commands (play, stop, pause, volume, tempo, status)

use crate::audio::booth::Deck;
use crate::audio::device::AudioBackend;
use crate::commands::{CommandContext, CommandResult};
use colored::*;
use tidewave_core::types::SessionSnapshot;

/// Parse an optional deck argument, defaulting to the active deck
fn target_deck<B: AudioBackend>(args: &str, ctx: &CommandContext<B>) -> Result<Deck, CommandResult> {
    if args.is_empty() {
        return Ok(ctx.deck());
    }
    Deck::from_name(args)
        .ok_or_else(|| CommandResult::Error(format!("Unknown deck '{}'. Use preview or master", args)))
}

/// Play the deck's buffer and describe the outcome
fn play_deck<B: AudioBackend>(deck: Deck, ctx: &mut CommandContext<B>) -> CommandResult {
    match ctx.booth.play(deck) {
        Ok(count) => match ctx.booth.session(deck).last_error() {
            Some(message) => CommandResult::Error(message.to_string()),
            None => CommandResult::Message(
                format!("▶ Playing {} voice(s) on {}", count, deck)
                    .bright_green()
                    .to_string(),
            ),
        },
        Err(e) => {
            let message = ctx
                .booth
                .session(deck)
                .last_error()
                .map(str::to_string)
                .unwrap_or_else(|| e.to_string());
            CommandResult::Error(message)
        }
    }
}

/// Replace the active deck's buffer with `code` and play it
pub fn play_code<B: AudioBackend>(code: &str, ctx: &mut CommandContext<B>) -> CommandResult {
    let deck = ctx.deck();
    ctx.booth.set_code(deck, code);
    play_deck(deck, ctx)
}

/// Handle `play [code]`
pub fn cmd_play<B: AudioBackend>(args: &str, ctx: &mut CommandContext<B>) -> CommandResult {
    if args.is_empty() {
        play_deck(ctx.deck(), ctx)
    } else {
        play_code(args, ctx)
    }
}

/// Handle `toggle [deck]`
pub fn cmd_toggle<B: AudioBackend>(args: &str, ctx: &mut CommandContext<B>) -> CommandResult {
    let deck = match target_deck(args, ctx) {
        Ok(deck) => deck,
        Err(result) => return result,
    };
    if ctx.booth.session(deck).is_playing() {
        ctx.booth.stop(deck);
        CommandResult::Message(format!("⏹ Stopped {}", deck).yellow().to_string())
    } else {
        play_deck(deck, ctx)
    }
}

/// Handle `stop [deck]`
pub fn cmd_stop<B: AudioBackend>(args: &str, ctx: &mut CommandContext<B>) -> CommandResult {
    match target_deck(args, ctx) {
        Ok(deck) => {
            ctx.booth.stop(deck);
            CommandResult::Message(format!("⏹ Stopped {}", deck).yellow().to_string())
        }
        Err(result) => result,
    }
}

/// Handle `pause [deck]`
pub fn cmd_pause<B: AudioBackend>(args: &str, ctx: &mut CommandContext<B>) -> CommandResult {
    let deck = match target_deck(args, ctx) {
        Ok(deck) => deck,
        Err(result) => return result,
    };
    match ctx.booth.session_mut(deck).pause() {
        Ok(()) => CommandResult::Message(format!("⏸ Paused {}", deck).yellow().to_string()),
        Err(e) => CommandResult::Error(format!("Failed to pause: {}", e)),
    }
}

/// Handle `resume [deck]`
pub fn cmd_resume<B: AudioBackend>(args: &str, ctx: &mut CommandContext<B>) -> CommandResult {
    let deck = match target_deck(args, ctx) {
        Ok(deck) => deck,
        Err(result) => return result,
    };
    match ctx.booth.session_mut(deck).resume() {
        Ok(()) => CommandResult::Message(format!("▶ Resumed {}", deck).bright_green().to_string()),
        Err(e) => CommandResult::Error(format!("Failed to resume: {}", e)),
    }
}

/// Handle `volume [0-1]`
pub fn cmd_volume<B: AudioBackend>(args: &str, ctx: &mut CommandContext<B>) -> CommandResult {
    let deck = ctx.deck();
    if !args.is_empty() {
        match args.parse::<f32>() {
            Ok(volume) if !volume.is_nan() => {
                ctx.booth.session_mut(deck).set_volume(volume);
            }
            _ => return CommandResult::Error("Invalid volume. Use a value between 0 and 1".to_string()),
        }
    }
    CommandResult::Message(format!(
        "🔊 {} volume: {:.0}% (effective {:.0}%)",
        deck,
        ctx.booth.session(deck).volume() * 100.0,
        ctx.booth.effective_volume(deck) * 100.0
    ))
}

/// Handle `tempo [bpm]`
pub fn cmd_tempo<B: AudioBackend>(args: &str, ctx: &mut CommandContext<B>) -> CommandResult {
    let deck = ctx.deck();
    if args.is_empty() {
        return CommandResult::Message(format!(
            "Current tempo: {:.1} BPM",
            ctx.booth.session(deck).bpm()
        ));
    }

    match args.parse::<f32>() {
        Ok(bpm) if bpm.is_finite() => {
            let bpm = ctx.booth.session_mut(deck).set_bpm(bpm);
            CommandResult::Message(
                format!("🎵 Tempo set to {:.1} BPM (applies on next play)", bpm)
                    .bright_green()
                    .to_string(),
            )
        }
        _ => CommandResult::Error("Invalid tempo. Use a value between 60-200 BPM".to_string()),
    }
}

fn describe(deck: Deck, snapshot: &SessionSnapshot, effective: f32, active: bool) -> String {
    let marker = if active { "*" } else { " " };
    let transport = if snapshot.is_playing {
        "playing".bright_green()
    } else if snapshot.is_initialized {
        "stopped".yellow()
    } else {
        "idle".dimmed()
    };
    let mut line = format!(
        "{} {:<8} {:<8} vol {:>3.0}% (eff {:>3.0}%)  {:.0} BPM",
        marker,
        deck.name(),
        transport,
        snapshot.volume * 100.0,
        effective * 100.0,
        snapshot.bpm
    );
    if let Some(error) = &snapshot.error {
        line.push_str(&format!("  {}", error.red()));
    }
    line
}

/// Handle `status [json]`
pub fn cmd_status<B: AudioBackend>(args: &str, ctx: &mut CommandContext<B>) -> CommandResult {
    let preview = ctx.booth.session(Deck::Preview).snapshot();
    let master = ctx.booth.session(Deck::Master).snapshot();

    if args == "json" {
        let value = serde_json::json!({
            "preview": preview,
            "master": master,
            "crossfader": ctx.booth.crossfader(),
            "active": ctx.deck().name(),
        });
        return match serde_json::to_string_pretty(&value) {
            Ok(json) => CommandResult::Message(json),
            Err(e) => CommandResult::Error(format!("Failed to encode status: {}", e)),
        };
    }

    let active = ctx.deck();
    CommandResult::Message(format!(
        "{}\n{}\ncrossfader {:.0}",
        describe(
            Deck::Preview,
            &preview,
            ctx.booth.effective_volume(Deck::Preview),
            active == Deck::Preview
        ),
        describe(
            Deck::Master,
            &master,
            ctx.booth.effective_volume(Deck::Master),
            active == Deck::Master
        ),
        ctx.booth.crossfader()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;

    #[test]
    fn test_play_with_code_updates_buffer() {
        let mut ctx = context();
        let result = cmd_play(r#"note("c4 e4")"#, &mut ctx);
        assert!(matches!(result, CommandResult::Message(_)));
        assert_eq!(ctx.booth.code(Deck::Preview), r#"note("c4 e4")"#);
        assert_eq!(ctx.booth.session(Deck::Preview).active_voices(), 2);
    }

    #[test]
    fn test_play_empty_buffer_reports_message() {
        let mut ctx = context();
        ctx.booth.set_code(Deck::Preview, "  ");
        assert_eq!(
            cmd_play("", &mut ctx),
            CommandResult::Error("No code to play".to_string())
        );
    }

    #[test]
    fn test_toggle_targets_named_deck() {
        let mut ctx = context();
        cmd_toggle("master", &mut ctx);
        assert!(ctx.booth.session(Deck::Master).is_playing());
        assert!(!ctx.booth.session(Deck::Preview).is_playing());
        cmd_toggle("master", &mut ctx);
        assert!(!ctx.booth.session(Deck::Master).is_playing());
        assert!(matches!(cmd_toggle("left", &mut ctx), CommandResult::Error(_)));
    }

    #[test]
    fn test_volume_and_tempo_clamp() {
        let mut ctx = context();
        cmd_volume("3", &mut ctx);
        assert_eq!(ctx.booth.session(Deck::Preview).volume(), 1.0);
        assert!(matches!(cmd_volume("loud", &mut ctx), CommandResult::Error(_)));

        cmd_tempo("20", &mut ctx);
        assert_eq!(ctx.booth.session(Deck::Preview).bpm(), 60.0);
        assert!(matches!(cmd_tempo("NaN", &mut ctx), CommandResult::Error(_)));
    }

    #[test]
    fn test_status_json() {
        let mut ctx = context();
        cmd_play("", &mut ctx);
        let CommandResult::Message(json) = cmd_status("json", &mut ctx) else {
            panic!("expected a message");
        };
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["preview"]["isPlaying"], true);
        assert_eq!(value["master"]["isInitialized"], false);
        assert_eq!(value["active"], "preview");
        assert_eq!(value["crossfader"], 50.0);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut ctx = context();
        cmd_play("", &mut ctx);
        cmd_pause("", &mut ctx);
        assert!(!ctx.booth.session(Deck::Preview).is_playing());
        cmd_resume("", &mut ctx);
        assert!(ctx.booth.session(Deck::Preview).is_playing());
    }
}

//! General REPL commands (help, quit, watch)

use crate::audio::device::AudioBackend;
use crate::commands::{CommandContext, CommandResult};
use colored::*;

/// Handle `help` command
pub fn cmd_help<B: AudioBackend>(_args: &str, _ctx: &mut CommandContext<B>) -> CommandResult {
    print_help();
    CommandResult::Success
}

/// Handle `quit` or `exit` command
pub fn cmd_quit<B: AudioBackend>(_args: &str, _ctx: &mut CommandContext<B>) -> CommandResult {
    CommandResult::Exit
}

/// Handle `watch [file]` command
pub fn cmd_watch<B: AudioBackend>(args: &str, _ctx: &mut CommandContext<B>) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: watch <file>".to_string());
    }
    CommandResult::Watch(args.to_string())
}

/// Print help information
fn print_help() {
    println!("{}", "🌊 Tidewave Help".bold());
    println!("{}", "================".bold());
    println!();
    println!("{}", "Patterns:".green());
    println!("  {}     - Notes, one per beat (~ is a rest)", r#"note("c4 ~ e4 g4")"#.cyan());
    println!("  {}        - Drum sounds: bd sd cp hh oh", r#"s("bd sd bd sd")"#.cyan());
    println!("  Any line that is not a command is played on the active deck.");
    println!();
    println!("{}", "Transport:".green());
    println!("  {}   - Play code, or the deck's buffer", "play [code]".cyan());
    println!("  {}  - Play or stop a deck", "toggle [deck]".cyan());
    println!("  {}    - Stop all voices", "stop [deck]".cyan());
    println!("  {} / {} - Suspend or resume output", "pause".cyan(), "resume".cyan());
    println!("  {}   - Show or set volume (0-1)", "volume [v]".cyan());
    println!("  {}  - Show or set tempo (60-200)", "tempo [bpm]".cyan());
    println!("  {} - Show both decks", "status [json]".cyan());
    println!();
    println!("{}", "Booth:".green());
    println!("  {} - Choose the deck to edit", "deck [preview|master]".cyan());
    println!("  {}   - Replace the deck's code", "code <text>".cyan());
    println!("  {}   - Print the deck's code", "show [deck]".cyan());
    println!("  {} - Add a preset to the deck's code", "insert <id>".cyan());
    println!("  {} - List presets", "patterns [category]".cyan());
    println!("  {}          - Copy preview code to master", "swap".cyan());
    println!("  {}  - Crossfader, 0 preview to 100 master", "xfade [p]".cyan());
    println!();
    println!("{}", "Writing patterns:".green());
    println!(
        "  {} - Replace the deck's code with a genre template",
        "generate <genre> [key] [bpm] [waveform]".cyan()
    );
    println!("      genres: techno house dnb ambient trap; add nodrums, nobass or nolead to drop a line");
    println!("  {} - Add a scale", "scale <root> [scale] [octave]".cyan());
    println!("  {} - Add a chord", "chord <root> [quality] [octave]".cyan());
    println!("  {} - Add a chord progression, or list them", "progression [key] [style] [name]".cyan());
    println!("  {} - Add a Euclidean rhythm", "euclid <hits> <steps> [rotation] [sound]".cyan());
    println!("  {} - Add a kick/clap polyrhythm", "poly <a> <b>".cyan());
    println!();
    println!("{}", "General:".green());
    println!("  {}  - Reload and play a file on every save", "watch <file>".cyan());
    println!("  {} / {}  - Leave", "quit".cyan(), "exit".cyan());
}

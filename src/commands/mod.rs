//! Command registry for REPL commands
//!
//! Every command acts on a [`DjBooth`]; most target its active deck.

pub mod booth;
pub mod general;
pub mod playback;
pub mod theory;

use crate::audio::booth::{Deck, DjBooth};
use crate::audio::device::AudioBackend;

/// Result of executing a command
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Command executed successfully, continue REPL
    Success,
    /// Command executed, show this message
    Message(String),
    /// Exit the REPL
    Exit,
    /// Not a command, play the line as code
    NotACommand,
    /// Error occurred
    Error(String),
    /// Watch a file for changes
    Watch(String),
}

/// Context passed to command handlers
pub struct CommandContext<B: AudioBackend> {
    pub booth: DjBooth<B>,
}

impl<B: AudioBackend> CommandContext<B> {
    pub fn new(booth: DjBooth<B>) -> Self {
        Self { booth }
    }

    /// Deck editing and transport commands apply to
    pub fn deck(&self) -> Deck {
        self.booth.active()
    }
}

/// A command handler function
pub type CommandHandler<B> = fn(&str, &mut CommandContext<B>) -> CommandResult;

/// Registry of available commands
pub struct CommandRegistry<B: AudioBackend> {
    /// Sorted by prefix length descending for longest-match-first lookup
    commands: Vec<(String, CommandHandler<B>)>,
}

impl<B: AudioBackend> CommandRegistry<B> {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command with its prefix
    pub fn register(&mut self, prefix: &str, handler: CommandHandler<B>) {
        self.commands.push((prefix.to_string(), handler));
        self.commands.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// Execute a command, returning NotACommand if no match found
    pub fn execute(&self, input: &str, ctx: &mut CommandContext<B>) -> CommandResult {
        for (prefix, handler) in &self.commands {
            if input == prefix || input.starts_with(&format!("{} ", prefix)) {
                let args = input[prefix.len()..].trim();
                return handler(args, ctx);
            }
        }
        CommandResult::NotACommand
    }

    /// Get all registered command prefixes
    pub fn list_commands(&self) -> Vec<&str> {
        self.commands.iter().map(|(p, _)| p.as_str()).collect()
    }
}

impl<B: AudioBackend> Default for CommandRegistry<B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a fully populated command registry with all built-in commands
pub fn create_registry<B: AudioBackend>() -> CommandRegistry<B> {
    let mut registry = CommandRegistry::new();

    // Transport
    registry.register("play", playback::cmd_play);
    registry.register("toggle", playback::cmd_toggle);
    registry.register("stop", playback::cmd_stop);
    registry.register("pause", playback::cmd_pause);
    registry.register("resume", playback::cmd_resume);
    registry.register("volume", playback::cmd_volume);
    registry.register("tempo", playback::cmd_tempo);
    registry.register("status", playback::cmd_status);

    // Booth
    registry.register("deck", booth::cmd_deck);
    registry.register("code", booth::cmd_code);
    registry.register("show", booth::cmd_show);
    registry.register("insert", booth::cmd_insert);
    registry.register("patterns", booth::cmd_patterns);
    registry.register("swap", booth::cmd_swap);
    registry.register("xfade", booth::cmd_xfade);

    // Pattern writing
    registry.register("generate", theory::cmd_generate);
    registry.register("scale", theory::cmd_scale);
    registry.register("chord", theory::cmd_chord);
    registry.register("progression", theory::cmd_progression);
    registry.register("euclid", theory::cmd_euclid);
    registry.register("poly", theory::cmd_poly);

    // General
    registry.register("help", general::cmd_help);
    registry.register("quit", general::cmd_quit);
    registry.register("exit", general::cmd_quit);
    registry.register("watch", general::cmd_watch);

    registry
}

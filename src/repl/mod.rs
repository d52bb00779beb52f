//! Interactive REPL driving the DJ booth

use crate::audio::booth::DjBooth;
use crate::audio::device::AudioBackend;
use crate::commands::playback::play_code;
use crate::commands::{create_registry, CommandContext, CommandRegistry, CommandResult};
use crate::repl::watcher::FileWatcher;
use anyhow::{Context, Result};
use colored::*;
use crossbeam_channel::{unbounded, Receiver, Sender};
use notify::Event;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;
use tracing::{debug, warn};

pub mod watcher;

/// Types of events the REPL loop handles
enum ReplEvent {
    Input(Result<String, ReadlineError>),
}

/// What the loop should do after handling a line
#[derive(Debug, PartialEq)]
enum Flow {
    Continue,
    Exit,
}

/// Interactive REPL over a two-deck booth
pub struct Repl<B: AudioBackend> {
    registry: CommandRegistry<B>,
    ctx: CommandContext<B>,

    // Event channels
    tx_input: Sender<ReplEvent>,
    rx_input: Receiver<ReplEvent>,
    tx_watcher: Sender<notify::Result<Event>>,
    rx_watcher: Receiver<notify::Result<Event>>,

    // File watcher
    watcher: Option<FileWatcher>,
}

impl<B: AudioBackend> Repl<B> {
    pub fn new(booth: DjBooth<B>) -> Self {
        let (tx_input, rx_input) = unbounded();
        let (tx_watcher, rx_watcher) = unbounded();

        Self {
            registry: create_registry(),
            ctx: CommandContext::new(booth),
            tx_input,
            rx_input,
            tx_watcher,
            rx_watcher,
            watcher: None,
        }
    }

    pub fn booth(&self) -> &DjBooth<B> {
        &self.ctx.booth
    }

    fn print_result(result: CommandResult) {
        match result {
            CommandResult::Message(msg) => println!("{}", msg),
            CommandResult::Error(e) => println!("{} {}", "Error:".bright_red().bold(), e.red()),
            _ => {}
        }
    }

    /// Handle one line of input
    fn handle_line(&mut self, line: &str) -> Flow {
        if line.is_empty() {
            return Flow::Continue;
        }

        match self.registry.execute(line, &mut self.ctx) {
            CommandResult::Exit => return Flow::Exit,
            CommandResult::Watch(path) => self.watch(&path),
            CommandResult::NotACommand => Self::print_result(play_code(line, &mut self.ctx)),
            other => Self::print_result(other),
        }
        Flow::Continue
    }

    /// Start watching `path`, playing it now and on every change
    pub fn watch(&mut self, path: &str) {
        // Initialize watcher if needed
        if self.watcher.is_none() {
            match FileWatcher::new(self.tx_watcher.clone()) {
                Ok(w) => self.watcher = Some(w),
                Err(e) => {
                    println!("{} Failed to create watcher: {}", "Error:".red(), e);
                    return;
                }
            }
        }

        if let Some(w) = &mut self.watcher {
            if let Err(e) = w.watch(path) {
                println!("{} Failed to watch {}: {}", "Error:".red(), path, e);
                return;
            }
            println!("👀 Watching {} for changes...", path.bright_green());
        }
        Self::print_result(self.reload(Path::new(path)));
    }

    /// Read `path` into the active deck and play it
    fn reload(&mut self, path: &Path) -> CommandResult {
        match std::fs::read_to_string(path) {
            Ok(contents) => play_code(&contents, &mut self.ctx),
            Err(e) => CommandResult::Error(format!("Failed to read {}: {}", path.display(), e)),
        }
    }

    fn handle_watch_event(&mut self, event: Event) {
        let Some(watcher) = self.watcher.as_mut() else {
            return;
        };
        for path in watcher.paths_to_reload(&event, Instant::now()) {
            println!("{} File changed: {}", "⚡".bright_yellow(), path.display());
            debug!(path = %path.display(), "reloading watched file");
            Self::print_result(self.reload(&path));
        }
    }

    /// Start the REPL loop
    pub fn run(&mut self) -> Result<()> {
        println!(
            "{} {}",
            "🌊".bright_blue(),
            "Tidewave Live Coding".bright_cyan().bold()
        );
        println!(
            "Type patterns like: {}, {}",
            r#"s("bd sd bd sd")"#.cyan(),
            r#"note("c4 e4 g4")"#.cyan()
        );
        println!(
            "Type '{}' for more information, '{}' or {} to exit.\n",
            "help".bright_green(),
            "quit".bright_red(),
            "Ctrl+C".bright_red()
        );

        // Move editor to thread
        let mut editor = DefaultEditor::new().context("Failed to initialize line editor")?;
        let tx_input = self.tx_input.clone();

        thread::spawn(move || loop {
            let prompt = format!("{} ", "tidewave>".bright_magenta().bold());
            match editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if !line.is_empty() {
                        let _ = editor.add_history_entry(&line);
                    }
                    if tx_input.send(ReplEvent::Input(Ok(line))).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    let _ = tx_input.send(ReplEvent::Input(Err(err)));
                    break;
                }
            }
        });

        loop {
            crossbeam_channel::select! {
                recv(self.rx_input) -> msg => match msg {
                    Ok(ReplEvent::Input(Ok(line))) => {
                        if self.handle_line(&line) == Flow::Exit {
                            break;
                        }
                    }
                    Ok(ReplEvent::Input(Err(ReadlineError::Interrupted | ReadlineError::Eof))) => break,
                    Ok(ReplEvent::Input(Err(err))) => {
                        println!(
                            "{} {}",
                            "Error reading input:".bright_red().bold(),
                            err.to_string().red()
                        );
                        break;
                    }
                    Err(_) => break, // Channel closed
                },

                recv(self.rx_watcher) -> msg => match msg {
                    Ok(Ok(event)) => self.handle_watch_event(event),
                    Ok(Err(e)) => warn!("watch error: {}", e),
                    Err(_) => break, // Channel closed
                }
            }
        }

        println!("{} 🌊", "Goodbye!".bright_cyan());
        self.ctx.booth.close();
        Ok(())
    }
}

/// Convenience function to start the REPL, optionally watching a file
pub fn start<B: AudioBackend>(booth: DjBooth<B>, watch: Option<PathBuf>) -> Result<()> {
    let mut repl = Repl::new(booth);
    if let Some(path) = watch {
        repl.watch(&path.to_string_lossy());
    }
    repl.run()
}

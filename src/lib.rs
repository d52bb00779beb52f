//! # Tidewave
//!
//! Tidewave plays live-coded patterns in the Strudel/TidalCycles mini-notation
//! through oscillator synthesis. Pattern extraction and voice planning live in
//! `tidewave-core`; this crate renders voices on an output device and provides
//! the playback session, a two-deck booth and an interactive REPL.
//!
//! ## Modules
//!
//! - `audio`: output graph, scheduled oscillators, device backends (cpal and
//!   offline), the playback session controller and the DJ booth.
//! - `commands`: REPL command registry and handlers.
//! - `config`: TOML startup configuration.
//! - `repl`: the interactive loop, with file watching for hot reload.

pub mod audio;
pub mod commands;
pub mod config;
pub mod error;
pub mod repl;

// Re-export commonly used types for convenience
pub use crate::audio::{CpalBackend, Deck, DjBooth, OfflineBackend, PlaybackSession};
pub use crate::error::EngineError;
pub use tidewave_core::SessionSnapshot;

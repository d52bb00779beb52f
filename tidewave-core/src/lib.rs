//! # Tidewave Core
//!
//! Device-independent core of the Tidewave live-coding engine.
//! Provides note resolution, pattern extraction, voice planning,
//! parameter automation and pattern-writing helpers without any audio I/O
//! dependency.
//!
//! ## Features
//!
//! - **serde**: Enable JSON serialization of snapshots, voices and presets
//!
//! ## Example
//!
//! ```
//! use tidewave_core::pattern::extract;
//! use tidewave_core::voice::plan_voices;
//!
//! let call = extract(r#"note("c4 ~ e4 g4")"#).unwrap();
//! let voices = plan_voices(&call, 120.0).unwrap();
//! assert_eq!(voices.len(), 3);
//! assert_eq!(voices[2].start_offset, 1.0);
//! ```

pub mod automation;
pub mod crossfade;
pub mod error;
pub mod library;
pub mod pattern;
pub mod theory;
pub mod types;
pub mod voice;

// Re-export commonly used types
pub use automation::{AutomationEvent, ParamTimeline};
pub use crossfade::Crossfader;
pub use error::SynthError;
pub use library::{PatternCategory, PatternPreset};
pub use pattern::{extract, CallKind, PatternCall};
pub use theory::{generate, GenerateOptions, Genre, Key};
pub use types::{
    resolve_frequency, FrequencyContour, SampleKind, SessionSnapshot, Token, TransportState,
    Waveform,
};
pub use voice::{plan_voices, Envelope, Voice, VoiceKind};

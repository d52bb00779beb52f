// tidewave-core/src/types/mod.rs

pub mod audio_config;
pub mod note;
pub mod sample;
pub mod token;
pub mod transport;

pub use audio_config::Waveform;
pub use note::{resolve_frequency, Pitch};
pub use sample::{FrequencyContour, SampleKind};
pub use token::{Token, REST};
pub use transport::{clamp_bpm, clamp_volume, SessionSnapshot, TransportState};

//! Startup configuration
//!
//! Read from an optional TOML file:
//!
//! ```toml
//! [preview]
//! volume = 0.5
//! bpm = 128
//!
//! [master]
//! volume = 0.8
//!
//! [mixer]
//! crossfader = 25
//! ```
//!
//! Every field is optional. Command-line flags override both channels.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tidewave_core::crossfade::DEFAULT_CROSSFADER;
use tidewave_core::types::transport::{DEFAULT_BPM, DEFAULT_VOLUME};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChannelConfig {
    pub volume: f32,
    pub bpm: f32,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            bpm: DEFAULT_BPM,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MixerConfig {
    pub crossfader: f32,
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            crossfader: DEFAULT_CROSSFADER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub preview: ChannelConfig,
    pub master: ChannelConfig,
    pub mixer: MixerConfig,
}

/// Values given on the command line; each replaces the file's value
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub volume: Option<f32>,
    pub bpm: Option<f32>,
    pub crossfader: Option<f32>,
}

impl Config {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid configuration")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Failed to load {}", path.display()))
    }

    /// Load `path` if given, else the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(volume) = overrides.volume {
            self.preview.volume = volume;
            self.master.volume = volume;
        }
        if let Some(bpm) = overrides.bpm {
            self.preview.bpm = bpm;
            self.master.bpm = bpm;
        }
        if let Some(crossfader) = overrides.crossfader {
            self.mixer.crossfader = crossfader;
        }
        self
    }
}

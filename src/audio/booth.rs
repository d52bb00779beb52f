//! Two-channel DJ booth
//!
//! A preview deck for cueing and a master deck for the main output, each an
//! independent [`PlaybackSession`] with its own code buffer. The crossfader
//! only affects the effective volumes the booth reports.

use super::device::AudioBackend;
use super::session::PlaybackSession;
use crate::error::Result;
use std::fmt;
use tidewave_core::crossfade::Crossfader;
use tracing::info;

pub const DEFAULT_PREVIEW_CODE: &str = "// Preview Channel (Headphones)
// Test your patterns here before going live

s(\"bd sd bd sd\")";

pub const DEFAULT_MASTER_CODE: &str = "// Master Channel (Main Output)
// This is what your audience hears

s(\"hh*8\").gain(0.3)";

/// Markers of an untouched default buffer
const PLACEHOLDER_MARKERS: [&str; 2] = ["// Preview Channel", "// Master Channel"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deck {
    #[default]
    Preview,
    Master,
}

impl Deck {
    pub fn from_name(s: &str) -> Option<Deck> {
        match s.to_lowercase().as_str() {
            "preview" | "p" | "cue" => Some(Deck::Preview),
            "master" | "m" | "main" => Some(Deck::Master),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Deck::Preview => "preview",
            Deck::Master => "master",
        }
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A session plus the code it plays
pub struct Channel<B: AudioBackend> {
    pub session: PlaybackSession<B>,
    pub code: String,
}

impl<B: AudioBackend> Channel<B> {
    pub fn new(session: PlaybackSession<B>, code: impl Into<String>) -> Self {
        Self {
            session,
            code: code.into(),
        }
    }

    /// Replace the buffer while it still holds a default placeholder, else append
    pub fn insert(&mut self, snippet: &str) {
        if PLACEHOLDER_MARKERS.iter().any(|m| self.code.contains(m)) {
            self.code = snippet.to_string();
        } else {
            self.code.push_str("\n\n");
            self.code.push_str(snippet);
        }
    }
}

pub struct DjBooth<B: AudioBackend> {
    preview: Channel<B>,
    master: Channel<B>,
    crossfader: Crossfader,
    active: Deck,
}

impl<B: AudioBackend> DjBooth<B> {
    /// Booth with the default code buffers on both decks
    pub fn new(preview: PlaybackSession<B>, master: PlaybackSession<B>) -> Self {
        Self {
            preview: Channel::new(preview, DEFAULT_PREVIEW_CODE),
            master: Channel::new(master, DEFAULT_MASTER_CODE),
            crossfader: Crossfader::default(),
            active: Deck::Preview,
        }
    }

    pub fn channel(&self, deck: Deck) -> &Channel<B> {
        match deck {
            Deck::Preview => &self.preview,
            Deck::Master => &self.master,
        }
    }

    pub fn channel_mut(&mut self, deck: Deck) -> &mut Channel<B> {
        match deck {
            Deck::Preview => &mut self.preview,
            Deck::Master => &mut self.master,
        }
    }

    pub fn session(&self, deck: Deck) -> &PlaybackSession<B> {
        &self.channel(deck).session
    }

    pub fn session_mut(&mut self, deck: Deck) -> &mut PlaybackSession<B> {
        &mut self.channel_mut(deck).session
    }

    pub fn code(&self, deck: Deck) -> &str {
        &self.channel(deck).code
    }

    /// Deck that editing commands apply to
    pub fn active(&self) -> Deck {
        self.active
    }

    pub fn set_active(&mut self, deck: Deck) {
        self.active = deck;
    }

    /// Play the deck's buffer
    pub fn play(&mut self, deck: Deck) -> Result<usize> {
        let channel = self.channel_mut(deck);
        channel.session.play(&channel.code)
    }

    pub fn stop(&mut self, deck: Deck) {
        self.session_mut(deck).stop();
    }

    /// Stop a playing deck, otherwise play it. Returns whether it is now playing.
    pub fn toggle(&mut self, deck: Deck) -> Result<bool> {
        if self.session(deck).is_playing() {
            self.stop(deck);
        } else {
            self.play(deck)?;
        }
        Ok(self.session(deck).is_playing())
    }

    pub fn set_code(&mut self, deck: Deck, code: impl Into<String>) {
        self.channel_mut(deck).code = code.into();
    }

    pub fn insert_pattern(&mut self, deck: Deck, snippet: &str) {
        self.channel_mut(deck).insert(snippet);
    }

    /// Copy the preview buffer onto master. Neither deck's playback changes.
    pub fn swap_to_master(&mut self) {
        self.master.code = self.preview.code.clone();
        info!("preview code moved to master");
    }

    pub fn crossfader(&self) -> f32 {
        self.crossfader.position()
    }

    pub fn set_crossfader(&mut self, position: f32) -> f32 {
        self.crossfader.set(position)
    }

    /// Volume the deck would be heard at after the crossfader
    pub fn effective_volume(&self, deck: Deck) -> f32 {
        let (preview, master) = self
            .crossfader
            .effective_volumes(self.preview.session.volume(), self.master.session.volume());
        match deck {
            Deck::Preview => preview,
            Deck::Master => master,
        }
    }

    /// Close both decks
    pub fn close(&mut self) {
        self.preview.session.close();
        self.master.session.close();
    }
}

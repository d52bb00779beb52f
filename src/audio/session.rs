//! Playback session controller
//!
//! A `PlaybackSession` owns one output device and its graph, and drives the
//! transport: code goes in through [`PlaybackSession::play`], voices come
//! out on the device clock. Errors are recorded as a user-facing message in
//! the session snapshot as well as returned.

use super::device::{AudioBackend, DeviceState, OutputDevice};
use super::graph::{OutputGraph, SharedGraph};
use crate::error::{EngineError, Result};
use tidewave_core::pattern::extract;
use tidewave_core::types::transport::{clamp_bpm, clamp_volume, DEFAULT_BPM, DEFAULT_VOLUME};
use tidewave_core::types::{SessionSnapshot, TransportState};
use tidewave_core::voice::plan_voices;
use tracing::{debug, error, info, warn};

pub const NO_CODE_MESSAGE: &str = "No code to play";
pub const PLAY_FAILED_MESSAGE: &str = "Error playing audio. Check your code syntax.";
pub const INIT_FAILED_MESSAGE: &str = "Failed to initialize audio. Please check device permissions.";

pub struct PlaybackSession<B: AudioBackend> {
    label: String,
    backend: B,
    device: Option<B::Device>,
    graph: Option<SharedGraph>,
    state: TransportState,
    /// State to return to when a suspended session resumes
    paused_from: TransportState,
    volume: f32,
    bpm: f32,
    last_error: Option<String>,
}

impl<B: AudioBackend> PlaybackSession<B> {
    /// Session with the default volume and tempo
    pub fn new(label: impl Into<String>, backend: B) -> Self {
        Self::with_settings(label, backend, DEFAULT_VOLUME, DEFAULT_BPM)
    }

    /// Session starting at `volume` and `bpm`, both clamped
    pub fn with_settings(label: impl Into<String>, backend: B, volume: f32, bpm: f32) -> Self {
        Self {
            label: label.into(),
            backend,
            device: None,
            graph: None,
            state: TransportState::Uninitialized,
            paused_from: TransportState::Ready,
            volume: clamp_volume(volume).unwrap_or(DEFAULT_VOLUME),
            bpm: clamp_bpm(bpm).unwrap_or(DEFAULT_BPM),
            last_error: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == TransportState::Playing
    }

    pub fn is_initialized(&self) -> bool {
        self.state.has_device()
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn bpm(&self) -> f32 {
        self.bpm
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The open device, if any
    pub fn device(&self) -> Option<&B::Device> {
        self.device.as_ref()
    }

    /// Voices currently scheduled on the graph
    pub fn active_voices(&self) -> usize {
        self.graph
            .as_ref()
            .map(|graph| graph.lock().active_voices())
            .unwrap_or(0)
    }

    /// Open the output device if not already open, and make sure it runs.
    pub fn initialize(&mut self) -> Result<()> {
        if self.state == TransportState::Closed {
            return Err(EngineError::Closed);
        }

        if let Some(device) = self.device.as_mut() {
            if device.state() == DeviceState::Suspended {
                if let Err(e) = device.resume() {
                    error!(channel = %self.label, "failed to resume audio device: {}", e);
                    self.last_error = Some(INIT_FAILED_MESSAGE.to_string());
                    return Err(e);
                }
                if self.state == TransportState::Suspended {
                    self.state = self.paused_from;
                }
            }
            return Ok(());
        }

        self.state = TransportState::Initializing;
        match self.open_device() {
            Ok((device, graph)) => {
                info!(
                    channel = %self.label,
                    backend = self.backend.name(),
                    sample_rate = device.sample_rate(),
                    "audio initialized"
                );
                self.device = Some(device);
                self.graph = Some(graph);
                self.state = TransportState::Ready;
                Ok(())
            }
            Err(e) => {
                error!(channel = %self.label, "failed to initialize audio: {}", e);
                self.last_error = Some(INIT_FAILED_MESSAGE.to_string());
                self.state = TransportState::Uninitialized;
                Err(e)
            }
        }
    }

    fn open_device(&self) -> Result<(B::Device, SharedGraph)> {
        let graph = OutputGraph::shared(self.volume);
        let mut device = self.backend.open(graph.clone())?;
        if device.state() == DeviceState::Suspended {
            if let Err(e) = device.resume() {
                device.close();
                return Err(e);
            }
        }
        Ok((device, graph))
    }

    /// Play `code`, replacing whatever this session was playing.
    ///
    /// Returns the number of voices scheduled. Code without a pattern call
    /// plays nothing but still counts as playing; empty code is refused with
    /// a message and `Ok(0)`.
    pub fn play(&mut self, code: &str) -> Result<usize> {
        self.last_error = None;
        // An open device is resumed while scheduling, so a failure there
        // counts as a playback error rather than an initialization one.
        if self.device.is_none() {
            self.initialize()?;
        }

        if code.trim().is_empty() {
            self.last_error = Some(NO_CODE_MESSAGE.to_string());
            return Ok(0);
        }

        match self.schedule(code) {
            Ok(count) => {
                self.state = TransportState::Playing;
                info!(channel = %self.label, voices = count, bpm = self.bpm, "playing");
                Ok(count)
            }
            Err(e) => {
                error!(channel = %self.label, "error playing audio: {}", e);
                self.last_error = Some(PLAY_FAILED_MESSAGE.to_string());
                Err(e)
            }
        }
    }

    fn schedule(&mut self, code: &str) -> Result<usize> {
        let voices = match extract(code) {
            Some(call) => plan_voices(&call, self.bpm)?,
            None => {
                debug!(channel = %self.label, "no pattern call found");
                Vec::new()
            }
        };

        let device = self.device.as_mut().ok_or(EngineError::Closed)?;
        if device.state() == DeviceState::Suspended {
            device.resume()?;
        }

        let graph = self.graph.as_ref().ok_or(EngineError::Closed)?;
        let mut graph = graph.lock();
        graph.stop_all();
        Ok(graph.schedule(&voices)?)
    }

    /// Cut every sounding and pending voice
    pub fn stop(&mut self) {
        if let Some(graph) = self.graph.as_ref() {
            let cut = graph.lock().stop_all();
            debug!(channel = %self.label, cut, "stopped");
        }
        if self.state.has_device() {
            self.state = TransportState::Ready;
        }
    }

    /// Suspend the device. Scheduled voices are kept and the clock stops.
    pub fn pause(&mut self) -> Result<()> {
        let Some(device) = self.device.as_mut() else {
            return Ok(());
        };
        device.suspend()?;
        if self.state != TransportState::Suspended {
            self.paused_from = self.state;
            self.state = TransportState::Suspended;
        }
        info!(channel = %self.label, "paused");
        Ok(())
    }

    /// Resume a paused device. The session returns to the state it was
    /// paused from, or stays `Ready` if it was stopped while paused.
    pub fn resume(&mut self) -> Result<()> {
        let Some(device) = self.device.as_mut() else {
            return Ok(());
        };
        if device.state() != DeviceState::Suspended {
            return Ok(());
        }
        device.resume()?;
        if self.state == TransportState::Suspended {
            self.state = self.paused_from;
        }
        info!(channel = %self.label, "resumed");
        Ok(())
    }

    /// Set the master volume, clamped to 0..=1. Applies immediately.
    pub fn set_volume(&mut self, volume: f32) -> f32 {
        match clamp_volume(volume) {
            Some(volume) => {
                self.volume = volume;
                if let Some(graph) = self.graph.as_ref() {
                    graph.lock().set_master_gain(volume);
                }
            }
            None => warn!(channel = %self.label, "ignoring NaN volume"),
        }
        self.volume
    }

    /// Set the tempo, clamped to 60..=200 BPM. Applies from the next `play`.
    pub fn set_bpm(&mut self, bpm: f32) -> f32 {
        match clamp_bpm(bpm) {
            Some(bpm) => self.bpm = bpm,
            None => warn!(channel = %self.label, "ignoring NaN tempo"),
        }
        self.bpm
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            is_playing: self.is_playing(),
            volume: self.volume,
            bpm: self.bpm,
            error: self.last_error.clone(),
            is_initialized: self.is_initialized(),
        }
    }

    /// Stop everything and release the device. The session cannot be reused.
    pub fn close(&mut self) {
        if self.state == TransportState::Closed {
            return;
        }
        if let Some(graph) = self.graph.take() {
            graph.lock().stop_all();
        }
        if let Some(mut device) = self.device.take() {
            device.close();
        }
        self.state = TransportState::Closed;
        info!(channel = %self.label, "audio closed");
    }
}

impl<B: AudioBackend> Drop for PlaybackSession<B> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::offline::OfflineBackend;

    fn session() -> PlaybackSession<OfflineBackend> {
        PlaybackSession::new("test", OfflineBackend::new().with_sample_rate(1000))
    }

    fn clock(session: &PlaybackSession<OfflineBackend>) -> f64 {
        session.graph.as_ref().unwrap().lock().now()
    }

    fn generation(session: &PlaybackSession<OfflineBackend>) -> u64 {
        session.graph.as_ref().unwrap().lock().generation()
    }

    #[test]
    fn test_initial_snapshot() {
        let session = session();
        assert_eq!(
            session.snapshot(),
            SessionSnapshot {
                is_playing: false,
                volume: 0.7,
                bpm: 120.0,
                error: None,
                is_initialized: false,
            }
        );
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut session = session();
        session.initialize().unwrap();
        session.initialize().unwrap();
        assert_eq!(session.state(), TransportState::Ready);
        assert_eq!(session.device().unwrap().state(), DeviceState::Running);
    }

    #[test]
    fn test_play_schedules_one_voice_per_token() {
        let mut session = session();
        let count = session.play(r#"note("c4 ~ e4 ~ g4")"#).unwrap();
        assert_eq!(count, 3);
        assert!(session.is_playing());
        assert!(session.is_initialized());
        assert_eq!(session.active_voices(), 3);
    }

    #[test]
    fn test_empty_code_is_refused() {
        let mut session = session();
        assert_eq!(session.play("   \n ").unwrap(), 0);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.error.as_deref(), Some(NO_CODE_MESSAGE));
        assert!(!snapshot.is_playing);
        assert!(snapshot.is_initialized);
    }

    #[test]
    fn test_code_without_call_plays_nothing() {
        let mut session = session();
        assert_eq!(session.play("stack()").unwrap(), 0);
        assert!(session.is_playing());
        assert_eq!(session.last_error(), None);
        assert_eq!(session.active_voices(), 0);
    }

    #[test]
    fn test_replaying_keeps_a_single_generation() {
        let mut session = session();
        session.play(r#"s("bd sd bd sd")"#).unwrap();
        let first = generation(&session);
        session.play(r#"note("c4 e4")"#).unwrap();
        assert_eq!(session.active_voices(), 2);
        assert_eq!(generation(&session), first + 1);
    }

    #[test]
    fn test_error_cleared_by_next_play() {
        let mut session = session();
        session.play("").unwrap();
        assert!(session.last_error().is_some());
        session.play(r#"s("bd")"#).unwrap();
        assert_eq!(session.last_error(), None);
    }

    #[test]
    fn test_stop_cuts_voices() {
        let mut session = session();
        session.play(r#"s("bd sd")"#).unwrap();
        session.stop();
        assert!(!session.is_playing());
        assert_eq!(session.state(), TransportState::Ready);
        assert_eq!(session.active_voices(), 0);
        assert!(session.device().unwrap().render(500).iter().all(|s| *s == 0.0));
    }

    #[test]
    fn test_stop_before_initialize_is_harmless() {
        let mut session = session();
        session.stop();
        assert_eq!(session.state(), TransportState::Uninitialized);
    }

    #[test]
    fn test_pause_freezes_clock_and_keeps_voices() {
        let mut session = session();
        session.play(r#"note("c4 e4 g4")"#).unwrap();
        session.device().unwrap().render(100);
        assert_eq!(clock(&session), 0.1);

        session.pause().unwrap();
        assert_eq!(session.state(), TransportState::Suspended);
        assert!(session.device().unwrap().render(1000).is_empty());
        assert_eq!(clock(&session), 0.1);
        assert_eq!(session.active_voices(), 3);

        session.resume().unwrap();
        assert_eq!(session.state(), TransportState::Playing);
        session.device().unwrap().render(100);
        assert_eq!(clock(&session), 0.2);
    }

    #[test]
    fn test_play_resumes_a_paused_session() {
        let mut session = session();
        session.play(r#"s("hh")"#).unwrap();
        session.pause().unwrap();
        session.play(r#"s("oh")"#).unwrap();
        assert_eq!(session.state(), TransportState::Playing);
        assert_eq!(session.device().unwrap().state(), DeviceState::Running);
    }

    #[test]
    fn test_pause_from_ready_resumes_to_ready() {
        let mut session = session();
        session.initialize().unwrap();
        session.pause().unwrap();
        session.resume().unwrap();
        assert_eq!(session.state(), TransportState::Ready);
    }

    #[test]
    fn test_volume_and_bpm_clamping() {
        let mut session = session();
        assert_eq!(session.set_volume(1.7), 1.0);
        assert_eq!(session.set_volume(-0.2), 0.0);
        assert_eq!(session.set_volume(f32::NAN), 0.0);
        assert_eq!(session.set_bpm(30.0), 60.0);
        assert_eq!(session.set_bpm(999.0), 200.0);
        assert_eq!(session.set_bpm(f32::NAN), 200.0);

        let clamped = PlaybackSession::with_settings("x", OfflineBackend::new(), 3.0, 10.0);
        assert_eq!((clamped.volume(), clamped.bpm()), (1.0, 60.0));
    }

    #[test]
    fn test_bpm_applies_to_next_play() {
        let mut session = session();
        session.play(r#"note("a4 a4")"#).unwrap();
        session.set_bpm(60.0);
        // the running generation keeps its 0.5 s spacing
        session.device().unwrap().render(1000);
        assert_eq!(session.active_voices(), 0);

        session.play(r#"note("a4 a4")"#).unwrap();
        session.device().unwrap().render(1000);
        assert_eq!(session.active_voices(), 1);
    }

    #[test]
    fn test_volume_scales_rendered_output() {
        let mut loud = session();
        let mut quiet = session();
        quiet.set_volume(0.35);
        loud.play(r#"s("hh")"#).unwrap();
        quiet.play(r#"s("hh")"#).unwrap();

        let a = loud.device().unwrap().render(150);
        let b = quiet.device().unwrap().render(150);
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x * 0.5 - y).abs() < 1e-6);
        }
        assert!(a.iter().any(|s| s.abs() > 0.1));
    }

    #[test]
    fn test_init_failure_is_reported() {
        let mut session = PlaybackSession::new("test", OfflineBackend::new().failing_open());
        let result = session.play(r#"s("bd")"#);
        assert!(matches!(result, Err(EngineError::NoOutputDevice)));
        let snapshot = session.snapshot();
        assert_eq!(snapshot.error.as_deref(), Some(INIT_FAILED_MESSAGE));
        assert!(!snapshot.is_playing);
        assert!(!snapshot.is_initialized);
        assert_eq!(session.state(), TransportState::Uninitialized);
    }

    #[test]
    fn test_resume_failure_during_init() {
        let mut session = PlaybackSession::new("test", OfflineBackend::new().failing_resume());
        assert!(matches!(session.initialize(), Err(EngineError::Device(_))));
        assert_eq!(session.state(), TransportState::Uninitialized);
        assert_eq!(session.last_error(), Some(INIT_FAILED_MESSAGE));
    }

    #[test]
    fn test_resume_failure_while_playing_keeps_previous_voices() {
        // the first resume (on open) succeeds, the one during play fails
        let backend = OfflineBackend::new().with_sample_rate(1000).failing_resume_after(1);
        let mut session = PlaybackSession::new("test", backend);
        session.play(r#"s("bd sd bd")"#).unwrap();
        let before = generation(&session);
        session.pause().unwrap();

        let result = session.play(r#"note("c4 e4")"#);
        assert!(matches!(result, Err(EngineError::Device(_))));
        assert_eq!(session.last_error(), Some(PLAY_FAILED_MESSAGE));
        assert_eq!(session.state(), TransportState::Suspended);
        assert!(!session.is_playing());
        assert!(session.is_initialized());
        assert_eq!(session.active_voices(), 3);
        assert_eq!(generation(&session), before);
    }

    #[test]
    fn test_stop_while_paused_then_resume() {
        let mut session = session();
        session.play(r#"note("c4 e4")"#).unwrap();
        session.pause().unwrap();
        session.stop();
        assert_eq!(session.state(), TransportState::Ready);
        assert_eq!(session.device().unwrap().state(), DeviceState::Suspended);

        session.resume().unwrap();
        assert_eq!(session.state(), TransportState::Ready);
        assert_eq!(session.device().unwrap().state(), DeviceState::Running);
        let before = clock(&session);
        session.device().unwrap().render(100);
        assert!(clock(&session) > before);
    }

    #[test]
    fn test_resume_without_device_or_pause_is_a_no_op() {
        let mut session = session();
        session.resume().unwrap();
        assert_eq!(session.state(), TransportState::Uninitialized);
        session.play(r#"s("hh")"#).unwrap();
        session.resume().unwrap();
        assert_eq!(session.state(), TransportState::Playing);
    }

    #[test]
    fn test_pitch_beyond_nyquist_renders_finite_output() {
        let mut session = session();
        session.play(r#"note("a200 a4")"#).unwrap();
        let rendered = session.device().unwrap().render(1000);
        assert_eq!(rendered.len(), 1000);
        assert!(rendered.iter().all(|s| s.is_finite()));
        assert!(rendered.iter().any(|s| *s != 0.0));
    }

    #[test]
    fn test_close_is_terminal() {
        let mut session = session();
        session.play(r#"s("bd")"#).unwrap();
        session.close();
        assert_eq!(session.state(), TransportState::Closed);
        assert!(session.device().is_none());
        assert!(matches!(session.play(r#"s("bd")"#), Err(EngineError::Closed)));
        assert!(matches!(session.initialize(), Err(EngineError::Closed)));
        assert!(!session.snapshot().is_initialized);
        session.close();
    }
}

//! Voice planning
//!
//! Turns a [`PatternCall`] into the list of voices to schedule: one voice per
//! token, spaced one beat apart. Planning is pure; the renderer in the
//! `tidewave` crate turns each [`Voice`] into an oscillator plus gain
//! envelope on the device clock.

use crate::automation::ParamTimeline;
use crate::error::SynthError;
use crate::pattern::PatternCall;
use crate::types::{FrequencyContour, SampleKind, Token, Waveform};

/// Attack time shared by every voice (seconds)
pub const ATTACK_SECONDS: f64 = 0.01;

/// Level exponential decays aim for. Exponential ramps cannot reach zero.
pub const RAMP_FLOOR: f32 = 0.01;

/// Peak gain of note voices
pub const NOTE_PEAK_GAIN: f32 = 0.3;

/// Note decay ends at this fraction of the beat
pub const NOTE_DECAY_FRACTION: f64 = 0.9;

/// Peak gain of sample voices
pub const SAMPLE_PEAK_GAIN: f32 = 0.4;

/// Sample voices decay to the floor this long after starting (seconds)
pub const SAMPLE_DECAY_SECONDS: f64 = 0.15;

/// Sample voices always stop this long after starting, whatever the tempo
pub const SAMPLE_DURATION_SECONDS: f64 = 0.2;

/// Seconds per beat at `bpm`
pub fn beat_duration(bpm: f32) -> f64 {
    60.0 / bpm as f64
}

/// Attack/decay gain envelope of a voice
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Envelope {
    pub peak_gain: f32,
    /// Linear rise from silence to `peak_gain` (seconds)
    pub attack: f64,
    /// Time after the voice starts at which the exponential decay reaches [`RAMP_FLOOR`]
    pub decay_end: f64,
}

/// What produced a voice
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VoiceKind {
    Note(String),
    Sample(SampleKind),
}

/// A planned, time-bounded sound event. Offsets are relative to the moment
/// the pattern is scheduled.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Voice {
    pub kind: VoiceKind,
    pub waveform: Waveform,
    pub frequency: FrequencyContour,
    pub start_offset: f64,
    pub duration: f64,
    pub envelope: Envelope,
}

impl Voice {
    /// Voice for a pitched note at position `index`
    pub fn note(token: &str, index: usize, beat: f64) -> Self {
        let token = Token::Note(token.to_string());
        Self {
            waveform: Waveform::Saw,
            frequency: FrequencyContour::Fixed(token.frequency()),
            kind: VoiceKind::Note(token.to_string()),
            start_offset: index as f64 * beat,
            duration: beat,
            envelope: Envelope {
                peak_gain: NOTE_PEAK_GAIN,
                attack: ATTACK_SECONDS,
                decay_end: NOTE_DECAY_FRACTION * beat,
            },
        }
    }

    /// Voice for a percussive sample at position `index`
    pub fn sample(kind: SampleKind, index: usize, beat: f64) -> Self {
        let (waveform, frequency) = kind.voicing();
        Self {
            kind: VoiceKind::Sample(kind),
            waveform,
            frequency,
            start_offset: index as f64 * beat,
            duration: SAMPLE_DURATION_SECONDS,
            envelope: Envelope {
                peak_gain: SAMPLE_PEAK_GAIN,
                attack: ATTACK_SECONDS,
                decay_end: SAMPLE_DECAY_SECONDS,
            },
        }
    }

    /// Starting frequency in Hz
    pub fn frequency_hz(&self) -> f32 {
        self.frequency.initial()
    }

    pub fn peak_gain(&self) -> f32 {
        self.envelope.peak_gain
    }

    /// Offset at which the voice is stopped
    pub fn stop_offset(&self) -> f64 {
        self.start_offset + self.duration
    }

    /// Gain automation for a voice started at absolute time `start`
    pub fn gain_automation(&self, start: f64) -> Result<ParamTimeline, SynthError> {
        let mut gain = ParamTimeline::new(0.0);
        gain.set_value_at_time(0.0, start)
            .linear_ramp_to_value_at_time(self.envelope.peak_gain, start + self.envelope.attack)
            .exponential_ramp_to_value_at_time(RAMP_FLOOR, start + self.envelope.decay_end)?;
        Ok(gain)
    }

    /// Frequency automation for a voice started at absolute time `start`
    pub fn frequency_automation(&self, start: f64) -> Result<ParamTimeline, SynthError> {
        match self.frequency {
            FrequencyContour::Fixed(hz) => Ok(ParamTimeline::new(hz)),
            FrequencyContour::Sweep { from, to, seconds } => {
                let mut freq = ParamTimeline::new(from);
                freq.set_value_at_time(from, start)
                    .exponential_ramp_to_value_at_time(to, start + seconds)?;
                Ok(freq)
            }
        }
    }
}

/// Plan one voice per token of `call` at tempo `bpm`.
///
/// Token `i` starts `i` beats after scheduling. An empty call plans nothing.
pub fn plan_voices(call: &PatternCall, bpm: f32) -> Result<Vec<Voice>, SynthError> {
    if !bpm.is_finite() || bpm <= 0.0 {
        return Err(SynthError::InvalidTempo(bpm));
    }
    let beat = beat_duration(bpm);

    let voices = call
        .typed_tokens()
        .into_iter()
        .enumerate()
        .map(|(index, token)| match token {
            Token::Note(text) => Voice::note(&text, index, beat),
            Token::Sample(kind) => Voice::sample(kind, index, beat),
        })
        .collect();

    Ok(voices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::extract;

    fn plan(code: &str, bpm: f32) -> Vec<Voice> {
        plan_voices(&extract(code).unwrap(), bpm).unwrap()
    }

    #[test]
    fn test_beat_duration() {
        assert_eq!(beat_duration(120.0), 0.5);
        assert_eq!(beat_duration(60.0), 1.0);
    }

    #[test]
    fn test_note_voices() {
        let voices = plan(r#"note("c4 ~ e4 a4")"#, 120.0);
        assert_eq!(voices.len(), 3);
        for (i, voice) in voices.iter().enumerate() {
            assert_eq!(voice.waveform, Waveform::Saw);
            assert_eq!(voice.start_offset, 0.5 * i as f64);
            assert_eq!(voice.duration, 0.5);
            assert_eq!(voice.stop_offset(), 0.5 * (i + 1) as f64);
            assert_eq!(voice.peak_gain(), NOTE_PEAK_GAIN);
            assert!((voice.envelope.decay_end - 0.45).abs() < 1e-12);
        }
        assert_eq!(voices[2].frequency_hz(), 440.0);
        assert_eq!(voices[1].kind, VoiceKind::Note("e4".to_string()));
    }

    #[test]
    fn test_sample_voices_ignore_tempo_for_length() {
        let slow = plan(r#"s("bd sd hh cp oh arpy")"#, 60.0);
        let fast = plan(r#"s("bd sd hh cp oh arpy")"#, 200.0);
        for voice in slow.iter().chain(fast.iter()) {
            assert_eq!(voice.duration, SAMPLE_DURATION_SECONDS);
            assert_eq!(voice.envelope.decay_end, SAMPLE_DECAY_SECONDS);
            assert_eq!(voice.peak_gain(), SAMPLE_PEAK_GAIN);
        }
        assert_eq!(slow[3].start_offset, 3.0);
        assert!((fast[3].start_offset - 0.9).abs() < 1e-12);

        let shapes: Vec<Waveform> = slow.iter().map(|v| v.waveform).collect();
        assert_eq!(
            shapes,
            vec![
                Waveform::Sine,
                Waveform::Triangle,
                Waveform::Square,
                Waveform::Triangle,
                Waveform::Square,
                Waveform::Sine
            ]
        );
        assert_eq!(slow[5].frequency_hz(), 440.0);
    }

    #[test]
    fn test_kick_sweep_automation() {
        let voices = plan(r#"s("bd")"#, 120.0);
        let freq = voices[0].frequency_automation(1.0).unwrap();
        assert_eq!(freq.value_at(1.0), 150.0);
        assert!((freq.value_at(1.1) - 40.0).abs() < 1e-3);
        assert!(freq.value_at(1.05) < 150.0);
    }

    #[test]
    fn test_gain_automation_never_reaches_zero_after_attack() {
        let voices = plan(r#"note("c4")"#, 120.0);
        let gain = voices[0].gain_automation(0.0).unwrap();
        assert_eq!(gain.value_at(0.0), 0.0);
        assert!((gain.value_at(0.01) - NOTE_PEAK_GAIN).abs() < 1e-6);
        assert!((gain.value_at(0.45) - RAMP_FLOOR).abs() < 1e-6);
        assert!(gain.value_at(0.49) > 0.0);
    }

    #[test]
    fn test_empty_call_plans_nothing() {
        let call = extract(r#"note("~ ~ ~")"#).unwrap();
        assert!(plan_voices(&call, 120.0).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_tempo() {
        let call = extract(r#"note("c4")"#).unwrap();
        assert_eq!(plan_voices(&call, 0.0), Err(SynthError::InvalidTempo(0.0)));
        assert!(plan_voices(&call, f32::NAN).is_err());
        assert!(plan_voices(&call, -10.0).is_err());
    }
}

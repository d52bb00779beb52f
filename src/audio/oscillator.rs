//! Scheduled oscillator voices
//!
//! A `ScheduledOscillator` renders one planned [`Voice`] against the output
//! clock: silent before its start time, shaped by its gain and frequency
//! automation while sounding, finished once its stop time passes or it is
//! force-stopped.

use tidewave_core::automation::ParamTimeline;
use tidewave_core::types::Waveform;
use tidewave_core::voice::Voice;
use tidewave_core::SynthError;

/// One voice bound to absolute device-clock times
#[derive(Debug, Clone)]
pub struct ScheduledOscillator {
    waveform: Waveform,
    phase: f32,
    gain: ParamTimeline,
    frequency: ParamTimeline,
    start: f64,
    stop: f64,
    /// Which `play` call scheduled this voice
    pub generation: u64,
    stopped: bool,
}

impl ScheduledOscillator {
    /// Bind `voice` to the clock, its offsets measured from `scheduled_at`
    pub fn from_voice(voice: &Voice, scheduled_at: f64, generation: u64) -> Result<Self, SynthError> {
        let start = scheduled_at + voice.start_offset;
        Ok(Self {
            waveform: voice.waveform,
            phase: 0.0,
            gain: voice.gain_automation(start)?,
            frequency: voice.frequency_automation(start)?,
            start,
            stop: scheduled_at + voice.stop_offset(),
            generation,
            stopped: false,
        })
    }

    pub fn start_time(&self) -> f64 {
        self.start
    }

    pub fn stop_time(&self) -> f64 {
        self.stop
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Silence the voice immediately
    pub fn force_stop(&mut self) {
        self.stopped = true;
    }

    /// Whether the voice can no longer make sound at or after `time`
    pub fn is_finished(&self, time: f64) -> bool {
        self.stopped || time >= self.stop
    }

    /// Whether the voice is sounding at `time`
    pub fn is_sounding(&self, time: f64) -> bool {
        !self.stopped && time >= self.start && time < self.stop
    }

    /// Generate the sample at `time`. The phase only advances while sounding.
    pub fn next_sample(&mut self, time: f64, sample_rate: f32) -> f32 {
        if !self.is_sounding(time) {
            return 0.0;
        }

        let value = self.waveform.sample(self.phase) * self.gain.value_at(time);

        // Frequencies beyond what the rate can carry (or not numbers at all)
        // must not poison the phase; hold them to 0..=Nyquist.
        let frequency = match self.frequency.value_at(time) {
            f if f.is_nan() => 0.0,
            f => f.clamp(0.0, sample_rate / 2.0),
        };
        self.phase += frequency / sample_rate;
        if self.phase >= 1.0 {
            self.phase -= self.phase.floor();
        }

        value
    }
}

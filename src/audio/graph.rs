//! Output graph: every scheduled oscillator summed through one master gain
//!
//! The graph owns the sample clock. Time only moves when frames are
//! rendered, so a suspended device leaves the clock where it was and every
//! scheduled voice keeps its place.

use super::oscillator::ScheduledOscillator;
use parking_lot::Mutex;
use std::sync::Arc;
use tidewave_core::voice::Voice;
use tidewave_core::SynthError;
use tracing::debug;

/// Sample rate a graph uses until a device reports its own
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Graph shared between the controlling thread and the device callback
pub type SharedGraph = Arc<Mutex<OutputGraph>>;

#[derive(Debug)]
pub struct OutputGraph {
    sample_rate: u32,
    frames: u64,
    master_gain: f32,
    voices: Vec<ScheduledOscillator>,
    generation: u64,
}

impl OutputGraph {
    pub fn new(master_gain: f32) -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            frames: 0,
            master_gain,
            voices: Vec::new(),
            generation: 0,
        }
    }

    pub fn shared(master_gain: f32) -> SharedGraph {
        Arc::new(Mutex::new(Self::new(master_gain)))
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Adopt the device's sample rate. Only meaningful before rendering starts.
    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        self.sample_rate = sample_rate.max(1);
    }

    /// Current clock time in seconds
    pub fn now(&self) -> f64 {
        self.frames as f64 / self.sample_rate as f64
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn master_gain(&self) -> f32 {
        self.master_gain
    }

    /// Takes effect from the next rendered frame, for sounding and future voices alike
    pub fn set_master_gain(&mut self, gain: f32) {
        self.master_gain = gain;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Voices scheduled and not yet finished
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    /// Schedule `voices` relative to the current clock time.
    ///
    /// Every voice is bound before any is added, so a failure schedules nothing.
    pub fn schedule(&mut self, voices: &[Voice]) -> Result<usize, SynthError> {
        let now = self.now();
        let oscillators = voices
            .iter()
            .map(|voice| ScheduledOscillator::from_voice(voice, now, self.generation))
            .collect::<Result<Vec<_>, _>>()?;

        let count = oscillators.len();
        self.voices.extend(oscillators);
        debug!(count, generation = self.generation, at = now, "voices scheduled");
        Ok(count)
    }

    /// Force-stop and drop every voice, starting a new generation.
    /// Returns how many voices were cut.
    pub fn stop_all(&mut self) -> usize {
        let cut = self.voices.len();
        for voice in &mut self.voices {
            voice.force_stop();
        }
        self.voices.clear();
        self.generation += 1;
        if cut > 0 {
            debug!(cut, generation = self.generation, "voices stopped");
        }
        cut
    }

    /// Render one frame and advance the clock
    pub fn next_frame(&mut self) -> f32 {
        let time = self.now();
        let sample_rate = self.sample_rate as f32;
        let mixed: f32 = self
            .voices
            .iter_mut()
            .map(|voice| voice.next_sample(time, sample_rate))
            .sum();
        self.frames += 1;
        mixed * self.master_gain
    }

    /// Drop voices whose stop time has passed
    pub fn prune_finished(&mut self) {
        let now = self.now();
        self.voices.retain(|voice| !voice.is_finished(now));
    }

    /// Fill an interleaved buffer, writing each frame's value to every channel
    pub fn render(&mut self, out: &mut [f32], channels: usize) {
        for frame in out.chunks_mut(channels.max(1)) {
            let value = self.next_frame();
            for sample in frame.iter_mut() {
                *sample = value;
            }
        }
        self.prune_finished();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidewave_core::pattern::extract;
    use tidewave_core::voice::plan_voices;

    fn voices(code: &str) -> Vec<Voice> {
        plan_voices(&extract(code).unwrap(), 120.0).unwrap()
    }

    fn peak(graph: &mut OutputGraph, frames: usize) -> f32 {
        let mut buffer = vec![0.0f32; frames];
        graph.render(&mut buffer, 1);
        buffer.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
    }

    #[test]
    fn test_clock_advances_with_frames() {
        let mut graph = OutputGraph::new(1.0);
        graph.set_sample_rate(1000);
        assert_eq!(graph.now(), 0.0);
        let mut buffer = vec![0.0f32; 500 * 2];
        graph.render(&mut buffer, 2);
        assert_eq!(graph.frames_rendered(), 500);
        assert_eq!(graph.now(), 0.5);
    }

    #[test]
    fn test_channels_carry_same_value() {
        let mut graph = OutputGraph::new(1.0);
        graph.schedule(&voices(r#"s("hh")"#)).unwrap();
        let mut buffer = vec![0.0f32; 2000 * 2];
        graph.render(&mut buffer, 2);
        for frame in buffer.chunks(2) {
            assert_eq!(frame[0], frame[1]);
        }
        assert!(buffer.iter().any(|s| *s != 0.0));
    }

    #[test]
    fn test_schedule_is_relative_to_now() {
        let mut graph = OutputGraph::new(1.0);
        graph.set_sample_rate(1000);
        let mut buffer = vec![0.0f32; 250];
        graph.render(&mut buffer, 1);

        graph.schedule(&voices(r#"note("a4 c4")"#)).unwrap();
        assert_eq!(graph.active_voices(), 2);

        // first note ends at 0.75 s, second at 1.25 s
        let mut buffer = vec![0.0f32; 600];
        graph.render(&mut buffer, 1);
        assert_eq!(graph.active_voices(), 1);
        let mut buffer = vec![0.0f32; 500];
        graph.render(&mut buffer, 1);
        assert_eq!(graph.active_voices(), 0);
    }

    #[test]
    fn test_stop_all_advances_generation() {
        let mut graph = OutputGraph::new(1.0);
        graph.schedule(&voices(r#"s("bd sd hh")"#)).unwrap();
        assert_eq!(graph.generation(), 0);
        assert_eq!(graph.stop_all(), 3);
        assert_eq!(graph.generation(), 1);
        assert_eq!(graph.active_voices(), 0);
        assert_eq!(peak(&mut graph, 4410), 0.0);
    }

    #[test]
    fn test_master_gain_scales_output() {
        let mut loud = OutputGraph::new(1.0);
        let mut quiet = OutputGraph::new(0.25);
        loud.schedule(&voices(r#"s("hh")"#)).unwrap();
        quiet.schedule(&voices(r#"s("hh")"#)).unwrap();

        let mut a = vec![0.0f32; 4410];
        let mut b = vec![0.0f32; 4410];
        loud.render(&mut a, 1);
        quiet.render(&mut b, 1);
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x * 0.25 - y).abs() < 1e-6);
        }
    }

    #[test]
    fn test_muted_gain_renders_silence() {
        let mut graph = OutputGraph::new(1.0);
        graph.schedule(&voices(r#"note("c4 e4")"#)).unwrap();
        graph.set_master_gain(0.0);
        assert_eq!(peak(&mut graph, 4410), 0.0);
        graph.set_master_gain(1.0);
        assert!(peak(&mut graph, 4410) > 0.0);
    }
}

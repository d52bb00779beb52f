//! Parameter automation timelines
//!
//! A `ParamTimeline` describes how one audio parameter (a voice's gain or
//! its oscillator frequency) evolves over absolute time, in seconds on the
//! output device's clock. Events are applied in time order:
//!
//! - `SetValue` jumps to a value at a time and holds it.
//! - `LinearRamp` interpolates linearly from the previous event to its value.
//! - `ExponentialRamp` interpolates geometrically from the previous event.
//!
//! Before the first event the default value applies; after the last event its
//! value holds.
//!
//! # Example
//! ```
//! use tidewave_core::automation::ParamTimeline;
//!
//! let mut gain = ParamTimeline::new(0.0);
//! gain.set_value_at_time(0.0, 1.0)
//!     .linear_ramp_to_value_at_time(0.3, 1.01);
//! gain.exponential_ramp_to_value_at_time(0.01, 1.45).unwrap();
//!
//! assert_eq!(gain.value_at(0.5), 0.0);
//! assert!((gain.value_at(1.01) - 0.3).abs() < 1e-6);
//! ```

use crate::error::SynthError;

/// One scheduled change of a parameter
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AutomationEvent {
    SetValue { time: f64, value: f32 },
    LinearRamp { time: f64, value: f32 },
    ExponentialRamp { time: f64, value: f32 },
}

impl AutomationEvent {
    pub fn time(&self) -> f64 {
        match *self {
            AutomationEvent::SetValue { time, .. }
            | AutomationEvent::LinearRamp { time, .. }
            | AutomationEvent::ExponentialRamp { time, .. } => time,
        }
    }

    pub fn value(&self) -> f32 {
        match *self {
            AutomationEvent::SetValue { value, .. }
            | AutomationEvent::LinearRamp { value, .. }
            | AutomationEvent::ExponentialRamp { value, .. } => value,
        }
    }
}

/// Time-ordered automation of a single parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParamTimeline {
    default_value: f32,
    events: Vec<AutomationEvent>,
}

impl ParamTimeline {
    /// Create a timeline that holds `default_value` until the first event
    pub fn new(default_value: f32) -> Self {
        Self {
            default_value,
            events: Vec::new(),
        }
    }

    pub fn default_value(&self) -> f32 {
        self.default_value
    }

    pub fn events(&self) -> &[AutomationEvent] {
        &self.events
    }

    /// Jump to `value` at `time`
    pub fn set_value_at_time(&mut self, value: f32, time: f64) -> &mut Self {
        self.insert(AutomationEvent::SetValue { time, value });
        self
    }

    /// Ramp linearly from the previous event so that `value` is reached at `time`
    pub fn linear_ramp_to_value_at_time(&mut self, value: f32, time: f64) -> &mut Self {
        self.insert(AutomationEvent::LinearRamp { time, value });
        self
    }

    /// Ramp exponentially from the previous event so that `value` is reached at `time`.
    ///
    /// The target must be non-zero and finite.
    pub fn exponential_ramp_to_value_at_time(
        &mut self,
        value: f32,
        time: f64,
    ) -> Result<&mut Self, SynthError> {
        if value == 0.0 || !value.is_finite() {
            return Err(SynthError::ExponentialRampTarget(value));
        }
        self.insert(AutomationEvent::ExponentialRamp { time, value });
        Ok(self)
    }

    /// Events at equal times keep insertion order
    fn insert(&mut self, event: AutomationEvent) {
        let index = self.events.partition_point(|e| e.time() <= event.time());
        self.events.insert(index, event);
    }

    /// Parameter value at absolute time `time`
    pub fn value_at(&self, time: f64) -> f32 {
        let index = self.events.partition_point(|e| e.time() <= time);

        let (t0, v0) = match index.checked_sub(1).map(|i| self.events[i]) {
            Some(previous) => (previous.time(), previous.value()),
            None => (0.0, self.default_value),
        };

        match self.events.get(index) {
            Some(&AutomationEvent::LinearRamp { time: t1, value: v1 }) => {
                let frac = segment_fraction(t0, t1, time);
                v0 + (v1 - v0) * frac
            }
            Some(&AutomationEvent::ExponentialRamp { time: t1, value: v1 }) => {
                // Geometric interpolation is undefined from zero or across a sign change
                if v0 == 0.0 || (v0 < 0.0) != (v1 < 0.0) {
                    return v0;
                }
                let frac = segment_fraction(t0, t1, time);
                v0 * (v1 / v0).powf(frac)
            }
            _ => v0,
        }
    }
}

/// Position of `time` within `[t0, t1]`, clamped to `[0, 1]`
#[inline]
fn segment_fraction(t0: f64, t1: f64, time: f64) -> f32 {
    if t1 <= t0 {
        return 1.0;
    }
    ((time - t0) / (t1 - t0)).clamp(0.0, 1.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope() -> ParamTimeline {
        let mut gain = ParamTimeline::new(0.0);
        gain.set_value_at_time(0.0, 1.0)
            .linear_ramp_to_value_at_time(0.3, 1.01);
        gain.exponential_ramp_to_value_at_time(0.01, 1.45).unwrap();
        gain
    }

    #[test]
    fn test_default_before_events() {
        let timeline = envelope();
        assert_eq!(timeline.value_at(0.0), 0.0);
        assert_eq!(timeline.value_at(0.999), 0.0);
    }

    #[test]
    fn test_linear_segment() {
        let timeline = envelope();
        assert_eq!(timeline.value_at(1.0), 0.0);
        assert!((timeline.value_at(1.005) - 0.15).abs() < 1e-4);
        assert!((timeline.value_at(1.01) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_exponential_segment_is_geometric() {
        let timeline = envelope();
        // halfway through the decay the value is the geometric mean of the endpoints
        let mid = 1.01 + (1.45 - 1.01) / 2.0;
        let expected = (0.3f32 * 0.01).sqrt();
        assert!((timeline.value_at(mid) - expected).abs() < 1e-4);
        assert!((timeline.value_at(1.45) - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_holds_after_last_event() {
        let timeline = envelope();
        assert!((timeline.value_at(10.0) - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_zero_exponential_target() {
        let mut timeline = ParamTimeline::new(1.0);
        assert_eq!(
            timeline.exponential_ramp_to_value_at_time(0.0, 1.0).err(),
            Some(SynthError::ExponentialRampTarget(0.0))
        );
        assert!(timeline
            .exponential_ramp_to_value_at_time(f32::INFINITY, 1.0)
            .is_err());
        assert!(timeline.events().is_empty());
    }

    #[test]
    fn test_exponential_from_zero_holds() {
        let mut timeline = ParamTimeline::new(0.0);
        timeline.exponential_ramp_to_value_at_time(1.0, 1.0).unwrap();
        assert_eq!(timeline.value_at(0.5), 0.0);
        assert_eq!(timeline.value_at(1.0), 1.0);
    }

    #[test]
    fn test_frequency_sweep() {
        let mut freq = ParamTimeline::new(150.0);
        freq.set_value_at_time(150.0, 2.0);
        freq.exponential_ramp_to_value_at_time(40.0, 2.1).unwrap();
        assert_eq!(freq.value_at(2.0), 150.0);
        let quarter = freq.value_at(2.025);
        assert!(quarter < 150.0 && quarter > 40.0);
        assert!((freq.value_at(2.1) - 40.0).abs() < 1e-3);
        assert!((freq.value_at(3.0) - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_out_of_order_insertion_is_sorted() {
        let mut timeline = ParamTimeline::new(0.0);
        timeline
            .set_value_at_time(2.0, 2.0)
            .set_value_at_time(1.0, 1.0);
        let times: Vec<f64> = timeline.events().iter().map(|e| e.time()).collect();
        assert_eq!(times, vec![1.0, 2.0]);
        assert_eq!(timeline.value_at(1.5), 1.0);
    }
}

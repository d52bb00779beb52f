//! Offline backend
//!
//! Renders on demand instead of on an audio thread. Useful headless and in
//! tests, where it makes session timing fully deterministic. Failures can be
//! injected to exercise the error paths of a session.

use super::device::{AudioBackend, DeviceState, OutputDevice};
use super::graph::{SharedGraph, DEFAULT_SAMPLE_RATE};
use crate::error::{EngineError, Result};

#[derive(Debug, Clone, Default)]
pub struct OfflineBackend {
    sample_rate: Option<u32>,
    fail_open: bool,
    /// Successful resumes each device allows before refusing
    resume_budget: Option<usize>,
}

impl OfflineBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = Some(sample_rate);
        self
    }

    /// Every `open` fails, as when no device is present or permission is denied
    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// Devices open but refuse to start
    pub fn failing_resume(self) -> Self {
        self.failing_resume_after(0)
    }

    /// Devices start `successes` times, then refuse, as when the output is
    /// unplugged while a session is paused
    pub fn failing_resume_after(mut self, successes: usize) -> Self {
        self.resume_budget = Some(successes);
        self
    }
}

impl AudioBackend for OfflineBackend {
    type Device = OfflineDevice;

    fn name(&self) -> &str {
        "offline"
    }

    fn open(&self, graph: SharedGraph) -> Result<OfflineDevice> {
        if self.fail_open {
            return Err(EngineError::NoOutputDevice);
        }
        let sample_rate = self.sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE);
        graph.lock().set_sample_rate(sample_rate);
        Ok(OfflineDevice {
            graph,
            sample_rate,
            state: DeviceState::Suspended,
            resume_budget: self.resume_budget,
        })
    }
}

#[derive(Debug)]
pub struct OfflineDevice {
    graph: SharedGraph,
    sample_rate: u32,
    state: DeviceState,
    resume_budget: Option<usize>,
}

impl OfflineDevice {
    /// Render `frames` mono frames. A device that is not running renders
    /// nothing and leaves the clock untouched.
    pub fn render(&self, frames: usize) -> Vec<f32> {
        if self.state != DeviceState::Running {
            return Vec::new();
        }
        let mut buffer = vec![0.0f32; frames];
        self.graph.lock().render(&mut buffer, 1);
        buffer
    }
}

impl OutputDevice for OfflineDevice {
    fn state(&self) -> DeviceState {
        self.state
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn resume(&mut self) -> Result<()> {
        if self.state == DeviceState::Closed {
            return Err(EngineError::Closed);
        }
        match self.resume_budget.as_mut() {
            Some(0) => return Err(EngineError::device("offline device refused to start")),
            Some(remaining) => *remaining -= 1,
            None => {}
        }
        self.state = DeviceState::Running;
        Ok(())
    }

    fn suspend(&mut self) -> Result<()> {
        if self.state == DeviceState::Closed {
            return Err(EngineError::Closed);
        }
        self.state = DeviceState::Suspended;
        Ok(())
    }

    fn close(&mut self) {
        self.state = DeviceState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::graph::OutputGraph;

    #[test]
    fn test_opens_suspended_at_its_rate() {
        let graph = OutputGraph::shared(1.0);
        let device = OfflineBackend::new()
            .with_sample_rate(8000)
            .open(graph.clone())
            .unwrap();
        assert_eq!(device.state(), DeviceState::Suspended);
        assert_eq!(device.sample_rate(), 8000);
        assert_eq!(graph.lock().sample_rate(), 8000);
    }

    #[test]
    fn test_suspended_device_renders_nothing() {
        let graph = OutputGraph::shared(1.0);
        let mut device = OfflineBackend::new().open(graph.clone()).unwrap();
        assert!(device.render(100).is_empty());
        assert_eq!(graph.lock().frames_rendered(), 0);

        device.resume().unwrap();
        assert_eq!(device.render(100).len(), 100);
        assert_eq!(graph.lock().frames_rendered(), 100);
    }

    #[test]
    fn test_injected_failures() {
        assert!(matches!(
            OfflineBackend::new().failing_open().open(OutputGraph::shared(1.0)),
            Err(EngineError::NoOutputDevice)
        ));

        let mut device = OfflineBackend::new()
            .failing_resume()
            .open(OutputGraph::shared(1.0))
            .unwrap();
        assert!(matches!(device.resume(), Err(EngineError::Device(_))));
        assert_eq!(device.state(), DeviceState::Suspended);
    }

    #[test]
    fn test_resume_budget_runs_out() {
        let mut device = OfflineBackend::new()
            .failing_resume_after(2)
            .open(OutputGraph::shared(1.0))
            .unwrap();
        device.resume().unwrap();
        device.suspend().unwrap();
        device.resume().unwrap();
        device.suspend().unwrap();
        assert!(matches!(device.resume(), Err(EngineError::Device(_))));
        assert_eq!(device.state(), DeviceState::Suspended);
    }

    #[test]
    fn test_closed_device_stays_closed() {
        let mut device = OfflineBackend::new().open(OutputGraph::shared(1.0)).unwrap();
        device.close();
        assert!(matches!(device.resume(), Err(EngineError::Closed)));
        assert_eq!(device.state(), DeviceState::Closed);
    }
}

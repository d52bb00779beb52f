//! cpal output backend
//!
//! Opens the host's default output device and renders the shared graph from
//! the stream callback. The callback writes silence without touching the
//! graph while the device is suspended, so the clock stands still even on
//! hosts where pausing a stream is not supported.

use super::device::{AudioBackend, DeviceState, OutputDevice};
use super::graph::SharedGraph;
use crate::error::{EngineError, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample, Stream, StreamConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Backend for the default output device of the default host
#[derive(Debug, Clone, Copy, Default)]
pub struct CpalBackend;

impl CpalBackend {
    pub fn new() -> Self {
        Self
    }

    fn build_stream<T>(
        device: &cpal::Device,
        config: &StreamConfig,
        graph: SharedGraph,
        running: Arc<AtomicBool>,
    ) -> Result<Stream>
    where
        T: Sample + SizedSample + Send + 'static + FromSample<f32>,
    {
        let channels = config.channels as usize;

        let err_fn = |err: cpal::StreamError| error!("an error occurred on the output audio stream: {}", err);

        device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    if !running.load(Ordering::Acquire) {
                        data.fill(T::EQUILIBRIUM);
                        return;
                    }

                    let mut graph = graph.lock();
                    for frame in data.chunks_mut(channels) {
                        let value: T = T::from_sample(graph.next_frame());
                        for sample in frame.iter_mut() {
                            *sample = value;
                        }
                    }
                    graph.prune_finished();
                },
                err_fn,
                None,
            )
            .map_err(|e| EngineError::device(format!("failed to build output stream: {}", e)))
    }
}

impl AudioBackend for CpalBackend {
    type Device = CpalDevice;

    fn name(&self) -> &str {
        "cpal"
    }

    fn open(&self, graph: SharedGraph) -> Result<CpalDevice> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(EngineError::NoOutputDevice)?;
        let config = device
            .default_output_config()
            .map_err(EngineError::device)?;

        let sample_format = config.sample_format();
        let config: StreamConfig = config.into();
        let sample_rate = config.sample_rate.0;
        graph.lock().set_sample_rate(sample_rate);

        let running = Arc::new(AtomicBool::new(false));
        let stream = match sample_format {
            SampleFormat::F32 => Self::build_stream::<f32>(&device, &config, graph, running.clone())?,
            SampleFormat::I16 => Self::build_stream::<i16>(&device, &config, graph, running.clone())?,
            SampleFormat::U16 => Self::build_stream::<u16>(&device, &config, graph, running.clone())?,
            other => return Err(EngineError::UnsupportedSampleFormat(format!("{:?}", other))),
        };

        // Some hosts start streams on creation
        if let Err(e) = stream.pause() {
            warn!("output stream cannot be paused: {}", e);
        }

        info!(
            host = host.id().name(),
            sample_rate,
            channels = config.channels,
            "output device opened"
        );

        Ok(CpalDevice {
            stream: Some(stream),
            running,
            sample_rate,
            state: DeviceState::Suspended,
        })
    }
}

/// A live cpal output stream
pub struct CpalDevice {
    stream: Option<Stream>,
    running: Arc<AtomicBool>,
    sample_rate: u32,
    state: DeviceState,
}

impl OutputDevice for CpalDevice {
    fn state(&self) -> DeviceState {
        self.state
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn resume(&mut self) -> Result<()> {
        let stream = self.stream.as_ref().ok_or(EngineError::Closed)?;
        stream
            .play()
            .map_err(|e| EngineError::device(format!("failed to play stream: {}", e)))?;
        self.running.store(true, Ordering::Release);
        self.state = DeviceState::Running;
        Ok(())
    }

    fn suspend(&mut self) -> Result<()> {
        let stream = self.stream.as_ref().ok_or(EngineError::Closed)?;
        self.running.store(false, Ordering::Release);
        if let Err(e) = stream.pause() {
            warn!("output stream cannot be paused: {}", e);
        }
        self.state = DeviceState::Suspended;
        Ok(())
    }

    fn close(&mut self) {
        self.running.store(false, Ordering::Release);
        // dropping the stream releases the device
        self.stream = None;
        self.state = DeviceState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::graph::OutputGraph;

    #[test]
    fn test_cpal_device_lifecycle() {
        // This test may fail on systems without audio devices
        let graph = OutputGraph::shared(0.0);
        match CpalBackend::new().open(graph) {
            Ok(mut device) => {
                assert_eq!(device.state(), DeviceState::Suspended);
                assert!(device.sample_rate() > 0);
                device.close();
                assert_eq!(device.state(), DeviceState::Closed);
                assert!(matches!(device.resume(), Err(EngineError::Closed)));
            }
            Err(_) => {
                // This is expected on systems without audio devices (like CI)
                println!("CpalBackend open failed - likely no audio device available");
            }
        }
    }
}

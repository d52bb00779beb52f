//! Output device seam
//!
//! A backend opens devices; a device pulls frames from a [`SharedGraph`]
//! while running. Devices open suspended so nothing sounds before the
//! session has finished setting up.

use super::graph::SharedGraph;
use crate::error::Result;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceState {
    Suspended,
    Running,
    Closed,
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeviceState::Suspended => "suspended",
            DeviceState::Running => "running",
            DeviceState::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// An open output device
pub trait OutputDevice {
    fn state(&self) -> DeviceState;

    fn sample_rate(&self) -> u32;

    /// Start (or restart) pulling frames from the graph
    fn resume(&mut self) -> Result<()>;

    /// Stop pulling frames. The graph clock stands still until resumed.
    fn suspend(&mut self) -> Result<()>;

    /// Release the device. Further calls are no-ops.
    fn close(&mut self);
}

/// Something that can open output devices
pub trait AudioBackend {
    type Device: OutputDevice;

    /// Human-readable backend name for logs
    fn name(&self) -> &str;

    /// Open a device rendering `graph`. The device starts suspended and sets
    /// the graph's sample rate to its own.
    fn open(&self, graph: SharedGraph) -> Result<Self::Device>;
}

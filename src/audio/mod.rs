pub mod booth;
pub mod cpal_backend;
pub mod device;
pub mod graph;
pub mod offline;
pub mod oscillator;
pub mod session;

pub use booth::{Deck, DjBooth};
pub use cpal_backend::CpalBackend;
pub use device::{AudioBackend, DeviceState, OutputDevice};
pub use graph::{OutputGraph, SharedGraph};
pub use offline::OfflineBackend;
pub use session::PlaybackSession;

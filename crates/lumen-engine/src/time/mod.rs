//! Time subsystem.
//!
//! Frame timing utilities, independent of the runtime:
//! - one `FrameClock` per window, `tick()` once per presented frame
//! - `FrameStats` keeps a window of recent frame times for average/percentiles
//! - `Debouncer` holds back bursty events (resizes) until they settle

mod debounce;
mod frame_clock;
mod stats;

pub use debounce::Debouncer;
pub use frame_clock::{FrameClock, FrameTime};
pub use stats::{FrameStats, FrameSummary};

//! Crosswalk safety monitor.
//!
//! Detections from a crosswalk camera and a road camera are reduced to center
//! points, tracked frame to frame with an optimal assignment tracker and
//! folded into crossing directions, vehicle arrivals, counters and a warning
//! signal.

pub mod bbox;
pub mod classify;
pub mod config;
pub mod counters;
pub mod detection;
pub mod error;
pub mod frame;
pub mod math;
pub mod monitor;
pub mod trace;
pub mod tracker;
pub mod warning;
pub mod zone;

pub use classify::{Direction, PedestrianTracking, VehicleTracking};
pub use config::Config;
pub use detection::Detection;
pub use frame::Frame;
pub use monitor::{FrameReport, Monitor};
pub use trace::{Trace, TraceId};
pub use tracker::{Assignment, Tracker, TrackerConfig};

pub use error::Error;

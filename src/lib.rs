//! QR marker tracking and mission decisions for an underwater vehicle.
//!
//! Each video frame is one tick: raw marker detections go through the
//! [`ObjectTracker`], which keeps stable IDs across noisy frames, and the
//! [`MissionStateMachine`] turns the not-yet-consumed objects into a phase-1
//! navigation vote and a phase-2 drop decision.

pub mod config;
pub mod error;
pub mod integration;
pub mod mission;
pub mod tracker;

pub use config::{Config, RuntimeConfig};
pub use error::{ConfigError, ObservationError, TickError};
pub use integration::{
    CommandSink, DetectionBuilder, DetectionSource, Frame, FrameSource, MissionPipeline,
    RecordingSink, ReplayScript, RunSummary, TickOutcome, TickReport,
};
pub use mission::{
    MissionConfig, MissionEvent, MissionState, MissionStateMachine, VehicleCommand, VoteProgress,
};
pub use tracker::{
    DisplayCategory, ObjectId, ObjectTracker, Observation, RawDetection, TrackedObject,
    TrackerConfig,
};

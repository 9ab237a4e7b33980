//! Integration module connecting frame sources, marker detectors and vehicle
//! command sinks with the tracker and the mission state machine.

mod builder;
mod detector;
mod pipeline;
mod replay;

pub use builder::DetectionBuilder;
pub use detector::{CommandSink, DetectionSource, Frame, FrameSource, RecordingSink};
pub use pipeline::{
    MissionPipeline, ObjectView, RunSummary, SkipReason, TickOutcome, TickReport,
};
pub use replay::{ReplayDetector, ReplayError, ReplayFrames, ReplayScript};

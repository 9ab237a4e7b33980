//! MissionPipeline: one tick per frame, detect -> track -> decide.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tracing::{debug, error, info, trace, warn};

use crate::config::{Config, RuntimeConfig};
use crate::error::TickError;
use crate::mission::{MissionEvent, MissionState, MissionStateMachine, VoteProgress};
use crate::tracker::{
    DisplayCategory, ObjectId, ObjectTracker, Point, TrackerUpdate, observations_from_detections,
};

use super::{CommandSink, DetectionSource, FrameSource};

/// Why a tick did no work.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    NoFrame,
    FrameError(String),
}

/// Result of a tick that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Completed(TickReport),
    Skipped(SkipReason),
}

/// Tracked object as handed to presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectView {
    pub id: ObjectId,
    pub payload: String,
    pub centroid: Point,
    pub corners: [Point; 4],
    pub category: DisplayCategory,
}

/// Everything presentation needs after a completed tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickReport {
    pub tick: u64,
    pub state: MissionState,
    pub progress: VoteProgress,
    pub objects: Vec<ObjectView>,
    pub events: Vec<MissionEvent>,
}

impl TickReport {
    pub fn count(&self, category: DisplayCategory) -> usize {
        self.objects.iter().filter(|o| o.category == category).count()
    }
}

/// Tick counters collected by [`MissionPipeline::run`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub completed: u64,
    pub skipped: u64,
    pub state: MissionState,
}

/// Frame-synchronous mission loop bundling the collaborators with the tracker and
/// the state machine.
pub struct MissionPipeline<F: FrameSource, D: DetectionSource, C: CommandSink> {
    frames: F,
    detector: D,
    commands: C,
    tracker: ObjectTracker,
    machine: MissionStateMachine,
    runtime: RuntimeConfig,
    tick: u64,
}

impl<F: FrameSource, D: DetectionSource, C: CommandSink> MissionPipeline<F, D, C> {
    pub fn new(frames: F, detector: D, commands: C, config: Config) -> Self {
        Self {
            frames,
            detector,
            commands,
            tracker: ObjectTracker::new(config.tracker),
            machine: MissionStateMachine::new(config.mission),
            runtime: config.runtime,
            tick: 0,
        }
    }

    pub fn tracker(&self) -> &ObjectTracker {
        &self.tracker
    }

    pub fn machine(&self) -> &MissionStateMachine {
        &self.machine
    }

    pub fn commands(&self) -> &C {
        &self.commands
    }

    pub fn state(&self) -> MissionState {
        self.machine.state()
    }

    /// Run a single tick.
    ///
    /// Detector failures and malformed detections degrade the tick to an empty
    /// detection set, so the tracker still ages its objects. Only a rejected vehicle
    /// command is an `Err`, raised after the tick's decisions are committed.
    pub fn tick(&mut self) -> Result<TickOutcome, TickError> {
        let frame = match self.frames.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                trace!("no frame available");
                return Ok(TickOutcome::Skipped(SkipReason::NoFrame));
            }
            Err(e) => {
                debug!(error = %e, "frame acquisition failed");
                return Ok(TickOutcome::Skipped(SkipReason::FrameError(e.to_string())));
            }
        };

        let tick = self.tick + 1;
        let detections = match self.detector.detect(&frame.data, frame.width, frame.height) {
            Ok(detections) => detections,
            Err(e) => {
                warn!(tick, error = %e, "detector failed, treating frame as empty");
                Vec::new()
            }
        };
        let observations = observations_from_detections(detections).unwrap_or_else(|e| {
            warn!(tick, error = %e, "malformed detection, treating frame as empty");
            Vec::new()
        });

        self.tick = tick;
        let update = self.tracker.update(observations);
        for id in &update.expired {
            debug!(tick, id = %id, "tracker lost");
        }
        let events = self.machine.step(&mut self.tracker);
        let report = self.report(&update, events);

        for event in &report.events {
            if let MissionEvent::Command(command) = event {
                self.commands
                    .dispatch(command)
                    .map_err(|e| TickError::CommandDispatch {
                        command: command.clone(),
                        reason: e.to_string(),
                    })?;
            }
        }

        Ok(TickOutcome::Completed(report))
    }

    fn report(&self, update: &TrackerUpdate, events: Vec<MissionEvent>) -> TickReport {
        let ignored: Vec<ObjectId> = events
            .iter()
            .filter_map(|e| match e {
                MissionEvent::PayloadIgnored { id, .. } => Some(*id),
                _ => None,
            })
            .collect();

        let objects = self
            .tracker
            .objects()
            .map(|o| {
                let category = if o.processed {
                    DisplayCategory::Processed
                } else if o.seen_this_tick() && !ignored.contains(&o.id) {
                    DisplayCategory::New
                } else {
                    DisplayCategory::Ignored
                };
                ObjectView {
                    id: o.id,
                    payload: o.payload.clone(),
                    centroid: o.centroid,
                    corners: o.corners,
                    category,
                }
            })
            .collect();

        trace!(
            tick = self.tick,
            created = update.created.len(),
            matched = update.matched.len(),
            expired = update.expired.len(),
            "tracker updated"
        );

        TickReport {
            tick: self.tick,
            state: self.machine.state(),
            progress: self.machine.progress(),
            objects,
            events,
        }
    }

    /// Tick until `stop` is set or the frame source closes, then close the source.
    ///
    /// A tick error ends the loop and is returned.
    pub fn run<R>(&mut self, stop: &AtomicBool, mut on_report: R) -> Result<RunSummary, TickError>
    where
        R: FnMut(&TickReport),
    {
        info!(state = %self.state(), "mission started");
        let result = self.run_until_stopped(stop, &mut on_report);
        self.frames.close();
        info!(
            state = %self.state(),
            phase1_decision = self.machine.phase1_decision().unwrap_or("-"),
            phase2_decision = self.machine.phase2_decision().unwrap_or("-"),
            "mission stopped"
        );
        result
    }

    fn run_until_stopped<R>(
        &mut self,
        stop: &AtomicBool,
        on_report: &mut R,
    ) -> Result<RunSummary, TickError>
    where
        R: FnMut(&TickReport),
    {
        let mut summary = RunSummary::default();

        while !stop.load(Ordering::Relaxed) && self.frames.is_open() {
            match self.tick() {
                Ok(TickOutcome::Completed(report)) => {
                    summary.completed += 1;
                    on_report(&report);
                }
                Ok(TickOutcome::Skipped(_)) => {
                    summary.skipped += 1;
                    std::thread::sleep(self.runtime.frame_backoff());
                }
                Err(e) => {
                    error!(tick = self.tick, error = %e, "fatal tick error");
                    return Err(e);
                }
            }
        }

        summary.state = self.state();
        Ok(summary)
    }
}

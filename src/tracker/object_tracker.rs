//! Centroid tracker that assigns persistent IDs to per-tick observations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tracker::matching::{self, AssignmentResult};
use crate::tracker::observation::Observation;
use crate::tracker::point::{Point, distance_matrix};
use crate::tracker::tracked_object::{ObjectId, TrackedObject};

/// Configuration for the ObjectTracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    /// Maximum centroid distance (pixels) for an observation to match an object
    pub max_distance: f32,
    /// Ticks an object may go unmatched before it is dropped
    pub max_frames_unseen: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_distance: 70.0,
            max_frames_unseen: 20,
        }
    }
}

/// IDs touched by a single [`ObjectTracker::update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerUpdate {
    pub created: Vec<ObjectId>,
    pub matched: Vec<ObjectId>,
    pub expired: Vec<ObjectId>,
}

const FIRST_ID: u64 = 1;

/// Tracked objects keyed by ID. IDs ascend with creation, so iteration order is
/// creation order.
#[derive(Debug, Clone)]
pub struct ObjectTracker {
    objects: BTreeMap<ObjectId, TrackedObject>,
    next_id: u64,
    config: TrackerConfig,
}

impl ObjectTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            objects: BTreeMap::new(),
            next_id: FIRST_ID,
            config,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, id: ObjectId) -> Option<&TrackedObject> {
        self.objects.get(&id)
    }

    /// Tracked objects in creation order.
    pub fn objects(&self) -> impl Iterator<Item = &TrackedObject> {
        self.objects.values()
    }

    /// Objects not yet consumed by the state machine, in creation order.
    pub fn unprocessed(&self) -> impl Iterator<Item = &TrackedObject> {
        self.objects.values().filter(|o| !o.processed)
    }

    /// Mark an object as consumed. Returns `false` if the ID is unknown.
    pub fn mark_processed(&mut self, id: ObjectId) -> bool {
        match self.objects.get_mut(&id) {
            Some(object) => {
                object.mark_processed();
                true
            }
            None => false,
        }
    }

    /// ID the next created object will receive.
    pub fn next_id(&self) -> ObjectId {
        ObjectId(self.next_id)
    }

    /// Drop every object and restart ID numbering.
    pub fn reset(&mut self) {
        debug!(dropped = self.objects.len(), "tracker reset");
        self.objects.clear();
        self.next_id = FIRST_ID;
    }

    pub fn update(&mut self, observations: Vec<Observation>) -> TrackerUpdate {
        let mut result = TrackerUpdate::default();

        if self.objects.is_empty() {
            for observation in observations {
                result.created.push(self.spawn(observation));
            }
            return result;
        }

        if observations.is_empty() {
            let ids: Vec<ObjectId> = self.objects.keys().copied().collect();
            for id in ids {
                self.age(id, &mut result.expired);
            }
            return result;
        }

        let ids: Vec<ObjectId> = self.objects.keys().copied().collect();
        let object_points: Vec<Point> = self.objects.values().map(|o| o.centroid).collect();
        let observation_points: Vec<Point> = observations.iter().map(|o| o.centroid).collect();
        let dists = distance_matrix(&object_points, &observation_points);

        let AssignmentResult {
            matches,
            unmatched_tracks,
            unmatched_observations,
        } = matching::greedy_assignment(&dists, self.config.max_distance);

        let mut observations: Vec<Option<Observation>> =
            observations.into_iter().map(Some).collect();

        for (row, col) in matches {
            let id = ids[row];
            if let (Some(object), Some(observation)) =
                (self.objects.get_mut(&id), observations[col].take())
            {
                object.update(observation);
                result.matched.push(id);
            }
        }

        for row in unmatched_tracks {
            self.age(ids[row], &mut result.expired);
        }

        for col in unmatched_observations {
            if let Some(observation) = observations[col].take() {
                result.created.push(self.spawn(observation));
            }
        }

        result
    }

    fn spawn(&mut self, observation: Observation) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        debug!(id = %id, payload = %observation.payload, "new object");
        self.objects.insert(id, TrackedObject::new(id, observation));
        id
    }

    fn age(&mut self, id: ObjectId, expired: &mut Vec<ObjectId>) {
        let Some(object) = self.objects.get_mut(&id) else {
            return;
        };
        if object.mark_unseen() > self.config.max_frames_unseen {
            self.objects.remove(&id);
            debug!(id = %id, "object lost");
            expired.push(id);
        }
    }
}

impl Default for ObjectTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

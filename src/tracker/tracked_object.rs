//! Tracked marker with a stable identity across ticks.

use std::fmt;

use serde::Serialize;

use crate::tracker::observation::Observation;
use crate::tracker::point::Point;

/// Stable identifier of a tracked object, rendered as `QR-<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QR-{}", self.0)
    }
}

/// Single tracked object.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedObject {
    /// Unique object identifier, fixed at creation
    pub id: ObjectId,
    /// Centroid of the last matched observation
    pub centroid: Point,
    /// Payload of the last matched observation
    pub payload: String,
    /// Corners of the last matched observation
    pub corners: [Point; 4],
    /// Consecutive ticks without a matching observation
    pub frames_unseen: u32,
    /// Whether the mission state machine has consumed this object
    pub processed: bool,
}

impl TrackedObject {
    /// Create a new tracked object from an unmatched observation.
    pub fn new(id: ObjectId, observation: Observation) -> Self {
        Self {
            id,
            centroid: observation.centroid,
            payload: observation.payload,
            corners: observation.corners,
            frames_unseen: 0,
            processed: false,
        }
    }

    /// Absorb a matched observation. `id` and `processed` are untouched.
    pub fn update(&mut self, observation: Observation) {
        self.centroid = observation.centroid;
        self.payload = observation.payload;
        self.corners = observation.corners;
        self.frames_unseen = 0;
    }

    /// Record a tick without a match and return the new unseen count.
    pub fn mark_unseen(&mut self) -> u32 {
        self.frames_unseen += 1;
        self.frames_unseen
    }

    pub fn mark_processed(&mut self) {
        self.processed = true;
    }

    pub fn seen_this_tick(&self) -> bool {
        self.frames_unseen == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(payload: &str, x: f32, y: f32) -> Observation {
        Observation::new(
            payload,
            [
                Point::new(x - 5.0, y - 5.0),
                Point::new(x + 5.0, y - 5.0),
                Point::new(x + 5.0, y + 5.0),
                Point::new(x - 5.0, y + 5.0),
            ],
        )
    }

    #[test]
    fn test_object_id_display() {
        assert_eq!(ObjectId(7).to_string(), "QR-7");
    }

    #[test]
    fn test_update_keeps_identity_and_processed() {
        let mut object = TrackedObject::new(ObjectId(1), obs("go left", 10.0, 10.0));
        object.mark_processed();
        object.mark_unseen();
        object.mark_unseen();

        object.update(obs("go right", 20.0, 15.0));
        assert_eq!(object.id, ObjectId(1));
        assert!(object.processed);
        assert_eq!(object.payload, "go right");
        assert_eq!(object.frames_unseen, 0);
        assert!((object.centroid.x - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_mark_unseen_counts() {
        let mut object = TrackedObject::new(ObjectId(1), obs("go left", 0.0, 0.0));
        assert!(object.seen_this_tick());
        assert_eq!(object.mark_unseen(), 1);
        assert_eq!(object.mark_unseen(), 2);
        assert!(!object.seen_this_tick());
    }
}

mod category;
mod matching;
mod object_tracker;
mod observation;
mod point;
mod tracked_object;

pub use category::DisplayCategory;
pub use matching::{AssignmentResult, greedy_assignment};
pub use object_tracker::{ObjectTracker, TrackerConfig, TrackerUpdate};
pub use observation::{Observation, RawDetection, observations_from_detections};
pub use point::{Point, centroid, distance_matrix};
pub use tracked_object::{ObjectId, TrackedObject};

//! Detector output and the per-tick observations fed to the tracker.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::ObservationError;
use crate::tracker::point::{Point, centroid};

/// Raw detection as reported by the marker detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    /// Decoded text payload (may be empty when decoding failed)
    pub payload: String,
    /// Quadrilateral corner points in detector order
    pub corners: Vec<[f32; 2]>,
}

impl RawDetection {
    pub fn new(payload: impl Into<String>, corners: Vec<[f32; 2]>) -> Self {
        Self {
            payload: payload.into(),
            corners,
        }
    }
}

/// Observation of a marker in a single tick, before identity assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub centroid: Point,
    pub payload: String,
    pub corners: [Point; 4],
}

impl Observation {
    pub fn new(payload: impl Into<String>, corners: [Point; 4]) -> Self {
        Self {
            centroid: centroid(&corners),
            payload: payload.into(),
            corners,
        }
    }

    /// Convert the `index`-th detection of a tick.
    ///
    /// Returns `Ok(None)` for detections without a payload; those are not usable markers.
    pub fn from_detection(
        index: usize,
        detection: RawDetection,
    ) -> Result<Option<Self>, ObservationError> {
        if detection.payload.is_empty() {
            trace!(index, "dropping detection with empty payload");
            return Ok(None);
        }

        let corners: [[f32; 2]; 4] =
            detection
                .corners
                .as_slice()
                .try_into()
                .map_err(|_| ObservationError::CornerCount {
                    index,
                    found: detection.corners.len(),
                })?;

        if corners.iter().flatten().any(|v| !v.is_finite()) {
            return Err(ObservationError::NonFiniteCorner { index });
        }

        let corners = corners.map(|[x, y]| Point::new(x, y));
        Ok(Some(Self::new(detection.payload, corners)))
    }
}

/// Convert a tick's detections into observations.
///
/// Fails on the first malformed detection so that a bad frame is rejected as a whole.
pub fn observations_from_detections(
    detections: Vec<RawDetection>,
) -> Result<Vec<Observation>, ObservationError> {
    let mut observations = Vec::with_capacity(detections.len());
    for (index, detection) in detections.into_iter().enumerate() {
        if let Some(observation) = Observation::from_detection(index, detection)? {
            observations.push(observation);
        }
    }
    Ok(observations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(payload: &str) -> RawDetection {
        RawDetection::new(
            payload,
            vec![[0.0, 0.0], [20.0, 0.0], [20.0, 20.0], [0.0, 20.0]],
        )
    }

    #[test]
    fn test_observation_centroid() {
        let obs = Observation::from_detection(0, square("go left"))
            .unwrap()
            .unwrap();
        assert_eq!(obs.payload, "go left");
        assert!((obs.centroid.x - 10.0).abs() < 1e-6);
        assert!((obs.centroid.y - 10.0).abs() < 1e-6);
        assert_eq!(obs.corners[2], Point::new(20.0, 20.0));
    }

    #[test]
    fn test_empty_payload_is_dropped() {
        assert_eq!(Observation::from_detection(0, square("")).unwrap(), None);
    }

    #[test]
    fn test_empty_payload_dropped_even_with_bad_geometry() {
        let det = RawDetection::new("", vec![[0.0, 0.0]]);
        assert_eq!(Observation::from_detection(0, det).unwrap(), None);
    }

    #[test]
    fn test_wrong_corner_count() {
        let det = RawDetection::new("go left", vec![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]);
        assert_eq!(
            Observation::from_detection(3, det),
            Err(ObservationError::CornerCount { index: 3, found: 3 })
        );
    }

    #[test]
    fn test_non_finite_corner() {
        let mut det = square("go left");
        det.corners[1][0] = f32::NAN;
        assert_eq!(
            Observation::from_detection(1, det),
            Err(ObservationError::NonFiniteCorner { index: 1 })
        );
    }

    #[test]
    fn test_batch_conversion_filters_and_fails_whole_batch() {
        let obs = observations_from_detections(vec![square("a"), square(""), square("b")]).unwrap();
        assert_eq!(obs.len(), 2);
        assert_eq!(obs[1].payload, "b");

        let mut bad = square("c");
        bad.corners.pop();
        let err = observations_from_detections(vec![square("a"), bad]).unwrap_err();
        assert_eq!(err, ObservationError::CornerCount { index: 1, found: 3 });
    }
}

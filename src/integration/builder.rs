//! Builder for creating RawDetection objects from various input formats.

use crate::tracker::RawDetection;

/// Builder for creating `RawDetection` objects.
#[derive(Debug, Clone, Default)]
pub struct DetectionBuilder {
    payload: String,
    corners: Vec<[f32; 2]>,
}

impl DetectionBuilder {
    /// Create a new detection builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the decoded payload.
    pub fn payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Set the four corners explicitly, in detector order.
    pub fn corners(mut self, corners: [[f32; 2]; 4]) -> Self {
        self.corners = corners.to_vec();
        self
    }

    /// Axis-aligned square marker centered at (cx, cy) with side length `size`.
    pub fn square(mut self, cx: f32, cy: f32, size: f32) -> Self {
        let h = size / 2.0;
        self.corners = vec![
            [cx - h, cy - h],
            [cx + h, cy - h],
            [cx + h, cy + h],
            [cx - h, cy + h],
        ];
        self
    }

    /// Build the final `RawDetection`.
    pub fn build(self) -> RawDetection {
        RawDetection::new(self.payload, self.corners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::Observation;

    #[test]
    fn test_square_builder() {
        let det = DetectionBuilder::new()
            .payload("go left")
            .square(100.0, 50.0, 40.0)
            .build();

        assert_eq!(det.payload, "go left");
        assert_eq!(det.corners[0], [80.0, 30.0]);
        let obs = Observation::from_detection(0, det).unwrap().unwrap();
        assert!((obs.centroid.x - 100.0).abs() < 1e-6);
        assert!((obs.centroid.y - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_corners_builder_keeps_detector_order() {
        let det = DetectionBuilder::new()
            .payload("drop right")
            .corners([[10.0, 12.0], [52.0, 8.0], [58.0, 50.0], [8.0, 54.0]])
            .build();
        assert_eq!(det.corners[1], [52.0, 8.0]);
        let obs = Observation::from_detection(0, det).unwrap().unwrap();
        assert!((obs.centroid.x - 32.0).abs() < 1e-6);
        assert!((obs.centroid.y - 31.0).abs() < 1e-6);
    }

    #[test]
    fn test_default_builder_has_no_corners() {
        let det = DetectionBuilder::new().payload("x").build();
        assert!(det.corners.is_empty());
    }
}

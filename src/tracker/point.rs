//! Point geometry for marker corners and centroids.

use nalgebra::{Point2, Vector2};
use ndarray::Array2;

/// 2D point in image pixel space.
pub type Point = Point2<f32>;

/// Centroid of a marker quadrilateral (mean of its four corners).
#[inline]
pub fn centroid(corners: &[Point; 4]) -> Point {
    let sum = corners
        .iter()
        .fold(Vector2::zeros(), |acc, corner| acc + corner.coords);
    Point::from(sum / corners.len() as f32)
}

/// Calculate the Euclidean distance matrix between two sets of points.
///
/// Returns a matrix of shape (M, N) where M is the length of `points_a`
/// and N is the length of `points_b`.
pub fn distance_matrix(points_a: &[Point], points_b: &[Point]) -> Array2<f32> {
    let mut dists = Array2::zeros((points_a.len(), points_b.len()));
    for (i, a) in points_a.iter().enumerate() {
        for (j, b) in points_b.iter().enumerate() {
            dists[[i, j]] = nalgebra::distance(a, b);
        }
    }
    dists
}

//! Matching utilities for centroid tracking.

use ndarray::{Array2, ArrayView1};

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentResult {
    pub matches: Vec<(usize, usize)>,
    pub unmatched_tracks: Vec<usize>,
    pub unmatched_observations: Vec<usize>,
}

/// Index and value of the first minimum in a row.
fn row_argmin(row: ArrayView1<'_, f32>) -> (usize, f32) {
    let mut best = (0, f32::INFINITY);
    for (j, &d) in row.iter().enumerate() {
        if d < best.1 {
            best = (j, d);
        }
    }
    best
}

/// Greedy nearest-centroid assignment.
///
/// Rows are visited in ascending order of their minimum cost. Each row only ever
/// competes for its own best column: if that column is already taken, or the cost
/// exceeds `gate`, the row stays unmatched. This is not a min-cost assignment.
pub fn greedy_assignment(cost_matrix: &Array2<f32>, gate: f32) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();

    if num_rows == 0 {
        return AssignmentResult {
            matches: vec![],
            unmatched_tracks: vec![],
            unmatched_observations: (0..num_cols).collect(),
        };
    }

    if num_cols == 0 {
        return AssignmentResult {
            matches: vec![],
            unmatched_tracks: (0..num_rows).collect(),
            unmatched_observations: vec![],
        };
    }

    let mut candidates: Vec<(usize, usize, f32)> = cost_matrix
        .rows()
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let (j, d) = row_argmin(row);
            (i, j, d)
        })
        .collect();
    // stable: rows with equal minima keep their original order
    candidates.sort_by(|a, b| a.2.total_cmp(&b.2));

    let mut used_rows = vec![false; num_rows];
    let mut used_cols = vec![false; num_cols];
    let mut matches = vec![];

    for (row, col, dist) in candidates {
        if used_rows[row] || used_cols[col] {
            continue;
        }
        if dist > gate {
            continue;
        }
        used_rows[row] = true;
        used_cols[col] = true;
        matches.push((row, col));
    }

    let unmatched_tracks = (0..num_rows).filter(|&i| !used_rows[i]).collect();
    let unmatched_observations = (0..num_cols).filter(|&j| !used_cols[j]).collect();

    AssignmentResult {
        matches,
        unmatched_tracks,
        unmatched_observations,
    }
}

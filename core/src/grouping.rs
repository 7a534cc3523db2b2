//! Threshold-based similarity grouping via connected components.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::scoring::SimilarityMatrix;

/// The partition of report names at one report-level cutoff. Singleton
/// groups are included, so the groups always cover the full name set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdGroups {
    pub threshold: f64,
    pub groups: Vec<Vec<String>>,
}

/// Extracts similarity groups at each cutoff in `thresholds`.
///
/// For a cutoff τ, reports `a` and `b` (with `a` before `b` in matrix order)
/// are connected iff `matrix(a, b) ≥ τ` — the single directional cell, not a
/// symmetrized value, since the matrix itself is directional. Groups are the
/// connected components of that undirected graph, members and groups sorted
/// for determinism.
pub fn group_at_thresholds(matrix: &SimilarityMatrix, thresholds: &[f64]) -> Vec<ThresholdGroups> {
    thresholds
        .iter()
        .map(|&threshold| ThresholdGroups {
            threshold,
            groups: components_at(matrix, threshold),
        })
        .collect()
}

fn components_at(matrix: &SimilarityMatrix, threshold: f64) -> Vec<Vec<String>> {
    let names = matrix.names();
    let n = names.len();

    // Undirected adjacency over name indices; each accepted edge is recorded
    // on both endpoints once.
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
    for i in 0..n {
        for j in (i + 1)..n {
            if matrix.get_by_index(i, j) >= threshold {
                adjacency[i].push(j);
                adjacency[j].push(i);
            }
        }
    }

    let mut visited: FxHashSet<usize> = FxHashSet::default();
    let mut groups = Vec::new();
    for start in 0..n {
        if visited.contains(&start) {
            continue;
        }
        let mut component = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            component.push(names[current].clone());
            for &neighbor in &adjacency[current] {
                if !visited.contains(&neighbor) {
                    stack.push(neighbor);
                }
            }
        }
        component.sort();
        groups.push(component);
    }
    groups.sort();
    groups
}

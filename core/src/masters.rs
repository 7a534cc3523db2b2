//! Master detection, transitive closure, and elimination planning.
//!
//! A report is "master" of another when its visuals fully cover the other's
//! at the (stricter) master threshold and it dominates by visual count, or
//! by lexicographic name order on equal counts. The tie-break is a strict
//! total order, so mutual mastership between equal-sized reports cannot
//! occur in well-formed input.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::matching::greedy_visual_match;
use crate::visual::ReportVisuals;

/// Directed master→children relation, name-keyed, deterministic iteration.
pub type MasterEdges = BTreeMap<String, BTreeSet<String>>;

/// Finds every direct master→child edge among `reports`.
///
/// For each unordered pair both directions are tested: `r1` masters `r2`
/// when matching `r1`'s visuals against `r2`'s covers all of `r2`, and `r1`
/// is strictly larger — or the same size and lexicographically earlier.
pub fn detect_masters(reports: &[ReportVisuals], master_threshold: f64) -> MasterEdges {
    let mut ordered: Vec<&ReportVisuals> = reports.iter().collect();
    ordered.sort_by(|a, b| a.name.cmp(&b.name));

    let mut masters = MasterEdges::new();
    for (i, r1) in ordered.iter().enumerate() {
        for r2 in &ordered[i + 1..] {
            let m12 = greedy_visual_match(&r1.visuals, &r2.visuals, master_threshold).matched();
            let m21 = greedy_visual_match(&r2.visuals, &r1.visuals, master_threshold).matched();

            let r1_masters_r2 = m12 == r2.visuals.len()
                && (r1.visuals.len() > r2.visuals.len()
                    || (r1.visuals.len() == r2.visuals.len() && r1.name < r2.name));
            let r2_masters_r1 = m21 == r1.visuals.len()
                && (r2.visuals.len() > r1.visuals.len()
                    || (r2.visuals.len() == r1.visuals.len() && r2.name < r1.name));

            // The name tie-break is a strict total order; equal-size mutual
            // mastership would mean corrupted input upstream.
            debug_assert!(
                !(r1_masters_r2 && r2_masters_r1),
                "mutual mastership between {} and {}",
                r1.name,
                r2.name
            );

            if r1_masters_r2 {
                masters
                    .entry(r1.name.clone())
                    .or_default()
                    .insert(r2.name.clone());
            }
            if r2_masters_r1 {
                masters
                    .entry(r2.name.clone())
                    .or_default()
                    .insert(r1.name.clone());
            }
        }
    }
    masters
}

/// Full reachability over the direct master→child edges.
///
/// Traversal carries a visited set, so an (invalid) cyclic relation still
/// terminates rather than looping.
pub fn transitive_closure(direct: &MasterEdges) -> MasterEdges {
    let mut nodes: BTreeSet<&String> = BTreeSet::new();
    for (master, children) in direct {
        nodes.insert(master);
        nodes.extend(children.iter());
    }

    let mut closure = MasterEdges::new();
    for &node in &nodes {
        let mut reachable = BTreeSet::new();
        let mut stack: Vec<&String> = direct
            .get(node)
            .map(|children| children.iter().collect())
            .unwrap_or_default();
        while let Some(current) = stack.pop() {
            if !reachable.insert(current.clone()) {
                continue;
            }
            if let Some(next) = direct.get(current) {
                stack.extend(next.iter().filter(|n| !reachable.contains(*n)));
            }
        }
        closure.insert(node.clone(), reachable);
    }
    closure
}

/// The keep/eliminate split derived from the direct master relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EliminationPlan {
    /// Reports that are not subsumed by any master.
    pub keep: Vec<String>,
    /// Reports safely removable because a master covers their content.
    pub eliminate: Vec<String>,
}

/// Splits `names` into roots (no master above them) and eliminable
/// children. The two sets are disjoint and jointly cover `names`.
pub fn plan_elimination(names: &[String], direct: &MasterEdges) -> EliminationPlan {
    let children: FxHashSet<&String> = direct.values().flatten().collect();
    let mut keep: Vec<String> = names
        .iter()
        .filter(|name| !children.contains(name))
        .cloned()
        .collect();
    keep.sort();
    let mut eliminate: Vec<String> = children.into_iter().cloned().collect();
    eliminate.sort();
    EliminationPlan { keep, eliminate }
}

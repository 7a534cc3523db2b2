//! Greedy per-visual matching between two reports.
//!
//! The matcher is intentionally a single-pass greedy heuristic, not an
//! optimal assignment: visuals of `A` are processed in list order and each
//! consumes its best currently-unmatched counterpart in `B` permanently.
//! Later `A` visuals cannot reclaim a `B` visual even if they would match it
//! better, so the result is order-dependent and asymmetric. Downstream
//! scoring, grouping, and master detection all depend on this exact
//! behavior; do not replace it with an optimal matcher.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::visual::Visual;

/// Score equality window for the type-preference tie-break.
const SCORE_TIE_EPSILON: f64 = 1e-9;

/// One committed visual match. `index_a`/`index_b` index into the input
/// lists; each `index_b` appears in at most one pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPair {
    pub index_a: usize,
    pub index_b: usize,
    pub score: f64,
}

/// Result of one directional matching pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOutcome {
    pub pairs: Vec<MatchPair>,
}

impl MatchOutcome {
    pub fn matched(&self) -> usize {
        self.pairs.len()
    }
}

/// Jaccard similarity over field-token sets, with the degenerate cases
/// pinned: two empty sets are identical (1.0), one empty set matches
/// nothing (0.0).
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

/// Matches `a`'s visuals against `b`'s, committing every best candidate
/// scoring at least `threshold`.
///
/// Candidate selection per `a` visual: a strictly higher Jaccard score wins;
/// within `SCORE_TIE_EPSILON` of the current best, a candidate whose type
/// equals `a`'s (non-empty) type is preferred over a best that lacks that
/// property. A tie never displaces an already type-preferred best.
pub fn greedy_visual_match(a: &[Visual], b: &[Visual], threshold: f64) -> MatchOutcome {
    let mut available = vec![true; b.len()];
    let mut pairs = Vec::new();

    for (index_a, va) in a.iter().enumerate() {
        let mut best_score = -1.0f64;
        let mut best_b: Option<usize> = None;
        let mut best_preferred = false;

        for (index_b, vb) in b.iter().enumerate() {
            if !available[index_b] {
                continue;
            }
            let score = jaccard(&va.fields, &vb.fields);
            let preferred = !va.visual_type.is_empty() && va.visual_type == vb.visual_type;
            if (score - best_score).abs() < SCORE_TIE_EPSILON {
                if preferred && !best_preferred {
                    best_b = Some(index_b);
                    best_score = score;
                    best_preferred = true;
                }
            } else if score > best_score {
                best_b = Some(index_b);
                best_score = score;
                best_preferred = preferred;
            }
        }

        if let Some(index_b) = best_b {
            if best_score >= threshold {
                available[index_b] = false;
                pairs.push(MatchPair {
                    index_a,
                    index_b,
                    score: best_score,
                });
            }
        }
    }

    MatchOutcome { pairs }
}

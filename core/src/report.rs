//! End-to-end analysis driver: matrix → groups → masters → plan.

use serde::{Deserialize, Serialize};

use crate::config::SimilarityConfig;
use crate::grouping::{group_at_thresholds, ThresholdGroups};
use crate::masters::{detect_masters, plan_elimination, transitive_closure, EliminationPlan, MasterEdges};
use crate::scoring::SimilarityMatrix;
use crate::visual::ReportVisuals;

/// Complete output of one analysis run over a set of reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityReport {
    pub matrix: SimilarityMatrix,
    pub groups: Vec<ThresholdGroups>,
    /// Direct master→children edges.
    pub masters: MasterEdges,
    /// Transitive closure of `masters`.
    pub master_closure: MasterEdges,
    pub plan: EliminationPlan,
    pub summary: AnalysisSummary,
}

/// Headline numbers, computed at the last configured group threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_reports: usize,
    /// Reports belonging to a non-singleton group at `summary_threshold`.
    pub similar_reports: usize,
    pub summary_threshold: f64,
    /// `similar_reports / total_reports`, as a percentage.
    pub dedup_ratio_pct: f64,
}

/// Runs the full pipeline. The input order of `reports` does not matter;
/// all outputs are name-sorted.
pub fn analyze(reports: &[ReportVisuals], cfg: &SimilarityConfig) -> SimilarityReport {
    let matrix = SimilarityMatrix::build(reports, cfg);
    let groups = group_at_thresholds(&matrix, &cfg.group_thresholds);
    let masters = detect_masters(reports, cfg.master_threshold);
    let master_closure = transitive_closure(&masters);
    let plan = plan_elimination(matrix.names(), &masters);
    let summary = summarize(&matrix, &groups);

    SimilarityReport {
        matrix,
        groups,
        masters,
        master_closure,
        plan,
        summary,
    }
}

fn summarize(matrix: &SimilarityMatrix, groups: &[ThresholdGroups]) -> AnalysisSummary {
    let total_reports = matrix.names().len();
    let last = groups.last();
    let summary_threshold = last.map(|g| g.threshold).unwrap_or(0.0);
    let similar_reports = last
        .map(|g| {
            g.groups
                .iter()
                .filter(|members| members.len() > 1)
                .map(Vec::len)
                .sum()
        })
        .unwrap_or(0);
    let dedup_ratio_pct = if total_reports == 0 {
        0.0
    } else {
        (similar_reports as f64 / total_reports as f64) * 100.0
    };
    AnalysisSummary {
        total_reports,
        similar_reports,
        summary_threshold,
        dedup_ratio_pct,
    }
}

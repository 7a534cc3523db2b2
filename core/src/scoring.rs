//! Report-level similarity scoring and the dense pairwise matrix.

use serde::{Deserialize, Serialize};

use crate::config::SimilarityConfig;
use crate::matching::{greedy_visual_match, MatchPair};
use crate::visual::{ReportVisuals, Visual};

/// Aggregate of one directional matching pass between two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportScore {
    /// Dice-style aggregate in [0, 1]: `2·matched / (|A| + |B|)`.
    pub score: f64,
    pub matched: usize,
    pub pairs: Vec<MatchPair>,
}

/// Scores `a` against `b` at the given per-visual threshold.
///
/// Two empty reports are identical by definition. Otherwise the score is the
/// share of visuals on both sides that found a counterpart; directional
/// because the underlying matching is.
pub fn report_similarity(a: &[Visual], b: &[Visual], threshold: f64) -> ReportScore {
    if a.is_empty() && b.is_empty() {
        return ReportScore {
            score: 1.0,
            matched: 0,
            pairs: Vec::new(),
        };
    }
    let outcome = greedy_visual_match(a, b, threshold);
    let matched = outcome.matched();
    let score = (2.0 * matched as f64) / (a.len() + b.len()) as f64;
    ReportScore {
        score,
        matched,
        pairs: outcome.pairs,
    }
}

/// Dense report×report similarity table, keyed by report name on both axes.
///
/// Cells are directional: `get(a, b)` scores `a`'s visuals matched against
/// `b`'s, which need not equal `get(b, a)`. Names are held sorted; rows
/// follow the same order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityMatrix {
    names: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    /// Computes every ordered pair, diagonal included, rounding cells to
    /// `cfg.score_decimals` places.
    pub fn build(reports: &[ReportVisuals], cfg: &SimilarityConfig) -> Self {
        let mut ordered: Vec<&ReportVisuals> = reports.iter().collect();
        ordered.sort_by(|a, b| a.name.cmp(&b.name));

        let names: Vec<String> = ordered.iter().map(|r| r.name.clone()).collect();
        let factor = 10f64.powi(cfg.score_decimals as i32);
        let rows = ordered
            .iter()
            .map(|ra| {
                ordered
                    .iter()
                    .map(|rb| {
                        let s = report_similarity(
                            &ra.visuals,
                            &rb.visuals,
                            cfg.visual_match_threshold,
                        )
                        .score;
                        (s * factor).round() / factor
                    })
                    .collect()
            })
            .collect();

        Self { names, rows }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Cell by name; `None` when either report is unknown.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Some(self.rows[i][j])
    }

    pub fn get_by_index(&self, i: usize, j: usize) -> f64 {
        self.rows[i][j]
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.names.binary_search_by(|n| n.as_str().cmp(name)).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visual(visual_type: &str, fields: &[&str]) -> Visual {
        Visual {
            id: String::new(),
            visual_type: visual_type.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[test]
    fn empty_reports_are_identical() {
        let score = report_similarity(&[], &[], 0.9);
        assert_eq!(score.score, 1.0);
        assert_eq!(score.matched, 0);
        assert!(score.pairs.is_empty());
    }

    #[test]
    fn one_sided_empty_scores_zero() {
        let a = [visual("bar", &["sales"])];
        let score = report_similarity(&a, &[], 0.9);
        assert_eq!(score.score, 0.0);
        assert_eq!(score.matched, 0);
    }

    #[test]
    fn partial_match_uses_dice_aggregate() {
        // One of A's single visual matches one of B's two: 2·1/(1+2).
        let a = [visual("", &["sales", "region"])];
        let b = [visual("", &["sales", "region"]), visual("", &["cost"])];
        let score = report_similarity(&a, &b, 0.9);
        assert_eq!(score.matched, 1);
        assert!((score.score - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn scores_stay_in_unit_interval() {
        let a = [visual("bar", &["x"]), visual("card", &["y"])];
        let b = [visual("bar", &["x"])];
        for threshold in [0.0, 0.5, 0.9, 1.0] {
            let s = report_similarity(&a, &b, threshold).score;
            assert!((0.0..=1.0).contains(&s), "score {s} out of range");
        }
    }

    #[test]
    fn matrix_diagonal_is_one_and_cells_rounded() {
        let reports = vec![
            ReportVisuals::new("alpha", vec![visual("bar", &["sales", "region"])]),
            ReportVisuals::new(
                "beta",
                vec![visual("bar", &["sales", "region"]), visual("card", &["cost"])],
            ),
        ];
        let matrix = SimilarityMatrix::build(&reports, &SimilarityConfig::default());
        assert_eq!(matrix.get("alpha", "alpha"), Some(1.0));
        assert_eq!(matrix.get("beta", "beta"), Some(1.0));
        // 2/3 rounded to four decimals.
        assert_eq!(matrix.get("alpha", "beta"), Some(0.6667));
        assert_eq!(matrix.get("beta", "alpha"), Some(0.6667));
        assert_eq!(matrix.get("alpha", "missing"), None);
    }

    #[test]
    fn matrix_names_are_sorted_regardless_of_input_order() {
        let reports = vec![
            ReportVisuals::new("zeta", Vec::new()),
            ReportVisuals::new("alpha", Vec::new()),
        ];
        let matrix = SimilarityMatrix::build(&reports, &SimilarityConfig::default());
        assert_eq!(matrix.names(), ["alpha".to_string(), "zeta".to_string()]);
    }

    #[test]
    fn empty_input_yields_empty_matrix() {
        let matrix = SimilarityMatrix::build(&[], &SimilarityConfig::default());
        assert!(matrix.is_empty());
    }
}

//! PBIR Similarity: near-duplicate detection for Power BI report projects.
//!
//! This crate provides functionality for:
//! - Collecting visual descriptors (type + referenced field tokens) from
//!   report project folders
//! - Scoring pairwise report similarity with greedy per-visual matching
//! - Grouping reports at configurable thresholds via connectivity
//! - Detecting master reports that fully subsume others, and planning which
//!   redundant copies are safe to eliminate
//!
//! # Quick Start
//!
//! ```ignore
//! use pbir_similarity::{analyze, scan_reports, ScanConfig, SimilarityConfig};
//!
//! let reports = scan_reports(std::path::Path::new("./reports"), &ScanConfig::default())?;
//! let result = analyze(&reports, &SimilarityConfig::default());
//!
//! println!("keep: {:?}", result.plan.keep);
//! println!("eliminate: {:?}", result.plan.eliminate);
//! ```

mod config;
mod fields;
mod grouping;
mod masters;
mod matching;
mod output;
mod report;
#[cfg(feature = "std-fs")]
mod scan;
mod scoring;
mod visual;

pub use config::{ConfigError, SimilarityConfig, SimilarityConfigBuilder};
pub use fields::extract_fields;
pub use grouping::{group_at_thresholds, ThresholdGroups};
pub use masters::{
    detect_masters, plan_elimination, transitive_closure, EliminationPlan, MasterEdges,
};
pub use matching::{greedy_visual_match, jaccard, MatchOutcome, MatchPair};
pub use output::{matrix_to_csv, serialize_report};
pub use report::{analyze, AnalysisSummary, SimilarityReport};
#[cfg(feature = "std-fs")]
pub use scan::{scan_report_dir, scan_reports, ScanConfig, ScanError};
pub use scoring::{report_similarity, ReportScore, SimilarityMatrix};
pub use visual::{
    dedup_visuals, visual_from_doc, visual_from_generic_doc, ReportVisuals, Visual,
};

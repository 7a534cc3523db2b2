//! Configuration for the similarity engine.
//!
//! `SimilarityConfig` centralizes all thresholds and behavioral knobs
//! to avoid hardcoded constants scattered throughout the codebase.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Per-visual Jaccard score required for two visuals to count as a match.
    #[serde(alias = "per_visual_threshold")]
    pub visual_match_threshold: f64,
    /// Per-visual threshold applied when asserting full coverage (mastership).
    pub master_threshold: f64,
    /// Report-level score cutoffs at which similarity groups are extracted.
    pub group_thresholds: Vec<f64>,
    /// Decimal places kept in matrix cells.
    pub score_decimals: u32,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            visual_match_threshold: 0.9,
            master_threshold: 0.95,
            group_thresholds: vec![0.7, 0.8, 0.9, 0.95, 1.0],
            score_decimals: 4,
        }
    }
}

impl SimilarityConfig {
    pub fn builder() -> SimilarityConfigBuilder {
        SimilarityConfigBuilder {
            inner: SimilarityConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_unit_interval(self.visual_match_threshold, "visual_match_threshold")?;
        ensure_unit_interval(self.master_threshold, "master_threshold")?;
        if self.group_thresholds.is_empty() {
            return Err(ConfigError::EmptyGroupThresholds);
        }
        for &t in &self.group_thresholds {
            ensure_unit_interval(t, "group_thresholds")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be in [0.0, 1.0] and finite (got {value})")]
    InvalidThreshold { field: &'static str, value: f64 },
    #[error("group_thresholds must contain at least one cutoff")]
    EmptyGroupThresholds,
}

fn ensure_unit_interval(value: f64, field: &'static str) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidThreshold { field, value });
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct SimilarityConfigBuilder {
    inner: SimilarityConfig,
}

impl Default for SimilarityConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityConfigBuilder {
    pub fn new() -> Self {
        SimilarityConfig::builder()
    }

    pub fn visual_match_threshold(mut self, value: f64) -> Self {
        self.inner.visual_match_threshold = value;
        self
    }

    pub fn master_threshold(mut self, value: f64) -> Self {
        self.inner.master_threshold = value;
        self
    }

    pub fn group_thresholds(mut self, value: Vec<f64>) -> Self {
        self.inner.group_thresholds = value;
        self
    }

    pub fn score_decimals(mut self, value: u32) -> Self {
        self.inner.score_decimals = value;
        self
    }

    pub fn build(self) -> Result<SimilarityConfig, ConfigError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_constants() {
        let cfg = SimilarityConfig::default();
        assert_eq!(cfg.visual_match_threshold, 0.9);
        assert_eq!(cfg.master_threshold, 0.95);
        assert_eq!(cfg.group_thresholds, vec![0.7, 0.8, 0.9, 0.95, 1.0]);
        assert_eq!(cfg.score_decimals, 4);
    }

    #[test]
    fn serde_roundtrip_preserves_defaults() {
        let cfg = SimilarityConfig::default();
        let json = serde_json::to_string(&cfg).expect("serialize default config");
        let parsed: SimilarityConfig =
            serde_json::from_str(&json).expect("deserialize default config");
        assert_eq!(cfg, parsed);
    }

    #[test]
    fn serde_alias_populates_visual_threshold() {
        let cfg: SimilarityConfig =
            serde_json::from_str(r#"{"per_visual_threshold": 0.85}"#).expect("deserialize alias");
        assert_eq!(cfg.visual_match_threshold, 0.85);
    }

    #[test]
    fn builder_rejects_out_of_range_threshold() {
        let err = SimilarityConfig::builder()
            .master_threshold(1.5)
            .build()
            .expect_err("builder should reject invalid probability");
        assert!(matches!(
            err,
            ConfigError::InvalidThreshold { field: "master_threshold", value } if (value - 1.5).abs() < f64::EPSILON
        ));
    }

    #[test]
    fn builder_rejects_empty_group_thresholds() {
        let err = SimilarityConfig::builder()
            .group_thresholds(Vec::new())
            .build()
            .expect_err("builder should reject empty cutoff list");
        assert_eq!(err, ConfigError::EmptyGroupThresholds);
    }
}

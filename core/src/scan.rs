//! Filesystem scanning of report project folders.
//!
//! Each immediate subdirectory of the scan root is one report project.
//! Visual definitions are discovered in two passes: explicit `visual.json`
//! documents anywhere below the report folder (enhanced PBIR layout), then —
//! only if that found nothing — a fallback sweep over every `*.json`.
//! Malformed or unreadable documents are counted and skipped, never fatal;
//! only a broken scan root is an error.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::visual::{dedup_visuals, visual_from_doc, visual_from_generic_doc, ReportVisuals, Visual};

#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory names to skip entirely during traversal.
    pub ignore_dir_names: Vec<String>,
    /// Maximum file size to read into memory (bytes).
    pub max_file_bytes: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ignore_dir_names: vec![
                ".git".to_string(),
                ".pbi".to_string(),
                "target".to_string(),
                "node_modules".to_string(),
                ".idea".to_string(),
                ".vscode".to_string(),
            ],
            max_file_bytes: 10 * 1024 * 1024, // 10MB
        }
    }
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("reports root not found: {path}")]
    RootNotFound { path: PathBuf },
    #[error("reports root must be a directory: {path}")]
    RootNotDirectory { path: PathBuf },
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Scans `root` and collects visuals for every report folder beneath it,
/// sorted by report name.
pub fn scan_reports(root: &Path, scan: &ScanConfig) -> Result<Vec<ReportVisuals>, ScanError> {
    if !root.exists() {
        return Err(ScanError::RootNotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(ScanError::RootNotDirectory {
            path: root.to_path_buf(),
        });
    }

    let mut report_dirs: Vec<PathBuf> = Vec::new();
    let entries = std::fs::read_dir(root).map_err(|source| ScanError::ReadDir {
        path: root.to_path_buf(),
        source,
    })?;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() && !should_ignore_dir(&path, &scan.ignore_dir_names) {
            report_dirs.push(path);
        }
    }
    report_dirs.sort();

    let mut reports = Vec::with_capacity(report_dirs.len());
    for dir in report_dirs {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        reports.push(scan_report_dir(&dir, name, scan));
    }
    Ok(reports)
}

/// Collects the deduplicated visual list for one report project folder.
pub fn scan_report_dir(dir: &Path, name: String, scan: &ScanConfig) -> ReportVisuals {
    let json_files = collect_json_files(dir, scan);
    let mut skipped_docs = 0usize;

    // Primary pass: explicit visual definitions. Documents that do not
    // parse or whose top level is not an object are excluded and counted.
    let mut visuals: Vec<Visual> = Vec::new();
    for path in &json_files {
        if !file_name_is(path, "visual.json") {
            continue;
        }
        match read_json(path, scan).and_then(|doc| visual_from_doc(&doc_id(path), &doc)) {
            Some(v) => visuals.push(v),
            None => skipped_docs += 1,
        }
    }

    // Fallback: sweep every JSON document for field-bearing content.
    // `visual.json` exclusions were already counted by the primary pass.
    if visuals.is_empty() {
        for path in &json_files {
            match read_json(path, scan) {
                Some(doc) => {
                    if let Some(v) = visual_from_generic_doc(&doc_id(path), &doc) {
                        visuals.push(v);
                    }
                }
                None => {
                    if !file_name_is(path, "visual.json") {
                        skipped_docs += 1;
                    }
                }
            }
        }
    }

    let mut report = ReportVisuals::new(name, dedup_visuals(visuals));
    report.skipped_docs = skipped_docs;
    report
}

/// Depth-first sweep for `*.json` files, sorted for stable collection order.
/// Unreadable subdirectories are skipped rather than aborting the report.
fn collect_json_files(dir: &Path, scan: &ScanConfig) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(current) = stack.pop() {
        let Ok(entries) = std::fs::read_dir(&current) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                if !should_ignore_dir(&path, &scan.ignore_dir_names) {
                    stack.push(path);
                }
            } else if path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("json"))
            {
                files.push(path);
            }
        }
    }
    files.sort();
    files
}

fn read_json(path: &Path, scan: &ScanConfig) -> Option<Value> {
    let meta = std::fs::metadata(path).ok()?;
    if meta.len() > scan.max_file_bytes {
        return None;
    }
    let raw = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}

fn should_ignore_dir(path: &Path, ignore: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    ignore.iter().any(|value| value == name)
}

fn file_name_is(path: &Path, expected: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.eq_ignore_ascii_case(expected))
}

fn doc_id(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use pbir_similarity::{
    analyze, matrix_to_csv, scan_reports, serialize_report, ScanConfig, SimilarityConfig,
};

use crate::output::text;
use crate::OutputFormat;

#[allow(clippy::too_many_arguments)]
pub fn run(
    root: &str,
    format: OutputFormat,
    matrix_csv: Option<&str>,
    visual_threshold: Option<f64>,
    master_threshold: Option<f64>,
    group_thresholds: Option<&str>,
    quiet: bool,
) -> Result<ExitCode> {
    let cfg = build_config(visual_threshold, master_threshold, group_thresholds)?;

    let reports = scan_reports(Path::new(root), &ScanConfig::default())
        .context("failed to scan reports root")?;
    if reports.is_empty() {
        eprintln!("No report folders found under: {root}");
    }

    let result = analyze(&reports, &cfg);

    if let Some(path) = matrix_csv {
        std::fs::write(path, matrix_to_csv(&result.matrix))
            .with_context(|| format!("failed to write matrix CSV to {path}"))?;
    }

    match format {
        OutputFormat::Text => text::render_report(&result, quiet),
        OutputFormat::Json => println!("{}", serialize_report(&result)),
        OutputFormat::Csv => print!("{}", matrix_to_csv(&result.matrix)),
    }

    Ok(ExitCode::SUCCESS)
}

fn build_config(
    visual_threshold: Option<f64>,
    master_threshold: Option<f64>,
    group_thresholds: Option<&str>,
) -> Result<SimilarityConfig> {
    let mut builder = SimilarityConfig::builder();
    if let Some(t) = visual_threshold {
        builder = builder.visual_match_threshold(t);
    }
    if let Some(t) = master_threshold {
        builder = builder.master_threshold(t);
    }
    if let Some(list) = group_thresholds {
        builder = builder.group_thresholds(parse_threshold_list(list)?);
    }
    Ok(builder.build()?)
}

fn parse_threshold_list(list: &str) -> Result<Vec<f64>> {
    let mut out = Vec::new();
    for part in list.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let value: f64 = part
            .parse()
            .with_context(|| format!("invalid group threshold: {part}"))?;
        out.push(value);
    }
    if out.is_empty() {
        bail!("group threshold list is empty: {list}");
    }
    Ok(out)
}

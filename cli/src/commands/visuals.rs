use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use pbir_similarity::{scan_reports, ScanConfig};

pub fn run(root: &str) -> Result<ExitCode> {
    let reports = scan_reports(Path::new(root), &ScanConfig::default())
        .context("failed to scan reports root")?;

    for report in &reports {
        println!("{}: {} visuals", report.name, report.visuals.len());
        for v in &report.visuals {
            let fields: Vec<&str> = v.fields.iter().map(String::as_str).collect();
            let type_label = if v.visual_type.is_empty() {
                "?"
            } else {
                &v.visual_type
            };
            println!("  - {} (type={}) fields=[{}]", v.id, type_label, fields.join(", "));
        }
        if report.skipped_docs > 0 {
            println!("  ({} document(s) skipped as unreadable)", report.skipped_docs);
        }
        println!();
    }

    Ok(ExitCode::SUCCESS)
}

//! Serialization helpers for analysis results.

use crate::report::SimilarityReport;
use crate::scoring::SimilarityMatrix;

/// Pretty JSON rendering of a full analysis report.
pub fn serialize_report(report: &SimilarityReport) -> String {
    // The report contains only maps, vectors, strings, and finite floats;
    // serialization cannot fail for well-formed input.
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}

/// Dense matrix as CSV: header row of names, then one row per report with
/// its name in the first column.
pub fn matrix_to_csv(matrix: &SimilarityMatrix) -> String {
    let names = matrix.names();
    let mut out = String::new();
    out.push_str("report");
    for name in names {
        out.push(',');
        out.push_str(&csv_escape(name));
    }
    out.push('\n');
    for (i, name) in names.iter().enumerate() {
        out.push_str(&csv_escape(name));
        for j in 0..names.len() {
            out.push(',');
            out.push_str(&format_cell(matrix.get_by_index(i, j)));
        }
        out.push('\n');
    }
    out
}

fn format_cell(value: f64) -> String {
    // Cells are pre-rounded; render up to 4 decimals without trailing zeros.
    let rendered = format!("{value:.4}");
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimilarityConfig;
    use crate::report::analyze;
    use crate::visual::{ReportVisuals, Visual};

    fn visual(fields: &[&str]) -> Visual {
        Visual {
            id: String::new(),
            visual_type: "bar".to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[test]
    fn csv_has_header_and_one_row_per_report() {
        let reports = vec![
            ReportVisuals::new("a", vec![visual(&["x"])]),
            ReportVisuals::new("b", vec![visual(&["x"])]),
        ];
        let matrix = crate::scoring::SimilarityMatrix::build(&reports, &SimilarityConfig::default());
        let csv = matrix_to_csv(&matrix);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "report,a,b");
        assert_eq!(lines[1], "a,1,1");
        assert_eq!(lines[2], "b,1,1");
    }

    #[test]
    fn csv_escapes_names_with_commas() {
        let reports = vec![ReportVisuals::new("sales, monthly", Vec::new())];
        let matrix = crate::scoring::SimilarityMatrix::build(&reports, &SimilarityConfig::default());
        let csv = matrix_to_csv(&matrix);
        assert!(csv.contains("\"sales, monthly\""));
    }

    #[test]
    fn report_json_is_parseable_and_camel_cased() {
        let reports = vec![ReportVisuals::new("only", vec![visual(&["x"])])];
        let report = analyze(&reports, &SimilarityConfig::default());
        let json = serialize_report(&report);
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert!(value.get("masterClosure").is_some());
        assert!(value.get("summary").is_some());
        assert_eq!(value["summary"]["totalReports"], 1);
    }
}

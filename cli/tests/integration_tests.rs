use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn pbir_similarity_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pbir-similarity"))
}

fn fixture_root(test_name: &str) -> PathBuf {
    let root = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(test_name);
    if root.exists() {
        fs::remove_dir_all(&root).expect("clean fixture root");
    }
    fs::create_dir_all(&root).expect("create fixture root");
    root
}

fn write_visual(report_dir: &Path, rel: &str, fields: &[&str]) {
    let projected: Vec<String> = fields.iter().map(|f| format!("\"{f}\"")).collect();
    let doc = format!(
        r#"{{"visualType":"barChart","projections":{{"Values":[{}]}}}}"#,
        projected.join(",")
    );
    let path = report_dir.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("create parents");
    fs::write(path, doc).expect("write visual doc");
}

fn duplicate_pair_fixture(test_name: &str) -> PathBuf {
    let root = fixture_root(test_name);
    for name in ["Alpha.Report", "Beta.Report"] {
        write_visual(
            &root.join(name),
            "pages/p1/v1/visual.json",
            &["Sales", "Region"],
        );
    }
    write_visual(
        &root.join("Gamma.Report"),
        "pages/p1/v1/visual.json",
        &["Latitude"],
    );
    root
}

#[test]
fn analyze_text_lists_keep_and_eliminate_sets() {
    let root = duplicate_pair_fixture("cli_text");
    let output = pbir_similarity_cmd()
        .args(["analyze", root.to_str().expect("utf-8 path")])
        .output()
        .expect("failed to run pbir-similarity");

    assert!(
        output.status.success(),
        "analyze should exit 0: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Reports to keep"), "stdout: {stdout}");
    assert!(stdout.contains("Alpha.Report"));
    assert!(
        stdout.contains("Reports eligible for elimination"),
        "stdout: {stdout}"
    );
    assert!(stdout.contains("Beta.Report"));
}

#[test]
fn analyze_json_output_is_machine_readable() {
    let root = duplicate_pair_fixture("cli_json");
    let output = pbir_similarity_cmd()
        .args(["analyze", "--format", "json", root.to_str().expect("utf-8 path")])
        .output()
        .expect("failed to run pbir-similarity");

    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");
    assert_eq!(value["summary"]["totalReports"], 3);
    assert_eq!(value["plan"]["eliminate"][0], "Beta.Report");
    assert!(value["masters"]["Alpha.Report"]
        .as_array()
        .expect("children array")
        .iter()
        .any(|c| c == "Beta.Report"));
}

#[test]
fn analyze_writes_matrix_csv() {
    let root = duplicate_pair_fixture("cli_csv");
    let csv_path = root.join("matrix.csv");
    let output = pbir_similarity_cmd()
        .args([
            "analyze",
            "--matrix-csv",
            csv_path.to_str().expect("utf-8 path"),
            root.to_str().expect("utf-8 path"),
        ])
        .output()
        .expect("failed to run pbir-similarity");

    assert!(output.status.success());
    let csv = fs::read_to_string(&csv_path).expect("matrix CSV written");
    let header = csv.lines().next().expect("header line");
    assert_eq!(header, "report,Alpha.Report,Beta.Report,Gamma.Report");
    assert_eq!(csv.lines().count(), 4);
}

#[test]
fn missing_root_exits_with_usage_error() {
    let output = pbir_similarity_cmd()
        .args(["analyze", "/definitely/not/a/real/path"])
        .output()
        .expect("failed to run pbir-similarity");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error"), "stderr: {stderr}");
}

#[test]
fn invalid_threshold_exits_with_usage_error() {
    let root = duplicate_pair_fixture("cli_bad_threshold");
    let output = pbir_similarity_cmd()
        .args([
            "analyze",
            "--visual-threshold",
            "1.5",
            root.to_str().expect("utf-8 path"),
        ])
        .output()
        .expect("failed to run pbir-similarity");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn visuals_command_lists_inventory() {
    let root = duplicate_pair_fixture("cli_visuals");
    let output = pbir_similarity_cmd()
        .args(["visuals", root.to_str().expect("utf-8 path")])
        .output()
        .expect("failed to run pbir-similarity");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Alpha.Report: 1 visuals"));
    assert!(stdout.contains("type=barchart"));
    assert!(stdout.contains("sales"));
}

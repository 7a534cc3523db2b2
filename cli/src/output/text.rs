//! Plain-text rendering of an analysis report.

use pbir_similarity::SimilarityReport;

pub fn render_report(report: &SimilarityReport, quiet: bool) {
    if !quiet {
        render_matrix(report);
        render_groups(report);
        render_masters(report);
    }
    render_plan(report);
    render_summary(report);
}

fn render_matrix(report: &SimilarityReport) {
    let names = report.matrix.names();
    if names.is_empty() {
        println!("Similarity matrix: (no reports)");
        return;
    }
    let width = names.iter().map(String::len).max().unwrap_or(0).max(6);

    println!("Similarity matrix:");
    print!("{:width$}", "");
    for name in names {
        print!("  {name:>width$}");
    }
    println!();
    for (i, name) in names.iter().enumerate() {
        print!("{name:width$}");
        for j in 0..names.len() {
            print!("  {:>width$.4}", report.matrix.get_by_index(i, j));
        }
        println!();
    }
    println!();
}

fn render_groups(report: &SimilarityReport) {
    for tg in &report.groups {
        println!("Groups at {:.0}% similarity:", tg.threshold * 100.0);
        for group in &tg.groups {
            println!("  [{}]", group.join(", "));
        }
        println!();
    }
}

fn render_masters(report: &SimilarityReport) {
    if report.masters.is_empty() {
        println!("No master reports detected.\n");
        return;
    }
    println!("Master reports (direct coverage):");
    for (master, children) in &report.masters {
        let children: Vec<&str> = children.iter().map(String::as_str).collect();
        println!("  {master} covers {}", children.join(", "));
    }
    println!();
    println!("Master reports (transitive):");
    for (master, children) in &report.master_closure {
        if children.is_empty() {
            continue;
        }
        let children: Vec<&str> = children.iter().map(String::as_str).collect();
        println!("  {master} covers {}", children.join(", "));
    }
    println!();
}

fn render_plan(report: &SimilarityReport) {
    println!("Reports to keep: [{}]", report.plan.keep.join(", "));
    println!(
        "Reports eligible for elimination (have a master): [{}]",
        report.plan.eliminate.join(", ")
    );
}

fn render_summary(report: &SimilarityReport) {
    let s = &report.summary;
    println!(
        "At {:.0}% threshold: {} of {} reports identified as similar ({:.2}%).",
        s.summary_threshold * 100.0,
        s.similar_reports,
        s.total_reports,
        s.dedup_ratio_pct
    );
}

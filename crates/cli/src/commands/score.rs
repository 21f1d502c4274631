use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use dissect_core::score::{score_lines, ScoreReport};
use dissect_core::text::{read_lines, TextEncoding};
use serde::Serialize;

use crate::commands::util::{format_metric, sha256_file};

/// JSON form of a scoring run: the report plus input fingerprints.
#[derive(Debug, Serialize)]
pub struct ScoreRun {
    pub generated_at: String,
    pub ground: String,
    pub ground_sha256: String,
    pub target: String,
    pub target_sha256: String,
    pub encoding: TextEncoding,
    #[serde(flatten)]
    pub report: ScoreReport,
}

/// Load both files and score them line by line.
pub fn build_score_report(
    ground: &Path,
    target: &Path,
    encoding: TextEncoding,
) -> Result<ScoreReport> {
    let ground_lines = read_lines(ground, encoding)
        .with_context(|| format!("Failed to load ground truth {}", ground.display()))?;
    let target_lines = read_lines(target, encoding)
        .with_context(|| format!("Failed to load prediction {}", target.display()))?;

    if ground_lines.len() != target_lines.len() {
        log::debug!(
            "Line counts differ (ground {}, target {}); pairing stops at the shorter file",
            ground_lines.len(),
            target_lines.len()
        );
    }

    Ok(score_lines(&ground_lines, &target_lines))
}

/// Render the human-readable report.
pub fn render_score_report(report: &ScoreReport) -> String {
    let c = &report.confusion;
    let m = &report.metrics;
    let mut out = String::new();
    out.push_str("=== Segmentation statistics ===\n");
    out.push_str(&format!("Total lines read (paired):          {}\n", report.lines_read));
    out.push_str(&format!("Lines actually compared:            {}\n", report.lines_compared));
    out.push_str(&format!("Lines skipped due to base mismatch: {}\n", report.base_mismatch_lines));
    out.push('\n');
    out.push_str(&format!("Total positions considered: {}\n", c.positions));
    out.push_str(&format!("True positives (TP):        {}\n", c.true_positives));
    out.push_str(&format!("False positives (FP):       {}\n", c.false_positives));
    out.push_str(&format!("False negatives (FN):       {}\n", c.false_negatives));
    out.push_str(&format!("True negatives (TN):        {}\n", c.true_negatives));
    out.push('\n');
    out.push_str("=== Metrics ===\n");
    out.push_str(&format!("Precision (TP / (TP + FP)):          {}\n", format_metric(m.precision)));
    out.push_str(&format!("Recall    (TP / (TP + FN)):          {}\n", format_metric(m.recall)));
    out.push_str(&format!("F1 score:                            {}\n", format_metric(m.f1)));
    out.push_str(&format!(
        "Accuracy ((TP + TN) / All positions): {}\n",
        format_metric(m.accuracy)
    ));
    out.push_str(&format!(
        "False positive rate (FP / (FP + TN)): {}\n",
        format_metric(m.false_positive_rate)
    ));
    out
}

/// Compare a prediction file against a ground-truth file and print the
/// report.
pub fn score_command(
    ground: &Path,
    target: &Path,
    encoding: TextEncoding,
    json: bool,
) -> Result<()> {
    let report = build_score_report(ground, target, encoding)?;

    if json {
        let run = ScoreRun {
            generated_at: Utc::now().to_rfc3339(),
            ground: ground.display().to_string(),
            ground_sha256: sha256_file(ground)?,
            target: target.display().to_string(),
            target_sha256: sha256_file(target)?,
            encoding,
            report,
        };
        let serialized =
            serde_json::to_string_pretty(&run).context("Failed to serialize score report to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    for pair in &report.mismatches {
        println!("{}", pair.reference);
        println!("{}", pair.prediction);
    }
    print!("{}", render_score_report(&report));
    Ok(())
}

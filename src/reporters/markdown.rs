//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Suitable for pull request comments and wiki pages. Files without
//! flags are left out of the per-file sections.

use super::format_stat;
use crate::models::{ComplexityReport, FileReport, ThresholdBasis};
use anyhow::Result;
use chrono::Local;

/// Render report as GitHub-flavored Markdown
pub fn render(report: &ComplexityReport) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(report));
    md.push('\n');
    md.push_str(&render_summary(report));
    md.push('\n');
    md.push_str(&render_flags(report));

    Ok(md)
}

fn render_header(report: &ComplexityReport) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

    let mode = match report.override_threshold {
        Some(forced) => format!("forced minimum CC {}", forced),
        None => "file mean (module mean for single-signature files)".to_string(),
    };

    format!(
        "# Cyclomatic Complexity Report\n\n**{} flagged** | Threshold: {}\n\nGenerated: {}\n",
        report.total_flags(),
        mode,
        timestamp
    )
}

fn render_summary(report: &ComplexityReport) -> String {
    let s = &report.summary;
    let stats = s.complexity;

    let mut md = String::from("## Summary\n\n| Metric | Value |\n|--------|-------|\n");
    md.push_str(&format!("| Files | {} |\n", s.files));
    md.push_str(&format!("| Classes | {} |\n", s.classes));
    md.push_str(&format!("| Methods | {} |\n", s.methods));
    md.push_str(&format!("| Functions | {} |\n", s.functions));
    md.push_str(&format!(
        "| Complexity mean | {} |\n",
        format_stat(stats.map(|s| s.mean))
    ));
    md.push_str(&format!(
        "| Complexity median | {} |\n",
        format_stat(stats.map(|s| s.median))
    ));
    md.push_str(&format!(
        "| Complexity std dev | {} |\n",
        format_stat(stats.map(|s| s.std_dev))
    ));

    for warning in &report.warnings {
        md.push_str(&format!("\n> **Warning:** {}\n", warning));
    }

    md
}

fn render_flags(report: &ComplexityReport) -> String {
    if report.total_flags() == 0 {
        return "## Flagged Signatures\n\nNothing exceeded its threshold.\n".to_string();
    }

    let mut md = String::from("## Flagged Signatures\n");
    for file in report.files.iter().filter(|f| !f.flags.is_empty()) {
        md.push('\n');
        md.push_str(&render_file(file));
    }
    md
}

fn render_file(file: &FileReport) -> String {
    let basis = match file.basis {
        ThresholdBasis::FileMean => "file mean",
        ThresholdBasis::ModuleMean => "module mean",
        ThresholdBasis::Override => "forced",
    };

    let mut md = format!(
        "### `{}`\n\n{} signatures, compared against {}\n\n",
        file.filename, file.signatures, basis
    );
    md.push_str("| Name | Type | CC | Rank | Line | Threshold |\n");
    md.push_str("|------|------|----|------|------|-----------|\n");
    for flag in &file.flags {
        md.push_str(&format!(
            "| `{}` | {} | {} | {} | {} | {:.2} |\n",
            flag.name,
            flag.kind,
            flag.complexity,
            flag.rank.as_deref().unwrap_or("-"),
            flag.line_number,
            flag.threshold
        ));
    }
    md
}

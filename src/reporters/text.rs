//! Plain text reporter
//!
//! Line-oriented listing: module summary first, then one section per file
//! with a "Flag Optimize" line for each flagged signature.

use super::format_stat;
use crate::models::{ComplexityReport, Flag};
use anyhow::Result;

const SEPARATOR: &str = "--------------------------";

/// Render report as plain text
pub fn render(report: &ComplexityReport) -> Result<String> {
    let mut out = String::new();
    let summary = &report.summary;
    let stats = summary.complexity;

    out.push_str("Running search...\n");
    out.push_str(SEPARATOR);
    out.push('\n');
    out.push_str(&format!("Module Files: {}\n", summary.files));
    out.push_str(&format!("Module Classes: {}\n", summary.classes));
    out.push_str(&format!("Module Methods: {}\n", summary.methods));
    out.push_str(&format!("Module Functions: {}\n", summary.functions));
    out.push_str(&format!(
        "Module Complexity Mean: {}\n",
        format_stat(stats.map(|s| s.mean))
    ));
    out.push_str(&format!(
        "Module Complexity Median: {}\n",
        format_stat(stats.map(|s| s.median))
    ));
    out.push_str(&format!(
        "Module Complexity Standard Deviation: {}\n",
        format_stat(stats.map(|s| s.std_dev))
    ));

    if let Some(forced) = report.override_threshold {
        out.push_str(&format!("Forced minimum CC value: {}\n", forced));
    }

    for warning in &report.warnings {
        out.push_str(&format!("Warning: {}\n", warning));
    }

    for file in &report.files {
        out.push_str(SEPARATOR);
        out.push('\n');
        out.push_str(&format!("File name: {}\n", file.filename));
        out.push_str(SEPARATOR);
        out.push('\n');

        for flag in &file.flags {
            out.push_str(&flag_line(flag));
            out.push('\n');
        }
    }

    Ok(out)
}

fn flag_line(flag: &Flag) -> String {
    let mut line = format!(
        "Flag Optimize - Sig name: {} | Type: {} | CC: {} | LineNum: {}",
        flag.name, flag.kind, flag.complexity, flag.line_number
    );
    if let Some(forced) = flag.forced {
        line.push_str(&format!(" | Force: {}", forced));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_text_summary_lines() {
        let out = render(&test_report(None)).expect("render text");
        assert!(out.starts_with("Running search...\n"));
        assert!(out.contains("Module Files: 2\n"));
        assert!(out.contains("Module Classes: 1\n"));
        assert!(out.contains("Module Methods: 1\n"));
        assert!(out.contains("Module Functions: 2\n"));
        assert!(out.contains("Module Complexity Mean: 2.75\n"));
        assert!(out.contains("Module Complexity Median: 2.50\n"));
        assert!(!out.contains("Forced minimum CC value"));
    }

    #[test]
    fn test_text_flag_lines() {
        let out = render(&test_report(None)).expect("render text");
        assert!(out.contains("File name: pkg/a.py\n"));
        assert!(out.contains("File name: pkg/b.py\n"));
        assert!(out.contains("Flag Optimize - Sig name: f | Type: function | CC: 5 | LineNum: 1\n"));
        assert_eq!(out.matches("Flag Optimize").count(), 1);
    }

    #[test]
    fn test_text_forced_threshold() {
        let out = render(&test_report(Some(1.5))).expect("render text");
        assert!(out.contains("Forced minimum CC value: 1.5\n"));
        assert!(out.contains(
            "Flag Optimize - Sig name: solo | Type: method | CC: 2 | LineNum: 3 | Force: 1.5\n"
        ));
        assert_eq!(out.matches("Flag Optimize").count(), 2);
    }

    #[test]
    fn test_text_empty_report() {
        let out = render(&crate::flagger::run_search(&[], None)).expect("render text");
        assert!(out.contains("Module Files: 0\n"));
        assert!(out.contains("Module Complexity Mean: n/a\n"));
        assert!(out.contains("Warning: report contains no signatures"));
        assert!(!out.contains("File name:"));
    }
}

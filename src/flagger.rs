//! Complexity flagging pass
//!
//! Sorts records by (filename, line number), summarizes the module, then
//! compares every non-class signature against its threshold:
//! - the override value, when one is given
//! - otherwise the file's own mean complexity
//! - or the module mean, for files holding a single signature

use crate::models::{
    ComplexityReport, ComplexityStats, FileReport, Flag, ModuleSummary, ReportWarning,
    SignatureKind, SignatureRecord, ThresholdBasis,
};
use tracing::{debug, warn};

/// Run the flagging pass over `records`.
pub fn run_search(records: &[SignatureRecord], override_threshold: Option<f64>) -> ComplexityReport {
    let mut sorted: Vec<&SignatureRecord> = records.iter().collect();
    // stable: equal (filename, line) keep load order
    sorted.sort_by(|a, b| {
        a.filename
            .cmp(&b.filename)
            .then(a.line_number.cmp(&b.line_number))
    });

    let summary = summarize(&sorted);
    let module_mean = summary.complexity.map(|s| s.mean);

    let mut warnings = Vec::new();
    if sorted.is_empty() {
        warn!("{}", ReportWarning::EmptyDataset);
        warnings.push(ReportWarning::EmptyDataset);
    }

    let files: Vec<FileReport> = sorted
        .chunk_by(|a, b| a.filename == b.filename)
        .map(|group| flag_file(group, module_mean, override_threshold))
        .collect();

    let report = ComplexityReport {
        summary,
        override_threshold,
        files,
        warnings,
    };
    debug!(
        "Flagged {} of {} signatures across {} files",
        report.total_flags(),
        records.len(),
        report.files.len()
    );
    report
}

fn summarize(sorted: &[&SignatureRecord]) -> ModuleSummary {
    let mut summary = ModuleSummary {
        files: sorted
            .chunk_by(|a, b| a.filename == b.filename)
            .count(),
        ..Default::default()
    };

    for record in sorted {
        match record.kind {
            SignatureKind::Class => summary.classes += 1,
            SignatureKind::Method => summary.methods += 1,
            SignatureKind::Function => summary.functions += 1,
        }
    }

    let complexities: Vec<u32> = sorted.iter().map(|r| r.complexity).collect();
    summary.complexity = ComplexityStats::from_values(&complexities);
    summary
}

/// `group` is every record of one file, already sorted by line.
fn flag_file(
    group: &[&SignatureRecord],
    module_mean: Option<f64>,
    override_threshold: Option<f64>,
) -> FileReport {
    let complexities: Vec<u32> = group.iter().map(|r| r.complexity).collect();
    let stats = ComplexityStats::from_values(&complexities);

    let (basis, threshold) = match override_threshold {
        Some(forced) => (ThresholdBasis::Override, Some(forced)),
        None if group.len() > 1 => (ThresholdBasis::FileMean, stats.map(|s| s.mean)),
        None => (ThresholdBasis::ModuleMean, module_mean),
    };

    let flags = match threshold {
        Some(threshold) => group
            .iter()
            .filter(|r| r.kind != SignatureKind::Class && f64::from(r.complexity) > threshold)
            .map(|r| Flag {
                name: r.name.clone(),
                kind: r.kind,
                complexity: r.complexity,
                line_number: r.line_number,
                rank: r.rank.clone(),
                threshold,
                forced: override_threshold,
            })
            .collect(),
        None => Vec::new(),
    };

    FileReport {
        filename: group.first().map(|r| r.filename.clone()).unwrap_or_default(),
        signatures: group.len(),
        complexity: stats,
        basis,
        flags,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::Closures;

    pub(crate) fn record(file: &str, name: &str, kind: SignatureKind, cc: u32, line: u32) -> SignatureRecord {
        SignatureRecord {
            filename: file.into(),
            name: name.into(),
            kind,
            complexity: cc,
            line_number: line,
            endline: None,
            col_offset: None,
            closures: Closures::default(),
            rank: None,
            classname: None,
        }
    }

    fn func(file: &str, name: &str, cc: u32, line: u32) -> SignatureRecord {
        record(file, name, SignatureKind::Function, cc, line)
    }

    fn flagged_names(report: &ComplexityReport) -> Vec<&str> {
        report.flags().map(|(_, f)| f.name.as_str()).collect()
    }

    #[test]
    fn test_file_mean_threshold() {
        let records = vec![func("a.py", "f", 5, 1), func("a.py", "g", 1, 5)];
        let report = run_search(&records, None);

        assert_eq!(report.files.len(), 1);
        let file = &report.files[0];
        assert_eq!(file.basis, ThresholdBasis::FileMean);
        assert_eq!(file.complexity.map(|s| s.mean), Some(3.0));
        assert_eq!(flagged_names(&report), vec!["f"]);
        assert_eq!(file.flags[0].threshold, 3.0);
        assert_eq!(file.flags[0].forced, None);
    }

    #[test]
    fn test_equal_to_mean_not_flagged() {
        let records = vec![func("a.py", "f", 4, 1), func("a.py", "g", 4, 5)];
        let report = run_search(&records, None);
        assert_eq!(report.total_flags(), 0);
    }

    #[test]
    fn test_lone_signature_uses_module_mean() {
        // module mean = (2 + 9 + 19) / 3 = 10
        let records = vec![
            func("lone.py", "small", 2, 1),
            func("pair.py", "a", 9, 1),
            func("pair.py", "b", 19, 10),
        ];
        let report = run_search(&records, None);

        let lone = report
            .files
            .iter()
            .find(|f| f.filename == "lone.py")
            .expect("lone file");
        assert_eq!(lone.basis, ThresholdBasis::ModuleMean);
        assert!(lone.flags.is_empty());
    }

    #[test]
    fn test_lone_signature_above_module_mean_flagged() {
        let records = vec![
            func("lone.py", "big", 20, 1),
            func("pair.py", "a", 2, 1),
            func("pair.py", "b", 2, 10),
        ];
        let report = run_search(&records, None);
        let lone = &report.files[0];
        assert_eq!(lone.filename, "lone.py");
        assert_eq!(lone.flags.len(), 1);
        assert!((lone.flags[0].threshold - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_override_applies_to_every_file() {
        let records = vec![
            func("lone.py", "x", 6, 1),
            func("pair.py", "a", 6, 1),
            func("pair.py", "b", 5, 10),
        ];
        let report = run_search(&records, Some(5.0));

        assert!(report.files.iter().all(|f| f.basis == ThresholdBasis::Override));
        assert_eq!(flagged_names(&report), vec!["x", "a"]);
        assert!(report.flags().all(|(_, f)| f.forced == Some(5.0)));
        assert_eq!(report.override_threshold, Some(5.0));
    }

    #[test]
    fn test_classes_never_flagged() {
        let records = vec![
            record("a.py", "Huge", SignatureKind::Class, 50, 1),
            record("a.py", "m", SignatureKind::Method, 1, 2),
            record("b.py", "Solo", SignatureKind::Class, 99, 1),
        ];
        assert_eq!(run_search(&records, None).total_flags(), 0);
        assert_eq!(run_search(&records, Some(0.0)).total_flags(), 1);
    }

    #[test]
    fn test_sorted_by_filename_then_line() {
        let records = vec![
            func("b.py", "late", 9, 40),
            func("a.py", "second", 9, 20),
            func("b.py", "early", 9, 3),
            func("a.py", "first", 9, 1),
        ];
        let report = run_search(&records, Some(1.0));

        let order: Vec<(&str, &str)> = report.flags().map(|(file, f)| (file, f.name.as_str())).collect();
        assert_eq!(
            order,
            vec![("a.py", "first"), ("a.py", "second"), ("b.py", "early"), ("b.py", "late")]
        );
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let records = vec![func("a.py", "one", 9, 1), func("a.py", "two", 9, 1)];
        let report = run_search(&records, Some(1.0));
        assert_eq!(flagged_names(&report), vec!["one", "two"]);
    }

    #[test]
    fn test_files_grouped_even_when_interleaved() {
        let records = vec![
            func("a.py", "f", 1, 1),
            func("b.py", "g", 1, 1),
            func("a.py", "h", 1, 9),
        ];
        let report = run_search(&records, None);
        assert_eq!(report.files.len(), 2);
        assert_eq!(report.summary.files, 2);
        assert_eq!(report.files[0].signatures, 2);
    }

    #[test]
    fn test_module_summary_counts() {
        let records = vec![
            record("a.py", "C", SignatureKind::Class, 4, 1),
            record("a.py", "m1", SignatureKind::Method, 2, 2),
            record("a.py", "m2", SignatureKind::Method, 3, 6),
            func("b.py", "f", 7, 1),
        ];
        let report = run_search(&records, None);
        let summary = &report.summary;
        assert_eq!(summary.files, 2);
        assert_eq!(summary.classes, 1);
        assert_eq!(summary.methods, 2);
        assert_eq!(summary.functions, 1);
        let stats = summary.complexity.expect("stats");
        assert!((stats.mean - 4.0).abs() < 1e-9);
        assert!((stats.median - 3.5).abs() < 1e-9);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_empty_dataset() {
        let report = run_search(&[], None);
        assert_eq!(report.summary, ModuleSummary::default());
        assert!(report.summary.complexity.is_none());
        assert!(report.files.is_empty());
        assert_eq!(report.warnings, vec![ReportWarning::EmptyDataset]);
        assert_eq!(report.total_flags(), 0);
    }
}

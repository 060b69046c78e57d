//! Report command - load a radon report and flag complex signatures

use super::ReportSettings;
use crate::reporters::{self, OutputFormat};
use crate::session::ProfilerSession;
use anyhow::Result;
use console::style;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Run the report command
pub(crate) fn run(path: &Path, settings: ReportSettings) -> Result<()> {
    let format = OutputFormat::from_str(&settings.format)?;
    let session = ProfilerSession::open(path)?;

    for skipped in session.skipped_files() {
        eprintln!(
            "{} {} skipped by radon: {}",
            style("[skip]").yellow(),
            skipped.filename,
            skipped.error
        );
    }

    let report = session.run_report(settings.threshold);
    let output = reporters::report_with_format(&report, format)?;

    match &settings.output {
        Some(out_path) => {
            std::fs::write(out_path, &output)?;
            // stderr keeps stdout clean for piping
            eprintln!(
                "Report written to: {}",
                style(out_path.display()).cyan()
            );
        }
        None => println!("{}", output.trim_end()),
    }

    let flagged = report.total_flags();
    info!(
        "{} signatures flagged in {}",
        flagged,
        session.current_file_name().display()
    );

    if settings.fail_on_flags && flagged > 0 {
        eprintln!(
            "{} {} signature(s) flagged (--fail-on-flags)",
            style("Failing:").red().bold(),
            flagged
        );
        std::process::exit(1);
    }

    Ok(())
}

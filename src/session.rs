//! Profiler session: one loaded report at a time
//!
//! Holds the current source path together with its records. A reload
//! parses into a fresh dataset first and swaps only on success, so a
//! failed load leaves the previous report in place.

use crate::error::Result;
use crate::flagger;
use crate::loader::{self, LoadedReport};
use crate::models::{ComplexityReport, SignatureRecord, SkippedFile};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct ProfilerSession {
    source: PathBuf,
    records: Vec<SignatureRecord>,
    skipped: Vec<SkippedFile>,
}

impl ProfilerSession {
    /// Load the report at `path` into a new session.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let loaded = loader::load_report(path)?;
        Ok(Self::from_loaded(path.to_path_buf(), loaded))
    }

    fn from_loaded(source: PathBuf, loaded: LoadedReport) -> Self {
        info!(
            "Loaded {} signatures from {}",
            loaded.records.len(),
            source.display()
        );
        Self {
            source,
            records: loaded.records,
            skipped: loaded.skipped,
        }
    }

    /// Replace the current report with the one at `path`.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let loaded = loader::load_report(path)?;
        *self = Self::from_loaded(path.to_path_buf(), loaded);
        Ok(())
    }

    /// Flag signatures in the current report.
    pub fn run_report(&self, override_threshold: Option<f64>) -> ComplexityReport {
        flagger::run_search(&self.records, override_threshold)
    }

    /// Owned copy of the loaded records.
    pub fn raw_data(&self) -> Vec<SignatureRecord> {
        self.records.clone()
    }

    pub fn current_file_name(&self) -> &Path {
        &self.source
    }

    pub fn skipped_files(&self) -> &[SkippedFile] {
        &self.skipped
    }
}

//! Core data models for cc-optimize
//!
//! Loaded signature records on one side, and the computed
//! complexity report on the other.

use serde::{Deserialize, Serialize};

/// Kind of definition a radon block describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureKind {
    Function,
    Method,
    Class,
}

impl SignatureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureKind::Function => "function",
            SignatureKind::Method => "method",
            SignatureKind::Class => "class",
        }
    }
}

impl std::fmt::Display for SignatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A closure nested inside a function, as listed by radon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Closure {
    pub name: String,
    #[serde(default)]
    pub complexity: Option<u32>,
    #[serde(default)]
    pub lineno: Option<u32>,
}

/// Nested closures: radon emits a list, older tools a bare count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Closures {
    Count(u32),
    Nested(Vec<Closure>),
}

impl Default for Closures {
    fn default() -> Self {
        Closures::Count(0)
    }
}

impl Closures {
    pub fn count(&self) -> usize {
        match self {
            Closures::Count(n) => *n as usize,
            Closures::Nested(list) => list.len(),
        }
    }
}

/// One function, method or class measured in a source file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignatureRecord {
    pub filename: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SignatureKind,
    pub complexity: u32,
    pub line_number: u32,
    pub endline: Option<u32>,
    pub col_offset: Option<u32>,
    pub closures: Closures,
    pub rank: Option<String>,
    /// Owning class, set by radon for methods
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classname: Option<String>,
}

/// A file radon could not analyze (`{"error": "..."}` in the report)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub filename: String,
    pub error: String,
}

/// Mean, median and population standard deviation of a set of complexities
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComplexityStats {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

impl ComplexityStats {
    /// Returns `None` when there are no values.
    pub fn from_values(values: &[u32]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted: Vec<f64> = values.iter().map(|&v| f64::from(v)).collect();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        Some(Self {
            mean,
            median,
            std_dev: variance.sqrt(),
        })
    }
}

/// Module-wide counts and statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModuleSummary {
    pub files: usize,
    pub classes: usize,
    pub methods: usize,
    pub functions: usize,
    pub complexity: Option<ComplexityStats>,
}

/// What a file's signatures were compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdBasis {
    /// Mean of the file's own signatures
    FileMean,
    /// Module-wide mean (file holds a single signature)
    ModuleMean,
    /// User supplied threshold
    Override,
}

/// A signature whose complexity exceeded its threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flag {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SignatureKind,
    pub complexity: u32,
    pub line_number: u32,
    pub rank: Option<String>,
    /// Value the complexity was compared against
    pub threshold: f64,
    /// Set only when an override threshold was in effect
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forced: Option<f64>,
}

/// Per-file results, in sorted filename order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub filename: String,
    pub signatures: usize,
    pub complexity: Option<ComplexityStats>,
    pub basis: ThresholdBasis,
    pub flags: Vec<Flag>,
}

/// Non-fatal conditions noticed while building a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportWarning {
    /// No signatures loaded; statistics are undefined
    EmptyDataset,
}

impl std::fmt::Display for ReportWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportWarning::EmptyDataset => {
                write!(f, "report contains no signatures; statistics are undefined")
            }
        }
    }
}

/// Result of a flagging pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexityReport {
    pub summary: ModuleSummary,
    pub override_threshold: Option<f64>,
    pub files: Vec<FileReport>,
    pub warnings: Vec<ReportWarning>,
}

impl ComplexityReport {
    pub fn total_flags(&self) -> usize {
        self.files.iter().map(|f| f.flags.len()).sum()
    }

    pub fn flags(&self) -> impl Iterator<Item = (&str, &Flag)> {
        self.files
            .iter()
            .flat_map(|f| f.flags.iter().map(move |flag| (f.filename.as_str(), flag)))
    }
}

//! Radon `cc --json` report loader
//!
//! The report is a JSON object mapping each analyzed file to a list of
//! blocks. Files radon failed on carry `{"error": "..."}` instead of a list.
//! File order and block order are preserved exactly as written.

use crate::error::{ProfilerError, Result};
use crate::models::{Closures, SignatureKind, SignatureRecord, SkippedFile};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

/// Records and skipped files parsed from one report
#[derive(Debug, Clone, Default)]
pub struct LoadedReport {
    pub records: Vec<SignatureRecord>,
    pub skipped: Vec<SkippedFile>,
}

/// A single block exactly as radon writes it
#[derive(Debug, Deserialize)]
struct RawBlock {
    name: String,
    #[serde(rename = "type")]
    kind: SignatureKind,
    complexity: u32,
    lineno: u32,
    #[serde(default)]
    endline: Option<u32>,
    #[serde(default)]
    col_offset: Option<u32>,
    #[serde(default)]
    closures: Option<Closures>,
    #[serde(default)]
    rank: Option<String>,
    #[serde(default)]
    classname: Option<String>,
}

/// Read and parse the report at `path`.
pub fn load_report(path: &Path) -> Result<LoadedReport> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ProfilerError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ProfilerError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let loaded = parse_report(&content, path)?;
    debug!(
        "Loaded {} signatures from {} ({} skipped files)",
        loaded.records.len(),
        path.display(),
        loaded.skipped.len()
    );
    Ok(loaded)
}

/// Parse report text. `origin` is only used in error messages.
pub fn parse_report(content: &str, origin: &Path) -> Result<LoadedReport> {
    let files: IndexMap<String, Value> =
        serde_json::from_str(content).map_err(|e| ProfilerError::Parse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut loaded = LoadedReport::default();

    for (filename, entry) in files {
        match entry {
            Value::Array(blocks) => {
                for (index, block) in blocks.into_iter().enumerate() {
                    let record = parse_block(block, &filename).map_err(|message| {
                        ProfilerError::InvalidEntry {
                            path: origin.to_path_buf(),
                            file: filename.clone(),
                            index,
                            message,
                        }
                    })?;
                    loaded.records.push(record);
                }
            }
            Value::Object(obj) if obj.get("error").is_some_and(Value::is_string) => {
                let error = obj
                    .get("error")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                warn!("Skipping {}: radon reported '{}'", filename, error);
                loaded.skipped.push(SkippedFile { filename, error });
            }
            other => {
                return Err(ProfilerError::Parse {
                    path: origin.to_path_buf(),
                    message: format!(
                        "expected a list of blocks for '{}', found {}",
                        filename,
                        json_type_name(&other)
                    ),
                });
            }
        }
    }

    Ok(loaded)
}

fn parse_block(block: Value, filename: &str) -> std::result::Result<SignatureRecord, String> {
    let raw: RawBlock = serde_json::from_value(block).map_err(|e| e.to_string())?;

    if raw.complexity == 0 {
        return Err(format!("'{}' has complexity 0 (must be at least 1)", raw.name));
    }

    Ok(SignatureRecord {
        filename: filename.to_string(),
        name: raw.name,
        kind: raw.kind,
        complexity: raw.complexity,
        line_number: raw.lineno,
        endline: raw.endline,
        col_offset: raw.col_offset,
        closures: raw.closures.unwrap_or_default(),
        rank: raw.rank,
        classname: raw.classname,
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

//! Records command - dump the loaded signature records

use crate::session::ProfilerSession;
use anyhow::Result;
use std::path::Path;

/// Print every record of the report as a JSON array
pub(crate) fn run(path: &Path) -> Result<()> {
    let session = ProfilerSession::open(path)?;
    println!("{}", serde_json::to_string_pretty(&session.raw_data())?);
    Ok(())
}

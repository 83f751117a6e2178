//! Machine-readable results, one JSON object per run in invocation order.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::models::RunResult;

pub fn write_json_report(results: &[RunResult], output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report: {}", output_path.display()))
}

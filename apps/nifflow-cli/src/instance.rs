use anyhow::{Context, Result};
use nifflow_core::Configuration;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::io::BufRead;
use std::path::Path;

/// A configured connector, as stored on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct InstanceFile {
    /// Connector id, e.g. `freme_ner`.
    pub connector: String,
    #[serde(default)]
    pub options: Configuration,
}

impl InstanceFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read instance file: {:?}", path))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse instance file: {:?}", path))
    }
}

/// Reads one JSON record per non-blank line.
pub fn read_records(reader: impl BufRead) -> Result<Vec<Value>> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line)
            .with_context(|| format!("Line {} is not a JSON record", index + 1))?;
        records.push(record);
    }
    Ok(records)
}

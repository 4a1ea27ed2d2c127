use std::fs::{self, File};
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::error::StructureError;
use crate::util::{ensure_directory, sha256_bytes};

#[derive(Debug)]
pub struct LoadReport<T> {
    pub records: Vec<T>,
    pub malformed: Vec<StructureError>,
    pub source_sha256: Option<String>,
}

impl<T> LoadReport<T> {
    pub fn malformed_lines(&self) -> Vec<usize> {
        self.malformed
            .iter()
            .filter_map(StructureError::line)
            .collect()
    }
}

pub fn read_json_lines<T, R>(reader: R) -> Result<LoadReport<T>>
where
    T: DeserializeOwned,
    R: BufRead,
{
    let mut records = Vec::new();
    let mut malformed = Vec::new();

    for (index, line) in reader.split(b'\n').enumerate() {
        let line_number = index + 1;
        let line = line.with_context(|| format!("failed to read line {line_number}"))?;
        let trimmed = line.trim_ascii();
        if trimmed.is_empty() {
            continue;
        }

        match serde_json::from_slice::<T>(trimmed) {
            Ok(record) => records.push(record),
            Err(source) => {
                let err = StructureError::MalformedRecord {
                    line: line_number,
                    source,
                };
                warn!(line = line_number, error = %err, "skipping malformed record");
                malformed.push(err);
            }
        }
    }

    Ok(LoadReport {
        records,
        malformed,
        source_sha256: None,
    })
}

pub fn load_json_lines<T: DeserializeOwned>(path: &Path) -> Result<LoadReport<T>> {
    let raw = fs::read(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut report = read_json_lines(raw.as_slice())
        .with_context(|| format!("failed to read records from {}", path.display()))?;
    report.source_sha256 = Some(sha256_bytes(&raw));

    info!(
        path = %path.display(),
        records = report.records.len(),
        malformed = report.malformed.len(),
        "loaded records"
    );

    Ok(report)
}

pub fn save_json_lines<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }

    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    for (index, record) in records.iter().enumerate() {
        serde_json::to_writer(&mut writer, record)
            .with_context(|| format!("failed to serialize record {} for {}", index + 1, path.display()))?;
        writer
            .write_all(b"\n")
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;

    info!(path = %path.display(), records = records.len(), "saved records");
    Ok(())
}

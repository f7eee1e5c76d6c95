// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Sources of raw transaction records.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::models::RawTransaction;

/// Supplies the raw records the query engine runs over.
pub trait TransactionStore {
    fn transactions(&self) -> Result<Vec<RawTransaction>>;
}

/// Records held in memory, in the order given.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<RawTransaction>,
}

impl MemoryStore {
    pub fn new(records: Vec<RawTransaction>) -> Self {
        Self { records }
    }
}

impl TransactionStore for MemoryStore {
    fn transactions(&self) -> Result<Vec<RawTransaction>> {
        Ok(self.records.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(anyhow!(
                "Unsupported transactions file '{}' (use .csv or .json)",
                path.display()
            )),
        }
    }
}

/// A read-only CSV or JSON file of transactions. The file is read again on
/// every call.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    format: FileFormat,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = FileFormat::from_path(&path)?;
        Ok(Self { path, format })
    }
}

impl TransactionStore for FileStore {
    fn transactions(&self) -> Result<Vec<RawTransaction>> {
        let records = match self.format {
            FileFormat::Csv => read_csv(&self.path)?,
            FileFormat::Json => read_json(&self.path)?,
        };
        tracing::info!(
            "Loaded {} transaction records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}

// Every column is read as text; ids and amounts keep their exact characters.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    id: String,
    #[serde(default)]
    description: String,
    amount: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    icon: Option<String>,
}

impl From<CsvRecord> for RawTransaction {
    fn from(rec: CsvRecord) -> Self {
        let present = |v: Option<String>| v.filter(|s| !s.is_empty());
        RawTransaction {
            id: rec.id,
            description: rec.description,
            amount: rec.amount,
            category: rec.category,
            date: present(rec.date),
            kind: present(rec.kind),
            icon: present(rec.icon),
        }
    }
}

fn read_csv(path: &Path) -> Result<Vec<RawTransaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path.display()))?;
    let mut out = Vec::new();
    for (i, result) in rdr.deserialize::<CsvRecord>().enumerate() {
        // Header is line 1.
        let rec = result.with_context(|| format!("{}: malformed row {}", path.display(), i + 2))?;
        out.push(rec.into());
    }
    Ok(out)
}

/// Read a JSON array of `T` from `path`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Parse JSON {}", path.display()))
}

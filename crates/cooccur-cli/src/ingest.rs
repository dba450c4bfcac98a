//! CSV ingestion: order export file → [`RecordTable`].

use std::fs::File;
use std::path::Path;

use anyhow::Context;
use indicatif::ProgressBar;
use tracing::debug;

use cooccur_core::{RecordTable, Value};

/// Reads a headered CSV file into a [`RecordTable`], inferring each
/// cell's type independently: empty → null, then integer, then float,
/// then string.
///
/// Note that a bare `0` in the product column therefore always parses
/// as numeric zero and gets dropped by the normalizer; the
/// string-`"0"`-survives path only exists for callers building tables
/// through the library API.
pub fn read_csv(path: &Path) -> anyhow::Result<RecordTable> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let bytes = file.metadata().map(|m| m.len()).unwrap_or(0);
    let progress = ProgressBar::new(bytes);

    let mut reader = csv::Reader::from_reader(progress.wrap_read(file));
    let headers = reader
        .headers()
        .with_context(|| format!("reading CSV headers from {}", path.display()))?
        .clone();
    let mut table = RecordTable::new(headers.iter().map(str::to_string).collect());

    for record in reader.records() {
        let record = record.with_context(|| format!("reading CSV row from {}", path.display()))?;
        table.push_row(record.iter().map(infer_value).collect())?;
    }
    progress.finish_and_clear();

    debug!(rows = table.len(), columns = table.columns().len(), "loaded input table");
    Ok(table)
}

fn infer_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::Int(int);
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        return Value::Float(float);
    }
    Value::Str(raw.to_string())
}

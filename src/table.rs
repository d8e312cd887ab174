//! Tabular input: one [`Record`] per data row, every value kept as text.

use crate::error::NetfigError;
use csv::{ReaderBuilder, StringRecord};
use std::path::Path;

/// One data row as ordered `(column, value)` pairs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    /// 1-based data row number (the header is row 0).
    pub row: usize,
    pub fields: Vec<(String, String)>,
}

impl Record {
    /// Value of the first column, which names the output file.
    pub fn key(&self) -> &str {
        self.fields.first().map_or("", |(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct Table {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

/// Parse `path` as CSV (or TSV when the extension says so).
///
/// Short rows are padded with empty strings; a file without a header row is
/// an [`NetfigError::InputFormat`].
pub fn read_table(path: &Path) -> Result<Table, NetfigError> {
    let format_err = |reason: String| NetfigError::InputFormat {
        path: path.to_path_buf(),
        reason,
    };

    let delimiter = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    };

    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .map_err(|e| format_err(e.to_string()))?;

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| format_err(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(format_err("no header row".into()));
    }

    let mut records = Vec::new();
    for (i, row) in rdr.records().enumerate() {
        let row = row.map_err(|e| format_err(e.to_string()))?;
        records.push(to_record(i + 1, &headers, &row));
    }

    Ok(Table { headers, records })
}

fn to_record(row: usize, headers: &[String], cells: &StringRecord) -> Record {
    let fields = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.clone(), cells.get(i).unwrap_or_default().to_owned()))
        .collect();
    Record { row, fields }
}

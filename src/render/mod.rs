//! Row rendering: one output file per record, plus an optional combined file.

pub mod engine;
pub mod naming;

use crate::{
    error::NetfigError,
    report::{BatchReport, RecordFailure},
    table::Record,
};
use engine::Engine;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};
use tracing::{debug, warn};

pub struct BatchOptions<'a> {
    /// Extension appended to every output file name.
    pub ext: &'a str,
    /// File name of the combined output, if one should be written.
    pub combined: Option<String>,
}

/// Render every record into `out_dir`.
///
/// Per-record failures land in the report; only I/O errors abort the batch.
pub fn render_batch(
    engine: &Engine,
    records: &[Record],
    out_dir: &Path,
    opts: &BatchOptions<'_>,
) -> Result<BatchReport, NetfigError> {
    let mut report = BatchReport {
        out_dir: out_dir.to_path_buf(),
        combined: opts.combined.clone(),
        ..Default::default()
    };

    // Opened before the first record; dropped (and closed) on every exit path.
    let mut combined = match &opts.combined {
        Some(name) => {
            let path = out_dir.join(name);
            let file = File::create(&path).map_err(NetfigError::io("create", &path))?;
            Some((BufWriter::new(file), path))
        }
        None => None,
    };

    for record in records {
        let name = match output_name(record, opts) {
            Ok(n) => n,
            Err(error) => {
                warn!(row = record.row, key = record.key(), "skipped: {error}");
                report.skipped.push(failure(record, error));
                continue;
            }
        };

        let text = match engine.render(record) {
            Ok(t) => t,
            Err(error) => {
                warn!(row = record.row, key = record.key(), "render failed: {error}");
                report.failed.push(failure(record, error));
                continue;
            }
        };

        let path = out_dir.join(&name);
        fs::write(&path, &text).map_err(NetfigError::io("write", &path))?;
        debug!(row = record.row, file = %name, "wrote");

        if let Some((w, path)) = combined.as_mut() {
            w.write_all(text.as_bytes())
                .map_err(NetfigError::io("write", path.as_path()))?;
        }
        report.written.push(name);
    }

    if let Some((mut w, path)) = combined {
        w.flush().map_err(NetfigError::io("flush", path))?;
    }

    Ok(report)
}

fn output_name(record: &Record, opts: &BatchOptions<'_>) -> Result<String, NetfigError> {
    let name = naming::file_name(record.key(), opts.ext)?;
    if opts.combined.as_deref() == Some(name.as_str()) {
        return Err(NetfigError::InvalidRecordKey {
            key: record.key().to_owned(),
            reason: "collides with the combined output file",
        });
    }
    Ok(name)
}

fn failure(record: &Record, error: NetfigError) -> RecordFailure {
    RecordFailure {
        row: record.row,
        key: record.key().to_owned(),
        error,
    }
}

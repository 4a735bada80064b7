//! CSV file helpers
//!
//! Files are opened, fully read or written, and closed within one call. Writes
//! truncate the target; there is no temp-file swap.

use std::fs::{self, File};
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord, Writer, WriterBuilder};

use crate::error::TrackerError;

/// Read every record of a headerless CSV file
///
/// Returns `None` when the file does not exist. Rows that the CSV parser
/// itself rejects are returned as `Err` with a description so callers can
/// skip them.
pub fn read_csv_records<P>(path: P) -> Result<Option<Vec<Result<StringRecord, String>>>, TrackerError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(None);
    }

    let mut reader = open_reader(path)?;
    let records = reader
        .records()
        .enumerate()
        .map(|(idx, result)| {
            result.map_err(|e| format!("{} row {}: {}", path.display(), idx + 1, e))
        })
        .collect();

    Ok(Some(records))
}

/// Overwrite a headerless CSV file with the given rows
pub fn write_csv_records<P, I, R>(path: P, rows: I) -> Result<(), TrackerError>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            TrackerError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut writer = create_writer(path)?;
    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| TrackerError::Csv(format!("Failed to write {}: {}", path.display(), e)))?;
    }

    writer
        .flush()
        .map_err(|e| TrackerError::Storage(format!("Failed to flush {}: {}", path.display(), e)))?;

    Ok(())
}

fn open_reader(path: &Path) -> Result<Reader<File>, TrackerError> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| TrackerError::Storage(format!("Failed to open {}: {}", path.display(), e)))
}

fn create_writer(path: &Path) -> Result<Writer<File>, TrackerError> {
    WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| TrackerError::Storage(format!("Failed to create {}: {}", path.display(), e)))
}

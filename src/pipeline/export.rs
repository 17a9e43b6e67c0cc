// src/pipeline/export.rs

//! CSV export of the filtered (not paginated) result set.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::{AppError, Result};
use crate::models::{FIELD_NAMES, Record};
use crate::session::Session;

/// Write a header row and one quoted row per record, each ending in `\n`.
pub fn write_csv<W: Write>(writer: W, records: &[&Record]) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(FIELD_NAMES)?;
    for record in records {
        wtr.write_record(record.values())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render records as a CSV string.
pub fn to_csv_string(records: &[&Record]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, records)?;
    String::from_utf8(buf).map_err(|e| AppError::validation(e.to_string()))
}

/// Export the session's filtered records to `path`.
///
/// Nothing is written when the filtered set is empty.
pub fn export_session(session: &Session, path: &Path) -> Result<usize> {
    let records = session.filtered_records();
    if records.is_empty() {
        log::warn!("Export skipped: no rows match the current filters");
        return Err(AppError::EmptyExport);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_csv(file, &records)?;

    log::info!("Exported {} rows to {}", records.len(), path.display());
    Ok(records.len())
}

use crate::error::Result;
use crate::extract::FieldRecord;
pub use crate::log_info;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

pub fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory(parent),
        _ => Ok(()),
    }
}

/// Writes `header` and one line per record, columns in header order.
pub fn write_records<W: Write>(
    writer: W,
    header: &[&'static str],
    records: &[FieldRecord],
) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    csv_writer.write_record(header)?;
    for record in records {
        csv_writer.write_record(record.values_for(header))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_csv(path: &Path, header: &[&'static str], records: &[FieldRecord]) -> Result<()> {
    ensure_parent(path)?;
    let file = File::create(path)?;
    write_records(file, header, records)?;

    log_info!(
        "[utils] Saved {} rows to {}",
        records.len(),
        path.display()
    );
    Ok(())
}

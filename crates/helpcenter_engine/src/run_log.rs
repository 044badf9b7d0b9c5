use std::path::{Path, PathBuf};

use helpcenter_core::ExportRecord;

use crate::persist::{AtomicFileWriter, PersistError};

pub const LOG_HEADER: [&str; 8] = [
    "Article ID",
    "Title",
    "Status",
    "Category",
    "Section",
    "Path",
    "Article URL",
    "Detail",
];

#[derive(Debug, thiserror::Error)]
pub enum RunLogError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// CSV bytes for the run log. The header row is always present.
pub fn render_run_log(records: &[ExportRecord]) -> Result<Vec<u8>, RunLogError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(LOG_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.into_inner().map_err(|err| RunLogError::Io(err.into_error()))
}

pub fn write_run_log(
    dir: &Path,
    filename: &str,
    records: &[ExportRecord],
) -> Result<PathBuf, RunLogError> {
    let bytes = render_run_log(records)?;
    Ok(AtomicFileWriter::new(dir.to_path_buf()).write(filename, bytes)?)
}

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use super::projector::OutputRecord;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Failed to create output file {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write row {row}: {source}")]
    Write {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to flush output file: {0}")]
    Flush(#[from] std::io::Error),
}

/// Writes cleaned rows as comma-separated text, truncating any existing file
pub struct CsvTrackWriter {
    path: PathBuf,
}

impl CsvTrackWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the header line and every record; returns the number of records written
    pub fn write(&self, header: &[&str], records: &[OutputRecord]) -> Result<usize, WriteError> {
        let mut writer = csv::Writer::from_path(&self.path).map_err(|source| WriteError::Create {
            path: self.path.clone(),
            source,
        })?;

        writer
            .write_record(header)
            .map_err(|source| WriteError::Write { row: 0, source })?;

        for (idx, record) in records.iter().enumerate() {
            writer
                .write_record(record.fields.iter().map(|f| f.as_deref().unwrap_or("")))
                .map_err(|source| WriteError::Write {
                    row: idx + 1,
                    source,
                })?;
        }

        writer.flush()?;
        debug!("Flushed {}", self.path.display());

        info!(
            "Wrote {} rows to {}",
            records.len(),
            self.path.display()
        );
        Ok(records.len())
    }
}

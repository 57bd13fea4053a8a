use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::track::coordinate::{normalize_cell, CoordinateError};
use crate::track::loader::{LoadError, TrackLoader};
use crate::track::projector::{NormalizedObservation, OutputRecord, Projection};
use crate::track::propagator::{propagate, Observation};
use crate::track::table::{TrackTable, LATITUDE_COLUMN, LONGITUDE_COLUMN};
use crate::track::writer::{CsvTrackWriter, WriteError};

/// Error types for a cleaning run, tagged with the stage that failed
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("load stage: {0}")]
    Load(#[from] LoadError),

    #[error("normalize stage: row {row}, column {column}: {source}")]
    Coordinate {
        row: usize,
        column: &'static str,
        #[source]
        source: CoordinateError,
    },

    #[error("write stage: {0}")]
    Write(#[from] WriteError),
}

/// What to do with a row whose Latitude or Longitude cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinatePolicy {
    /// Abort the whole run
    #[default]
    Fail,
    /// Drop the row and log a warning
    SkipRow,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CleanOptions {
    pub coordinate_policy: CoordinatePolicy,
}

/// In-memory result of cleaning a table, ready to write
#[derive(Debug, Clone)]
pub struct CleanedTrack {
    pub header: Vec<&'static str>,
    pub records: Vec<OutputRecord>,
    pub stats: CleanStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanStats {
    pub rows_read: usize,
    pub header_rows: usize,
    pub observation_rows: usize,
    pub skipped_invalid_coordinates: usize,
    pub dropped_missing_coordinates: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub coordinate_policy: CoordinatePolicy,
    #[serde(flatten)]
    pub stats: CleanStats,
    pub rows_written: usize,
    pub elapsed_ms: u64,
}

/// Runs the load, classify, propagate, normalize, project and write stages
#[derive(Debug, Clone, Default)]
pub struct TrackCleaner {
    options: CleanOptions,
}

impl TrackCleaner {
    pub fn new(options: CleanOptions) -> Self {
        Self { options }
    }

    /// Clean a loaded table without touching the filesystem
    ///
    /// 1. Classifies rows and forward-fills storm NAME/ID, dropping header rows
    /// 2. Normalizes Latitude/Longitude to signed degrees
    /// 3. Drops rows with neither coordinate
    /// 4. Projects the fixed output columns
    pub fn clean(&self, table: TrackTable) -> Result<CleanedTrack, PipelineError> {
        let rows_read = table.len();
        let (columns, layout, records) = table.into_parts();

        let propagated = propagate(records, &layout);
        info!(
            "Propagated storm context: {} header rows, {} observations",
            propagated.header_rows,
            propagated.observations.len()
        );

        let mut stats = CleanStats {
            rows_read,
            header_rows: propagated.header_rows,
            observation_rows: propagated.observations.len(),
            ..CleanStats::default()
        };

        let projection = Projection::plan(&columns);
        let mut output = Vec::with_capacity(propagated.observations.len());

        for observation in propagated.observations {
            let row_number = observation.record.row_number;

            let normalized = match self.normalize(observation, layout.latitude, layout.longitude) {
                Ok(n) => n,
                Err(e) if self.options.coordinate_policy == CoordinatePolicy::SkipRow => {
                    warn!("Skipping row with invalid coordinates: {}", e);
                    stats.skipped_invalid_coordinates += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            if !normalized.has_position() {
                debug!("Row {}: no latitude or longitude, dropping", row_number);
                stats.dropped_missing_coordinates += 1;
                continue;
            }

            output.push(projection.project(&normalized));
        }

        info!(
            "Cleaned {} rows ({} without position, {} skipped)",
            output.len(),
            stats.dropped_missing_coordinates,
            stats.skipped_invalid_coordinates
        );

        Ok(CleanedTrack {
            header: projection.header(),
            records: output,
            stats,
        })
    }

    fn normalize(
        &self,
        observation: Observation,
        latitude_idx: usize,
        longitude_idx: usize,
    ) -> Result<NormalizedObservation, PipelineError> {
        let row = observation.record.row_number;
        let coordinate = |idx: usize, column: &'static str| {
            normalize_cell(observation.record.cell(idx))
                .map_err(|source| PipelineError::Coordinate { row, column, source })
        };

        let latitude = coordinate(latitude_idx, LATITUDE_COLUMN)?;
        let longitude = coordinate(longitude_idx, LONGITUDE_COLUMN)?;

        Ok(NormalizedObservation {
            observation,
            latitude,
            longitude,
        })
    }

    /// Load `input`, clean it, and write the result to `output`
    #[instrument(skip(self), fields(input = %input.display(), output = %output.display()))]
    pub fn run(&self, input: &Path, output: &Path) -> Result<RunSummary, PipelineError> {
        let start_time = Instant::now();
        info!("Starting hurricane track cleaning");

        let table = TrackLoader::new(input).load()?;
        let cleaned = self.clean(table)?;

        let rows_written = CsvTrackWriter::new(output).write(&cleaned.header, &cleaned.records)?;

        let elapsed = start_time.elapsed();
        info!(
            "Finished in {:.2}s: {} rows written",
            elapsed.as_secs_f64(),
            rows_written
        );

        Ok(RunSummary {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            coordinate_policy: self.options.coordinate_policy,
            stats: cleaned.stats,
            rows_written,
            elapsed_ms: elapsed.as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::cell::Cell;
    use crate::track::table::RawRecord;

    const COLUMNS: [&str; 7] = [
        "Date",
        "Time",
        "Record identifier",
        "Status of System",
        "Latitude",
        "Longitude",
        "Maximum Sustained Wind",
    ];

    fn table(rows: &[[&str; 7]]) -> TrackTable {
        let records = rows
            .iter()
            .enumerate()
            .map(|(i, r)| RawRecord::new(i + 2, r.iter().map(|v| Cell::from(*v)).collect()))
            .collect();
        TrackTable::new(
            "Sheet1",
            COLUMNS.iter().map(|c| c.to_string()).collect(),
            records,
        )
        .unwrap()
    }

    fn fields(record: &OutputRecord) -> Vec<&str> {
        record
            .fields
            .iter()
            .map(|f| f.as_deref().unwrap_or(""))
            .collect()
    }

    #[test]
    fn test_clean_header_and_observation() {
        let cleaned = TrackCleaner::default()
            .clean(table(&[
                ["AL012020", "", "", "", "", "", ""],
                ["AL012020", "0000", "L", "HU", "25.1N", "80.3W", "70"],
            ]))
            .unwrap();

        assert_eq!(cleaned.records.len(), 1);
        assert_eq!(
            fields(&cleaned.records[0]),
            vec!["AL012020", "AL012020", "0000", "L", "HU", "25.1", "-80.3", "70"]
        );
        assert_eq!(cleaned.stats.header_rows, 1);
        assert_eq!(cleaned.stats.observation_rows, 1);
    }

    #[test]
    fn test_clean_drops_rows_without_position() {
        let cleaned = TrackCleaner::default()
            .clean(table(&[
                ["AL012020", "", "", "", "", "", ""],
                ["20200516", "1800", "", "LO", "", "", "25"],
                ["20200516", "0000", "", "LO", "27.5N", "", "25"],
                ["20200517", "0600", "", "LO", "", "79.0W", "25"],
            ]))
            .unwrap();

        assert_eq!(cleaned.records.len(), 2);
        assert_eq!(cleaned.stats.dropped_missing_coordinates, 1);
        assert_eq!(fields(&cleaned.records[0])[5], "27.5");
        assert_eq!(fields(&cleaned.records[0])[6], "");
        assert_eq!(fields(&cleaned.records[1])[5], "");
        assert_eq!(fields(&cleaned.records[1])[6], "-79.0");
    }

    #[test]
    fn test_clean_fails_on_invalid_coordinate() {
        let result = TrackCleaner::default().clean(table(&[
            ["AL012020", "", "", "", "", "", ""],
            ["20200516", "1800", "", "LO", "27.0N", "79.0X", "25"],
        ]));

        match result {
            Err(PipelineError::Coordinate { row, column, .. }) => {
                assert_eq!(row, 3);
                assert_eq!(column, "Longitude");
            }
            other => panic!("Expected Coordinate error, got {other:?}"),
        }
    }

    #[test]
    fn test_clean_skip_policy_drops_invalid_rows() {
        let cleaner = TrackCleaner::new(CleanOptions {
            coordinate_policy: CoordinatePolicy::SkipRow,
        });
        let cleaned = cleaner
            .clean(table(&[
                ["AL012020", "", "", "", "", "", ""],
                ["20200516", "1800", "", "LO", "abcN", "79.0W", "25"],
                ["20200516", "0000", "", "LO", "27.0N", "79.0W", "25"],
            ]))
            .unwrap();

        assert_eq!(cleaned.records.len(), 1);
        assert_eq!(cleaned.stats.skipped_invalid_coordinates, 1);
        assert_eq!(fields(&cleaned.records[0])[2], "0000");
    }

    #[test]
    fn test_error_message_names_stage() {
        let err = PipelineError::Coordinate {
            row: 7,
            column: "Latitude",
            source: CoordinateError::InvalidMagnitude {
                value: "x.1N".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "normalize stage: row 7, column Latitude: Invalid magnitude in coordinate 'x.1N'"
        );
    }
}

// Hurricane track module
//
// This module turns an archive export of hurricane tracks into flat rows.
// The export interleaves two kinds of rows in one table:
// - Storm header rows: storm identifier in the Date column, Time empty
// - Observation rows: timestamp, compass-suffixed position, intensity

pub mod cell;
pub mod classifier;
pub mod coordinate;
pub mod loader;
pub mod projector;
pub mod propagator;
pub mod table;
pub mod writer;

pub use cell::Cell;
pub use classifier::{classify, classify_record, RowKind};
pub use coordinate::{normalize_cell, parse_coordinate, CoordinateError, Direction};
pub use loader::{LoadError, TrackLoader};
pub use projector::{NormalizedObservation, OutputRecord, Projection, OUTPUT_COLUMNS};
pub use propagator::{propagate, Observation, Propagated, StormContext, DEFAULT_STORM_NAME};
pub use table::{ColumnLayout, RawRecord, SchemaError, TrackTable};
pub use writer::{CsvTrackWriter, WriteError};

use super::cell::Cell;
use super::table::{ColumnLayout, RawRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Storm-name row: Date carries the storm name, Time is empty
    Header,
    /// Timestamped position/intensity measurement
    Observation,
}

/// A row is a header iff Time is absent and Date is present
///
/// Rows with both fields absent fall through to `Observation` and are left
/// for the later stages to handle as-is.
pub fn classify(date: &Cell, time: &Cell) -> RowKind {
    if time.is_empty() && date.is_present() {
        RowKind::Header
    } else {
        RowKind::Observation
    }
}

pub fn classify_record(record: &RawRecord, layout: &ColumnLayout) -> RowKind {
    classify(record.cell(layout.date), record.cell(layout.time))
}

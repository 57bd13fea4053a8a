use super::cell::Cell;

pub const DATE_COLUMN: &str = "Date";
pub const TIME_COLUMN: &str = "Time";
pub const LATITUDE_COLUMN: &str = "Latitude";
pub const LONGITUDE_COLUMN: &str = "Longitude";

static EMPTY_CELL: Cell = Cell::Empty;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("Required column not found: {0}")]
    MissingColumn(String),
}

/// One input row, in source order
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// 1-based row number in the source sheet (the column-name row is row 1)
    pub row_number: usize,
    cells: Vec<Cell>,
}

impl RawRecord {
    pub fn new(row_number: usize, cells: Vec<Cell>) -> Self {
        Self { row_number, cells }
    }

    /// Cell at `index`; short rows read as empty past their last cell
    pub fn cell(&self, index: usize) -> &Cell {
        self.cells.get(index).unwrap_or(&EMPTY_CELL)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }
}

/// Positions of the columns the pipeline cannot run without
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub date: usize,
    pub time: usize,
    pub latitude: usize,
    pub longitude: usize,
}

impl ColumnLayout {
    /// Resolve required column positions; the first column found wins on duplicates
    pub fn resolve(columns: &[String]) -> Result<Self, SchemaError> {
        let find = |name: &str| -> Result<usize, SchemaError> {
            columns
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| SchemaError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            date: find(DATE_COLUMN)?,
            time: find(TIME_COLUMN)?,
            latitude: find(LATITUDE_COLUMN)?,
            longitude: find(LONGITUDE_COLUMN)?,
        })
    }
}

/// The loaded sheet: column names plus every data row
#[derive(Debug, Clone)]
pub struct TrackTable {
    pub sheet_name: String,
    columns: Vec<String>,
    layout: ColumnLayout,
    records: Vec<RawRecord>,
}

impl TrackTable {
    pub fn new(
        sheet_name: impl Into<String>,
        columns: Vec<String>,
        records: Vec<RawRecord>,
    ) -> Result<Self, SchemaError> {
        let layout = ColumnLayout::resolve(&columns)?;
        Ok(Self {
            sheet_name: sheet_name.into(),
            columns,
            layout,
            records,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn layout(&self) -> ColumnLayout {
        self.layout
    }

    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_parts(self) -> (Vec<String>, ColumnLayout, Vec<RawRecord>) {
        (self.columns, self.layout, self.records)
    }
}

use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use super::cell::Cell;
use super::table::{RawRecord, SchemaError, TrackTable};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Input file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Unsupported input format: .{0}")]
    UnsupportedFormat(String),

    #[error("Failed to parse {path}: {msg}")]
    Format { path: PathBuf, msg: String },

    #[error("Workbook has no sheets: {0}")]
    NoSheets(PathBuf),

    #[error("Sheet '{0}' has no rows")]
    EmptySheet(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Reads the first sheet of a hurricane archive export into a `TrackTable`
pub struct TrackLoader {
    path: PathBuf,
}

impl TrackLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the table, dispatching on the file extension
    ///
    /// # Expected Sheet Structure:
    /// ```text
    /// Row 1: Column names (Date, Time, Record identifier, Status of System, Latitude, ...)
    /// Row 2: Storm header ("AL012020" | empty Time | ...)
    /// Row 3+: Observations ("20200516" | "1800" | "" | "LO" | "27.0N" | "79.0W" | 25)
    /// ```
    pub fn load(&self) -> Result<TrackTable, LoadError> {
        if !self.path.exists() {
            return Err(LoadError::FileNotFound(self.path.clone()));
        }

        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        let table = match ext.as_str() {
            "csv" => self.load_csv()?,
            e if SPREADSHEET_EXTENSIONS.contains(&e) => self.load_workbook()?,
            other => return Err(LoadError::UnsupportedFormat(other.to_string())),
        };

        info!(
            "Loaded {} rows with {} columns from sheet '{}'",
            table.len(),
            table.columns().len(),
            table.sheet_name
        );
        Ok(table)
    }

    fn format_error(&self, e: impl ToString) -> LoadError {
        LoadError::Format {
            path: self.path.clone(),
            msg: e.to_string(),
        }
    }

    fn load_workbook(&self) -> Result<TrackTable, LoadError> {
        let mut workbook = open_workbook_auto(&self.path).map_err(|e| self.format_error(e))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| LoadError::NoSheets(self.path.clone()))?;
        debug!("Reading first sheet: {}", sheet_name);

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| LoadError::NoSheets(self.path.clone()))?
            .map_err(|e| self.format_error(e))?;

        table_from_range(&sheet_name, &range)
    }

    fn load_csv(&self) -> Result<TrackTable, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| self.format_error(e))?;

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| self.format_error(e))?;
            rows.push(record.iter().map(Cell::from).collect::<Vec<_>>());
        }

        let sheet_name = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("csv")
            .to_string();

        table_from_rows(&sheet_name, rows, 1)
    }
}

fn table_from_range(sheet_name: &str, range: &Range<Data>) -> Result<TrackTable, LoadError> {
    // Ranges may not start at A1; keep row numbers aligned with the sheet
    let first_row = range.start().map(|(r, _)| r as usize + 1).unwrap_or(1);

    let rows = range
        .rows()
        .map(|row| row.iter().map(Cell::from).collect::<Vec<_>>())
        .collect();

    table_from_rows(sheet_name, rows, first_row)
}

/// Build a table whose first row holds the column names
fn table_from_rows(
    sheet_name: &str,
    rows: Vec<Vec<Cell>>,
    first_row: usize,
) -> Result<TrackTable, LoadError> {
    let mut rows = rows.into_iter();
    let header = rows
        .next()
        .ok_or_else(|| LoadError::EmptySheet(sheet_name.to_string()))?;

    let columns = column_names(&header);
    debug!("Columns: {:?}", columns);

    let records = rows
        .enumerate()
        .map(|(idx, cells)| RawRecord::new(first_row + 1 + idx, cells))
        .collect();

    Ok(TrackTable::new(sheet_name, columns, records)?)
}

fn column_names(header: &[Cell]) -> Vec<String> {
    header
        .iter()
        .enumerate()
        .map(|(idx, cell)| match cell.as_text() {
            Some(name) => name.trim().to_string(),
            None => format!("Unnamed: {idx}"),
        })
        .collect()
}

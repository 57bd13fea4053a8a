use super::coordinate::format_degrees;
use super::propagator::Observation;
use super::table::{LATITUDE_COLUMN, LONGITUDE_COLUMN};

pub const NAME_COLUMN: &str = "NAME";

/// Columns kept in the cleaned file, in output order
pub const OUTPUT_COLUMNS: [&str; 8] = [
    NAME_COLUMN,
    "Date",
    "Time",
    "Record identifier",
    "Status of System",
    LATITUDE_COLUMN,
    LONGITUDE_COLUMN,
    "Maximum Sustained Wind",
];

/// Where an output column's value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSource {
    StormName,
    Latitude,
    Longitude,
    Source(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    columns: Vec<(&'static str, OutputSource)>,
}

impl Projection {
    /// Intersect `OUTPUT_COLUMNS` with the source columns, keeping output order
    pub fn plan(source_columns: &[String]) -> Self {
        let columns = OUTPUT_COLUMNS
            .iter()
            .filter_map(|&name| {
                let source = match name {
                    NAME_COLUMN => OutputSource::StormName,
                    _ => {
                        let idx = source_columns.iter().position(|c| c == name)?;
                        match name {
                            LATITUDE_COLUMN => OutputSource::Latitude,
                            LONGITUDE_COLUMN => OutputSource::Longitude,
                            _ => OutputSource::Source(idx),
                        }
                    }
                };
                Some((name, source))
            })
            .collect();

        Self { columns }
    }

    pub fn header(&self) -> Vec<&'static str> {
        self.columns.iter().map(|(name, _)| *name).collect()
    }

    /// Project one normalized observation; absent values become `None`
    pub fn project(&self, row: &NormalizedObservation) -> OutputRecord {
        let fields = self
            .columns
            .iter()
            .map(|(_, source)| match source {
                OutputSource::StormName => Some(row.observation.name.clone()),
                OutputSource::Latitude => row.latitude.map(format_degrees),
                OutputSource::Longitude => row.longitude.map(format_degrees),
                OutputSource::Source(idx) => row.observation.record.cell(*idx).as_text(),
            })
            .collect();

        OutputRecord { fields }
    }
}

/// Observation after coordinate normalization
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedObservation {
    pub observation: Observation,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl NormalizedObservation {
    /// Rows with neither coordinate carry no track position and are dropped
    pub fn has_position(&self) -> bool {
        self.latitude.is_some() || self.longitude.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    pub fields: Vec<Option<String>>,
}

use tracing::debug;

use super::classifier::{classify_record, RowKind};
use super::table::{ColumnLayout, RawRecord};

pub const DEFAULT_STORM_NAME: &str = "Unnamed";

/// Running (NAME, ID) state threaded through the ordered pass
#[derive(Debug, Clone, PartialEq)]
pub struct StormContext {
    name: String,
    id: Option<String>,
}

impl Default for StormContext {
    fn default() -> Self {
        Self {
            name: DEFAULT_STORM_NAME.to_string(),
            id: None,
        }
    }
}

impl StormContext {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// A header row starts a new storm; the running ID is left alone
    fn enter_storm(&mut self, name: String) {
        self.name = name;
    }

    /// An observation overwrites the running ID with its own Date+Time.
    /// When it has neither, the previous ID carries forward.
    fn observe(&mut self, row_id: Option<String>) {
        if row_id.is_some() {
            self.id = row_id;
        }
    }
}

/// Observation row with its storm context attached
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub name: String,
    pub id: Option<String>,
    pub record: RawRecord,
}

#[derive(Debug, Default)]
pub struct Propagated {
    pub observations: Vec<Observation>,
    pub header_rows: usize,
}

/// Row ID: Date text followed by Time text; absent halves contribute nothing
pub fn observation_id(record: &RawRecord, layout: &ColumnLayout) -> Option<String> {
    let date = record.cell(layout.date).as_text();
    let time = record.cell(layout.time).as_text();
    match (date, time) {
        (None, None) => None,
        (date, time) => Some(format!(
            "{}{}",
            date.unwrap_or_default(),
            time.unwrap_or_default()
        )),
    }
}

/// Attach NAME and ID to every observation row and drop header rows
pub fn propagate(records: Vec<RawRecord>, layout: &ColumnLayout) -> Propagated {
    let mut context = StormContext::default();
    let mut out = Propagated::default();

    for record in records {
        match classify_record(&record, layout) {
            RowKind::Header => {
                // Header rows always have a Date by definition
                let name = record.cell(layout.date).to_string();
                debug!("Row {}: storm header '{}'", record.row_number, name);
                context.enter_storm(name);
                out.header_rows += 1;
            }
            RowKind::Observation => {
                context.observe(observation_id(&record, layout));
                out.observations.push(Observation {
                    name: context.name().to_string(),
                    id: context.id().map(str::to_string),
                    record,
                });
            }
        }
    }

    out
}

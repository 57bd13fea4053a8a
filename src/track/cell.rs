use calamine::Data;
use chrono::NaiveDateTime;
use std::fmt;

/// A single value read from the source table
///
/// Absent values are always `Cell::Empty`; there is no NaN sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

// Largest float magnitude still rendered in integer form
const INTEGRAL_FLOAT_LIMIT: f64 = 1e15;

impl Cell {
    /// True for empty cells and for text cells holding only whitespace
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn is_present(&self) -> bool {
        !self.is_empty()
    }

    /// Canonical text form of the cell, `None` when the cell is absent
    ///
    /// Every value goes through this one conversion before it is concatenated,
    /// parsed as a coordinate, or written to the output file.
    ///
    /// # Examples
    ///
    /// ```
    /// use hurricane_track_cleaner::track::Cell;
    ///
    /// assert_eq!(Cell::Float(1200.0).as_text().as_deref(), Some("1200"));
    /// assert_eq!(Cell::Float(25.5).as_text().as_deref(), Some("25.5"));
    /// assert_eq!(Cell::Text("0000".into()).as_text().as_deref(), Some("0000"));
    /// assert_eq!(Cell::Text("   ".into()).as_text(), None);
    /// ```
    pub fn as_text(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        Some(self.to_string())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Int(i) => write!(f, "{i}"),
            Cell::Float(v) => {
                if v.is_finite() && v.fract() == 0.0 && v.abs() < INTEGRAL_FLOAT_LIMIT {
                    write!(f, "{}", *v as i64)
                } else {
                    write!(f, "{v}")
                }
            }
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&Data> for Cell {
    fn from(value: &Data) -> Self {
        match value {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Int(i) => Cell::Int(*i),
            Data::Float(f) => Cell::Float(*f),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(ndt) => Cell::DateTime(ndt),
                // Out-of-range serials keep their raw value
                None => Cell::Float(dt.as_f64()),
            },
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Error(e) => Cell::Text(e.to_string()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_empty_and_blank_text_are_absent() {
        assert!(Cell::Empty.is_empty());
        assert!(Cell::Text(String::new()).is_empty());
        assert!(Cell::Text(" \t".to_string()).is_empty());
        assert!(Cell::Text("AL012020".to_string()).is_present());
        assert!(Cell::Int(0).is_present());
    }

    #[test]
    fn test_integral_float_renders_without_fraction() {
        assert_eq!(Cell::Float(0.0).as_text(), Some("0".to_string()));
        assert_eq!(Cell::Float(20200523.0).as_text(), Some("20200523".to_string()));
    }

    #[test]
    fn test_fractional_float_keeps_fraction() {
        assert_eq!(Cell::Float(25.1).as_text(), Some("25.1".to_string()));
    }

    #[test]
    fn test_huge_float_uses_plain_display() {
        assert_eq!(Cell::Float(1e20).as_text(), Some("100000000000000000000".to_string()));
    }

    #[test]
    fn test_int_and_bool_text() {
        assert_eq!(Cell::Int(1800).as_text(), Some("1800".to_string()));
        assert_eq!(Cell::Bool(true).as_text(), Some("true".to_string()));
    }

    #[test]
    fn test_datetime_text() {
        let dt = NaiveDate::from_ymd_opt(2020, 5, 16)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();
        assert_eq!(
            Cell::DateTime(dt).as_text(),
            Some("2020-05-16 18:00:00".to_string())
        );
    }

    #[test]
    fn test_text_is_verbatim() {
        // Leading zeros in time tokens must survive
        assert_eq!(Cell::from("0600").as_text(), Some("0600".to_string()));
    }

    #[test]
    fn test_from_calamine_data() {
        assert_eq!(Cell::from(&Data::Empty), Cell::Empty);
        assert_eq!(Cell::from(&Data::Int(70)), Cell::Int(70));
        assert_eq!(Cell::from(&Data::Float(25.1)), Cell::Float(25.1));
        assert_eq!(
            Cell::from(&Data::String("HU".to_string())),
            Cell::Text("HU".to_string())
        );
    }

    #[test]
    fn test_from_empty_str() {
        assert_eq!(Cell::from(""), Cell::Empty);
    }
}

//! Compass-suffixed coordinate parsing
//!
//! Archive exports write positions as a magnitude followed by a hemisphere
//! letter ("25.1N", "80.3W"). These helpers turn them into signed decimal
//! degrees, with south and west negative.
use thiserror::Error;

use super::cell::Cell;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("Invalid direction '{direction}' in coordinate '{value}' (expected N, S, E or W)")]
    InvalidDirection { value: String, direction: char },

    #[error("Invalid magnitude in coordinate '{value}'")]
    InvalidMagnitude { value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(Direction::North),
            'S' => Some(Direction::South),
            'E' => Some(Direction::East),
            'W' => Some(Direction::West),
            _ => None,
        }
    }

    pub fn sign(self) -> f64 {
        match self {
            Direction::North | Direction::East => 1.0,
            Direction::South | Direction::West => -1.0,
        }
    }
}

/// Parse "25.1N" style text into signed degrees
///
/// # Examples
///
/// ```
/// use hurricane_track_cleaner::track::parse_coordinate;
///
/// assert_eq!(parse_coordinate("25.1N").unwrap(), 25.1);
/// assert_eq!(parse_coordinate("80.3W").unwrap(), -80.3);
/// assert!(parse_coordinate("80.3").is_err());
/// ```
pub fn parse_coordinate(value: &str) -> Result<f64, CoordinateError> {
    let trimmed = value.trim();

    let direction_char = trimmed
        .chars()
        .next_back()
        .ok_or_else(|| CoordinateError::InvalidMagnitude {
            value: value.to_string(),
        })?;

    let direction =
        Direction::from_char(direction_char).ok_or_else(|| CoordinateError::InvalidDirection {
            value: value.to_string(),
            direction: direction_char,
        })?;

    // "25.1 N" is accepted: whitespace before the letter is not significant
    let prefix = trimmed[..trimmed.len() - direction_char.len_utf8()].trim();
    let magnitude = prefix
        .parse::<f64>()
        .ok()
        .filter(|m| m.is_finite())
        .ok_or_else(|| CoordinateError::InvalidMagnitude {
            value: value.to_string(),
        })?;

    Ok(direction.sign() * magnitude)
}

/// Normalize a Latitude/Longitude cell; absent cells stay absent rather than 0.0
pub fn normalize_cell(cell: &Cell) -> Result<Option<f64>, CoordinateError> {
    cell.as_text().map(|text| parse_coordinate(&text)).transpose()
}

/// Render degrees the way the cleaned CSV expects: always with a decimal point
pub fn format_degrees(degrees: f64) -> String {
    if degrees.fract() == 0.0 {
        format!("{degrees:.1}")
    } else {
        degrees.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_north_positive() {
        assert_eq!(parse_coordinate("25.1N").unwrap(), 25.1);
    }

    #[test]
    fn test_south_negative() {
        assert_eq!(parse_coordinate("25.1S").unwrap(), -25.1);
    }

    #[test]
    fn test_west_negative() {
        assert_eq!(parse_coordinate("80.3W").unwrap(), -80.3);
    }

    #[test]
    fn test_east_positive() {
        assert_eq!(parse_coordinate("80.3E").unwrap(), 80.3);
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        assert_eq!(parse_coordinate("  27.0N ").unwrap(), 27.0);
    }

    #[test]
    fn test_space_before_direction() {
        assert_eq!(parse_coordinate("25.1 N").unwrap(), 25.1);
        assert_eq!(parse_coordinate("80.3 W").unwrap(), -80.3);
    }

    #[test]
    fn test_integer_magnitude() {
        assert_eq!(parse_coordinate("100W").unwrap(), -100.0);
    }

    #[test]
    fn test_lowercase_direction_rejected() {
        assert_eq!(
            parse_coordinate("25.1n"),
            Err(CoordinateError::InvalidDirection {
                value: "25.1n".to_string(),
                direction: 'n',
            })
        );
    }

    #[test]
    fn test_missing_direction_rejected() {
        assert!(matches!(
            parse_coordinate("25.1"),
            Err(CoordinateError::InvalidDirection { direction: '1', .. })
        ));
    }

    #[test]
    fn test_bad_magnitude_rejected() {
        assert!(matches!(
            parse_coordinate("2x.1N"),
            Err(CoordinateError::InvalidMagnitude { .. })
        ));
    }

    #[test]
    fn test_direction_only_rejected() {
        assert!(matches!(
            parse_coordinate("N"),
            Err(CoordinateError::InvalidMagnitude { .. })
        ));
    }

    #[test]
    fn test_non_finite_magnitude_rejected() {
        assert!(matches!(
            parse_coordinate("infN"),
            Err(CoordinateError::InvalidMagnitude { .. })
        ));
        assert!(matches!(
            parse_coordinate("NaNS"),
            Err(CoordinateError::InvalidMagnitude { .. })
        ));
    }

    #[test]
    fn test_multibyte_suffix_rejected() {
        assert!(matches!(
            parse_coordinate("25.1°"),
            Err(CoordinateError::InvalidDirection { direction: '°', .. })
        ));
    }

    #[test]
    fn test_absent_cell_is_none_not_zero() {
        assert_eq!(normalize_cell(&Cell::Empty).unwrap(), None);
        assert_eq!(normalize_cell(&Cell::from("  ")).unwrap(), None);
    }

    #[test]
    fn test_present_cell_is_parsed() {
        assert_eq!(normalize_cell(&Cell::from("15.0S")).unwrap(), Some(-15.0));
    }

    #[test]
    fn test_numeric_cell_without_suffix_rejected() {
        assert!(normalize_cell(&Cell::Float(25.1)).is_err());
    }

    #[test]
    fn test_format_degrees() {
        assert_eq!(format_degrees(25.1), "25.1");
        assert_eq!(format_degrees(-80.3), "-80.3");
        assert_eq!(format_degrees(25.0), "25.0");
        assert_eq!(format_degrees(-100.0), "-100.0");
    }
}

use std::env;
use std::path::PathBuf;

use crate::pipeline::CoordinatePolicy;

pub const DEFAULT_INPUT_PATH: &str = "data/Hurricane Dataset.xlsx";
pub const DEFAULT_OUTPUT_PATH: &str = "Cleaned_Hurricane_Dataset.csv";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub coordinate_policy: CoordinatePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            coordinate_policy: CoordinatePolicy::Fail,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup, falling back to defaults for unset keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let skip_invalid = match lookup("SKIP_INVALID_COORDINATES") {
            Some(value) => parse_flag("SKIP_INVALID_COORDINATES", &value)?,
            None => false,
        };

        Ok(Config {
            input_path: lookup("HURRICANE_INPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.input_path),
            output_path: lookup("HURRICANE_OUTPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
            coordinate_policy: if skip_invalid {
                CoordinatePolicy::SkipRow
            } else {
                CoordinatePolicy::Fail
            },
        })
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}

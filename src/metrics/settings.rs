use serde_json::{Map, Value};
use tracing::debug;

use crate::coerce;
use crate::error::{Error, Result};

pub const DEFAULT_METRIC_TYPE: &str = "gauge";
pub const DEFAULT_METRIC_NAME: &str = "flogo_metric";

const S_METRIC_TYPE: &str = "metricType";
const S_METRIC_NAME: &str = "metricName";
const S_INCLUDE_HELP: &str = "includeHelp";
const S_INCLUDE_TYPE: &str = "includeType";
const S_TIMESTAMP: &str = "timestamp";
const S_LOG_FORMAT: &str = "logFormat";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub metric_type: String,
    pub metric_name: String,
    pub include_help: bool,
    pub include_type: bool,
    pub timestamp: bool,
    /// Return the newline-separated rendering instead of the single line.
    pub log_format: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            metric_type: DEFAULT_METRIC_TYPE.to_string(),
            metric_name: DEFAULT_METRIC_NAME.to_string(),
            include_help: true,
            include_type: true,
            timestamp: false,
            log_format: false,
        }
    }
}

impl Settings {
    /// `null` means all defaults; anything other than an object is rejected.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(values) => Self::from_map(values),
            other => Err(Error::settings(format!(
                "metric settings must be an object, got {}",
                coerce::kind_of(other)
            ))),
        }
    }

    /// Missing, null, empty or uncoercible entries fall back to defaults;
    /// only a non-scalar metric name or type is an error.
    pub fn from_map(values: &Map<String, Value>) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            metric_type: string_setting(values, S_METRIC_TYPE)?
                .unwrap_or(defaults.metric_type),
            metric_name: string_setting(values, S_METRIC_NAME)?
                .unwrap_or(defaults.metric_name),
            include_help: bool_setting(values, S_INCLUDE_HELP, defaults.include_help),
            include_type: bool_setting(values, S_INCLUDE_TYPE, defaults.include_type),
            timestamp: bool_setting(values, S_TIMESTAMP, defaults.timestamp),
            log_format: bool_setting(values, S_LOG_FORMAT, defaults.log_format),
        })
    }
}

fn string_setting(values: &Map<String, Value>, key: &str) -> Result<Option<String>> {
    match values.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => match coerce::to_string(value) {
            Some(s) if s.is_empty() => Ok(None),
            Some(s) => Ok(Some(s)),
            None => Err(Error::settings(format!(
                "invalid '{}' setting, expected string, got {}",
                key,
                coerce::kind_of(value)
            ))),
        },
    }
}

fn bool_setting(values: &Map<String, Value>, key: &str, default: bool) -> bool {
    match values.get(key) {
        None | Some(Value::Null) => default,
        Some(value) => coerce::to_bool(value).unwrap_or_else(|| {
            debug!(setting = key, %value, default, "uncoercible boolean setting, using default");
            default
        }),
    }
}

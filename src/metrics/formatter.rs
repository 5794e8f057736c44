use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::exposition::Exposition;
use super::labels::{escape_label_value, Labels, NAME_LABEL};
use super::sample::SampleValue;
use super::settings::Settings;
use crate::coerce;
use crate::error::{Error, Result};
use crate::utils::time::{self, Timestamp};

pub const DEFAULT_HELP: &str = "Generated metric from JSON data";

/// Field names that configure the output and never become labels or samples.
/// Compared case-insensitively.
pub const RESERVED_FIELDS: [&str; 3] = ["help", "timestamp", "type"];

const HELP_FIELD: &str = "help";
const TIMESTAMP_FIELD: &str = "timestamp";
const METRICS_FIELD: &str = "metrics";

/// Turns JSON documents into Prometheus text exposition lines.
///
/// Every numeric field of a metric object becomes one sample line named
/// after the configured metric and tagged with `name="<field>"`; every other
/// scalar field becomes a label shared by all samples of that object.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    settings: Settings,
}

impl Formatter {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// `data` is either a single metric object or carries an array of them
    /// under `metrics`. Broken array elements are skipped; a broken single
    /// object is an error.
    pub fn format(&self, data: &Map<String, Value>) -> Result<Exposition> {
        let mut exposition = Exposition::new();
        let name = &self.settings.metric_name;

        if self.settings.include_help {
            exposition.push(format!("# HELP {} {}", name, help_text(data)));
        }
        if self.settings.include_type {
            exposition.push(format!("# TYPE {} {}", name, self.settings.metric_type));
        }

        match data.get(METRICS_FIELD) {
            Some(Value::Array(items)) => {
                for (index, item) in items.iter().enumerate() {
                    let object = match item {
                        Value::Object(object) => object,
                        other => {
                            warn!(
                                index,
                                kind = coerce::kind_of(other),
                                "skipping metrics entry that is not an object"
                            );
                            continue;
                        }
                    };
                    match self.format_object(object) {
                        Ok(lines) => exposition.extend(lines),
                        Err(e) => warn!(index, error = %e, "skipping metrics entry"),
                    }
                }
            }
            _ => exposition.extend(self.format_object(data)?),
        }

        debug!(
            lines = exposition.len(),
            "generated prometheus metric:\n{}",
            exposition.to_multiline()
        );
        Ok(exposition)
    }

    /// Sample lines for one metric object.
    pub fn format_object(&self, object: &Map<String, Value>) -> Result<Vec<String>> {
        let timestamp = if self.settings.timestamp {
            Some(timestamp_of(object))
        } else {
            None
        };

        let mut keys: Vec<&String> = object.keys().collect();
        keys.sort();

        let mut labels = Labels::new();
        let mut samples = Vec::new();
        for key in keys.iter().filter(|key| !is_reserved(key)) {
            let value = &object[key.as_str()];
            match SampleValue::from_json(value) {
                Some(sample) => samples.push((*key, sample)),
                None => {
                    if let Some(text) = label_text(value) {
                        labels.push(key, text);
                    }
                }
            }
        }

        if samples.is_empty() {
            return Err(Error::format(format!(
                "no numeric value found in metric object. Available fields: [{}]",
                keys.iter()
                    .map(|k| k.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }

        let encoded_labels = labels.encode();
        Ok(samples
            .into_iter()
            .map(|(field, value)| {
                let mut line = format!(
                    "{}{{{}=\"{}\"",
                    self.settings.metric_name,
                    NAME_LABEL,
                    escape_label_value(field)
                );
                if !labels.is_empty() {
                    line.push(',');
                    line.push_str(&encoded_labels);
                }
                line.push_str(&format!("}} {}", value));
                if let Some(ts) = timestamp {
                    line.push_str(&format!(" {}", ts));
                }
                line
            })
            .collect())
    }
}

pub fn is_reserved(field: &str) -> bool {
    RESERVED_FIELDS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(field))
}

fn help_text(data: &Map<String, Value>) -> String {
    data.get(HELP_FIELD)
        .and_then(coerce::to_string)
        .unwrap_or_else(|| DEFAULT_HELP.to_string())
}

// Arrays and objects keep their compact JSON text; null has no label form.
fn label_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
        other => coerce::to_string(other),
    }
}

fn timestamp_of(object: &Map<String, Value>) -> Timestamp {
    let field = match object.get(TIMESTAMP_FIELD) {
        Some(field) => field,
        None => return time::now(),
    };

    if let Some(ts) = coerce::to_i64(field) {
        return ts;
    }
    if let Some(ts) = field.as_str().and_then(time::try_parse_rfc3339) {
        return ts;
    }

    debug!(%field, "unusable timestamp field, using current time");
    time::now()
}

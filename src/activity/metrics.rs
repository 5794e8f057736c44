use std::borrow::Cow;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use super::{to_output, Activity};
use crate::coerce;
use crate::error::{Error, Result};
use crate::metrics::{Formatter, Settings};

const IV_METRIC_DATA: &str = "metricData";

#[derive(Debug, Clone, PartialEq)]
pub struct MetricsInput<'a> {
    /// `None` when the host passed no data at all.
    pub metric_data: Option<Cow<'a, Map<String, Value>>>,
}

impl<'a> MetricsInput<'a> {
    pub fn from_map(values: &'a Map<String, Value>) -> Result<Self> {
        let metric_data = match values.get(IV_METRIC_DATA) {
            None | Some(Value::Null) => None,
            Some(value) => Some(coerce::to_object(value).ok_or_else(|| {
                Error::input(format!(
                    "invalid '{}' input type, expected object, got {}",
                    IV_METRIC_DATA,
                    coerce::kind_of(value)
                ))
            })?),
        };
        Ok(Self { metric_data })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsOutput {
    #[serde(rename = "prometheusMetric")]
    pub prometheus_metric: String,
}

/// Converts a JSON document into Prometheus text exposition.
#[derive(Debug, Default)]
pub struct MetricsActivity {
    formatter: Formatter,
}

impl MetricsActivity {
    pub fn new(settings: Settings) -> Self {
        Self {
            formatter: Formatter::new(settings),
        }
    }

    pub fn from_settings(settings: &Value) -> Result<Self> {
        Ok(Self::new(Settings::from_value(settings)?))
    }

    pub fn eval_input(&self, input: &MetricsInput) -> Result<MetricsOutput> {
        let data = match &input.metric_data {
            Some(data) => data,
            None => {
                warn!("no metric data provided");
                return Ok(MetricsOutput {
                    prometheus_metric: String::new(),
                });
            }
        };

        let exposition = self.formatter.format(data)?;
        let prometheus_metric = if self.formatter.settings().log_format {
            exposition.to_multiline()
        } else {
            exposition.to_single_line()
        };
        Ok(MetricsOutput { prometheus_metric })
    }
}

impl Activity for MetricsActivity {
    fn name(&self) -> &'static str {
        "metrics"
    }

    fn eval(&self, input: &Map<String, Value>) -> Result<Value> {
        let input = MetricsInput::from_map(input)?;
        to_output(&self.eval_input(&input)?)
    }
}

//! Host-facing adapters. Each activity is built once from its settings and
//! then evaluated against any number of JSON inputs.

mod metrics;
mod primes;
mod render;
mod schema;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, ErrorKind, Result};

pub use self::metrics::{MetricsActivity, MetricsInput, MetricsOutput};
pub use self::primes::{PrimesActivity, PrimesInput, PrimesOutput};
pub use self::render::{RenderActivity, RenderInput, RenderOutput, RenderSettings};
pub use self::schema::{SchemaActivity, SchemaInput};

pub trait Activity {
    fn name(&self) -> &'static str;

    fn eval(&self, input: &Map<String, Value>) -> Result<Value>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Primes,
    Render,
    Schema,
    Metrics,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Primes => "primes",
            ActivityKind::Render => "render",
            ActivityKind::Schema => "schema",
            ActivityKind::Metrics => "metrics",
        }
    }
}

impl FromStr for ActivityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "primes" => Ok(ActivityKind::Primes),
            "render" => Ok(ActivityKind::Render),
            "schema" => Ok(ActivityKind::Schema),
            "metrics" => Ok(ActivityKind::Metrics),
            _ => Err(Error::input(format!(
                "unknown activity '{}', expected one of primes, render, schema, metrics",
                s
            ))),
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub fn build(kind: ActivityKind, settings: &Value) -> Result<Box<dyn Activity>> {
    Ok(match kind {
        ActivityKind::Primes => Box::new(PrimesActivity::new()),
        ActivityKind::Render => Box::new(RenderActivity::new(RenderSettings::from_value(
            settings,
        )?)),
        ActivityKind::Schema => Box::new(SchemaActivity::new()),
        ActivityKind::Metrics => Box::new(MetricsActivity::from_settings(settings)?),
    })
}

fn to_output<T: Serialize>(output: &T) -> Result<Value> {
    serde_json::to_value(output)
        .map_err(|e| Error::with_source(ErrorKind::Io, "output serialization failed", e))
}

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::{to_output, Activity};
use crate::coerce;
use crate::error::{Error, Result};
use crate::primes;

const IV_START: &str = "start";
const IV_END: &str = "end";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimesInput {
    pub start: i64,
    pub end: i64,
}

impl PrimesInput {
    pub fn from_map(values: &Map<String, Value>) -> Result<Self> {
        Ok(Self {
            start: required_int(values, IV_START)?,
            end: required_int(values, IV_END)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimesOutput {
    pub primes: Vec<i64>,
}

#[derive(Debug, Default)]
pub struct PrimesActivity;

impl PrimesActivity {
    pub fn new() -> Self {
        PrimesActivity
    }

    pub fn eval_input(&self, input: PrimesInput) -> PrimesOutput {
        PrimesOutput {
            primes: primes::generate(input.start, input.end),
        }
    }
}

impl Activity for PrimesActivity {
    fn name(&self) -> &'static str {
        "primes"
    }

    fn eval(&self, input: &Map<String, Value>) -> Result<Value> {
        let input = PrimesInput::from_map(input)?;
        let output = self.eval_input(input);
        debug!(
            start = input.start,
            end = input.end,
            found = output.primes.len(),
            "primes generated"
        );
        to_output(&output)
    }
}

fn required_int(values: &Map<String, Value>, key: &str) -> Result<i64> {
    match values.get(key) {
        None | Some(Value::Null) => Err(Error::input(format!("'{}' input is missing", key))),
        Some(value) => coerce::to_exact_i64(value).ok_or_else(|| {
            Error::input(format!(
                "invalid '{}' input type, expected int, got {}",
                key,
                coerce::kind_of(value)
            ))
        }),
    }
}

use std::io::{Read, Write};

use serde_json::{Map, Value};
use tracing::info;

use crate::activity::{self, Activity};
use crate::cliopt::CliOpt;
use crate::coerce;
use crate::error::{Error, ErrorKind, Result};

// input JSON (--input | reader) -> Activity::eval -> output JSON + '\n' -> writer

pub struct Runner {
    activity: Box<dyn Activity>,
    input: Option<Value>,
}

impl Runner {
    pub fn new(activity: Box<dyn Activity>, input: Option<Value>) -> Self {
        Self { activity, input }
    }

    pub fn from_opt(opt: &CliOpt) -> Result<Self> {
        let settings = opt.settings.clone().unwrap_or(Value::Null);
        Ok(Self::new(
            activity::build(opt.activity, &settings)?,
            opt.input.clone(),
        ))
    }

    /// `reader` is consulted only when no input was given up front.
    pub fn run<R: Read, W: Write>(&self, reader: R, mut writer: W) -> Result<()> {
        let input = match &self.input {
            Some(value) => input_map(value.clone())?,
            None => read_input(reader)?,
        };

        info!(activity = self.activity.name(), "evaluating activity");
        let output = self.activity.eval(&input)?;

        serde_json::to_writer(&mut writer, &output)
            .map_err(|e| Error::with_source(ErrorKind::Io, "writer failed", e))?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

fn read_input<R: Read>(mut reader: R) -> Result<Map<String, Value>> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;

    if buf.trim().is_empty() {
        return Ok(Map::new());
    }

    let value = serde_json::from_str(&buf)
        .map_err(|e| Error::with_source(ErrorKind::Input, "input parsing failed", e))?;
    input_map(value)
}

fn input_map(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::input(format!(
            "input must be a JSON object, got {}",
            coerce::kind_of(&other)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{ActivityKind, PrimesActivity};
    use serde_json::json;

    fn run(runner: &Runner, stdin: &str) -> Result<String> {
        let mut out = Vec::new();
        runner.run(stdin.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_run_reads_stdin() -> Result<()> {
        let runner = Runner::new(Box::new(PrimesActivity::new()), None);

        assert_eq!(
            "{\"primes\":[2,3,5,7]}\n",
            run(&runner, "{\"start\": 2, \"end\": 10}")?
        );
        Ok(())
    }

    #[test]
    fn test_run_prefers_inline_input() -> Result<()> {
        let runner = Runner::new(
            activity::build(ActivityKind::Primes, &Value::Null)?,
            Some(json!({"start": 10, "end": 20})),
        );

        assert_eq!("{\"primes\":[11,13,17,19]}\n", run(&runner, "not even json")?);
        Ok(())
    }

    #[test]
    fn test_run_empty_stdin_is_empty_input() -> Result<()> {
        let runner = Runner::new(activity::build(ActivityKind::Metrics, &Value::Null)?, None);

        assert_eq!("{\"prometheusMetric\":\"\"}\n", run(&runner, " \n")?);
        Ok(())
    }

    #[test]
    fn test_run_invalid_input() {
        let runner = Runner::new(Box::new(PrimesActivity::new()), None);

        #[rustfmt::skip]
        let tests = [
            ("{\"start\": 1",            "input parsing failed"),
            ("[1, 2]",                   "input must be a JSON object, got array"),
            ("{\"end\": 3}",             "'start' input is missing"),
        ];

        for (stdin, expected) in &tests {
            let err = run(&runner, stdin).unwrap_err();
            assert_eq!(ErrorKind::Input, err.kind());
            assert_eq!(*expected, err.message());
        }
    }
}

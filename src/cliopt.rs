use serde_json::Value;
use structopt::StructOpt;

use crate::activity::ActivityKind;
use crate::error::{Error, ErrorKind, Result};

#[derive(Debug, StructOpt)]
#[structopt(name = "flowlets", about = "flowlets command line arguments")]
pub struct CliOpt {
    /// One of primes, render, schema, metrics.
    pub activity: ActivityKind,

    /// Activity settings as a JSON object.
    #[structopt(long = "settings", short = "s", parse(try_from_str = parse_json))]
    pub settings: Option<Value>,

    /// Activity input as a JSON object. Read from stdin when omitted.
    #[structopt(long = "input", short = "i", parse(try_from_str = parse_json))]
    pub input: Option<Value>,

    #[structopt(short = "v", parse(from_occurrences))]
    pub verbose: u8,
}

impl CliOpt {
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn parse_json(s: &str) -> Result<Value> {
    serde_json::from_str(s).map_err(|e| Error::with_source(ErrorKind::Input, "JSON parsing failed", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cliopt() {
        let opt = CliOpt::from_iter(&[
            "flowlets",
            "metrics",
            "--settings",
            r#"{"metricName": "cpu"}"#,
            "-i",
            r#"{"metricData": {"usage": 1}}"#,
            "-vv",
        ]);

        assert_eq!(ActivityKind::Metrics, opt.activity);
        assert_eq!(Some(json!({"metricName": "cpu"})), opt.settings);
        assert_eq!(Some(json!({"metricData": {"usage": 1}})), opt.input);
        assert_eq!("debug", opt.log_level());
    }

    #[test]
    fn test_cliopt_defaults() {
        let opt = CliOpt::from_iter(&["flowlets", "primes"]);

        assert_eq!(ActivityKind::Primes, opt.activity);
        assert!(opt.settings.is_none());
        assert!(opt.input.is_none());
        assert_eq!("warn", opt.log_level());
    }

    #[test]
    fn test_cliopt_rejects_bad_arguments() {
        assert!(CliOpt::from_iter_safe(&["flowlets", "fibonacci"]).is_err());
        assert!(CliOpt::from_iter_safe(&["flowlets", "render", "-s", "{oops"]).is_err());
    }
}

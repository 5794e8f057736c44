use minijinja::Environment;
use serde_json::{Map, Number, Value};
use tracing::debug;

use super::filters::{floatformat, rewrite_filter_args};
use crate::coerce;
use crate::error::{Error, ErrorKind, Result};

/// Renders Jinja/Django-style templates against a JSON variable map.
#[derive(Debug, Default, Clone)]
pub struct Renderer {
    coerce_strings: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also turn `"true"`, `"42"` and `"4.2"` style strings into booleans
    /// and numbers before rendering.
    pub fn coerce_strings(mut self, coerce_strings: bool) -> Self {
        self.coerce_strings = coerce_strings;
        self
    }

    pub fn render(&self, template: &str, variables: &Map<String, Value>) -> Result<String> {
        let source = rewrite_filter_args(template);
        let context = self.normalize(variables);

        let env = environment();
        let compiled = env
            .template_from_str(&source)
            .map_err(|e| Error::with_source(ErrorKind::Template, "template parsing failed", e))?;

        let rendered = compiled
            .render(&context)
            .map_err(|e| Error::with_source(ErrorKind::Template, "template execution failed", e))?;

        debug!(
            variables = context.len(),
            output_len = rendered.len(),
            "template rendered"
        );
        Ok(rendered)
    }

    fn normalize(&self, variables: &Map<String, Value>) -> Map<String, Value> {
        variables
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(s) if self.coerce_strings => coerce_string(s),
                    _ => value.clone(),
                };
                (key.clone(), normalize_number(value))
            })
            .collect()
    }
}

pub fn render(template: &str, variables: &Map<String, Value>) -> Result<String> {
    Renderer::new().render(template, variables)
}

/// Replaces integral top-level floats with integers so `15.0` renders as
/// `15` and compares equal to the literal `15`.
pub fn normalize(variables: &Map<String, Value>) -> Map<String, Value> {
    Renderer::new().normalize(variables)
}

fn environment<'source>() -> Environment<'source> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.add_filter("floatformat", floatformat);
    env
}

fn normalize_number(value: Value) -> Value {
    let whole = match &value {
        Value::Number(n) if n.is_f64() => n.as_f64().and_then(coerce::integral),
        _ => None,
    };
    match whole {
        Some(i) => Value::Number(Number::from(i)),
        None => value,
    }
}

fn coerce_string(s: &str) -> Value {
    if s.is_empty() {
        return Value::String(String::new());
    }
    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Number(Number::from(i));
    }
    match s.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::String(s.to_string()),
    }
}

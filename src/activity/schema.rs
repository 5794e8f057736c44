use serde_json::{json, Map, Value};
use tracing::debug;

use super::render::template_input;
use super::{to_output, Activity};
use crate::error::Result;
use crate::template::infer_schema;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaInput<'a> {
    pub template: &'a str,
}

impl<'a> SchemaInput<'a> {
    pub fn from_map(values: &'a Map<String, Value>) -> Result<Self> {
        Ok(Self {
            template: template_input(values)?,
        })
    }
}

/// Derives a JSON-Schema for the variables a template expects.
#[derive(Debug, Default)]
pub struct SchemaActivity;

impl SchemaActivity {
    pub fn new() -> Self {
        SchemaActivity
    }

    pub fn eval_input(&self, input: SchemaInput) -> Result<Value> {
        match infer_schema(input.template) {
            Some(schema) => {
                debug!(properties = schema.properties.len(), "schema inferred");
                to_output(&schema)
            }
            None => Ok(json!({})),
        }
    }
}

impl Activity for SchemaActivity {
    fn name(&self) -> &'static str {
        "schema"
    }

    fn eval(&self, input: &Map<String, Value>) -> Result<Value> {
        self.eval_input(SchemaInput::from_map(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn eval(input: Value) -> Result<Value> {
        match input {
            Value::Object(map) => SchemaActivity::new().eval(&map),
            _ => panic!("test input must be an object"),
        }
    }

    #[test]
    fn test_eval() -> Result<()> {
        let output = eval(json!({
            "template": "{% if is_member %}{{ total|floatformat:2 }}{% endif %}"
        }))?;

        assert_eq!("http://json-schema.org/draft-04/schema#", output["$schema"]);
        assert_eq!("object", output["type"]);
        assert_eq!("number", output["properties"]["total"]["type"]);
        assert!(output["properties"].get("is_member").is_none());
        Ok(())
    }

    #[test]
    fn test_eval_empty_template() -> Result<()> {
        assert_eq!(json!({}), eval(json!({"template": ""}))?);
        Ok(())
    }

    #[test]
    fn test_eval_missing_template() {
        let err = eval(json!({})).unwrap_err();

        assert_eq!(ErrorKind::Input, err.kind());
        assert_eq!("'template' input is missing", err.message());
    }
}

use std::borrow::Cow;

use serde::Serialize;
use serde_json::{Map, Value};

use super::{to_output, Activity};
use crate::coerce;
use crate::error::{Error, Result};
use crate::template::Renderer;

const S_COERCE_STRINGS: &str = "coerceStrings";
const IV_TEMPLATE: &str = "template";
const IV_VARIABLES: &str = "variables";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    pub coerce_strings: bool,
}

impl RenderSettings {
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(values) => Ok(Self {
                coerce_strings: values
                    .get(S_COERCE_STRINGS)
                    .and_then(coerce::to_bool)
                    .unwrap_or(false),
            }),
            other => Err(Error::settings(format!(
                "render settings must be an object, got {}",
                coerce::kind_of(other)
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderInput<'a> {
    pub template: &'a str,
    pub variables: Cow<'a, Map<String, Value>>,
}

impl<'a> RenderInput<'a> {
    pub fn from_map(values: &'a Map<String, Value>) -> Result<Self> {
        Ok(Self {
            template: template_input(values)?,
            variables: match values.get(IV_VARIABLES) {
                None | Some(Value::Null) => Cow::Owned(Map::new()),
                Some(value) => coerce::to_object(value).ok_or_else(|| {
                    Error::input(format!(
                        "invalid '{}' input type, expected object, got {}",
                        IV_VARIABLES,
                        coerce::kind_of(value)
                    ))
                })?,
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderOutput {
    pub result: String,
}

#[derive(Debug, Default)]
pub struct RenderActivity {
    renderer: Renderer,
}

impl RenderActivity {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            renderer: Renderer::new().coerce_strings(settings.coerce_strings),
        }
    }

    pub fn eval_input(&self, input: &RenderInput) -> Result<RenderOutput> {
        Ok(RenderOutput {
            result: self.renderer.render(input.template, &input.variables)?,
        })
    }
}

impl Activity for RenderActivity {
    fn name(&self) -> &'static str {
        "render"
    }

    fn eval(&self, input: &Map<String, Value>) -> Result<Value> {
        let input = RenderInput::from_map(input)?;
        to_output(&self.eval_input(&input)?)
    }
}

pub(super) fn template_input(values: &Map<String, Value>) -> Result<&str> {
    match values.get(IV_TEMPLATE) {
        None | Some(Value::Null) => Err(Error::input(format!("'{}' input is missing", IV_TEMPLATE))),
        Some(Value::String(template)) => Ok(template.as_str()),
        Some(other) => Err(Error::input(format!(
            "invalid '{}' input type, expected string, got {}",
            IV_TEMPLATE,
            coerce::kind_of(other)
        ))),
    }
}

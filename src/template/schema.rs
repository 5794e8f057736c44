use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

pub const SCHEMA_DIALECT: &str = "http://json-schema.org/draft-04/schema#";

const NUMERIC_NAME_PATTERNS: &[&str] = &[
    "age", "count", "number", "num", "amount", "price", "cost", "year", "month", "day",
    "experience", "years", "months", "days", "quantity", "size", "length", "width", "height",
    "score", "rating", "level", "rank", "percentage", "percent", "total", "sum", "average",
    "min", "max", "id", "index", "position", "order", "sequence", "version",
];

const BOOLEAN_NAME_PATTERNS: &[&str] = &[
    "is_", "has_", "can_", "should_", "will_", "was_", "are_", "enabled", "disabled",
    "active", "inactive", "valid", "invalid", "visible", "hidden", "public", "private",
    "available", "unavailable", "allowed", "denied", "confirmed", "verified",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VarType {
    Array,
    Number,
    Boolean,
    String,
}

impl VarType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VarType::Array => "array",
            VarType::Number => "number",
            VarType::Boolean => "boolean",
            VarType::String => "string",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    #[serde(rename = "$schema")]
    pub dialect: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub properties: BTreeMap<String, Property>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    #[serde(rename = "type")]
    pub kind: VarType,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Items>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Items {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub additional_properties: bool,
}

/// Names interpolated via `{{ name }}` (filters stripped), deduplicated, in
/// order of first appearance.
pub fn template_variables(template: &str) -> Vec<String> {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"\{\{\s*([^}|]+)(?:\|[^}]*)?\s*\}\}").unwrap();
    }

    let mut variables: Vec<String> = Vec::new();
    for caps in RE.captures_iter(template) {
        let name = caps[1].trim();
        if !name.is_empty() && !variables.iter().any(|v| v == name) {
            variables.push(name.to_string());
        }
    }
    variables
}

/// Sources of `{% for x in SOURCE %}` loops.
pub fn loop_sources(template: &str) -> Vec<String> {
    lazy_static! {
        static ref RE: Regex =
            Regex::new(r"\{%\s*for\s+\w+\s+in\s+([a-zA-Z_][a-zA-Z0-9_]*)\s*%\}").unwrap();
    }

    let mut sources: Vec<String> = Vec::new();
    for caps in RE.captures_iter(template) {
        let name = &caps[1];
        if !sources.iter().any(|s| s == name) {
            sources.push(name.to_string());
        }
    }
    sources
}

/// Best-effort input schema for `template`. Types are guessed from how a
/// variable is used and what it is called; `None` for an empty template.
pub fn infer_schema(template: &str) -> Option<Schema> {
    if template.is_empty() {
        return None;
    }

    let arrays = loop_sources(template);
    let mut variables = template_variables(template);
    for source in &arrays {
        if !variables.contains(source) {
            variables.push(source.clone());
        }
    }

    let properties = variables
        .into_iter()
        .map(|name| {
            let kind = classify(&name, template, &arrays);
            let property = match kind {
                VarType::Array => Property {
                    kind,
                    description: format!("Array variable used in for loop: {{{{ {} }}}}", name),
                    items: Some(Items {
                        kind: "object",
                        additional_properties: true,
                    }),
                },
                _ => Property {
                    kind,
                    description: format!(
                        "Template variable: {{{{ {} }}}} (detected as {})",
                        name,
                        kind.as_str()
                    ),
                    items: None,
                },
            };
            (name, property)
        })
        .collect();

    Some(Schema {
        dialect: SCHEMA_DIALECT,
        kind: "object",
        properties,
    })
}

// array-usage -> numeric name -> numeric usage -> boolean name -> string
fn classify(name: &str, template: &str, arrays: &[String]) -> VarType {
    if arrays.iter().any(|a| a == name) {
        return VarType::Array;
    }

    let lower = name.to_lowercase();
    if NUMERIC_NAME_PATTERNS.iter().any(|p| lower.contains(p)) {
        return VarType::Number;
    }
    if used_as_number(name, template) {
        return VarType::Number;
    }
    if BOOLEAN_NAME_PATTERNS.iter().any(|p| lower.contains(p)) {
        return VarType::Boolean;
    }
    VarType::String
}

fn used_as_number(name: &str, template: &str) -> bool {
    let name = regex::escape(name);
    let patterns = [
        format!(r"\{{%\s*(?:if|elif)\s+{}\s*[><=!]+\s*\d+", name),
        format!(r"\{{\{{\s*{}\s*\|\s*floatformat", name),
    ];

    patterns.iter().any(|p| match Regex::new(p) {
        Ok(re) => re.is_match(template),
        Err(_) => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_variables() {
        let tests = [
            ("Hello {{ name }}! You are {{ age }} years old.", vec!["name", "age"]),
            ("{{ a }}{{b}}{{ a }}", vec!["a", "b"]),
            ("{{ price|floatformat:2 }} {{ title | upper }}", vec!["price", "title"]),
            ("{% for item in items %}{{ item.name }}{% endfor %}", vec!["item.name"]),
            ("no variables here", vec![]),
        ];

        for (input, expected) in &tests {
            assert_eq!(*expected, template_variables(input), "while scanning {}", input);
        }
    }

    #[test]
    fn test_loop_sources() {
        let template = "{% for item in items %}{{ item }}{% endfor %}\
                        {% for u in users %}{% endfor %}{% for i in items %}{% endfor %}";

        assert_eq!(vec!["items", "users"], loop_sources(template));
        assert!(loop_sources("{{ items }}").is_empty());
    }

    #[test]
    fn test_classify_precedence() {
        let template = "{% for user_count in users %}{% endfor %}\
                        {% if tier > 3 %}{% endif %}{{ score|floatformat }}";
        let arrays = loop_sources(template);

        #[rustfmt::skip]
        let tests = [
            ("users",        VarType::Array),
            ("item_count",   VarType::Number),
            ("tier",         VarType::Number),
            ("is_ready",     VarType::Boolean),
            ("enabled",      VarType::Boolean),
            // numeric name wins over boolean name
            ("is_max",       VarType::Number),
            ("name",         VarType::String),
            ("title",        VarType::String),
        ];

        for (name, expected) in &tests {
            assert_eq!(*expected, classify(name, template, &arrays), "while classifying {}", name);
        }
    }

    #[test]
    fn test_used_as_number() {
        assert!(used_as_number("level", "{% if level >= 2 %}x{% endif %}"));
        assert!(used_as_number("tier", "{% if a %}{% elif tier != 0 %}{% endif %}"));
        assert!(used_as_number("tier", "{% if tier == 15 %}{% endif %}"));
        assert!(used_as_number("tier", "{{ tier | floatformat:1 }}"));
        assert!(!used_as_number("tier", "{% if tier == 'gold' %}{% endif %}"));
        assert!(!used_as_number("tier", "{{ tier }}"));
        assert!(!used_as_number("a.b", "{% if axb > 1 %}{% endif %}"));
    }

    #[test]
    fn test_infer_schema() {
        let schema = infer_schema(
            "Hello {{ name }}! You are {{ age }} years old.\
             {% for item in items %}{{ item.title }}{% endfor %}",
        )
        .unwrap();

        assert_eq!(
            json!({
                "$schema": "http://json-schema.org/draft-04/schema#",
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Template variable: {{ name }} (detected as string)"
                    },
                    "age": {
                        "type": "number",
                        "description": "Template variable: {{ age }} (detected as number)"
                    },
                    "item.title": {
                        "type": "string",
                        "description": "Template variable: {{ item.title }} (detected as string)"
                    },
                    "items": {
                        "type": "array",
                        "description": "Array variable used in for loop: {{ items }}",
                        "items": {"type": "object", "additionalProperties": true}
                    }
                }
            }),
            serde_json::to_value(&schema).unwrap()
        );
    }

    #[test]
    fn test_infer_schema_empty_template() {
        assert!(infer_schema("").is_none());

        let schema = infer_schema("static text").unwrap();
        assert!(schema.properties.is_empty());
    }
}

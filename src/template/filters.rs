use std::borrow::Cow;
use std::convert::TryFrom;

use lazy_static::lazy_static;
use minijinja::value::{Value, ValueKind};
use regex::{Captures, Regex};

/// Rewrites Django-style filter arguments (`x|floatformat:2`) into call
/// syntax (`x|floatformat(2)`). Only text inside `{{ }}` and `{% %}` tags is
/// touched; `{% raw %}` blocks are left as they are.
pub(super) fn rewrite_filter_args(template: &str) -> Cow<str> {
    lazy_static! {
        static ref TAG: Regex = Regex::new(
            r"(?s)(?P<raw>\{%-?\s*raw\s*-?%\}.*?\{%-?\s*endraw\s*-?%\})|\{\{.*?\}\}|\{%.*?%\}"
        )
        .unwrap();
        static ref FILTER_ARG: Regex = Regex::new(
            r#"\|\s*([A-Za-z_][A-Za-z0-9_]*)\s*:\s*("[^"]*"|'[^']*'|[-+]?[A-Za-z0-9_.]+)"#
        )
        .unwrap();
    }

    TAG.replace_all(template, |caps: &Captures| {
        if caps.name("raw").is_some() {
            return caps[0].to_string();
        }
        FILTER_ARG.replace_all(&caps[0], "|$1($2)").into_owned()
    })
}

/// Django's `floatformat`. Without an argument (or with a negative one) the
/// decimals are dropped for integral values; a non-negative argument always
/// prints exactly that many decimals. Non-numeric input yields "".
pub(super) fn floatformat(value: Value, places: Option<i64>) -> String {
    let number = match value.kind() {
        ValueKind::Number => f64::try_from(value).ok(),
        ValueKind::String => value.as_str().and_then(|s| s.trim().parse::<f64>().ok()),
        _ => None,
    };
    let number = match number {
        Some(n) if n.is_finite() => n,
        _ => return String::new(),
    };

    let places = places.unwrap_or(-1);
    if places < 0 && number.fract() == 0.0 {
        format!("{:.0}", number)
    } else {
        format!("{:.*}", places.unsigned_abs() as usize, number)
    }
}

/// Synthetic label carrying the JSON field a sample was read from.
pub const NAME_LABEL: &str = "name";

pub type LabelName = String;

pub type LabelValue = String;

/// Ordered label pairs of one metric object, rendered as `k1="v1",k2="v2"`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Labels(Vec<(LabelName, LabelValue)>);

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanitizes `name`; `value` is stored raw and escaped on encoding.
    /// A name equal to `NAME_LABEL` is prefixed with `_` so it never
    /// clashes with the synthetic field label.
    pub fn push<N, V>(&mut self, name: N, value: V)
    where
        N: AsRef<str>,
        V: Into<LabelValue>,
    {
        let mut name = sanitize_label_name(name.as_ref());
        if name == NAME_LABEL {
            name.insert(0, '_');
        }
        self.0.push((name, value.into()));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LabelName, &LabelValue)> {
        self.0.iter().map(|(name, value)| (name, value))
    }

    pub fn encode(&self) -> String {
        self.iter()
            .map(|(name, value)| format!("{}=\"{}\"", name, escape_label_value(value)))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Label names must match `[a-zA-Z_][a-zA-Z0-9_]*`; every offending
/// character is replaced with `_`.
pub fn sanitize_label_name(name: &str) -> LabelName {
    name.chars()
        .enumerate()
        .map(|(i, c)| match c {
            'a'..='z' | 'A'..='Z' | '_' => c,
            '0'..='9' if i > 0 => c,
            _ => '_',
        })
        .collect()
}

pub fn escape_label_value(value: &str) -> LabelValue {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

mod exposition;
mod formatter;
mod labels;
mod sample;
mod settings;

pub use exposition::Exposition;
pub use formatter::{is_reserved, Formatter, DEFAULT_HELP, RESERVED_FIELDS};
pub use labels::{
    escape_label_value, sanitize_label_name, LabelName, LabelValue, Labels, NAME_LABEL,
};
pub use sample::SampleValue;
pub use settings::{Settings, DEFAULT_METRIC_NAME, DEFAULT_METRIC_TYPE};

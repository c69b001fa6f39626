use std::collections::HashMap;

use chrono::Utc;

use super::Value;

/// Length of a formatted date or time component, mirroring the
/// `dateStyle` / `timeStyle` named arguments of the `DATETIME` built-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateTimeStyle {
    Full,
    Long,
    Medium,
    Short,
}

impl DateTimeStyle {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "full" => Some(Self::Full),
            "long" => Some(Self::Long),
            "medium" => Some(Self::Medium),
            "short" => Some(Self::Short),
            _ => None,
        }
    }
}

/// Formatting options carried by a [`DateTime`] value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DateTimeOptions {
    pub date_style: Option<DateTimeStyle>,
    pub time_style: Option<DateTimeStyle>,
}

impl DateTimeOptions {
    /// Merge named call-expression arguments into these options.
    ///
    /// Style values may be strings or bare keywords; unknown names and
    /// unrecognized styles are ignored.
    pub fn merge(&mut self, named: &HashMap<String, Value>) {
        for (name, value) in named {
            let style = match value {
                Value::String(s) => DateTimeStyle::from_name(s),
                Value::Keyword(s) => DateTimeStyle::from_name(s),
                _ => None,
            };
            let Some(style) = style else {
                continue;
            };
            match name.as_str() {
                "dateStyle" => self.date_style = Some(style),
                "timeStyle" => self.time_style = Some(style),
                _ => {}
            }
        }
    }
}

/// A wall-clock instant with formatting options.
#[derive(Debug, Clone, PartialEq)]
pub struct DateTime {
    pub value: chrono::DateTime<Utc>,
    pub options: DateTimeOptions,
}

impl DateTime {
    /// Create a date-time with default options.
    pub fn new(value: chrono::DateTime<Utc>) -> Self {
        Self { value, options: DateTimeOptions::default() }
    }

    /// Create a date-time with explicit options.
    pub fn with_options(value: chrono::DateTime<Utc>, options: DateTimeOptions) -> Self {
        Self { value, options }
    }
}

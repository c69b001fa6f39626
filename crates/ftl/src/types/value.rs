use chrono::Utc;

use super::{DateTime, Number};
use crate::resolver::MessageContext;

/// Stringification of a value with no usable content.
pub(crate) const NO_VALUE: &str = "???";

/// A runtime value produced and consumed by the resolver.
///
/// The set is closed: every expression in a message tree resolves to
/// exactly one of these variants. `None` is the non-fatal "no value"
/// sentinel; consumers receiving it propagate it instead of failing.
/// `Parts` is the un-joined output of pattern resolution, kept flat so a
/// nested pattern can be measured and spliced into its parent without
/// being joined twice.
///
/// # Example
///
/// ```
/// use ftl::{MessageContext, Value};
///
/// let ctx = MessageContext::new("en-US");
/// let value: Value = 3.into();
/// assert_eq!(value.value_of(&ctx), "3");
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    /// A raw string (literal fragments, unwrapped keywords).
    String(String),
    /// A number with formatting options.
    Number(Number),
    /// A wall-clock instant with formatting options.
    DateTime(DateTime),
    /// An identifier used for matching variant keys.
    Keyword(String),
    /// The "no value" sentinel, with an optional fallback hint.
    None(Option<String>),
    /// An un-joined sequence of fragments from pattern resolution.
    Parts(Vec<Value>),
}

impl Value {
    /// The `None` sentinel with no hint; stringifies to `"???"`.
    pub fn none() -> Self {
        Value::None(None)
    }

    /// The `None` sentinel carrying a fallback hint, typically the name
    /// that failed to resolve.
    pub fn none_with_hint(hint: impl Into<String>) -> Self {
        Value::None(Some(hint.into()))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Final stringification using the context's formatters.
    ///
    /// `None` yields its hint or `"???"`; `Parts` joins the
    /// stringification of each fragment.
    pub fn value_of(&self, ctx: &MessageContext) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Number(n) => ctx.format_number(n),
            Value::DateTime(d) => ctx.format_datetime(d),
            Value::Keyword(name) => name.clone(),
            Value::None(hint) => hint.clone().unwrap_or_else(|| NO_VALUE.to_string()),
            Value::Parts(parts) => {
                let mut output = String::new();
                for part in parts {
                    output.push_str(&part.value_of(ctx));
                }
                output
            }
        }
    }

    /// Whether this value, used as a selector, matches a variant key.
    ///
    /// Keywords and strings match keyword keys by equality. A number
    /// selector matches a keyword key when the key equals either the
    /// number's plain textual form or its plural category in the
    /// context's locale; number keys match by numeric equality.
    pub fn matches(&self, ctx: &MessageContext, key: &Value) -> bool {
        match (self, key) {
            (Value::Keyword(selector), Value::Keyword(key)) => selector == key,
            (Value::String(selector), Value::Keyword(key)) => selector == key,
            (Value::Number(selector), Value::Keyword(key)) => {
                if *key == selector.as_string() {
                    return true;
                }
                ctx.plural_category(selector).is_some_and(|category| category == key.as_str())
            }
            (Value::Number(selector), Value::Number(key)) => selector.value == key.value,
            _ => false,
        }
    }
}

// From implementations for the supported external argument kinds

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(Number::new(n as f64))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::new(n as f64))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(Number::new(n as f64))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(Number::new(n as f64))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(Number::new(n as f64))
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(Number::new(n as f64))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(Number::new(n))
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<chrono::DateTime<Utc>> for Value {
    fn from(instant: chrono::DateTime<Utc>) -> Self {
        Value::DateTime(DateTime::new(instant))
    }
}

impl From<DateTime> for Value {
    fn from(d: DateTime) -> Self {
        Value::DateTime(d)
    }
}

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Value;

/// Formatting options carried by a [`Number`] value.
///
/// The option names mirror the named arguments accepted by the `NUMBER`
/// built-in (`minimumIntegerDigits`, `minimumFractionDigits`,
/// `maximumFractionDigits`). A number literal such as `3.14` infers
/// `minimum_fraction_digits` from its textual form, so the digits the
/// translator wrote survive formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NumberOptions {
    pub minimum_integer_digits: Option<usize>,
    pub minimum_fraction_digits: Option<usize>,
    pub maximum_fraction_digits: Option<usize>,
}

impl NumberOptions {
    /// Merge named call-expression arguments into these options.
    ///
    /// Values may be numbers or digit strings; unknown names and
    /// non-numeric values are ignored.
    pub fn merge(&mut self, named: &HashMap<String, Value>) {
        for (name, value) in named {
            let digits = match value {
                Value::Number(n) if n.value >= 0.0 => Some(n.value as usize),
                Value::String(s) => s.parse::<usize>().ok(),
                _ => None,
            };
            let Some(digits) = digits else {
                continue;
            };
            match name.as_str() {
                "minimumIntegerDigits" => self.minimum_integer_digits = Some(digits),
                "minimumFractionDigits" => self.minimum_fraction_digits = Some(digits),
                "maximumFractionDigits" => self.maximum_fraction_digits = Some(digits),
                _ => {}
            }
        }
    }
}

/// A numeric runtime value with formatting options.
///
/// # Example
///
/// ```
/// use ftl::Number;
///
/// let n: Number = "1.50".parse().unwrap();
/// assert_eq!(n.value, 1.5);
/// assert_eq!(n.options.minimum_fraction_digits, Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Number {
    pub value: f64,
    pub options: NumberOptions,
}

impl Number {
    /// Create a number with default options.
    pub fn new(value: f64) -> Self {
        Self { value, options: NumberOptions::default() }
    }

    /// Create a number with explicit options.
    pub fn with_options(value: f64, options: NumberOptions) -> Self {
        Self { value, options }
    }

    /// Locale-independent stringification, used for exact variant-key
    /// matching. Integral values render without a fraction part.
    pub fn as_string(&self) -> String {
        if self.value.fract() == 0.0 && self.value.abs() < 1e15 {
            format!("{}", self.value as i64)
        } else {
            self.value.to_string()
        }
    }
}

/// Parse error for [`Number::from_str`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidNumber;

impl FromStr for Number {
    type Err = InvalidNumber;

    /// Parses a decimal literal, inferring `minimum_fraction_digits` from
    /// the digits after the decimal point.
    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let value: f64 = source.parse().map_err(|_| InvalidNumber)?;
        let mut options = NumberOptions::default();
        if let Some((_, fraction)) = source.split_once('.') {
            options.minimum_fraction_digits = Some(fraction.len());
        }
        Ok(Self { value, options })
    }
}

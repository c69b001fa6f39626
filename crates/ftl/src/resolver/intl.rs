//! Per-context memoization of locale-sensitive formatters.
//!
//! Constructing a formatter is expensive relative to running it, so each
//! context caches one formatter per distinct `(kind, options)` pair. The
//! cache grows monotonically and is never evicted; the context itself is
//! the eviction boundary. Access goes through a mutex so a context can be
//! shared across threads.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use icu_locale_core::{locale, Locale};
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};

use crate::types::{DateTime, DateTimeOptions, DateTimeStyle, Number, NumberOptions};

/// Cache key: a formatter kind plus its canonical options.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum IntlKey {
    PluralRules,
    NumberFormat(NumberOptions),
    DateTimeFormat(DateTimeOptions),
}

enum IntlFormatter {
    Plural(Option<PluralRules>),
    Number(NumberFormat),
    DateTime(DateTimeFormat),
}

/// Memoizes locale-sensitive formatters for a single context.
#[derive(Default)]
pub(crate) struct IntlMemoizer {
    cache: Mutex<HashMap<IntlKey, Arc<IntlFormatter>>>,
}

impl IntlMemoizer {
    fn memoize(&self, locale: &str, key: IntlKey) -> Arc<IntlFormatter> {
        let mut cache = self.cache.lock().expect("formatter cache lock poisoned");
        if let Some(formatter) = cache.get(&key) {
            return Arc::clone(formatter);
        }
        tracing::trace!(?key, locale, "constructing formatter");
        let formatter = Arc::new(construct(locale, &key));
        cache.insert(key, Arc::clone(&formatter));
        formatter
    }

    /// CLDR plural category name for a number in the given locale.
    ///
    /// Returns `None` when plural rules are unavailable for the locale.
    pub fn plural_category(&self, locale: &str, n: f64) -> Option<&'static str> {
        match self.memoize(locale, IntlKey::PluralRules).as_ref() {
            IntlFormatter::Plural(Some(rules)) => Some(category_name(rules.category_for(n as i64))),
            _ => None,
        }
    }

    pub fn format_number(&self, locale: &str, n: &Number) -> String {
        match self.memoize(locale, IntlKey::NumberFormat(n.options.clone())).as_ref() {
            IntlFormatter::Number(format) => format.format(n.value),
            _ => n.as_string(),
        }
    }

    pub fn format_datetime(&self, locale: &str, d: &DateTime) -> String {
        match self.memoize(locale, IntlKey::DateTimeFormat(d.options.clone())).as_ref() {
            IntlFormatter::DateTime(format) => format.format(&d.value),
            _ => d.value.to_rfc3339(),
        }
    }
}

fn construct(locale: &str, key: &IntlKey) -> IntlFormatter {
    match key {
        IntlKey::PluralRules => {
            let loc: Locale = locale.parse().unwrap_or_else(|_| locale!("en"));
            let rules =
                PluralRules::try_new(loc.into(), PluralRuleType::Cardinal.into()).ok();
            IntlFormatter::Plural(rules)
        }
        IntlKey::NumberFormat(options) => {
            IntlFormatter::Number(NumberFormat::new(options.clone()))
        }
        IntlKey::DateTimeFormat(options) => {
            IntlFormatter::DateTime(DateTimeFormat::new(options.clone()))
        }
    }
}

fn category_name(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}

/// Renders numbers honoring the digit options.
struct NumberFormat {
    options: NumberOptions,
}

impl NumberFormat {
    fn new(options: NumberOptions) -> Self {
        Self { options }
    }

    fn format(&self, value: f64) -> String {
        let mut output = match self.options.maximum_fraction_digits {
            Some(max) => format!("{value:.max$}"),
            None => {
                if value.fract() == 0.0 && value.abs() < 1e15 {
                    format!("{}", value as i64)
                } else {
                    value.to_string()
                }
            }
        };

        // The minimum never exceeds an explicit maximum.
        let minimum_fraction = match (
            self.options.minimum_fraction_digits,
            self.options.maximum_fraction_digits,
        ) {
            (Some(min), Some(max)) => Some(min.min(max)),
            (min, _) => min,
        };
        if let Some(min) = minimum_fraction {
            let current = output.split('.').nth(1).map_or(0, str::len);
            if current < min {
                if current == 0 {
                    output.push('.');
                }
                for _ in current..min {
                    output.push('0');
                }
            }
        }

        if let Some(min) = self.options.minimum_integer_digits {
            let start = usize::from(output.starts_with('-'));
            let integer_len = output[start..].split('.').next().map_or(0, str::len);
            if integer_len < min {
                output.insert_str(start, &"0".repeat(min - integer_len));
            }
        }

        output
    }
}

/// Renders instants through a chrono format string derived from the
/// date/time styles.
struct DateTimeFormat {
    format: String,
}

impl DateTimeFormat {
    fn new(options: DateTimeOptions) -> Self {
        let date = options.date_style.map(|style| match style {
            DateTimeStyle::Full => "%A, %B %-d, %Y",
            DateTimeStyle::Long => "%B %-d, %Y",
            DateTimeStyle::Medium => "%b %-d, %Y",
            DateTimeStyle::Short => "%-m/%-d/%y",
        });
        let time = options.time_style.map(|style| match style {
            DateTimeStyle::Full | DateTimeStyle::Long | DateTimeStyle::Medium => "%H:%M:%S",
            DateTimeStyle::Short => "%H:%M",
        });
        let format = match (date, time) {
            (Some(date), Some(time)) => format!("{date}, {time}"),
            (Some(date), None) => date.to_string(),
            (None, Some(time)) => time.to_string(),
            (None, None) => "%b %-d, %Y".to_string(),
        };
        Self { format }
    }

    fn format(&self, value: &chrono::DateTime<Utc>) -> String {
        value.format(&self.format).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_format_pads_minimum_fraction_digits() {
        let format = NumberFormat::new(NumberOptions {
            minimum_fraction_digits: Some(2),
            ..NumberOptions::default()
        });
        assert_eq!(format.format(3.0), "3.00");
        assert_eq!(format.format(3.5), "3.50");
        assert_eq!(format.format(3.125), "3.125");
    }

    #[test]
    fn number_format_rounds_to_maximum_fraction_digits() {
        let format = NumberFormat::new(NumberOptions {
            maximum_fraction_digits: Some(1),
            ..NumberOptions::default()
        });
        assert_eq!(format.format(3.25), "3.2");
        assert_eq!(format.format(3.0), "3.0");
    }

    #[test]
    fn number_format_pads_integer_digits() {
        let format = NumberFormat::new(NumberOptions {
            minimum_integer_digits: Some(3),
            ..NumberOptions::default()
        });
        assert_eq!(format.format(7.0), "007");
        assert_eq!(format.format(-7.0), "-007");
        assert_eq!(format.format(1234.0), "1234");
    }

    #[test]
    fn plural_categories_for_english() {
        let memoizer = IntlMemoizer::default();
        assert_eq!(memoizer.plural_category("en-US", 1.0), Some("one"));
        assert_eq!(memoizer.plural_category("en-US", 2.0), Some("other"));
    }

    #[test]
    fn plural_categories_for_russian() {
        let memoizer = IntlMemoizer::default();
        assert_eq!(memoizer.plural_category("ru", 1.0), Some("one"));
        assert_eq!(memoizer.plural_category("ru", 2.0), Some("few"));
        assert_eq!(memoizer.plural_category("ru", 5.0), Some("many"));
    }

    #[test]
    fn unparseable_locale_falls_back_to_english_rules() {
        let memoizer = IntlMemoizer::default();
        assert_eq!(memoizer.plural_category("not a locale", 1.0), Some("one"));
    }
}

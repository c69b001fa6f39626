//! Integration tests for built-in and user-supplied functions.

use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use ftl::{
    DateTime, DateTimeOptions, DateTimeStyle, FluentFunction, MessageContext, Number,
    NumberOptions, Value, args,
};

fn context(source: &str) -> MessageContext {
    let mut ctx = MessageContext::builder()
        .locale("en-US")
        .use_isolating(false)
        .build();
    let errors = ctx.add_messages(source);
    assert!(errors.is_empty(), "unexpected parse errors: {errors:?}");
    ctx
}

// =============================================================================
// NUMBER
// =============================================================================

#[test]
fn number_merges_fraction_digits() {
    let ctx = context("pi = { NUMBER($x, minimumFractionDigits: 2) }");
    let mut errors = Vec::new();
    let message = ctx.get_message("pi").unwrap();
    let output = ctx.format(message, Some(&args! { "x" => 3 }), &mut errors).unwrap();
    assert_eq!(output, "3.00");
    assert!(errors.is_empty());
}

#[test]
fn number_rounds_with_maximum_fraction_digits() {
    let ctx = context("short = { NUMBER($x, maximumFractionDigits: 1) }");
    let mut errors = Vec::new();
    let message = ctx.get_message("short").unwrap();
    let output = ctx.format(message, Some(&args! { "x" => 2.25 }), &mut errors).unwrap();
    assert_eq!(output, "2.2");
}

#[test]
fn number_wrapped_selector_still_matches_plurals() {
    let ctx = context("n = { NUMBER($x) -> *[one] one [other] other }");
    let message = ctx.get_message("n").unwrap();
    let mut errors = Vec::new();

    let one = ctx.format(message, Some(&args! { "x" => 1 }), &mut errors).unwrap();
    assert_eq!(one, "one");
    let two = ctx.format(message, Some(&args! { "x" => 2 }), &mut errors).unwrap();
    assert_eq!(two, "other");
    assert!(errors.is_empty());
}

#[test]
fn number_call_merges_into_argument_options() {
    // The argument arrives with its own fraction digits; the call adds
    // integer padding without disturbing them.
    let ctx = context("n = { NUMBER($x, minimumIntegerDigits: 3) }");
    let mut errors = Vec::new();
    let message = ctx.get_message("n").unwrap();
    let x = Number::with_options(
        1.5,
        NumberOptions { minimum_fraction_digits: Some(2), ..NumberOptions::default() },
    );
    let output = ctx.format(message, Some(&args! { "x" => x }), &mut errors).unwrap();
    assert_eq!(output, "001.50");
    assert!(errors.is_empty());
}

#[test]
fn number_propagates_missing_argument() {
    let ctx = context("pi = { NUMBER($gone) }");
    let mut errors = Vec::new();
    let message = ctx.get_message("pi").unwrap();
    let output = ctx.format(message, None, &mut errors).unwrap();
    // The argument error is recorded; NUMBER passes the sentinel through.
    assert_eq!(output, "gone");
    assert_eq!(errors.len(), 1);
}

// =============================================================================
// DATETIME
// =============================================================================

#[test]
fn datetime_formats_with_default_style() {
    let ctx = context("when = { DATETIME($date) }");
    let mut errors = Vec::new();
    let message = ctx.get_message("when").unwrap();
    let date = Utc.with_ymd_and_hms(2024, 12, 11, 13, 5, 0).unwrap();
    let output = ctx.format(message, Some(&args! { "date" => date }), &mut errors).unwrap();
    assert_eq!(output, "Dec 11, 2024");
    assert!(errors.is_empty());
}

#[test]
fn datetime_merges_style_options() {
    let ctx = context(r#"when = { DATETIME($date, dateStyle: "short", timeStyle: "short") }"#);
    let mut errors = Vec::new();
    let message = ctx.get_message("when").unwrap();
    let date = Utc.with_ymd_and_hms(2024, 12, 11, 13, 5, 0).unwrap();
    let output = ctx.format(message, Some(&args! { "date" => date }), &mut errors).unwrap();
    assert_eq!(output, "12/11/24, 13:05");
}

#[test]
fn preconfigured_datetime_argument_keeps_its_options() {
    // An already-wrapped runtime value passes through the argument bag
    // unchanged, so its styles apply without a DATETIME call.
    let ctx = context("when = { $at }");
    let mut errors = Vec::new();
    let message = ctx.get_message("when").unwrap();
    let at = DateTime::with_options(
        Utc.with_ymd_and_hms(2024, 12, 11, 13, 5, 0).unwrap(),
        DateTimeOptions { time_style: Some(DateTimeStyle::Short), ..DateTimeOptions::default() },
    );
    let output = ctx.format(message, Some(&args! { "at" => at }), &mut errors).unwrap();
    assert_eq!(output, "13:05");
    assert!(errors.is_empty());
}

#[test]
fn bare_datetime_argument_formats_directly() {
    let ctx = context("when = { $date }");
    let mut errors = Vec::new();
    let message = ctx.get_message("when").unwrap();
    let date = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    let output = ctx.format(message, Some(&args! { "date" => date }), &mut errors).unwrap();
    assert_eq!(output, "Jan 2, 2024");
}

// =============================================================================
// User-supplied functions
// =============================================================================

#[test]
fn user_function_is_callable() {
    let mut functions: HashMap<String, FluentFunction> = HashMap::new();
    functions.insert(
        "STRLEN".to_string(),
        Box::new(|positional: &[Value], _named: &HashMap<String, Value>| {
            match positional.first() {
                Some(Value::String(s)) => Value::from(s.chars().count()),
                _ => Value::none(),
            }
        }),
    );

    let mut ctx = MessageContext::builder()
        .locale("en-US")
        .use_isolating(false)
        .functions(functions)
        .build();
    ctx.add_messages(r#"len = { STRLEN("abcd") }"#);

    let mut errors = Vec::new();
    let message = ctx.get_message("len").unwrap();
    assert_eq!(ctx.format(message, None, &mut errors).as_deref(), Some("4"));
    assert!(errors.is_empty());
}

#[test]
fn user_function_overrides_builtin() {
    let mut functions: HashMap<String, FluentFunction> = HashMap::new();
    functions.insert(
        "NUMBER".to_string(),
        Box::new(|_positional: &[Value], _named: &HashMap<String, Value>| {
            Value::from("overridden")
        }),
    );

    let mut ctx = MessageContext::builder()
        .locale("en-US")
        .use_isolating(false)
        .functions(functions)
        .build();
    ctx.add_messages("n = { NUMBER($x) }");

    let mut errors = Vec::new();
    let message = ctx.get_message("n").unwrap();
    let output = ctx.format(message, Some(&args! { "x" => 7 }), &mut errors).unwrap();
    assert_eq!(output, "overridden");
}

//! Integration tests for basic message formatting.

use ftl::{MessageContext, args};

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
// Literals and references
// =============================================================================

#[test]
fn format_simple_literal() {
    let ctx = context("foo = Foo");
    let mut errors = Vec::new();
    let message = ctx.get_message("foo").unwrap();
    assert_eq!(ctx.format(message, None, &mut errors).as_deref(), Some("Foo"));
    assert!(errors.is_empty());
}

#[test]
fn format_message_reference() {
    let ctx = context("foo = Foo\nbar = { foo } Bar");
    let mut errors = Vec::new();
    let message = ctx.get_message("bar").unwrap();
    assert_eq!(ctx.format(message, None, &mut errors).as_deref(), Some("Foo Bar"));
    assert!(errors.is_empty());
}

#[test]
fn missing_reference_falls_back_to_name() {
    let ctx = context("baz = { missing }");
    let mut errors = Vec::new();
    let message = ctx.get_message("baz").unwrap();
    assert_eq!(ctx.format(message, None, &mut errors).as_deref(), Some("missing"));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), ftl::ErrorKind::Reference);
}

#[test]
fn format_external_argument() {
    let ctx = context("greet = Hello, { $name }!");
    let mut errors = Vec::new();
    let message = ctx.get_message("greet").unwrap();
    let output = ctx.format(message, Some(&args! { "name" => "World" }), &mut errors);
    assert_eq!(output.as_deref(), Some("Hello, World!"));
    assert!(errors.is_empty());
}

#[test]
fn format_number_argument() {
    let ctx = context("count = Count: { $n }");
    let mut errors = Vec::new();
    let message = ctx.get_message("count").unwrap();
    let output = ctx.format(message, Some(&args! { "n" => 42 }), &mut errors);
    assert_eq!(output.as_deref(), Some("Count: 42"));
    assert!(errors.is_empty());
}

#[test]
fn number_literal_keeps_fraction_digits() {
    let ctx = context("price = { 2.50 }");
    let mut errors = Vec::new();
    let message = ctx.get_message("price").unwrap();
    assert_eq!(ctx.format(message, None, &mut errors).as_deref(), Some("2.50"));
    assert!(errors.is_empty());
}

#[test]
fn string_literal_placeable() {
    let ctx = context(r#"quoted = { "literal text" }"#);
    let mut errors = Vec::new();
    let message = ctx.get_message("quoted").unwrap();
    assert_eq!(ctx.format(message, None, &mut errors).as_deref(), Some("literal text"));
}

// =============================================================================
// Attributes
// =============================================================================

#[test]
fn value_less_message_formats_to_none() {
    let ctx = context("foo\n  .attr = Foo Attr");
    let mut errors = Vec::new();
    let message = ctx.get_message("foo").unwrap();
    assert_eq!(ctx.format(message, None, &mut errors), None);
    assert!(errors.is_empty());

    let attr = message.attribute("attr").unwrap();
    assert_eq!(ctx.format_pattern(attr, None, &mut errors), "Foo Attr");
    assert!(errors.is_empty());
}

#[test]
fn attribute_reference_resolves() {
    let ctx = context("foo = Foo\n  .label = Foo Label\nbar = { foo.label }");
    let mut errors = Vec::new();
    let message = ctx.get_message("bar").unwrap();
    assert_eq!(ctx.format(message, None, &mut errors).as_deref(), Some("Foo Label"));
    assert!(errors.is_empty());
}

#[test]
fn missing_attribute_falls_back_to_message_value() {
    let ctx = context("foo = Foo\nbar = { foo.missing }");
    let mut errors = Vec::new();
    let message = ctx.get_message("bar").unwrap();
    assert_eq!(ctx.format(message, None, &mut errors).as_deref(), Some("Foo"));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), ftl::ErrorKind::Reference);
}

// =============================================================================
// Multi-line patterns
// =============================================================================

#[test]
fn multiline_pattern_joins_with_newlines() {
    let ctx = context("multi = Line one\n    Line two");
    let mut errors = Vec::new();
    let message = ctx.get_message("multi").unwrap();
    assert_eq!(
        ctx.format(message, None, &mut errors).as_deref(),
        Some("Line one\nLine two")
    );
}

#[test]
fn pattern_starting_on_continuation_line() {
    let ctx = context("multi =\n    First\n    Second");
    let mut errors = Vec::new();
    let message = ctx.get_message("multi").unwrap();
    assert_eq!(ctx.format(message, None, &mut errors).as_deref(), Some("First\nSecond"));
}

// =============================================================================
// Installation semantics
// =============================================================================

#[test]
fn add_messages_overwrites_duplicates() {
    let mut ctx = MessageContext::builder()
        .locale("en-US")
        .use_isolating(false)
        .build();
    ctx.add_messages("foo = First");
    ctx.add_messages("foo = Second");
    let mut errors = Vec::new();
    let message = ctx.get_message("foo").unwrap();
    assert_eq!(ctx.format(message, None, &mut errors).as_deref(), Some("Second"));
}

#[test]
fn has_message_reports_installed_entries() {
    let ctx = context("foo = Foo");
    assert!(ctx.has_message("foo"));
    assert!(!ctx.has_message("bar"));
}

#[test]
fn formatting_is_idempotent() {
    let ctx = context("baz = { missing } and { $absent }");
    let message = ctx.get_message("baz").unwrap();

    let mut first_errors = Vec::new();
    let first = ctx.format(message, None, &mut first_errors);
    let mut second_errors = Vec::new();
    let second = ctx.format(message, None, &mut second_errors);

    assert_eq!(first, second);
    assert_eq!(first_errors, second_errors);
    assert_eq!(first_errors.len(), 2);
}

#[test]
fn error_list_is_append_only() {
    let ctx = context("baz = { missing }\nok = Fine");
    let mut errors = Vec::new();

    let baz = ctx.get_message("baz").unwrap();
    ctx.format(baz, None, &mut errors);
    assert_eq!(errors.len(), 1);

    // A successful format call never removes prior errors.
    let ok = ctx.get_message("ok").unwrap();
    assert_eq!(ctx.format(ok, None, &mut errors).as_deref(), Some("Fine"));
    assert_eq!(errors.len(), 1);
}

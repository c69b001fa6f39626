//! The recursive resolution engine.
//!
//! Walks the runtime entry tree and evaluates every expression to a
//! [`Value`], with cycle-safe pattern expansion, variant selection,
//! argument coercion, and function dispatch. Failures append to the
//! scope's error list and yield a fallback value; resolution itself never
//! fails and never panics.

use std::collections::HashMap;

use crate::parser::{Argument, Expr, Message, Pattern, PatternElement, Variant, VariantKey};
use crate::resolver::builtins::BuiltinKind;
use crate::resolver::context::FluentFunction;
use crate::resolver::{FormatError, Scope};
use crate::types::Value;

/// Upper bound on the expansion of a single placeable, counted in scalar
/// characters over its flattened parts.
pub const MAX_PLACEABLE_LENGTH: usize = 2500;

/// First-strong isolate, opening bracket for placeable substitutions.
const FSI: char = '\u{2068}';
/// Pop directional isolate, the matching closing bracket.
const PDI: char = '\u{2069}';

/// Resolve a pattern to an un-joined `Parts` value.
///
/// The pattern node is held in the scope's dirty set for the duration of
/// its resolution; re-entering it means a cycle, which yields one range
/// error and a `None` part.
pub(crate) fn resolve_pattern(scope: &mut Scope<'_>, pattern: &Pattern) -> Value {
    if !scope.enter(pattern) {
        scope.add_error(FormatError::Range("Cyclic reference".to_string()));
        return Value::none();
    }

    let mut result: Vec<Value> = Vec::with_capacity(pattern.elements.len());
    for element in &pattern.elements {
        match element {
            PatternElement::Text(text) => result.push(Value::String(text.clone())),
            PatternElement::Placeable(expr) => {
                let part = resolve_expr(scope, expr);
                let isolating = scope.ctx.use_isolating();
                if isolating {
                    result.push(Value::String(FSI.to_string()));
                }
                match part {
                    Value::Parts(parts) => {
                        let length: usize =
                            parts.iter().map(|p| p.value_of(scope.ctx).chars().count()).sum();
                        if length > MAX_PLACEABLE_LENGTH {
                            scope.add_error(FormatError::Range(format!(
                                "Too many characters in placeable \
                                 ({length}, max allowed is {MAX_PLACEABLE_LENGTH})"
                            )));
                            result.push(Value::none());
                        } else {
                            result.extend(parts);
                        }
                    }
                    part => result.push(part),
                }
                if isolating {
                    result.push(Value::String(PDI.to_string()));
                }
            }
        }
    }

    scope.exit(pattern);
    Value::Parts(result)
}

/// Resolve any expression to a runtime value.
pub(crate) fn resolve_expr(scope: &mut Scope<'_>, expr: &Expr) -> Value {
    match expr {
        Expr::StringLiteral(s) => Value::String(s.clone()),
        Expr::NumberLiteral(n) => Value::Number(n.clone()),
        Expr::Keyword(name) => Value::Keyword(name.clone()),
        Expr::ExternalArgument(name) => resolve_external_argument(scope, name),
        Expr::MessageReference(name) => resolve_message_reference(scope, name),
        Expr::AttributeReference { id, name } => resolve_attribute_reference(scope, id, name),
        Expr::VariantReference { id, key } => resolve_variant_reference(scope, id, key),
        Expr::FunctionReference(name) => resolve_function_reference(scope, name),
        Expr::Call { function, args } => resolve_call(scope, function, args),
        Expr::Select { selector, variants, default } => {
            resolve_select(scope, selector.as_deref(), variants, *default)
        }
    }
}

/// Resolve a message entry for its value. A value-less message yields
/// `None` with a range error.
fn resolve_entry(scope: &mut Scope<'_>, message: &Message) -> Value {
    match &message.value {
        Some(pattern) => resolve_pattern(scope, pattern),
        None => {
            scope.add_error(FormatError::Range("No default".to_string()));
            Value::none()
        }
    }
}

fn resolve_message_reference(scope: &mut Scope<'_>, name: &str) -> Value {
    let ctx = scope.ctx;
    match ctx.get_message(name) {
        Some(message) => resolve_entry(scope, message),
        None => {
            scope.add_error(FormatError::Reference(format!("Unknown message: {name}")));
            Value::none_with_hint(name)
        }
    }
}

/// Resolve an attribute of a referenced message. A missing attribute
/// appends a reference error and falls back to the message's main value.
fn resolve_attribute_reference(scope: &mut Scope<'_>, id: &str, name: &str) -> Value {
    let ctx = scope.ctx;
    let Some(message) = ctx.get_message(id) else {
        scope.add_error(FormatError::Reference(format!("Unknown message: {id}")));
        return Value::none_with_hint(id);
    };
    match message.attribute(name) {
        Some(pattern) => resolve_pattern(scope, pattern),
        None => {
            scope.add_error(FormatError::Reference(format!("Unknown attribute: {name}")));
            resolve_entry(scope, message)
        }
    }
}

/// Resolve an explicit variant of a referenced message. Anything but a
/// matching key on a variant-list message falls back to the message's
/// default value with a reference error.
fn resolve_variant_reference(scope: &mut Scope<'_>, id: &str, key: &VariantKey) -> Value {
    let ctx = scope.ctx;
    let Some(message) = ctx.get_message(id) else {
        scope.add_error(FormatError::Reference(format!("Unknown message: {id}")));
        return Value::none_with_hint(id);
    };
    if let Some(variants) = message.variant_list() {
        let requested = variant_key_value(key);
        for variant in variants {
            if requested.matches(ctx, &variant_key_value(&variant.key)) {
                return resolve_pattern(scope, &variant.value);
            }
        }
    }
    scope.add_error(FormatError::Reference(format!("Unknown variant: {key}")));
    resolve_entry(scope, message)
}

/// Resolve an external argument from the argument bag.
fn resolve_external_argument(scope: &mut Scope<'_>, name: &str) -> Value {
    let Some(value) = scope.args.and_then(|args| args.get(name)) else {
        scope.add_error(FormatError::Reference(format!("Unknown external: {name}")));
        return Value::none_with_hint(name);
    };
    match value {
        // Parts is internal to pattern resolution and not a valid input.
        Value::Parts(_) => {
            scope.add_error(FormatError::Type(format!("Unsupported external type: {name}")));
            Value::none_with_hint(name)
        }
        value => value.clone(),
    }
}

/// A resolved callable: a user-supplied function or a built-in.
enum Callable<'a> {
    Builtin(BuiltinKind),
    User(&'a FluentFunction),
}

/// Look up a function, user registry first so user functions override
/// built-ins.
fn lookup_function<'a>(scope: &Scope<'a>, name: &str) -> Option<Callable<'a>> {
    if let Some(function) = scope.ctx.function(name) {
        return Some(Callable::User(function));
    }
    BuiltinKind::get(name).map(Callable::Builtin)
}

/// A bare function reference has no string form of its own; a missing one
/// additionally appends a reference error.
fn resolve_function_reference(scope: &mut Scope<'_>, name: &str) -> Value {
    if lookup_function(scope, name).is_none() {
        scope.add_error(FormatError::Reference(format!("Unknown function: {name}()")));
    }
    Value::none_with_hint(format!("{name}()"))
}

/// Resolve a call expression: split arguments into positional and named,
/// resolve each, and invoke the callable.
fn resolve_call(scope: &mut Scope<'_>, function: &str, args: &[Argument]) -> Value {
    let Some(callable) = lookup_function(scope, function) else {
        scope.add_error(FormatError::Reference(format!("Unknown function: {function}()")));
        return Value::none_with_hint(format!("{function}()"));
    };

    let mut positional = Vec::new();
    let mut named = HashMap::new();
    for arg in args {
        match arg {
            Argument::Positional(expr) => positional.push(resolve_expr(scope, expr)),
            Argument::Named { name, value } => {
                let value = resolve_expr(scope, value);
                named.insert(name.clone(), value);
            }
        }
    }

    match callable {
        Callable::Builtin(kind) => kind.execute(&positional, &named),
        Callable::User(function) => function(&positional, &named),
    }
}

/// Resolve a select expression per declaration order, falling back to the
/// default variant when the selector is absent, unresolved, or unmatched.
fn resolve_select(
    scope: &mut Scope<'_>,
    selector: Option<&Expr>,
    variants: &[Variant],
    default: usize,
) -> Value {
    let Some(selector) = selector else {
        return default_variant(scope, variants, default);
    };

    let selector = resolve_expr(scope, selector);
    if selector.is_none() {
        // The selector's own failure was already recorded.
        return default_variant(scope, variants, default);
    }

    let ctx = scope.ctx;
    for variant in variants {
        if selector.matches(ctx, &variant_key_value(&variant.key)) {
            return resolve_pattern(scope, &variant.value);
        }
    }
    default_variant(scope, variants, default)
}

fn default_variant(scope: &mut Scope<'_>, variants: &[Variant], default: usize) -> Value {
    match variants.get(default) {
        Some(variant) => resolve_pattern(scope, &variant.value),
        None => {
            scope.add_error(FormatError::Range("No default".to_string()));
            Value::none()
        }
    }
}

fn variant_key_value(key: &VariantKey) -> Value {
    match key {
        VariantKey::Keyword(name) => Value::Keyword(name.clone()),
        VariantKey::Number(n) => Value::Number(n.clone()),
    }
}

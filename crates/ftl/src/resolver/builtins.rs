//! Built-in formatting functions available to call expressions.
//!
//! The set is fixed and dispatched statically; user-supplied functions
//! with the same name take precedence at lookup time.

use std::collections::HashMap;

use crate::types::Value;

/// Built-in function identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinKind {
    /// `NUMBER(value, ...)` — wrap a number, merging digit options.
    Number,
    /// `DATETIME(value, ...)` — wrap an instant, merging style options.
    Datetime,
}

impl BuiltinKind {
    /// Look up a built-in by its call-expression name.
    pub fn get(name: &str) -> Option<BuiltinKind> {
        match name {
            "NUMBER" => Some(BuiltinKind::Number),
            "DATETIME" => Some(BuiltinKind::Datetime),
            _ => None,
        }
    }

    /// Execute the built-in over resolved arguments.
    ///
    /// A `None` first argument short-circuits; any other unsupported
    /// argument yields `None` hinted with the function name.
    pub fn execute(&self, positional: &[Value], named: &HashMap<String, Value>) -> Value {
        match self {
            BuiltinKind::Number => number(positional, named),
            BuiltinKind::Datetime => datetime(positional, named),
        }
    }
}

fn number(positional: &[Value], named: &HashMap<String, Value>) -> Value {
    match positional.first() {
        Some(Value::Number(n)) => {
            let mut n = n.clone();
            n.options.merge(named);
            Value::Number(n)
        }
        Some(none @ Value::None(_)) => none.clone(),
        _ => Value::none_with_hint("NUMBER()"),
    }
}

fn datetime(positional: &[Value], named: &HashMap<String, Value>) -> Value {
    match positional.first() {
        Some(Value::DateTime(d)) => {
            let mut d = d.clone();
            d.options.merge(named);
            Value::DateTime(d)
        }
        Some(none @ Value::None(_)) => none.clone(),
        _ => Value::none_with_hint("DATETIME()"),
    }
}

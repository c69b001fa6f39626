pub mod parser;
pub mod resolver;
pub mod types;

pub use parser::{Message, ParseError, Pattern, parse_resource};
pub use resolver::{
    BuiltinKind, ErrorKind, FluentFunction, FormatError, MAX_PLACEABLE_LENGTH, MessageContext,
};
pub use types::{DateTime, DateTimeOptions, DateTimeStyle, Number, NumberOptions, Value};

/// Creates a `HashMap<String, Value>` argument bag from key-value pairs.
///
/// Values are converted via `Into<Value>`, so integers, floats, strings,
/// and instants can be passed directly.
///
/// # Example
///
/// ```
/// use ftl::{args, Value};
///
/// let bag = args! { "count" => 3, "name" => "Alice" };
/// assert_eq!(bag.len(), 2);
/// assert!(matches!(bag["count"], Value::Number(_)));
/// assert_eq!(bag["name"].as_str(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! args {
    { $($key:expr => $value:expr),* $(,)? } => {
        [$(($key.to_string(), $crate::Value::from($value))),*]
            .into_iter()
            .collect::<::std::collections::HashMap<String, $crate::Value>>()
    };
}

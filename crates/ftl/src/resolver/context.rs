//! Long-lived message context.
//!
//! A context owns a locale, the installed messages, the user function
//! registry, the formatter cache, and the isolation flag. Messages and
//! functions are read-only once installed; only the formatter cache grows
//! during formatting, so a context can be shared across threads.

use std::collections::HashMap;

use bon::Builder;

use crate::parser::{self, Message, Pattern};
use crate::resolver::evaluator;
use crate::resolver::intl::IntlMemoizer;
use crate::resolver::{FormatError, Scope};
use crate::types::{DateTime, Number, Value};

/// A function callable from message call expressions.
///
/// Receives the resolved positional arguments and the named argument map,
/// and returns a runtime value. User functions registered under a
/// built-in's name override the built-in.
pub type FluentFunction =
    Box<dyn Fn(&[Value], &HashMap<String, Value>) -> Value + Send + Sync>;

/// A message context: the owner of everything one locale's messages need
/// to format.
///
/// # Example
///
/// ```
/// use ftl::{args, MessageContext};
///
/// let mut ctx = MessageContext::builder()
///     .locale("en-US")
///     .use_isolating(false)
///     .build();
/// ctx.add_messages("hello = Hello, { $name }!");
///
/// let message = ctx.get_message("hello").unwrap();
/// let mut errors = Vec::new();
/// let output = ctx.format(message, Some(&args! { "name" => "World" }), &mut errors);
/// assert_eq!(output.as_deref(), Some("Hello, World!"));
/// assert!(errors.is_empty());
/// ```
#[derive(Builder)]
#[builder(on(String, into))]
pub struct MessageContext {
    /// BCP-47 locale tag driving plural rules and formatters.
    locale: String,

    /// Wrap placeable substitutions in FSI/PDI bidi isolates.
    #[builder(default = true)]
    use_isolating: bool,

    /// User-supplied functions, looked up before built-ins.
    #[builder(default)]
    functions: HashMap<String, FluentFunction>,

    /// Installed messages by name.
    #[builder(skip)]
    messages: HashMap<String, Message>,

    /// Memoized locale-sensitive formatters.
    #[builder(skip)]
    intl: IntlMemoizer,
}

impl MessageContext {
    /// Create a context with default settings for a locale.
    pub fn new(locale: impl Into<String>) -> Self {
        MessageContext::builder().locale(locale.into()).build()
    }

    /// The context's locale tag.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Whether placeable substitutions are bracketed with bidi isolates.
    pub fn use_isolating(&self) -> bool {
        self.use_isolating
    }

    /// Parse a resource and install its entries, overwriting duplicates.
    ///
    /// Returns the syntax errors encountered; well-formed entries install
    /// regardless of errors in their neighbors.
    ///
    /// # Example
    ///
    /// ```
    /// use ftl::MessageContext;
    ///
    /// let mut ctx = MessageContext::new("en-US");
    /// let errors = ctx.add_messages("good = Good\n=== broken\nalso-good = Also good");
    /// assert_eq!(errors.len(), 1);
    /// assert!(ctx.has_message("good"));
    /// assert!(ctx.has_message("also-good"));
    /// ```
    pub fn add_messages(&mut self, source: &str) -> Vec<FormatError> {
        let (entries, errors) = parser::parse_resource(source);
        let installed = entries.len();
        for (name, message) in entries {
            self.messages.insert(name, message);
        }
        tracing::debug!(installed, errors = errors.len(), "installed messages");
        errors.into_iter().map(FormatError::from).collect()
    }

    /// The installed messages, by name.
    pub fn messages(&self) -> &HashMap<String, Message> {
        &self.messages
    }

    /// Look up a message by name.
    pub fn get_message(&self, name: &str) -> Option<&Message> {
        self.messages.get(name)
    }

    pub fn has_message(&self, name: &str) -> bool {
        self.messages.contains_key(name)
    }

    /// Format a message's value with the given arguments.
    ///
    /// Returns `None` without touching the error list when the message
    /// has no value (an attribute-only message referenced directly).
    /// Errors encountered during resolution are appended to `errors`; the
    /// returned string is always best-effort and this never fails.
    pub fn format(
        &self,
        message: &Message,
        args: Option<&HashMap<String, Value>>,
        errors: &mut Vec<FormatError>,
    ) -> Option<String> {
        let pattern = message.value.as_ref()?;
        Some(self.format_pattern(pattern, args, errors))
    }

    /// Format a bare pattern, such as an attribute's value.
    pub fn format_pattern(
        &self,
        pattern: &Pattern,
        args: Option<&HashMap<String, Value>>,
        errors: &mut Vec<FormatError>,
    ) -> String {
        let mut scope = Scope::new(self, args, errors);
        let value = evaluator::resolve_pattern(&mut scope, pattern);
        value.value_of(self)
    }

    pub(crate) fn function(&self, name: &str) -> Option<&FluentFunction> {
        self.functions.get(name)
    }

    pub(crate) fn format_number(&self, n: &Number) -> String {
        self.intl.format_number(&self.locale, n)
    }

    pub(crate) fn format_datetime(&self, d: &DateTime) -> String {
        self.intl.format_datetime(&self.locale, d)
    }

    pub(crate) fn plural_category(&self, n: &Number) -> Option<&'static str> {
        self.intl.plural_category(&self.locale, n.value)
    }
}

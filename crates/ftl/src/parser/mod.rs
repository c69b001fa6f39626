//! Parser for the textual message syntax.
//!
//! Produces the runtime entry tree the resolver consumes. The AST types
//! are public so tooling can construct or serialize pre-parsed resources.

pub mod ast;
pub mod error;
mod ftl;

pub use ast::{Argument, Attribute, Expr, Message, Pattern, PatternElement, Variant, VariantKey};
pub use error::ParseError;
pub use ftl::parse_resource;

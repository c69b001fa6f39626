//! Runtime value types.
//!
//! The resolver evaluates every expression to a [`Value`], a closed family
//! of typed runtime values with context-aware stringification and
//! selector/key matching.

mod datetime;
mod number;
mod value;

pub use datetime::{DateTime, DateTimeOptions, DateTimeStyle};
pub use number::{InvalidNumber, Number, NumberOptions};
pub use value::Value;

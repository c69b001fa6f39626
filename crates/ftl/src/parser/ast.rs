//! Runtime entry tree consumed by the resolver.
//!
//! These types are the contract between the parser and the resolver. They
//! serialize with serde so embedders can ship pre-parsed resources.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::types::Number;

/// A message entry: an optional value pattern plus named attributes.
///
/// A message may carry attributes without a value; formatting such a
/// message directly yields no output, while its attributes remain
/// addressable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub value: Option<Pattern>,
    pub attributes: Vec<Attribute>,
}

impl Message {
    /// Look up an attribute pattern by name, in insertion order.
    pub fn attribute(&self, name: &str) -> Option<&Pattern> {
        self.attributes.iter().find(|attr| attr.id == name).map(|attr| &attr.value)
    }

    /// The variants of this message, when its value is a variant list: a
    /// pattern whose single element is a selector-less select expression.
    pub fn variant_list(&self) -> Option<&[Variant]> {
        match self.value.as_ref()?.elements.as_slice() {
            [PatternElement::Placeable(Expr::Select { selector: None, variants, .. })] => {
                Some(variants)
            }
            _ => None,
        }
    }
}

/// A named attribute of a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: String,
    pub value: Pattern,
}

/// An ordered sequence of literal fragments and placeable expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub elements: Vec<PatternElement>,
}

/// One element of a pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PatternElement {
    /// Literal text, emitted verbatim.
    Text(String),
    /// An expression whose resolved value is interpolated.
    Placeable(Expr),
}

/// An expression inside a placeable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// A quoted string literal.
    StringLiteral(String),
    /// A number literal, retaining its textual form as format options.
    NumberLiteral(Number),
    /// A bare identifier used as a matching key or option value.
    Keyword(String),
    /// A reference to another message by name.
    MessageReference(String),
    /// A reference to an external argument: `$name`.
    ExternalArgument(String),
    /// An attribute of a referenced message: `id.name`.
    AttributeReference { id: String, name: String },
    /// An explicit variant of a referenced message: `id[key]`.
    VariantReference { id: String, key: VariantKey },
    /// A reference to a formatting function by name.
    FunctionReference(String),
    /// A function call with positional and named arguments.
    Call { function: String, args: Vec<Argument> },
    /// Selection among variants. A selector-less select is a variant
    /// list; `default` indexes the variant marked with `*`.
    Select { selector: Option<Box<Expr>>, variants: Vec<Variant>, default: usize },
}

/// A call-expression argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Argument {
    Positional(Expr),
    Named { name: String, value: Expr },
}

/// The key of a variant: a keyword or a number literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VariantKey {
    Keyword(String),
    Number(Number),
}

impl Display for VariantKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            VariantKey::Keyword(name) => write!(f, "{name}"),
            VariantKey::Number(n) => write!(f, "{}", n.as_string()),
        }
    }
}

/// A `(key, value)` pair inside a select expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub key: VariantKey,
    pub value: Pattern,
}

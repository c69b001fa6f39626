//! Runtime parser for the textual message syntax.
//!
//! Parses a resource into the runtime entry tree. Parsing is resilient:
//! each top-level entry is parsed independently, so one malformed entry
//! yields one error and does not prevent later entries from installing.
//!
//! Supported syntax:
//! - `id = pattern` messages, with indented continuation lines and
//!   `.attr = pattern` attribute lines
//! - placeables: string and number literals, `$arg`, message references,
//!   `id.attr`, `id[key]`, `NAME(...)` calls with positional and named
//!   arguments
//! - select expressions `{ $n -> *[one] ... [other] ... }` and
//!   selector-less variant lists
//! - `#` comment lines

use winnow::combinator::{alt, delimited, opt, preceded, repeat};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{any, none_of, take_while};

use super::ast::*;
use super::error::ParseError;
use crate::types::Number;

/// Parse a resource into named entries plus per-entry errors.
pub fn parse_resource(source: &str) -> (Vec<(String, Message)>, Vec<ParseError>) {
    let mut entries = Vec::new();
    let mut errors = Vec::new();

    for block in split_blocks(source, &mut errors) {
        let mut remaining = block.text.as_str();
        match entry(&mut remaining) {
            Ok(parsed) if remaining.trim().is_empty() => entries.push(parsed),
            Ok(_) => {
                let (line, column) = calculate_position(&block.text, remaining);
                errors.push(ParseError::Syntax {
                    line: block.line + line - 1,
                    column,
                    message: format!(
                        "unexpected character: '{}'",
                        remaining.trim_start().chars().next().unwrap_or('?')
                    ),
                });
            }
            Err(e) => {
                let (line, column) = calculate_position(&block.text, remaining);
                errors.push(ParseError::Syntax {
                    line: block.line + line - 1,
                    column,
                    message: format!("parse error: {e}"),
                });
            }
        }
    }

    (entries, errors)
}

/// A top-level entry block: its source text and starting line number.
struct Block {
    line: usize,
    text: String,
}

/// Split a resource into entry blocks. An entry starts at a non-blank,
/// non-comment line in column zero; indented lines attach to the open
/// block. Orphan indented lines are reported directly.
fn split_blocks(source: &str, errors: &mut Vec<ParseError>) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();

    for (idx, line) in source.lines().enumerate() {
        let blank = line.trim().is_empty();
        let comment = line.starts_with('#');
        let indented = line.starts_with([' ', '\t']);

        if !blank && !comment && !indented {
            blocks.push(Block { line: idx + 1, text: line.to_string() });
            continue;
        }

        match blocks.last_mut() {
            // Blank and comment lines keep the block's line math intact.
            Some(block) => {
                block.text.push('\n');
                if !comment {
                    block.text.push_str(line);
                }
            }
            None if blank || comment => {}
            None => {
                errors.push(ParseError::Syntax {
                    line: idx + 1,
                    column: 1,
                    message: "expected an entry to start at column 1".to_string(),
                });
            }
        }
    }

    blocks
}

/// Calculate line and column from original input and remaining input.
fn calculate_position(original: &str, remaining: &str) -> (usize, usize) {
    let consumed = original.len() - remaining.len();
    let consumed_str = &original[..consumed];
    let line = consumed_str.chars().filter(|&c| c == '\n').count() + 1;
    let last_newline = consumed_str.rfind('\n');
    let column = match last_newline {
        Some(pos) => consumed - pos,
        None => consumed + 1,
    };
    (line, column)
}

/// Parse a single entry: `id (= pattern)? attribute*`.
fn entry(input: &mut &str) -> ModalResult<(String, Message)> {
    let name = identifier(input)?;
    inline_ws(input)?;
    let value = match opt('=').parse_next(input)? {
        Some(_) => pattern(input)?,
        None => None,
    };
    let attributes: Vec<Attribute> = repeat(0.., attribute).parse_next(input)?;
    multiline_ws(input)?;
    Ok((name, Message { value, attributes }))
}

/// Parse an attribute line: `.id = pattern`.
fn attribute(input: &mut &str) -> ModalResult<Attribute> {
    multiline_ws(input)?;
    '.'.parse_next(input)?;
    let id = identifier(input)?;
    inline_ws(input)?;
    '='.parse_next(input)?;
    let value = pattern(input)?.ok_or_else(|| ErrMode::Cut(ContextError::new()))?;
    Ok(Attribute { id, value })
}

/// Parse a pattern: inline text and placeables, continued across indented
/// lines. Returns `None` when the pattern has no content.
fn pattern(input: &mut &str) -> ModalResult<Option<Pattern>> {
    inline_ws(input)?;
    let mut elements: Vec<PatternElement> = Vec::new();
    let mut text = String::new();

    loop {
        match input.chars().next() {
            Some('{') => {
                flush_text(&mut text, &mut elements);
                let expr = placeable(input)?;
                elements.push(PatternElement::Placeable(expr));
            }
            Some('\n') => {
                trim_line_end(&mut text);
                if !take_continuation(input) {
                    break;
                }
                if !text.is_empty() || !elements.is_empty() {
                    text.push('\n');
                }
            }
            Some(_) => {
                let c = any.parse_next(input)?;
                text.push(c);
            }
            None => break,
        }
    }

    trim_line_end(&mut text);
    flush_text(&mut text, &mut elements);
    if elements.is_empty() {
        Ok(None)
    } else {
        Ok(Some(Pattern { elements }))
    }
}

/// Consume a newline plus indentation when the next line continues the
/// pattern. Attribute lines, blank lines, and end of input end it.
fn take_continuation(input: &mut &str) -> bool {
    let source = *input;
    let rest = &source[1..];
    let trimmed = rest.trim_start_matches([' ', '\t']);
    let indent = rest.len() - trimmed.len();
    if indent == 0 {
        return false;
    }
    match trimmed.chars().next() {
        None | Some('.') | Some('\n') => false,
        Some(_) => {
            *input = &source[1 + indent..];
            true
        }
    }
}

fn flush_text(text: &mut String, elements: &mut Vec<PatternElement>) {
    if !text.is_empty() {
        elements.push(PatternElement::Text(std::mem::take(text)));
    }
}

fn trim_line_end(text: &mut String) {
    while text.ends_with([' ', '\t']) {
        text.pop();
    }
}

/// Parse a placeable: `{ expression }`.
fn placeable(input: &mut &str) -> ModalResult<Expr> {
    '{'.parse_next(input)?;
    multiline_ws(input)?;
    let expr = alt((variant_list, select_or_inline)).parse_next(input)?;
    multiline_ws(input)?;
    '}'.parse_next(input)?;
    Ok(expr)
}

/// Parse a selector-less variant list.
fn variant_list(input: &mut &str) -> ModalResult<Expr> {
    let (variants, default) = variants(input)?;
    Ok(Expr::Select { selector: None, variants, default })
}

/// Parse an inline expression, optionally followed by `-> variants`.
fn select_or_inline(input: &mut &str) -> ModalResult<Expr> {
    let expr = inline_expr(input)?;
    multiline_ws(input)?;
    if opt("->").parse_next(input)?.is_some() {
        let (variants, default) = variants(input)?;
        return Ok(Expr::Select { selector: Some(Box::new(expr)), variants, default });
    }
    Ok(expr)
}

/// Parse one or more variants; exactly one must be marked default.
fn variants(input: &mut &str) -> ModalResult<(Vec<Variant>, usize)> {
    let entries: Vec<(bool, Variant)> = repeat(1.., variant).parse_next(input)?;
    let mut default = None;
    for (index, (is_default, _)) in entries.iter().enumerate() {
        if *is_default {
            if default.is_some() {
                return Err(ErrMode::Cut(ContextError::new()));
            }
            default = Some(index);
        }
    }
    let Some(default) = default else {
        return Err(ErrMode::Cut(ContextError::new()));
    };
    let variants = entries.into_iter().map(|(_, variant)| variant).collect();
    Ok((variants, default))
}

/// Parse a single variant: `*? [key] pattern`.
fn variant(input: &mut &str) -> ModalResult<(bool, Variant)> {
    multiline_ws(input)?;
    let star = opt('*').parse_next(input)?.is_some();
    '['.parse_next(input)?;
    inline_ws(input)?;
    let key = variant_key(input)?;
    inline_ws(input)?;
    ']'.parse_next(input)?;
    inline_ws(input)?;
    let value = variant_pattern(input)?;
    Ok((star, Variant { key, value }))
}

fn variant_key(input: &mut &str) -> ModalResult<VariantKey> {
    alt((
        number_literal.map(VariantKey::Number),
        identifier.map(VariantKey::Keyword),
    ))
    .parse_next(input)
}

/// Parse a variant's value: text and placeables up to the next variant,
/// the closing brace, or the end of the line.
fn variant_pattern(input: &mut &str) -> ModalResult<Pattern> {
    let mut elements: Vec<PatternElement> = Vec::new();
    let mut text = String::new();

    loop {
        match input.chars().next() {
            Some('{') => {
                flush_text(&mut text, &mut elements);
                let expr = placeable(input)?;
                elements.push(PatternElement::Placeable(expr));
            }
            Some('[') | Some('*') | Some('}') | Some('\n') | None => break,
            Some(_) => {
                let c = any.parse_next(input)?;
                text.push(c);
            }
        }
    }

    trim_line_end(&mut text);
    flush_text(&mut text, &mut elements);
    Ok(Pattern { elements })
}

/// Parse an inline expression.
fn inline_expr(input: &mut &str) -> ModalResult<Expr> {
    alt((
        string_literal,
        number_literal.map(Expr::NumberLiteral),
        external_argument,
        call_or_reference,
    ))
    .parse_next(input)
}

/// Parse a quoted string literal with `\"` and `\\` escapes.
fn string_literal(input: &mut &str) -> ModalResult<Expr> {
    delimited('"', repeat(0.., string_char), '"')
        .map(Expr::StringLiteral)
        .parse_next(input)
}

fn string_char(input: &mut &str) -> ModalResult<char> {
    alt((preceded('\\', any), none_of(['"', '\\', '\n']))).parse_next(input)
}

/// Parse a decimal number literal, keeping its textual form.
fn number_literal(input: &mut &str) -> ModalResult<Number> {
    let raw: &str = (opt('-'), digits, opt(('.', digits)))
        .take()
        .parse_next(input)?;
    raw.parse().map_err(|_| ErrMode::Backtrack(ContextError::new()))
}

fn digits<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)
}

/// Parse an external argument reference: `$name`.
fn external_argument(input: &mut &str) -> ModalResult<Expr> {
    preceded('$', identifier).map(Expr::ExternalArgument).parse_next(input)
}

/// Parse an identifier-led expression: a call, an attribute reference, a
/// variant reference, a function reference, or a message reference.
fn call_or_reference(input: &mut &str) -> ModalResult<Expr> {
    let id = identifier(input)?;
    match input.chars().next() {
        Some('(') => {
            // Only ALL-CAPS identifiers name functions.
            if !is_function_name(&id) {
                return Err(ErrMode::Cut(ContextError::new()));
            }
            let args = call_args(input)?;
            Ok(Expr::Call { function: id, args })
        }
        Some('.') => {
            let _ = any.parse_next(input)?;
            let name = identifier(input)?;
            Ok(Expr::AttributeReference { id, name })
        }
        Some('[') => {
            let key =
                delimited(('[', inline_ws), variant_key, (inline_ws, ']')).parse_next(input)?;
            Ok(Expr::VariantReference { id, key })
        }
        _ if is_function_name(&id) => Ok(Expr::FunctionReference(id)),
        _ => Ok(Expr::MessageReference(id)),
    }
}

/// Parse call arguments: `(arg, name: value, ...)`.
fn call_args(input: &mut &str) -> ModalResult<Vec<Argument>> {
    delimited(
        ('(', multiline_ws),
        winnow::combinator::separated(0.., argument, (multiline_ws, ',', multiline_ws)),
        (multiline_ws, ')'),
    )
    .parse_next(input)
}

fn argument(input: &mut &str) -> ModalResult<Argument> {
    alt((named_argument, inline_expr.map(Argument::Positional))).parse_next(input)
}

/// Parse a named argument: `name: literal`. Values are string or number
/// literals, or a bare keyword.
fn named_argument(input: &mut &str) -> ModalResult<Argument> {
    let name = identifier(input)?;
    inline_ws(input)?;
    ':'.parse_next(input)?;
    multiline_ws(input)?;
    let value = alt((
        string_literal,
        number_literal.map(Expr::NumberLiteral),
        identifier.map(Expr::Keyword),
    ))
    .parse_next(input)?;
    Ok(Argument::Named { name, value })
}

/// Parse an identifier: a letter followed by alphanumerics, `_`, or `-`.
fn identifier(input: &mut &str) -> ModalResult<String> {
    let first = any.parse_next(input)?;
    if !first.is_ascii_alphabetic() {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }
    let rest: &str =
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            .parse_next(input)?;
    let mut name = String::with_capacity(1 + rest.len());
    name.push(first);
    name.push_str(rest);
    Ok(name)
}

/// Function names are ALL-CAPS identifiers.
fn is_function_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_' || c == '-')
}

/// Parse optional inline whitespace (spaces and tabs).
fn inline_ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., [' ', '\t']).void().parse_next(input)
}

/// Parse optional whitespace including newlines.
fn multiline_ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace()).void().parse_next(input)
}

//! Per-call resolution environment.

use std::collections::{HashMap, HashSet};

use crate::parser::Pattern;
use crate::resolver::{FormatError, MessageContext};
use crate::types::Value;

/// State threaded through one top-level `format` call.
///
/// Carries the context, the external argument bag, the append-only error
/// list, and the dirty set of pattern nodes currently being resolved. The
/// dirty set keys patterns by address, so cycles are detected per pattern
/// node rather than per message name.
pub(crate) struct Scope<'a> {
    pub ctx: &'a MessageContext,
    pub args: Option<&'a HashMap<String, Value>>,
    errors: &'a mut Vec<FormatError>,
    dirty: HashSet<usize>,
}

impl<'a> Scope<'a> {
    pub fn new(
        ctx: &'a MessageContext,
        args: Option<&'a HashMap<String, Value>>,
        errors: &'a mut Vec<FormatError>,
    ) -> Self {
        Self { ctx, args, errors, dirty: HashSet::new() }
    }

    pub fn add_error(&mut self, error: FormatError) {
        self.errors.push(error);
    }

    /// Mark a pattern as being resolved. Returns `false` when the pattern
    /// is already on the stack, i.e. a cycle was entered.
    pub fn enter(&mut self, pattern: &Pattern) -> bool {
        self.dirty.insert(pattern as *const Pattern as usize)
    }

    /// Unmark a pattern once its resolution completes.
    pub fn exit(&mut self, pattern: &Pattern) {
        self.dirty.remove(&(pattern as *const Pattern as usize));
    }
}

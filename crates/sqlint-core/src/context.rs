//! Per-invocation source context handed to every rule.

use serde_json::{Map, Value};

/// Immutable view of the file being linted.
///
/// Owned by the caller of [`crate::Linter::lint`] for the duration of one call;
/// rules only ever see it by shared reference.
#[derive(Debug, Clone)]
pub struct SourceContext<'a> {
    /// Display name of the file (not necessarily a real path)
    pub filename: &'a str,
    /// Raw SQL text
    pub source: &'a str,
    /// Host-supplied options, empty unless set with [`SourceContext::with_options`]
    pub options: Map<String, Value>,
}

impl<'a> SourceContext<'a> {
    pub fn new(filename: &'a str, source: &'a str) -> Self {
        Self {
            filename,
            source,
            options: Map::new(),
        }
    }

    pub fn with_options(mut self, options: Map<String, Value>) -> Self {
        self.options = options;
        self
    }
}

//! Lint rules and the rule registry

mod keyword_case;
mod no_select_star;
mod table_alias;

use std::sync::OnceLock;

use sqlparser::ast::{Select, SetExpr};

use crate::context::SourceContext;
use crate::error::{Issue, Severity};
use crate::parser::SyntaxTree;

pub use keyword_case::KeywordCase;
pub use no_select_star::NoSelectStar;
pub use table_alias::TableAlias;

/// A named check over a parsed file.
///
/// Rules emit issues at their own default severity; the linter decides the
/// final severity from configuration. Rules never see the configuration.
///
/// # Example
///
/// ```ignore
/// use sqlint_core::{Issue, Rule, Severity, SourceContext, SyntaxTree};
///
/// pub struct NoEmptyFile;
///
/// impl Rule for NoEmptyFile {
///     fn name(&self) -> &'static str { "no-empty-file" }
///     fn description(&self) -> &'static str { "Disallow files without statements" }
///     fn default_severity(&self) -> Severity { Severity::Info }
///
///     fn check(&self, tree: &SyntaxTree, _ctx: &SourceContext<'_>) -> Vec<Issue> {
///         if tree.is_empty() {
///             vec![Issue::new(self.name(), self.default_severity(), "File is empty")]
///         } else {
///             vec![]
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "no-select-star").
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the severity this rule's issues carry absent configuration.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Whether the built-in default configuration turns this rule on.
    fn enabled_by_default(&self) -> bool {
        true
    }

    /// Checks one parsed file and returns any issues found.
    fn check(&self, tree: &SyntaxTree, ctx: &SourceContext<'_>) -> Vec<Issue>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// Ordered, name-unique collection of rules
pub struct RuleRegistry {
    rules: Vec<RuleBox>,
}

impl RuleRegistry {
    /// An empty registry, for tests that need isolation from the built-ins
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The built-in rules in registration order
    pub fn builtin() -> Self {
        Self::new()
            .with_rule(Box::new(NoSelectStar))
            .with_rule(Box::new(KeywordCase))
            .with_rule(Box::new(TableAlias))
    }

    /// Append a rule. The first registration of a name wins.
    pub fn with_rule(mut self, rule: RuleBox) -> Self {
        if self.get(rule.name()).is_none() {
            self.rules.push(rule);
        }
        self
    }

    /// Look up a rule by name
    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|r| r.name() == name)
            .map(|r| r.as_ref())
    }

    /// All rules in registration order
    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|r| r.name()))
            .finish()
    }
}

/// SELECT blocks of a query body, following set-operation branches.
///
/// Parenthesized queries (`SetExpr::Query`) are skipped: the sqlparser visitor
/// reaches them as queries of their own.
fn body_selects(body: &SetExpr) -> Vec<&Select> {
    let mut selects = Vec::new();
    let mut pending = vec![body];
    while let Some(expr) = pending.pop() {
        match expr {
            SetExpr::Select(select) => selects.push(select.as_ref()),
            SetExpr::SetOperation { left, right, .. } => {
                pending.push(right);
                pending.push(left);
            }
            _ => {}
        }
    }
    selects
}

/// The process-wide registry of built-in rules
pub fn registry() -> &'static RuleRegistry {
    static REGISTRY: OnceLock<RuleRegistry> = OnceLock::new();
    REGISTRY.get_or_init(RuleRegistry::builtin)
}

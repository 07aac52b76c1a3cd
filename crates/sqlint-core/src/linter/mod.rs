//! Lint engine

mod severity;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::context::SourceContext;
use crate::error::{Issue, Severity};
use crate::parser::SqlParser;
use crate::rules::{registry, RuleRegistry};

pub use severity::{override_severity, resolve_rules, resolve_severity, ActiveRule};

/// Rule name used for the synthetic issue reported on parse failure
pub const PARSE_ERROR_RULE: &str = "parse-error";

/// Outcome of linting one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintResult {
    pub filename: String,
    /// Issues in rule-invocation order
    pub issues: Vec<Issue>,
    pub error_count: usize,
    pub warning_count: usize,
}

impl LintResult {
    /// Build a result, deriving the counts from `issues`
    pub fn new(filename: impl Into<String>, issues: Vec<Issue>) -> Self {
        let count = |severity| issues.iter().filter(|i| i.severity == severity).count();
        let error_count = count(Severity::Error);
        let warning_count = count(Severity::Warning);
        Self {
            filename: filename.into(),
            issues,
            error_count,
            warning_count,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}

/// SQL Linter - runs the configured rules over one source text at a time
#[derive(Debug)]
pub struct Linter<'r> {
    parser: SqlParser,
    config: Config,
    registry: &'r RuleRegistry,
}

impl Linter<'static> {
    /// Linter with the built-in default configuration
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::with_registry(config, registry())
    }
}

impl Default for Linter<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> Linter<'r> {
    /// Linter over a caller-supplied registry
    pub fn with_registry(config: Config, registry: &'r RuleRegistry) -> Self {
        Self {
            parser: SqlParser::with_dialect(config.dialect()),
            config,
            registry,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Rules that will run, in execution order
    pub fn active_rules(&self) -> Vec<ActiveRule<'r>> {
        resolve_rules(&self.config, self.registry)
    }

    /// Lint `source` and report it under `filename`.
    ///
    /// Always returns a result: a parse failure becomes a single
    /// `parse-error` issue and no rule runs.
    pub fn lint(&self, source: &str, filename: &str) -> LintResult {
        self.lint_context(&SourceContext::new(filename, source))
    }

    /// Same as [`Linter::lint`] with a caller-built context
    pub fn lint_context(&self, ctx: &SourceContext<'_>) -> LintResult {
        let mut issues = Vec::new();

        match self.parser.parse(ctx.source, ctx) {
            Err(error) => {
                let mut issue = Issue::new(
                    PARSE_ERROR_RULE,
                    Severity::Error,
                    format!("SQL Parse Error: {}", error.message),
                );
                if let Some(location) = error.location {
                    issue = issue.with_position(location.start);
                }
                issues.push(issue);
            }
            Ok(tree) => {
                for active in self.active_rules() {
                    let mut rule_issues = active.rule.check(&tree, ctx);
                    if let Some(severity) = active.severity {
                        for issue in &mut rule_issues {
                            issue.severity = severity;
                        }
                    }
                    debug!(
                        filename = ctx.filename,
                        rule = active.rule.name(),
                        severity = %active.effective_severity(),
                        count = rule_issues.len(),
                        "rule finished"
                    );
                    issues.extend(rule_issues);
                }
            }
        }

        LintResult::new(ctx.filename, issues)
    }
}

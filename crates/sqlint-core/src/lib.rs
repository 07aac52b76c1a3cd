//! sqlint-core: SQL lint engine
//!
//! This library parses SQL with `sqlparser` and runs pluggable style and
//! correctness rules over the syntax tree or the raw source text.

pub mod config;
pub mod context;
pub mod dialect;
pub mod error;
pub mod linter;
pub mod parser;
pub mod rules;

pub use config::{Config, ConfigError, RuleSetting};
pub use context::SourceContext;
pub use dialect::SqlDialect;
pub use error::{Issue, ParseError, Position, Severity, SourceRange};
pub use linter::{LintResult, Linter};
pub use parser::{SqlParser, SyntaxTree};
pub use rules::{registry, Rule, RuleRegistry};

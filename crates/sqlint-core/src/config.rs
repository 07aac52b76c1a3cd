//! Lint configuration

use indexmap::IndexMap;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::dialect::SqlDialect;
use crate::error::Severity;
use crate::rules::registry;

/// Per-rule configuration entry.
///
/// Accepted shapes: `false`, `true`, `"warning"`, `["warning"]`,
/// `["warning", { ... }]`. Anything else is kept as [`RuleSetting::Other`] and
/// never enables the rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSetting {
    Toggle(bool),
    Level(String),
    List(Vec<Value>),
    Other(Value),
}

impl RuleSetting {
    /// `[severity]`
    pub fn severity(severity: Severity) -> Self {
        RuleSetting::List(vec![Value::String(severity.as_str().to_string())])
    }

    /// `[severity, options]`
    pub fn with_options(severity: Severity, options: serde_json::Map<String, Value>) -> Self {
        RuleSetting::List(vec![
            Value::String(severity.as_str().to_string()),
            Value::Object(options),
        ])
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, RuleSetting::Toggle(false))
    }

    /// Raw severity string: the value itself for a bare string, the first
    /// element for a list.
    pub fn severity_str(&self) -> Option<&str> {
        match self {
            RuleSetting::Level(level) => Some(level),
            RuleSetting::List(items) => items.first().and_then(Value::as_str),
            RuleSetting::Toggle(_) | RuleSetting::Other(_) => None,
        }
    }

    /// Options map from the `[severity, options]` form
    pub fn options(&self) -> Option<&serde_json::Map<String, Value>> {
        match self {
            RuleSetting::List(items) => items.get(1).and_then(Value::as_object),
            _ => None,
        }
    }
}

/// Configuration for sqlint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Parser dialect (default: mysql)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<SqlDialect>,

    /// Glob patterns of files the CLI should skip
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore_patterns: Vec<String>,

    /// Rule name -> setting. Rules without an entry do not run.
    pub rules: IndexMap<String, RuleSetting>,
}

impl Default for Config {
    /// Every rule that is enabled by default, at its default severity.
    fn default() -> Self {
        let rules = registry()
            .rules()
            .filter(|rule| rule.enabled_by_default())
            .map(|rule| {
                (
                    rule.name().to_string(),
                    RuleSetting::severity(rule.default_severity()),
                )
            })
            .collect();
        Self {
            rules,
            dialect: None,
            ignore_patterns: Vec::new(),
        }
    }
}

impl Config {
    /// A configuration with no rules enabled
    pub fn empty() -> Self {
        Self {
            rules: IndexMap::new(),
            dialect: None,
            ignore_patterns: Vec::new(),
        }
    }

    pub fn with_rule(mut self, name: impl Into<String>, setting: RuleSetting) -> Self {
        self.rules.insert(name.into(), setting);
        self
    }

    pub fn with_dialect(mut self, dialect: SqlDialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    /// Parse a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Toml(Box::new(e)))
    }

    /// Parse a JSON document
    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(contents).map_err(ConfigError::Json)
    }

    /// Parse by file extension (`toml` or `json`)
    pub fn from_str_with_extension(contents: &str, extension: &str) -> Result<Self, ConfigError> {
        match extension {
            "toml" => Self::from_toml_str(contents),
            "json" => Self::from_json_str(contents),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn dialect(&self) -> SqlDialect {
        self.dialect.unwrap_or_default()
    }
}

/// Configuration loading failures
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("invalid TOML configuration: {0}")]
    #[diagnostic(
        code(sqlint::config::toml),
        help("the configuration needs a [rules] table")
    )]
    Toml(#[source] Box<toml::de::Error>),

    #[error("invalid JSON configuration: {0}")]
    #[diagnostic(
        code(sqlint::config::json),
        help("the configuration needs a \"rules\" object")
    )]
    Json(#[source] serde_json::Error),

    #[error("unsupported config file format: '{0}'")]
    #[diagnostic(
        code(sqlint::config::format),
        help("use a .toml or .json configuration file")
    )]
    UnsupportedFormat(String),
}

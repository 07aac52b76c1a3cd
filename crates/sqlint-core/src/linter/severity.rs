//! Severity resolver - decides which rules run and at what severity

use tracing::trace;

use crate::config::{Config, RuleSetting};
use crate::error::Severity;
use crate::rules::{Rule, RuleRegistry};

/// A rule selected by the configuration.
///
/// `severity` is the override stamped on every issue the rule reports;
/// `None` leaves each issue at the severity the rule itself chose.
#[derive(Clone, Copy)]
pub struct ActiveRule<'r> {
    pub rule: &'r dyn Rule,
    pub severity: Option<Severity>,
}

impl ActiveRule<'_> {
    /// Severity the rule's issues end up with, assuming the rule reports
    /// at its default severity
    pub fn effective_severity(&self) -> Severity {
        self.severity.unwrap_or_else(|| self.rule.default_severity())
    }
}

impl std::fmt::Debug for ActiveRule<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveRule")
            .field("rule", &self.rule.name())
            .field("severity", &self.severity)
            .finish()
    }
}

/// Severity named by one configuration entry.
///
/// `None` means the rule does not run: the entry is `false`, carries no
/// severity string, or the string is not one of error/warning/info.
pub fn resolve_severity(setting: &RuleSetting) -> Option<Severity> {
    if setting.is_disabled() {
        return None;
    }
    setting.severity_str()?.parse().ok()
}

/// Severity the engine overwrites issues with.
///
/// Only the list forms override. A bare string such as `"error"` enables
/// the rule but keeps the severity the rule reported.
pub fn override_severity(setting: &RuleSetting) -> Option<Severity> {
    match setting {
        RuleSetting::List(_) => resolve_severity(setting),
        _ => None,
    }
}

/// Active rules in registration order.
///
/// Only rules with a configuration entry are considered. Entries naming
/// unknown rules are ignored.
pub fn resolve_rules<'r>(config: &Config, registry: &'r RuleRegistry) -> Vec<ActiveRule<'r>> {
    for name in config.rules.keys() {
        if registry.get(name).is_none() {
            trace!(rule = %name, "ignoring configuration for unknown rule");
        }
    }

    registry
        .rules()
        .filter_map(|rule| {
            let setting = config.rules.get(rule.name())?;
            match resolve_severity(setting) {
                Some(_) => Some(ActiveRule {
                    rule,
                    severity: override_severity(setting),
                }),
                None => {
                    trace!(rule = rule.name(), ?setting, "rule not enabled by configuration");
                    None
                }
            }
        })
        .collect()
}

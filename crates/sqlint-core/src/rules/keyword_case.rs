//! `keyword-case`: SQL keywords must be written in uppercase.
//!
//! This rule scans the raw source line by line and never looks at the syntax
//! tree. Text inside single- or double-quoted strings is skipped; comments
//! are not, so a comment word that equals a keyword is reported too.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use crate::context::SourceContext;
use crate::error::{Issue, Position, Severity};
use crate::parser::SyntaxTree;
use crate::rules::Rule;

/// Rule name for keyword-case.
pub const NAME: &str = "keyword-case";

/// Keywords checked by this rule, in reporting order.
pub const KEYWORDS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "JOIN", "LEFT", "RIGHT", "INNER", "OUTER", "ON", "AND", "OR",
    "NOT", "IN", "EXISTS", "BETWEEN", "LIKE", "IS", "NULL", "ORDER", "BY", "GROUP", "HAVING",
    "LIMIT", "OFFSET", "UNION", "INSERT", "INTO", "VALUES", "UPDATE", "SET", "DELETE", "CREATE",
    "TABLE", "ALTER", "DROP", "INDEX", "VIEW", "AS",
];

/// Enforces uppercase keywords.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordCase;

impl Rule for KeywordCase {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Enforce consistent keyword case (uppercase)"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, _tree: &SyntaxTree, ctx: &SourceContext<'_>) -> Vec<Issue> {
        scan_source(ctx.source)
    }
}

/// Scan raw SQL text for keywords that are not uppercase.
pub fn scan_source(source: &str) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (index, line) in source.split('\n').enumerate() {
        scan_line(line, index + 1, &mut issues);
    }
    issues
}

fn scan_line(line: &str, line_no: usize, issues: &mut Vec<Issue>) {
    let quoted = quoted_ranges(line);

    for (keyword, pattern) in keyword_patterns() {
        for m in pattern.find_iter(line) {
            if quoted.iter().any(|r| r.contains(&m.start())) {
                continue;
            }
            if m.as_str() == *keyword {
                continue;
            }

            let column = char_column(line, m.start());
            let end_column = column + m.as_str().chars().count();
            issues.push(
                Issue::new(
                    NAME,
                    Severity::Warning,
                    format!(
                        "Keyword \"{}\" should be uppercase \"{}\"",
                        m.as_str(),
                        keyword
                    ),
                )
                .with_position(Position::new(line_no, column))
                .with_end(Position::new(line_no, end_column)),
            );
        }
    }
}

/// Byte ranges of quoted strings on one line.
///
/// A string is a quote character, any run of other characters or
/// backslash-escaped quotes, and the same closing quote. Unterminated quotes
/// produce no range.
fn quoted_ranges(line: &str) -> Vec<Range<usize>> {
    static QUOTED: OnceLock<Regex> = OnceLock::new();
    let re = QUOTED.get_or_init(|| {
        Regex::new(r#"'(?:\\'|[^'])*'|"(?:\\"|[^"])*""#).expect("valid quote regex")
    });
    re.find_iter(line).map(|m| m.range()).collect()
}

/// Whole-word, ASCII case-insensitive matcher per keyword, compiled once.
///
/// Word boundaries are ASCII too, so a keyword next to a non-ASCII letter
/// still matches.
fn keyword_patterns() -> &'static [(&'static str, Regex)] {
    static PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        KEYWORDS
            .iter()
            .map(|kw| {
                let re = Regex::new(&format!(r"(?i-u)\b{}\b", kw)).expect("valid keyword regex");
                (*kw, re)
            })
            .collect()
    })
}

/// 1-indexed character column of a byte offset within `line`
fn char_column(line: &str, byte_offset: usize) -> usize {
    line[..byte_offset].chars().count() + 1
}

//! Output formatting

use miette::{IntoDiagnostic, Result};
use sqlint_core::{Issue, LintResult, Severity};

use crate::args::OutputFormat;

/// Renders lint results for all checked files
pub struct OutputFormatter {
    format: OutputFormat,
    color: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: true,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Print results to stdout in the configured format
    pub fn print_results(&self, results: &[LintResult]) -> Result<()> {
        let rendered = self.render(results)?;
        print!("{}", rendered);
        Ok(())
    }

    pub fn render(&self, results: &[LintResult]) -> Result<String> {
        match self.format {
            OutputFormat::Stylish => Ok(self.render_stylish(results)),
            OutputFormat::Json => {
                let mut out = serde_json::to_string_pretty(results).into_diagnostic()?;
                out.push('\n');
                Ok(out)
            }
        }
    }

    fn render_stylish(&self, results: &[LintResult]) -> String {
        let mut out = String::new();
        let mut total_errors = 0;
        let mut total_warnings = 0;

        for result in results {
            if result.issues.is_empty() {
                continue;
            }

            out.push_str(&self.paint("\x1b[4m", &result.filename));
            out.push('\n');
            for issue in &result.issues {
                out.push_str(&format!(
                    "  {}  {}  {}  {}\n",
                    position(issue),
                    self.severity_label(issue.severity),
                    issue.message,
                    self.paint("\x1b[90m", &issue.rule)
                ));
            }
            out.push('\n');

            total_errors += result.error_count;
            total_warnings += result.warning_count;
        }

        if total_errors > 0 || total_warnings > 0 {
            let mut summary = Vec::new();
            if total_errors > 0 {
                summary.push(self.paint("\x1b[31m", &plural(total_errors, "error")));
            }
            if total_warnings > 0 {
                summary.push(self.paint("\x1b[33m", &plural(total_warnings, "warning")));
            }
            out.push_str(&format!("✖ {}\n", summary.join(", ")));
        } else if !results.is_empty() {
            out.push_str(&self.paint("\x1b[32m", "✓ All files passed linting"));
            out.push('\n');
        }

        out
    }

    fn severity_label(&self, severity: Severity) -> String {
        let code = match severity {
            Severity::Error => "\x1b[31m",
            Severity::Warning => "\x1b[33m",
            Severity::Info => "\x1b[34m",
        };
        self.paint(code, severity.as_str())
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{}{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }
}

/// `line:column`, `0:0` when the issue has no line
fn position(issue: &Issue) -> String {
    match issue.line {
        Some(line) => format!("{}:{}", line, issue.column.unwrap_or(1)),
        None => "0:0".to_string(),
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

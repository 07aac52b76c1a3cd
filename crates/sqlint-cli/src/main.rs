//! sqlint CLI - SQL linter

mod args;
mod config;
mod output;

use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use sqlint_core::{registry, Config, LintResult, Linter, SourceContext, SqlDialect, SqlParser};

use crate::args::{Args, Command};
use crate::output::OutputFormatter;

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing
    let level = if args.quiet {
        tracing::Level::ERROR
    } else {
        match args.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(has_errors) => {
            if has_errors {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(args: Args) -> Result<bool> {
    match args.command {
        Command::Check {
            files,
            config: config_path,
            dialect,
            format,
        } => {
            // Load configuration
            let mut config = match config_path {
                Some(path) => config::load(&path)?,
                None => config::find_and_load()?.unwrap_or_default(),
            };

            if let Some(dialect) = dialect {
                let dialect: SqlDialect = dialect.parse().map_err(|e: String| miette::miette!(e))?;
                config.dialect = Some(dialect);
            }

            let ignore = ignore_patterns(&config)?;
            let query_files: Vec<PathBuf> = expand_files(&files)?
                .into_iter()
                .filter(|path| !ignore.iter().any(|p| p.matches_path(path)))
                .collect();

            if query_files.is_empty() {
                miette::bail!("No SQL files matched the given patterns");
            }

            let linter = Linter::with_config(config);
            let mut results: Vec<LintResult> = Vec::new();

            for query_file in &query_files {
                let content = match fs::read_to_string(query_file) {
                    Ok(content) => content,
                    Err(e) => {
                        eprintln!("Error reading file {}: {}", query_file.display(), e);
                        continue;
                    }
                };
                let result = linter.lint(&content, &query_file.display().to_string());
                tracing::debug!(
                    file = %query_file.display(),
                    issues = result.issues.len(),
                    "linted file"
                );
                results.push(result);
            }

            let formatter =
                OutputFormatter::new(format).with_color(std::io::stdout().is_terminal());
            formatter.print_results(&results)?;

            Ok(results.iter().any(LintResult::has_errors))
        }

        Command::Init => {
            let path = Path::new(config::DEFAULT_CONFIG_FILE);
            if path.exists() {
                miette::bail!("{} already exists", path.display());
            }
            fs::write(path, config::DEFAULT_CONFIG_TEMPLATE).into_diagnostic()?;
            if !args.quiet {
                println!("Created {} configuration file", path.display());
            }
            Ok(false)
        }

        Command::Rules => {
            let defaults = Config::default();
            println!("Available rules:");
            println!("================");
            for rule in registry().rules() {
                let enabled = if defaults.rules.contains_key(rule.name()) {
                    "on"
                } else {
                    "off"
                };
                println!(
                    "  {:<16} {:<8} {:<4} {}",
                    rule.name(),
                    rule.default_severity(),
                    enabled,
                    rule.description()
                );
            }
            Ok(false)
        }

        Command::Parse { file, dialect } => {
            // Parse and print back (for debugging)
            let dialect: SqlDialect = dialect.parse().map_err(|e: String| miette::miette!(e))?;
            let content = fs::read_to_string(&file).into_diagnostic()?;
            let filename = file.display().to_string();
            let ctx = SourceContext::new(&filename, &content);

            match SqlParser::with_dialect(dialect).parse(&content, &ctx) {
                Ok(tree) => {
                    for (i, stmt) in tree.statements().iter().enumerate() {
                        println!("Statement {}:", i + 1);
                        println!("{};", stmt);
                        if args.verbose > 0 {
                            println!("{:#?}", stmt);
                        }
                        println!();
                    }
                    Ok(false)
                }
                Err(e) => {
                    match e.location {
                        Some(range) => eprintln!(
                            "Parse error at {}:{}:{}: {}",
                            filename, range.start.line, range.start.column, e
                        ),
                        None => eprintln!("Parse error in {}: {}", filename, e),
                    }
                    Ok(true)
                }
            }
        }
    }
}

/// Expand glob patterns; plain paths are kept as given
fn expand_files(patterns: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let pattern_str = pattern.display().to_string();
        if pattern_str.contains(['*', '?', '[']) {
            for path in glob::glob(&pattern_str).into_diagnostic()?.flatten() {
                files.push(path);
            }
        } else {
            files.push(pattern.clone());
        }
    }
    Ok(files)
}

fn ignore_patterns(config: &Config) -> Result<Vec<glob::Pattern>> {
    config
        .ignore_patterns
        .iter()
        .map(|p| glob::Pattern::new(p).into_diagnostic())
        .collect()
}

//! Parse adapter around `sqlparser`

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use sqlparser::ast::Statement;
use sqlparser::parser::{Parser, ParserError};
use tracing::debug;

use crate::context::SourceContext;
use crate::dialect::SqlDialect;
use crate::error::{ParseError, Position};

/// Parsed statements of one source file
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxTree {
    statements: Vec<Statement>,
}

impl SyntaxTree {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// True for input that contained only whitespace or comments
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl fmt::Display for SyntaxTree {
    /// Render the statements back to SQL, one per line
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            writeln!(f, "{};", stmt)?;
        }
        Ok(())
    }
}

/// Wraps the external SQL parser and turns its failures into data
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlParser {
    dialect: SqlDialect,
}

impl SqlParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dialect(dialect: SqlDialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    /// Parse `sql` into a syntax tree.
    ///
    /// Never panics on bad input; every parser failure comes back as a
    /// [`ParseError`] with a location when the parser reported one.
    pub fn parse(&self, sql: &str, context: &SourceContext<'_>) -> Result<SyntaxTree, ParseError> {
        let dialect = self.dialect.parser_dialect();
        match Parser::parse_sql(dialect.as_ref(), sql) {
            Ok(statements) => Ok(SyntaxTree::new(statements)),
            Err(e) => {
                let error = convert_parser_error(&e);
                debug!(
                    filename = context.filename,
                    dialect = %self.dialect,
                    "parse failed: {}",
                    error.message
                );
                Err(error)
            }
        }
    }
}

fn convert_parser_error(err: &ParserError) -> ParseError {
    let message = match err {
        ParserError::TokenizerError(msg) | ParserError::ParserError(msg) => msg.clone(),
        ParserError::RecursionLimitExceeded => err.to_string(),
    };
    let message = if message.trim().is_empty() {
        "Unknown parse error".to_string()
    } else {
        message
    };

    let location = location_in_message(&message);
    let error = ParseError::new(message);
    match location {
        Some(start) => error.with_location(start),
        None => error,
    }
}

/// Extract the trailing `Line: N, Column: M` that sqlparser appends to its messages
fn location_in_message(message: &str) -> Option<Position> {
    static LOCATION: OnceLock<Regex> = OnceLock::new();
    let re = LOCATION
        .get_or_init(|| Regex::new(r"Line: (\d+), Column: (\d+)").expect("valid location regex"));

    let caps = re.captures_iter(message).last()?;
    let line: usize = caps[1].parse().ok()?;
    let column: usize = caps[2].parse().ok()?;
    if line == 0 {
        return None;
    }
    Some(Position::new(line, column))
}

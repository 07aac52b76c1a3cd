//! SQL dialect support

use serde::{Deserialize, Serialize};
use sqlparser::dialect::{
    Dialect, GenericDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect,
};
use std::str::FromStr;

/// Dialects the parse adapter can be configured for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    #[serde(alias = "postgres", alias = "pg")]
    PostgreSQL,
    #[default]
    #[serde(alias = "mysql8")]
    MySQL,
    SQLite,
    Generic,
}

impl SqlDialect {
    /// Get the sqlparser dialect for parsing
    pub fn parser_dialect(&self) -> Box<dyn Dialect> {
        match self {
            SqlDialect::PostgreSQL => Box::new(PostgreSqlDialect {}),
            SqlDialect::MySQL => Box::new(MySqlDialect {}),
            SqlDialect::SQLite => Box::new(SQLiteDialect {}),
            SqlDialect::Generic => Box::new(GenericDialect {}),
        }
    }
}

impl FromStr for SqlDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgresql" | "postgres" | "pg" => Ok(SqlDialect::PostgreSQL),
            "mysql" | "mysql8" => Ok(SqlDialect::MySQL),
            "sqlite" => Ok(SqlDialect::SQLite),
            "generic" | "ansi" => Ok(SqlDialect::Generic),
            _ => Err(format!(
                "Unknown dialect: '{}'. Supported dialects: postgresql, mysql, sqlite, generic.",
                s
            )),
        }
    }
}

impl std::fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SqlDialect::PostgreSQL => write!(f, "postgresql"),
            SqlDialect::MySQL => write!(f, "mysql"),
            SqlDialect::SQLite => write!(f, "sqlite"),
            SqlDialect::Generic => write!(f, "generic"),
        }
    }
}

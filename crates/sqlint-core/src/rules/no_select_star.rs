//! `no-select-star`: disallow `SELECT *` and `SELECT t.*`.
//!
//! Every wildcard projection is reported, wherever the query sits: top level,
//! set-operation branch, derived table, CTE body, or expression subquery.

use std::ops::ControlFlow;

use sqlparser::ast::{Query, Select, SelectItem, Spanned, Visit, Visitor};
use sqlparser::tokenizer::Span;

use crate::context::SourceContext;
use crate::error::{Issue, Position, Severity};
use crate::parser::SyntaxTree;
use crate::rules::{body_selects, Rule};

/// Rule name for no-select-star.
pub const NAME: &str = "no-select-star";

const MESSAGE: &str = "Avoid using SELECT *. Specify column names explicitly.";

/// Forbids wildcard projections.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSelectStar;

impl Rule for NoSelectStar {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Disallow SELECT * in queries"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, tree: &SyntaxTree, _ctx: &SourceContext<'_>) -> Vec<Issue> {
        let mut visitor = SelectStarVisitor::default();
        for stmt in tree.statements() {
            let _ = stmt.visit(&mut visitor);
        }
        visitor.issues
    }
}

#[derive(Default)]
struct SelectStarVisitor {
    issues: Vec<Issue>,
}

impl SelectStarVisitor {
    fn check_select(&mut self, select: &Select) {
        for item in &select.projection {
            if !matches!(
                item,
                SelectItem::Wildcard(_) | SelectItem::QualifiedWildcard(_, _)
            ) {
                continue;
            }

            let span = issue_span(item.span(), select);
            let mut issue = Issue::new(NAME, Severity::Warning, MESSAGE);
            if let Some(start) = Position::from_sqlparser(&span.start) {
                issue = issue.with_position(start);
                if let Some(end) = Position::from_sqlparser(&span.end) {
                    issue = issue.with_end(end);
                }
            }
            self.issues.push(issue);
        }
    }
}

/// The wildcard's own span, or the enclosing select's when it has none
fn issue_span(item_span: Span, select: &Select) -> Span {
    if Position::from_sqlparser(&item_span.start).is_some() {
        item_span
    } else {
        select.span()
    }
}

impl Visitor for SelectStarVisitor {
    type Break = ();

    fn pre_visit_query(&mut self, query: &Query) -> ControlFlow<Self::Break> {
        for select in body_selects(&query.body) {
            self.check_select(select);
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SqlParser;
    use sqlparser::ast::{SetExpr, Statement, WildcardAdditionalOptions};

    fn check(sql: &str) -> Vec<Issue> {
        let ctx = SourceContext::new("test.sql", sql);
        let tree = SqlParser::new().parse(sql, &ctx).unwrap();
        NoSelectStar.check(&tree, &ctx)
    }

    #[test]
    fn test_select_star() {
        let issues = check("SELECT * FROM users");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule, NAME);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].message, MESSAGE);
        assert_eq!(issues[0].line, Some(1));
        assert!(issues[0].column.is_some());
    }

    #[test]
    fn test_explicit_columns_pass() {
        assert!(check("SELECT id, name FROM users").is_empty());
    }

    #[test]
    fn test_count_star_is_not_a_projection_wildcard() {
        assert!(check("SELECT COUNT(*) FROM users").is_empty());
    }

    #[test]
    fn test_qualified_wildcard() {
        assert_eq!(check("SELECT u.* FROM users u").len(), 1);
    }

    #[test]
    fn test_derived_table() {
        assert_eq!(check("SELECT * FROM (SELECT * FROM users) AS s").len(), 2);
    }

    #[test]
    fn test_cte_body() {
        let sql = "WITH active AS (SELECT * FROM users) SELECT id FROM active";
        assert_eq!(check(sql).len(), 1);
    }

    #[test]
    fn test_set_operation_branches() {
        assert_eq!(check("SELECT * FROM a UNION SELECT * FROM b").len(), 2);
        assert_eq!(
            check("SELECT * FROM a UNION ALL SELECT id FROM b UNION SELECT * FROM c").len(),
            2
        );
    }

    #[test]
    fn test_parenthesized_branches_counted_once() {
        assert_eq!(check("(SELECT * FROM a) UNION (SELECT * FROM b)").len(), 2);
    }

    #[test]
    fn test_where_subquery() {
        let sql = "SELECT id FROM users WHERE id IN (SELECT * FROM orders)";
        assert_eq!(check(sql).len(), 1);
    }

    #[test]
    fn test_insert_select() {
        assert_eq!(check("INSERT INTO archive SELECT * FROM users").len(), 1);
    }

    #[test]
    fn test_every_statement_is_checked() {
        assert_eq!(check("SELECT * FROM a; SELECT * FROM b;").len(), 2);
    }

    #[test]
    fn test_nested_position() {
        let sql = "SELECT id\nFROM (\n  SELECT * FROM users\n) AS sub";
        let issues = check(sql);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, Some(3));
    }

    #[test]
    fn test_wildcard_without_span_uses_select_position() {
        let sql = "\n  SELECT id FROM users";
        let ctx = SourceContext::new("test.sql", sql);
        let tree = SqlParser::new().parse(sql, &ctx).unwrap();
        let Statement::Query(query) = &tree.statements()[0] else {
            panic!("expected a query");
        };
        let SetExpr::Select(select) = query.body.as_ref() else {
            panic!("expected a select");
        };
        let mut select = select.as_ref().clone();
        select.projection = vec![SelectItem::Wildcard(WildcardAdditionalOptions::default())];

        let mut visitor = SelectStarVisitor::default();
        visitor.check_select(&select);
        assert_eq!(visitor.issues.len(), 1);
        assert_eq!(visitor.issues[0].position(), Some(Position::new(2, 3)));
    }

    #[test]
    fn test_issue_span_prefers_wildcard() {
        let sql = "SELECT id,\n  * FROM users";
        let issues = check(sql);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].position(), Some(Position::new(2, 3)));
    }
}

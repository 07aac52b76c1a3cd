//! `table-alias`: table aliases should be 2-30 characters long.
//!
//! Checks every relation in a FROM list (joins, nested joins, derived tables,
//! PIVOT/UNPIVOT and other table operators, `DELETE ... FROM/USING`). Issues carry no position because aliases are not
//! reliably located in the tree.

use std::ops::ControlFlow;

use sqlparser::ast::{
    Delete, FromTable, Query, Statement, TableAlias as AstTableAlias, TableFactor,
    TableWithJoins, Visit, Visitor,
};

use crate::context::SourceContext;
use crate::error::{Issue, Severity};
use crate::parser::SyntaxTree;
use crate::rules::{body_selects, Rule};

/// Rule name for table-alias.
pub const NAME: &str = "table-alias";

/// Shortest accepted alias, in characters.
pub const MIN_ALIAS_LEN: usize = 2;
/// Longest accepted alias, in characters.
pub const MAX_ALIAS_LEN: usize = 30;

/// Enforces meaningful table aliases.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableAlias;

impl Rule for TableAlias {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Enforce meaningful table aliases"
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn check(&self, tree: &SyntaxTree, _ctx: &SourceContext<'_>) -> Vec<Issue> {
        let mut visitor = AliasVisitor::default();
        for stmt in tree.statements() {
            let _ = stmt.visit(&mut visitor);
        }
        visitor.issues
    }
}

/// Empty aliases count as "no alias".
fn is_bad_alias(alias: &str) -> bool {
    let len = alias.chars().count();
    (1..MIN_ALIAS_LEN).contains(&len) || len > MAX_ALIAS_LEN
}

#[derive(Default)]
struct AliasVisitor {
    issues: Vec<Issue>,
}

impl AliasVisitor {
    fn check_from(&mut self, from: &[TableWithJoins]) {
        for table in from {
            self.check_relation(&table.relation);
            for join in &table.joins {
                self.check_relation(&join.relation);
            }
        }
    }

    fn check_relation(&mut self, factor: &TableFactor) {
        match factor {
            TableFactor::NestedJoin {
                table_with_joins, ..
            } => self.check_from(std::slice::from_ref(table_with_joins.as_ref())),
            // the operand keeps its own alias
            TableFactor::Pivot { table, .. }
            | TableFactor::Unpivot { table, .. }
            | TableFactor::MatchRecognize { table, .. } => self.check_relation(table),
            _ => {}
        }

        let Some(alias) = factor_alias(factor) else {
            return;
        };
        let alias = &alias.name.value;
        if is_bad_alias(alias) {
            self.issues.push(Issue::new(
                NAME,
                Severity::Info,
                format!(
                    "Table alias \"{}\" should be meaningful and between {}-{} characters",
                    alias, MIN_ALIAS_LEN, MAX_ALIAS_LEN
                ),
            ));
        }
    }

    fn check_delete(&mut self, delete: &Delete) {
        let tables = match &delete.from {
            FromTable::WithFromKeyword(tables) => tables,
            FromTable::WithoutKeyword(tables) => tables,
        };
        self.check_from(tables);
        if let Some(using) = &delete.using {
            self.check_from(using);
        }
    }
}

fn factor_alias(factor: &TableFactor) -> Option<&AstTableAlias> {
    match factor {
        TableFactor::Table { alias, .. }
        | TableFactor::Derived { alias, .. }
        | TableFactor::TableFunction { alias, .. }
        | TableFactor::Function { alias, .. }
        | TableFactor::UNNEST { alias, .. }
        | TableFactor::JsonTable { alias, .. }
        | TableFactor::OpenJsonTable { alias, .. }
        | TableFactor::NestedJoin { alias, .. }
        | TableFactor::Pivot { alias, .. }
        | TableFactor::Unpivot { alias, .. }
        | TableFactor::MatchRecognize { alias, .. } => alias.as_ref(),
    }
}

impl Visitor for AliasVisitor {
    type Break = ();

    fn pre_visit_query(&mut self, query: &Query) -> ControlFlow<Self::Break> {
        for select in body_selects(&query.body) {
            self.check_from(&select.from);
        }
        ControlFlow::Continue(())
    }

    fn pre_visit_statement(&mut self, statement: &Statement) -> ControlFlow<Self::Break> {
        if let Statement::Delete(delete) = statement {
            self.check_delete(delete);
        }
        ControlFlow::Continue(())
    }
}

// Integration tests for the lint engine
use pretty_assertions::assert_eq;
use sqlint_core::config::{Config, RuleSetting};
use sqlint_core::dialect::SqlDialect;
use sqlint_core::error::Severity;
use sqlint_core::linter::{LintResult, Linter};

fn count_rule(result: &LintResult, rule: &str) -> usize {
    result.issues.iter().filter(|i| i.rule == rule).count()
}

#[test]
fn test_valid_sql_without_issues() {
    let result = Linter::new().lint("SELECT id, name FROM users WHERE active = 1", "test.sql");
    assert_eq!(result.filename, "test.sql");
    assert!(result.issues.is_empty(), "{:?}", result.issues);
    assert_eq!(result.error_count, 0);
    assert_eq!(result.warning_count, 0);
}

#[test]
fn test_detects_select_star() {
    let result = Linter::new().lint("SELECT * FROM users", "test.sql");
    assert_eq!(count_rule(&result, "no-select-star"), 1);
}

#[test]
fn test_detects_lowercase_keywords() {
    let result = Linter::new().lint("select id, name from users where active = 1", "test.sql");
    assert_eq!(count_rule(&result, "keyword-case"), 3);
}

#[test]
fn test_parse_error() {
    let result = Linter::new().lint("SELECT FROM WHERE", "test.sql");
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].rule, "parse-error");
    assert_eq!(result.issues[0].severity, Severity::Error);
    assert_eq!(result.error_count, 1);
}

#[test]
fn test_idempotent() {
    let linter = Linter::new();
    let sql = "select * from (SELECT * FROM users u) AS s where s.id = 1";
    assert_eq!(linter.lint(sql, "a.sql"), linter.lint(sql, "a.sql"));
}

#[test]
fn test_quoted_keywords_ignored() {
    let result = Linter::new().lint("SELECT 'select from where' AS test FROM users", "test.sql");
    assert_eq!(count_rule(&result, "keyword-case"), 0);
}

#[test]
fn test_select_star_in_subquery() {
    let result = Linter::new().lint("SELECT * FROM (SELECT * FROM users) AS s", "test.sql");
    assert_eq!(count_rule(&result, "no-select-star"), 2);
}

#[test]
fn test_alias_boundaries() {
    let linter = Linter::new();
    let alias_of = |len: usize| {
        let sql = format!("SELECT 1 FROM users {}", "a".repeat(len));
        count_rule(&linter.lint(&sql, "test.sql"), "table-alias")
    };
    assert_eq!(alias_of(1), 1);
    assert_eq!(alias_of(2), 0);
    assert_eq!(alias_of(30), 0);
    assert_eq!(alias_of(31), 1);
}

// ========== Configuration ==========

#[test]
fn test_custom_configuration() {
    let config = Config::empty()
        .with_rule("no-select-star", RuleSetting::Toggle(false))
        .with_rule("keyword-case", RuleSetting::severity(Severity::Error));
    let result = Linter::with_config(config).lint("select * from users", "test.sql");

    assert_eq!(count_rule(&result, "no-select-star"), 0);
    assert!(result
        .issues
        .iter()
        .any(|i| i.rule == "keyword-case" && i.severity == Severity::Error));
    assert!(result.error_count >= 1);
    assert_eq!(result.error_count, 2);
}

#[test]
fn test_disable_keyword_case() {
    let config = Config::empty().with_rule("keyword-case", RuleSetting::Toggle(false));
    let result = Linter::with_config(config).lint("select id from users;", "test.sql");
    assert!(result.issues.is_empty());
    assert_eq!(result.warning_count, 0);
}

#[test]
fn test_no_select_star_as_error() {
    let config = Config::empty().with_rule("no-select-star", RuleSetting::severity(Severity::Error));
    let result = Linter::with_config(config).lint("SELECT * FROM users;", "test.sql");
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].severity, Severity::Error);
    assert_eq!(result.error_count, 1);
    assert_eq!(result.warning_count, 0);
}

#[test]
fn test_bare_severity_string() {
    let config = Config::from_toml_str("[rules]\nkeyword-case = \"error\"\n").unwrap();
    let result = Linter::with_config(config).lint("select 1", "test.sql");
    // enables the rule, but issues keep the rule's own severity
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].severity, Severity::Warning);
    assert_eq!(result.error_count, 0);
    assert_eq!(result.warning_count, 1);
}

#[test]
fn test_list_severity_overrides_bare_does_not() {
    let config = Config::from_toml_str(
        "[rules]
no-select-star = \"error\"
keyword-case = [\"error\"]
",
    )
    .unwrap();
    let result = Linter::with_config(config).lint("select * from users", "test.sql");
    assert_eq!(count_rule(&result, "no-select-star"), 1);
    assert_eq!(result.issues[0].severity, Severity::Warning);
    assert_eq!(result.error_count, 2);
    assert_eq!(result.warning_count, 1);
}

#[test]
fn test_unrecognized_settings_do_not_run() {
    let config = Config::from_json_str(
        r#"{ "rules": {
            "keyword-case": true,
            "no-select-star": ["fatal"],
            "table-alias": 7,
            "made-up-rule": ["error"]
        } }"#,
    )
    .unwrap();
    let result = Linter::with_config(config).lint("select * from users u", "test.sql");
    assert!(result.issues.is_empty(), "{:?}", result.issues);
}

#[test]
fn test_default_dialect_accepts_mysql_syntax() {
    let result = Linter::new().lint("SELECT `id` FROM `users` LIMIT 5, 10", "test.sql");
    assert!(result.issues.is_empty(), "{:?}", result.issues);
}

#[test]
fn test_dialect_from_config() {
    let config = Config::default().with_dialect(SqlDialect::PostgreSQL);
    let result = Linter::with_config(config).lint("SELECT `id` FROM `users`", "test.sql");
    assert_eq!(count_rule(&result, "parse-error"), 1);
}

// ========== Combined queries ==========

#[test]
fn test_multiple_issues_in_one_query() {
    let sql = "
      select * from users u
      where u.active = 1
      and u.created_at > '2023-01-01'
      order by u.created_at desc
    ";
    let result = Linter::new().lint(sql, "test.sql");
    assert!(result.issues.len() > 2);
    assert!(result.warning_count > 0);
}

#[test]
fn test_select_star_and_keyword_case() {
    let result = Linter::new().lint("select * from foo where BAR = 1", "test.sql");
    assert_eq!(result.issues.len(), 4);
    assert_eq!(result.error_count, 0);
    assert_eq!(result.warning_count, 4);
    assert_eq!(count_rule(&result, "keyword-case"), 3);
    // registration order: no-select-star runs before keyword-case
    assert_eq!(result.issues[0].rule, "no-select-star");
}

#[test]
fn test_empty_input() {
    let result = Linter::new().lint("", "test.sql");
    assert_eq!(result.filename, "test.sql");
    assert!(result.issues.is_empty());
}

#[test]
fn test_comment_only_input() {
    let result = Linter::new().lint("-- This is a comment\n-- Another comment", "test.sql");
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.warning_count, 1);
    assert!(result.issues[0].message.contains("\"is\""));
}

#[test]
fn test_join_and_group_by() {
    let sql = "select d.name, count(e.id) from departments d join employees e \
               on d.id = e.department_id group by d.name;";
    let result = Linter::new().lint(sql, "test.sql");

    // select, from, join, on, group, by
    assert_eq!(count_rule(&result, "keyword-case"), 6);
    // d and e are info-level alias issues
    assert_eq!(count_rule(&result, "table-alias"), 2);
    assert_eq!(result.issues.len(), 8);
    assert_eq!(result.warning_count, 6);
    assert_eq!(result.error_count, 0);
}

#[test]
fn test_cte_with_mixed_case() {
    let sql = "with EmployeeCTE as (select id, name, department_id from employees where salary > 50000) \
               select e.name, d.name from EmployeeCTE e join departments d on e.department_id = d.id;";
    let result = Linter::new().lint(sql, "test.sql");

    assert_eq!(count_rule(&result, "keyword-case"), 8);
    assert_eq!(result.issues.len(), 10);
    assert_eq!(result.warning_count, 8);
    assert_eq!(result.error_count, 0);
}

#[test]
fn test_window_function() {
    let sql = "select name, salary, row_number() over (partition by department_id order by salary desc) as rn from employees;";
    let result = Linter::new().lint(sql, "test.sql");

    assert_eq!(count_rule(&result, "keyword-case"), 6);
    assert!(result.issues.iter().all(|i| i.severity == Severity::Warning));
    assert_eq!(result.error_count, 0);
}

#[test]
fn test_issue_positions() {
    let sql = "SELECT id\nfrom users";
    let result = Linter::new().lint(sql, "test.sql");
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].line, Some(2));
    assert_eq!(result.issues[0].column, Some(1));
}

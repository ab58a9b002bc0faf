//! The recognizer itself: one compiled pattern per grammar, tried in a fixed
//! order against the trimmed input line.

use crate::ast::{
    ColumnDef, ComparisonOp, JoinClause, Projection, Statement, WhereClause,
};
use crate::diagnostics::SyntaxError;
use once_cell::sync::Lazy;
use regex::Regex;
use ty::{DataTypeKind, Value};

static CREATE_DATABASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^CREATE\s+DATABASE\s+(\w+);?$").unwrap());
static USE_DATABASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^USE\s+(\w+);?$").unwrap());
static DROP_DATABASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^DROP\s+DATABASE\s+(\w+);?$").unwrap());
static LIST_DATABASES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^SHOW\s+DATABASES;?$").unwrap());
static SHOW_TABLES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^SHOW\s+TABLES;?$").unwrap());
static DESCRIBE_TABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^DESCRIBE\s+(\w+);?$").unwrap());
static DROP_TABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^DROP\s+TABLE\s+(\w+);?$").unwrap());
static CREATE_INDEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^CREATE\s+INDEX\s+(\w+)\s+ON\s+(\w+)\s*\(\s*(\w+)\s*\);?$").unwrap()
});
static DROP_INDEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^DROP\s+INDEX\s+(\w+);?$").unwrap());
static UPDATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^UPDATE\s+(\w+)\s+SET\s+(\w+)\s*=\s*(.+?)(?:\s+WHERE\s+(.+))?;?$").unwrap()
});
static DELETE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^DELETE\s+FROM\s+(\w+)(?:\s+WHERE\s+(.+))?;?$").unwrap()
});
static SELECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^SELECT\s+(.+?)\s+FROM\s+(\w+)(?:\s+JOIN\s+(\w+)\s+ON\s+([\w.]+)\s*=\s*([\w.]+))?(?:\s+WHERE\s+(.+))?;?$",
    )
    .unwrap()
});
static CREATE_TABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^CREATE\s+TABLE\s+(\w+)\s*\((.+)\);?$").unwrap());
static INSERT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^INSERT\s+INTO\s+(\w+)\s+VALUES\s*\((.+)\);?$").unwrap()
});

/// Recognizes one statement.
///
/// Returns `Ok(None)` when the line fits no grammar; the caller decides how
/// to word "invalid or unsupported statement". A grammar that matches but
/// fails validation (bad WHERE clause, bad column type) is a [`SyntaxError`].
pub fn parse(input: &str) -> Result<Option<Statement>, SyntaxError> {
    let input = input.trim();

    if let Some(caps) = CREATE_DATABASE.captures(input) {
        return Ok(Some(Statement::CreateDatabase {
            name: caps[1].to_string(),
        }));
    }

    if let Some(caps) = USE_DATABASE.captures(input) {
        return Ok(Some(Statement::UseDatabase {
            name: caps[1].to_string(),
        }));
    }

    if let Some(caps) = DROP_DATABASE.captures(input) {
        return Ok(Some(Statement::DropDatabase {
            name: caps[1].to_string(),
        }));
    }

    if LIST_DATABASES.is_match(input) {
        return Ok(Some(Statement::ListDatabases));
    }

    if SHOW_TABLES.is_match(input) {
        return Ok(Some(Statement::ShowTables));
    }

    if let Some(caps) = DESCRIBE_TABLE.captures(input) {
        return Ok(Some(Statement::DescribeTable {
            table_name: caps[1].to_string(),
        }));
    }

    if let Some(caps) = DROP_TABLE.captures(input) {
        return Ok(Some(Statement::DropTable {
            table_name: caps[1].to_string(),
        }));
    }

    if let Some(caps) = CREATE_INDEX.captures(input) {
        return Ok(Some(Statement::CreateIndex {
            index_name: caps[1].to_string(),
            table_name: caps[2].to_string(),
            column_name: caps[3].to_string(),
        }));
    }

    if let Some(caps) = DROP_INDEX.captures(input) {
        return Ok(Some(Statement::DropIndex {
            index_name: caps[1].to_string(),
        }));
    }

    if let Some(caps) = UPDATE.captures(input) {
        let where_clause = caps
            .get(4)
            .map(|m| parse_where_clause(m.as_str()))
            .transpose()?;
        return Ok(Some(Statement::Update {
            table_name: caps[1].to_string(),
            column_name: caps[2].to_string(),
            value: parse_value_list(&caps[3])
                .into_iter()
                .next()
                .unwrap_or_else(|| Value::from("")),
            where_clause,
        }));
    }

    if let Some(caps) = DELETE.captures(input) {
        let where_clause = caps
            .get(2)
            .map(|m| parse_where_clause(m.as_str()))
            .transpose()?;
        return Ok(Some(Statement::Delete {
            table_name: caps[1].to_string(),
            where_clause,
        }));
    }

    if let Some(caps) = SELECT.captures(input) {
        let projection = parse_projection(&caps[1]);
        let table_name = caps[2].to_string();
        let join_clause = caps.get(3).map(|right| JoinClause {
            left_table: table_name.clone(),
            right_table: right.as_str().to_string(),
            left_column: strip_qualifier(&caps[4]),
            right_column: strip_qualifier(&caps[5]),
        });
        let where_clause = caps
            .get(6)
            .map(|m| parse_where_clause(m.as_str()))
            .transpose()?;
        return Ok(Some(Statement::Select {
            projection,
            table_name,
            join_clause,
            where_clause,
        }));
    }

    if let Some(caps) = CREATE_TABLE.captures(input) {
        return Ok(Some(Statement::CreateTable {
            table_name: caps[1].to_string(),
            columns: parse_column_defs(&caps[2])?,
        }));
    }

    if let Some(caps) = INSERT.captures(input) {
        return Ok(Some(Statement::Insert {
            table_name: caps[1].to_string(),
            values: parse_value_list(&caps[2]),
        }));
    }

    Ok(None)
}

/// Splits a comma list on top-level commas only: a comma inside a
/// single-quoted run does not separate values.
fn split_top_level(raw: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;

    for (i, ch) in raw.char_indices() {
        match ch {
            '\'' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                parts.push(&raw[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&raw[start..]);
    parts
}

/// The value-literal rule: `'...'` is text with the quotes stripped, a token
/// that fully parses as an integer is numeric, and anything else is kept as
/// raw text (the fallback for unquoted identifiers and strings).
pub fn parse_value_list(raw: &str) -> Vec<Value> {
    split_top_level(raw)
        .into_iter()
        .map(|token| {
            let token = token.trim();
            if token.len() >= 2 && token.starts_with('\'') && token.ends_with('\'') {
                return Value::from(&token[1..token.len() - 1]);
            }
            match token.parse::<i64>() {
                Ok(n) => Value::Integer(n),
                Err(_) => Value::from(token),
            }
        })
        .collect()
}

/// The WHERE rule: probe the operators two-character-first so `>=` is never
/// read as `>`; split on the first hit; strip a trailing `;` from the value
/// side, then apply the value-literal rule.
fn parse_where_clause(clause: &str) -> Result<WhereClause, SyntaxError> {
    for op in ComparisonOp::PROBE_ORDER {
        if let Some(at) = clause.find(op.symbol()) {
            let column = clause[..at].trim().to_string();
            let raw_value = clause[at + op.symbol().len()..]
                .trim()
                .trim_end_matches(';')
                .trim();
            let value = parse_value_list(raw_value)
                .into_iter()
                .next()
                .unwrap_or_else(|| Value::from(""));
            return Ok(WhereClause {
                column,
                operator: op,
                value,
            });
        }
    }

    Err(SyntaxError::InvalidWhereClause {
        clause: clause.to_string(),
    })
}

fn parse_projection(raw: &str) -> Projection {
    let columns: Vec<String> = raw.split(',').map(|c| c.trim().to_string()).collect();
    if columns.iter().any(|c| c == "*") {
        Projection::All
    } else {
        Projection::Columns(columns)
    }
}

/// Column definitions: `name TYPE [PRIMARY KEY] [UNIQUE]`, comma-separated.
fn parse_column_defs(raw: &str) -> Result<Vec<ColumnDef>, SyntaxError> {
    raw.split(',')
        .map(|definition| {
            let parts: Vec<&str> = definition.split_whitespace().collect();
            let (name, type_keyword) = match (parts.first(), parts.get(1)) {
                (Some(name), Some(keyword)) => (name.to_string(), *keyword),
                _ => {
                    return Err(SyntaxError::MalformedColumnDefinition {
                        definition: definition.trim().to_string(),
                    })
                }
            };

            let data_type = DataTypeKind::from_keyword(type_keyword)?;
            let primary_key = parts.iter().any(|p| p.eq_ignore_ascii_case("PRIMARY"));
            let unique = parts.iter().any(|p| p.eq_ignore_ascii_case("UNIQUE"));

            Ok(ColumnDef {
                name,
                data_type,
                primary_key,
                unique,
            })
        })
        .collect()
}

/// `table.column` → `column`; bare names pass through.
fn strip_qualifier(name: &str) -> String {
    name.rsplit('.').next().unwrap_or(name).to_string()
}

#[cfg(test)]
mod basic_statements {
    use super::*;
    use pretty_assertions_sorted::assert_eq;

    #[test]
    fn test_create_database() {
        assert_eq!(
            parse("CREATE DATABASE app;").unwrap(),
            Some(Statement::CreateDatabase {
                name: "app".to_string()
            })
        );
        // Keywords are case-insensitive and the terminator is optional.
        assert_eq!(
            parse("create database app").unwrap(),
            Some(Statement::CreateDatabase {
                name: "app".to_string()
            })
        );
    }

    #[test]
    fn test_database_management() {
        assert_eq!(
            parse("USE app;").unwrap(),
            Some(Statement::UseDatabase {
                name: "app".to_string()
            })
        );
        assert_eq!(
            parse("DROP DATABASE app;").unwrap(),
            Some(Statement::DropDatabase {
                name: "app".to_string()
            })
        );
        assert_eq!(parse("SHOW DATABASES;").unwrap(), Some(Statement::ListDatabases));
        assert_eq!(parse("show tables").unwrap(), Some(Statement::ShowTables));
        assert_eq!(
            parse("DESCRIBE users;").unwrap(),
            Some(Statement::DescribeTable {
                table_name: "users".to_string()
            })
        );
    }

    #[test]
    fn test_create_table() {
        let statement = parse(
            "CREATE TABLE employees (id INT PRIMARY KEY, name TEXT, email TEXT UNIQUE, age INT);",
        )
        .unwrap()
        .unwrap();

        let Statement::CreateTable {
            table_name,
            columns,
        } = statement
        else {
            panic!("expected CREATE TABLE");
        };
        assert_eq!(table_name, "employees");
        assert_eq!(columns.len(), 4);
        assert_eq!(columns[0].name, "id");
        assert!(columns[0].primary_key);
        assert!(!columns[0].unique);
        assert_eq!(columns[2].data_type, DataTypeKind::Text);
        assert!(columns[2].unique);
    }

    #[test]
    fn test_create_table_invalid_type() {
        let err = parse("CREATE TABLE t (id UUID);").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid data type: UUID. Valid types are: INT, TEXT"
        );
    }

    #[test]
    fn test_create_table_missing_type() {
        let err = parse("CREATE TABLE t (id);").unwrap_err();
        assert_eq!(err.to_string(), "Malformed column definition: id");
    }

    #[test]
    fn test_insert_value_literals() {
        let statement = parse("INSERT INTO t VALUES(1, 'a, b', raw);").unwrap().unwrap();
        assert_eq!(
            statement,
            Statement::Insert {
                table_name: "t".to_string(),
                values: vec![
                    Value::Integer(1),
                    // The quoted comma does not split the list.
                    Value::from("a, b"),
                    // Unquoted non-numeric tokens fall back to raw text.
                    Value::from("raw"),
                ],
            }
        );
    }

    #[test]
    fn test_update_with_where() {
        let statement = parse("UPDATE t SET v = 'z' WHERE id = 1;").unwrap().unwrap();
        assert_eq!(
            statement,
            Statement::Update {
                table_name: "t".to_string(),
                column_name: "v".to_string(),
                value: Value::from("z"),
                where_clause: Some(WhereClause {
                    column: "id".to_string(),
                    operator: ComparisonOp::Eq,
                    value: Value::Integer(1),
                }),
            }
        );
    }

    #[test]
    fn test_update_without_where() {
        let statement = parse("UPDATE t SET v = 10;").unwrap().unwrap();
        assert_eq!(
            statement,
            Statement::Update {
                table_name: "t".to_string(),
                column_name: "v".to_string(),
                value: Value::Integer(10),
                where_clause: None,
            }
        );
    }

    #[test]
    fn test_delete() {
        assert_eq!(
            parse("DELETE FROM t;").unwrap(),
            Some(Statement::Delete {
                table_name: "t".to_string(),
                where_clause: None,
            })
        );
        assert_eq!(
            parse("DELETE FROM t WHERE age >= 30;").unwrap(),
            Some(Statement::Delete {
                table_name: "t".to_string(),
                where_clause: Some(WhereClause {
                    column: "age".to_string(),
                    operator: ComparisonOp::GtEq,
                    value: Value::Integer(30),
                }),
            })
        );
    }

    #[test]
    fn test_select_star() {
        assert_eq!(
            parse("SELECT * FROM users;").unwrap(),
            Some(Statement::Select {
                projection: Projection::All,
                table_name: "users".to_string(),
                join_clause: None,
                where_clause: None,
            })
        );
    }

    #[test]
    fn test_select_columns_with_where() {
        assert_eq!(
            parse("SELECT id, name FROM users WHERE name = 'Alice';").unwrap(),
            Some(Statement::Select {
                projection: Projection::Columns(vec!["id".to_string(), "name".to_string()]),
                table_name: "users".to_string(),
                join_clause: None,
                where_clause: Some(WhereClause {
                    column: "name".to_string(),
                    operator: ComparisonOp::Eq,
                    value: Value::from("Alice"),
                }),
            })
        );
    }

    #[test]
    fn test_select_join() {
        let statement = parse("SELECT * FROM a JOIN b ON a.k = b.k WHERE x = 1;")
            .unwrap()
            .unwrap();
        assert_eq!(
            statement,
            Statement::Select {
                projection: Projection::All,
                table_name: "a".to_string(),
                join_clause: Some(JoinClause {
                    left_table: "a".to_string(),
                    right_table: "b".to_string(),
                    left_column: "k".to_string(),
                    right_column: "k".to_string(),
                }),
                where_clause: Some(WhereClause {
                    column: "x".to_string(),
                    operator: ComparisonOp::Eq,
                    value: Value::Integer(1),
                }),
            }
        );
    }

    #[test]
    fn test_select_join_unqualified_on() {
        let statement = parse("SELECT name, total FROM a JOIN b ON k = k;").unwrap().unwrap();
        let Statement::Select { join_clause, .. } = statement else {
            panic!("expected SELECT");
        };
        assert_eq!(
            join_clause,
            Some(JoinClause {
                left_table: "a".to_string(),
                right_table: "b".to_string(),
                left_column: "k".to_string(),
                right_column: "k".to_string(),
            })
        );
    }

    #[test]
    fn test_index_statements() {
        assert_eq!(
            parse("CREATE INDEX idx_id ON users(id);").unwrap(),
            Some(Statement::CreateIndex {
                index_name: "idx_id".to_string(),
                table_name: "users".to_string(),
                column_name: "id".to_string(),
            })
        );
        assert_eq!(
            parse("DROP INDEX idx_id;").unwrap(),
            Some(Statement::DropIndex {
                index_name: "idx_id".to_string(),
            })
        );
    }
}

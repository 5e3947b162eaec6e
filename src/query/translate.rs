// SPDX-License-Identifier: Apache-2.0

//! Translation of a parsed expression tree into the backend query string.
//!
//! Each field carries its own operator table: `level` and `source` target
//! keyword subfields for exact matching, `message` and `raw` are free-text
//! phrase clauses, and `timestamp` compiles to a range clause.

use crate::query::ast::{CondOp, Expr, Field};
use crate::query::timestamp;
use crate::query::{QueryError, Result};

pub(crate) fn expr_to_query_string(expr: &Expr) -> Result<String> {
    match expr {
        Expr::Condition { field, op, value } => condition(*field, *op, value),
        Expr::Not(child) => Ok(format!("NOT ({})", expr_to_query_string(child)?)),
        Expr::Binary { left, op, right } => Ok(format!(
            "({} {} {})",
            expr_to_query_string(left)?,
            op,
            expr_to_query_string(right)?
        )),
    }
}

fn condition(field: Field, op: CondOp, value: &str) -> Result<String> {
    match field {
        Field::Level => phrase_clause(field, "level.keyword", &value.to_uppercase(), op),
        Field::Message => phrase_clause(field, "message", value, op),
        Field::Raw => phrase_clause(field, "raw", value, op),
        Field::Source => phrase_clause(field, "source.keyword", value, op),
        Field::Timestamp => timestamp_clause(op, value),
    }
}

fn phrase_clause(field: Field, target: &str, value: &str, op: CondOp) -> Result<String> {
    let clause = format!("{}:\"{}\"", target, escape_phrase(value));
    match op {
        CondOp::Eq | CondOp::Contains => Ok(clause),
        CondOp::Neq | CondOp::NotContains => Ok(format!("NOT {}", clause)),
        _ => Err(QueryError::UnsupportedOperator(field.name().to_string())),
    }
}

fn timestamp_clause(op: CondOp, value: &str) -> Result<String> {
    let instant = timestamp::parse_timestamp(value)
        .ok_or_else(|| QueryError::BadTimestamp(value.to_string()))?;
    let iso = timestamp::format_instant(&instant);
    match op {
        CondOp::Eq => Ok(format!("timestamp:[{} TO {}]", iso, iso)),
        CondOp::Gte => Ok(format!("timestamp:[{} TO *]", iso)),
        CondOp::Gt => Ok(format!("timestamp:{{{} TO *}}", iso)),
        CondOp::Lte => Ok(format!("timestamp:[* TO {}]", iso)),
        CondOp::Lt => Ok(format!("timestamp:{{* TO {}}}", iso)),
        CondOp::Neq | CondOp::Contains | CondOp::NotContains => Err(
            QueryError::UnsupportedOperator(Field::Timestamp.name().to_string()),
        ),
    }
}

/// Escape backslash and double quote before embedding a value in a quoted
/// phrase clause.
fn escape_phrase(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use crate::query::{parse, QueryError};

    #[test]
    fn level_is_uppercased_and_exact() {
        let parsed = parse(r#"level = "Info""#).unwrap();
        assert_eq!(parsed.query_string, r#"level.keyword:"INFO""#);
    }

    #[test]
    fn level_negation() {
        let parsed = parse(r#"level != "info""#).unwrap();
        assert_eq!(parsed.query_string, r#"NOT level.keyword:"INFO""#);
    }

    #[test]
    fn message_and_raw_are_phrase_clauses() {
        assert_eq!(
            parse(r#"message CONTAINS "boom""#).unwrap().query_string,
            r#"message:"boom""#
        );
        assert_eq!(
            parse(r#"raw == "boom""#).unwrap().query_string,
            r#"raw:"boom""#
        );
        assert_eq!(
            parse(r#"text NOT_CONTAINS "boom""#).unwrap().query_string,
            r#"NOT raw:"boom""#
        );
    }

    #[test]
    fn source_targets_the_keyword_subfield() {
        assert_eq!(
            parse("source == logs/app.log").unwrap().query_string,
            r#"source.keyword:"logs/app.log""#
        );
    }

    #[test]
    fn timestamp_ranges() {
        assert_eq!(
            parse(r#"timestamp >= "2024-01-01T00:00:00Z""#)
                .unwrap()
                .query_string,
            "timestamp:[2024-01-01T00:00:00Z TO *]"
        );
        assert_eq!(
            parse(r#"timestamp < "2024-01-01T00:00:00Z""#)
                .unwrap()
                .query_string,
            "timestamp:{* TO 2024-01-01T00:00:00Z}"
        );
        assert_eq!(
            parse(r#"timestamp == "2024-01-01T00:00:00Z""#)
                .unwrap()
                .query_string,
            "timestamp:[2024-01-01T00:00:00Z TO 2024-01-01T00:00:00Z]"
        );
        assert_eq!(
            parse(r#"timestamp > "2024-01-01T00:00:00Z""#)
                .unwrap()
                .query_string,
            "timestamp:{2024-01-01T00:00:00Z TO *}"
        );
        assert_eq!(
            parse(r#"timestamp <= "2024-01-01T00:00:00Z""#)
                .unwrap()
                .query_string,
            "timestamp:[* TO 2024-01-01T00:00:00Z]"
        );
    }

    #[test]
    fn timestamp_rejects_contains() {
        assert_eq!(
            parse(r#"timestamp CONTAINS "2024""#),
            Err(QueryError::UnsupportedOperator("timestamp".to_string()))
        );
    }

    #[test]
    fn timestamp_rejects_bad_literals() {
        assert_eq!(
            parse(r#"timestamp > "yesterday""#),
            Err(QueryError::BadTimestamp("yesterday".to_string()))
        );
    }

    #[test]
    fn ordering_comparisons_are_rejected_for_text_fields() {
        assert_eq!(
            parse(r#"message > "boom""#),
            Err(QueryError::UnsupportedOperator("message".to_string()))
        );
    }

    #[test]
    fn values_are_escaped() {
        assert_eq!(
            parse(r#"message == "say \"hi\" \\ bye""#).unwrap().query_string,
            r#"message:"say \"hi\" \\ bye""#
        );
    }

    #[test]
    fn conjunction_translates_both_sides() {
        let parsed = parse(r#"message CONTAINS "boom" AND level == "ERROR""#).unwrap();
        assert_eq!(
            parsed.query_string,
            r#"message:"boom" AND level.keyword:"ERROR""#
        );
    }

    #[test]
    fn nested_expressions_keep_grouping() {
        let parsed = parse(r#"NOT (level == a OR level == b) AND message CONTAINS c"#).unwrap();
        assert_eq!(
            parsed.query_string,
            r#"NOT ((level.keyword:"A" OR level.keyword:"B")) AND message:"c""#
        );
    }
}

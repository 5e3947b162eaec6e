// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// A parsed query expression. The tree is exclusively owned, with no sharing
/// and no cycles; it lives only for the duration of one parse call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Condition {
        field: Field,
        op: CondOp,
        value: String,
    },
    Not(Box<Expr>),
    Binary {
        left: Box<Expr>,
        op: LogicalOp,
        right: Box<Expr>,
    },
}

/// Queryable document fields. `text` is accepted in queries as an alias for
/// [`Field::Raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Level,
    Message,
    Raw,
    Source,
    Timestamp,
}

impl Field {
    /// Resolve a lower-cased field name, `None` for unknown fields.
    pub fn resolve(name: &str) -> Option<Field> {
        match name {
            "level" => Some(Field::Level),
            "message" => Some(Field::Message),
            "text" | "raw" => Some(Field::Raw),
            "source" => Some(Field::Source),
            "timestamp" => Some(Field::Timestamp),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Field::Level => "level",
            Field::Message => "message",
            Field::Raw => "raw",
            Field::Source => "source",
            Field::Timestamp => "timestamp",
        }
    }
}

/// Comparison operator of a single condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CondOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Contains,
    NotContains,
}

/// Boolean connective of a binary expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOp::And => write!(f, "AND"),
            LogicalOp::Or => write!(f, "OR"),
        }
    }
}

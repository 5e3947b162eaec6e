// SPDX-License-Identifier: Apache-2.0

//! Compiler for the log search query DSL.
//!
//! A query like `level == "ERROR" AND timestamp >= 2024-01-01` is lexed,
//! parsed into an expression tree, and translated into a Lucene-style query
//! string understood by the search backend. Compilation is total: every
//! failure mode surfaces as a [`QueryError`], never a partial translation.

mod ast;
mod lexer;
mod parser;
mod token;
mod translate;

pub mod timestamp;

pub use ast::{CondOp, Expr, Field, LogicalOp};
pub use token::{Token, TokenKind};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("query cannot be empty")]
    EmptyQuery,

    #[error("unterminated string literal in query")]
    UnterminatedString,

    #[error("unexpected character '{0}' in query")]
    UnexpectedChar(char),

    #[error("unexpected operator starting with '{0}'")]
    UnexpectedOperator(char),

    #[error("expected field name (found '{0}')")]
    ExpectedField(String),

    #[error("missing closing parenthesis (found '{0}')")]
    MissingParen(String),

    #[error("unexpected token after end of expression (found '{0}')")]
    TrailingInput(String),

    #[error("unsupported field '{0}'")]
    UnsupportedField(String),

    #[error("unsupported operator for field '{0}'")]
    UnsupportedOperator(String),

    #[error("missing value for condition on field '{0}'")]
    MissingValue(String),

    #[error("timestamp value '{0}' is not in a supported format")]
    BadTimestamp(String),
}

pub type Result<T> = std::result::Result<T, QueryError>;

/// Result of compiling a query: the translated backend query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    pub query_string: String,
}

/// Compile a raw DSL query into a backend query string.
pub fn parse(input: &str) -> Result<ParseResult> {
    if input.trim().is_empty() {
        return Err(QueryError::EmptyQuery);
    }

    let root = parser::Parser::new(input)?.parse()?;
    let mut translated = translate::expr_to_query_string(&root)?;

    // Cosmetic normalization: a fully wrapped result keeps the same meaning
    // without the outer pair.
    if translated.starts_with('(') && translated.ends_with(')') {
        translated = translated[1..translated.len() - 1].to_string();
    }

    Ok(ParseResult {
        query_string: translated,
    })
}

// SPDX-License-Identifier: Apache-2.0

//! Recursive-descent parser over the token stream.
//!
//! Grammar, lowest to highest precedence:
//!
//! ```text
//! expr      := term (OR term)*
//! term      := factor (AND factor)*
//! factor    := NOT factor | '(' expr ')' | condition
//! condition := WORD comparison (STRING | WORD)
//! ```

use crate::query::ast::{CondOp, Expr, Field, LogicalOp};
use crate::query::lexer::Lexer;
use crate::query::token::{Token, TokenKind};
use crate::query::{QueryError, Result};

pub(crate) struct Parser {
    lexer: Lexer,
    current: Token,
}

impl Parser {
    pub(crate) fn new(input: &str) -> Result<Self> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse a complete expression and require the input to be exhausted.
    pub(crate) fn parse(mut self) -> Result<Expr> {
        let expr = self.expression()?;
        if self.current.kind != TokenKind::Eof {
            return Err(QueryError::TrailingInput(self.current.text.clone()));
        }
        Ok(expr)
    }

    fn expression(&mut self) -> Result<Expr> {
        let mut node = self.term()?;
        while self.eat(TokenKind::Or)? {
            let right = self.term()?;
            node = Expr::Binary {
                left: Box::new(node),
                op: LogicalOp::Or,
                right: Box::new(right),
            };
        }
        Ok(node)
    }

    fn term(&mut self) -> Result<Expr> {
        let mut node = self.factor()?;
        while self.eat(TokenKind::And)? {
            let right = self.factor()?;
            node = Expr::Binary {
                left: Box::new(node),
                op: LogicalOp::And,
                right: Box::new(right),
            };
        }
        Ok(node)
    }

    fn factor(&mut self) -> Result<Expr> {
        if self.eat(TokenKind::Not)? {
            return Ok(Expr::Not(Box::new(self.factor()?)));
        }
        if self.eat(TokenKind::LParen)? {
            let expr = self.expression()?;
            if !self.eat(TokenKind::RParen)? {
                return Err(QueryError::MissingParen(self.current.text.clone()));
            }
            return Ok(expr);
        }
        self.condition()
    }

    fn condition(&mut self) -> Result<Expr> {
        if self.current.kind != TokenKind::Word {
            return Err(QueryError::ExpectedField(self.current.text.clone()));
        }
        let name = self.current.text.to_lowercase();
        self.advance()?;

        let op = match self.current.kind {
            TokenKind::Eq => CondOp::Eq,
            TokenKind::Neq => CondOp::Neq,
            TokenKind::Gte => CondOp::Gte,
            TokenKind::Gt => CondOp::Gt,
            TokenKind::Lte => CondOp::Lte,
            TokenKind::Lt => CondOp::Lt,
            TokenKind::Contains => CondOp::Contains,
            TokenKind::NotContains => CondOp::NotContains,
            _ => return Err(QueryError::UnsupportedOperator(name)),
        };
        self.advance()?;

        let value = match self.current.kind {
            TokenKind::Str | TokenKind::Word => self.current.text.clone(),
            _ => return Err(QueryError::MissingValue(name)),
        };
        self.advance()?;

        let field = Field::resolve(&name).ok_or(QueryError::UnsupportedField(name))?;
        Ok(Expr::Condition { field, op, value })
    }

    fn eat(&mut self, kind: TokenKind) -> Result<bool> {
        if self.current.kind == kind {
            self.advance()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_expr(input: &str) -> Result<Expr> {
        Parser::new(input)?.parse()
    }

    #[test]
    fn parses_a_condition() {
        let expr = parse_expr(r#"level == "ERROR""#).unwrap();
        assert_eq!(
            expr,
            Expr::Condition {
                field: Field::Level,
                op: CondOp::Eq,
                value: "ERROR".to_string(),
            }
        );
    }

    #[test]
    fn field_names_are_case_insensitive() {
        let expr = parse_expr("LEVEL = info").unwrap();
        assert!(matches!(
            expr,
            Expr::Condition {
                field: Field::Level,
                ..
            }
        ));
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let expr = parse_expr("level == a OR level == b AND level == c").unwrap();
        let Expr::Binary { op, right, .. } = expr else {
            panic!("expected binary root");
        };
        assert_eq!(op, LogicalOp::Or);
        assert!(matches!(
            *right,
            Expr::Binary {
                op: LogicalOp::And,
                ..
            }
        ));
    }

    #[test]
    fn parens_override_precedence() {
        let expr = parse_expr("(level == a OR level == b) AND level == c").unwrap();
        let Expr::Binary { op, left, .. } = expr else {
            panic!("expected binary root");
        };
        assert_eq!(op, LogicalOp::And);
        assert!(matches!(*left, Expr::Binary { op: LogicalOp::Or, .. }));
    }

    #[test]
    fn not_applies_to_the_next_factor() {
        let expr = parse_expr("NOT level == a AND level == b").unwrap();
        let Expr::Binary { op, left, .. } = expr else {
            panic!("expected binary root");
        };
        assert_eq!(op, LogicalOp::And);
        assert!(matches!(*left, Expr::Not(_)));
    }

    #[test]
    fn text_aliases_raw() {
        let expr = parse_expr("text CONTAINS boom").unwrap();
        assert!(matches!(
            expr,
            Expr::Condition {
                field: Field::Raw,
                ..
            }
        ));
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert_eq!(
            parse_expr(r#"bogus == "x""#),
            Err(QueryError::UnsupportedField("bogus".to_string()))
        );
    }

    #[test]
    fn missing_operator_is_rejected() {
        assert_eq!(
            parse_expr("level info"),
            Err(QueryError::UnsupportedOperator("level".to_string()))
        );
    }

    #[test]
    fn missing_value_is_rejected() {
        assert_eq!(
            parse_expr("level =="),
            Err(QueryError::MissingValue("level".to_string()))
        );
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        assert_eq!(
            parse_expr("level == a level == b"),
            Err(QueryError::TrailingInput("level".to_string()))
        );
    }

    #[test]
    fn unclosed_paren_is_rejected() {
        assert_eq!(
            parse_expr("(level == a"),
            Err(QueryError::MissingParen("".to_string()))
        );
    }
}

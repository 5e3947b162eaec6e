// SPDX-License-Identifier: Apache-2.0

/// Kinds of tokens produced by the query lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    LParen,
    RParen,
    And,
    Or,
    Not,
    Word,
    Str,
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Contains,
    NotContains,
    Eof,
}

/// A single lexed token. `text` preserves the source spelling for words and
/// holds the unescaped contents for string literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

use hfsmc_common::Loc;
use serde::Serialize;

/// The fixed token vocabulary of the hfsm DSL. Identifiers match
/// `[A-Za-z0-9_]+`; there are no string or numeric literals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,
    OpenAngle,
    CloseAngle,
    Star,
    Colon,
    Name(String),
    Error,
    Eof,
}

impl TokenKind {
    /// The bare name used in diagnostics and table lookups, independent of
    /// any payload carried by `Name`.
    pub fn tag(&self) -> &'static str {
        match self {
            TokenKind::OpenBrace => "{",
            TokenKind::CloseBrace => "}",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenAngle => "<",
            TokenKind::CloseAngle => ">",
            TokenKind::Star => "*",
            TokenKind::Colon => ":",
            TokenKind::Name(_) => "NAME",
            TokenKind::Error => "ERROR",
            TokenKind::Eof => "EOF",
        }
    }
}

/// A single scanned token together with its source position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub loc: Loc,
}

impl Token {
    pub fn new(kind: TokenKind, loc: Loc) -> Self {
        Token { kind, loc }
    }
}

use hfsmc_common::Loc;
use serde::Serialize;
use std::fmt;

/// Which parser-state bucket a syntax error was raised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SyntaxErrorKind {
    Header,
    State,
    Transition,
    TransitionGroup,
    End,
    /// Raised directly by the lexer on an unrecognized character; carries no
    /// `state|event` context.
    Syntax,
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SyntaxErrorKind::Header => "HEADER",
            SyntaxErrorKind::State => "STATE",
            SyntaxErrorKind::Transition => "TRANSITION",
            SyntaxErrorKind::TransitionGroup => "TRANSITION_GROUP",
            SyntaxErrorKind::End => "END",
            SyntaxErrorKind::Syntax => "SYNTAX",
        };
        f.write_str(s)
    }
}

/// One parser- or lexer-level diagnostic. `context` is `"<state>|<event>"`
/// for every kind except [`SyntaxErrorKind::Syntax`], which carries an empty
/// context (the lexer has no parser state to report).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub context: String,
    pub loc: Loc,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Syntax error: {}. {}. {}.\n",
            self.kind, self.context, self.loc
        )
    }
}

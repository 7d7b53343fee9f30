//! Table-driven parser for the hfsm DSL: turns a token stream into an
//! [`FsmSyntax`] tree, never aborting on a malformed input.

mod builder;
mod error;
mod fsm_syntax;
mod parser;
mod state;
mod table;

pub use builder::{FsmSyntaxBuilder, SyntaxBuilder};
pub use error::{SyntaxError, SyntaxErrorKind};
pub use fsm_syntax::{FsmSyntax, Header, StateSpec, SubTransition, Transition};
pub use parser::{Parser, ParserSink};
pub use state::ParserState;

/// Lexes and parses `source` in one shot, returning the accumulated syntax
/// tree (including any syntax errors; this function never fails).
pub fn parse(source: &str) -> FsmSyntax {
    let mut builder = FsmSyntaxBuilder::new();
    {
        let mut sink = ParserSink::new(&mut builder);
        hfsmc_lexer::lex(source, &mut sink);
        sink.finish();
    }
    builder.into_fsm_syntax()
}

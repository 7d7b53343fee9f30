use crate::builder::SyntaxBuilder;
use crate::state::ParserState;
use crate::table::{build_table, Row};
use hfsmc_common::Loc;
use hfsmc_lexer::TokenSink;

/// The pushdown-free parser state machine described by [`build_table`].
/// Never aborts: an unmatched `(state, event)` pair is reported as one
/// categorized syntax error and the state is left unchanged.
pub struct Parser {
    state: ParserState,
    table: Vec<Row>,
}

impl Default for Parser {
    fn default() -> Self {
        Parser {
            state: ParserState::Header,
            table: build_table(),
        }
    }
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_event(&mut self, event: &str, loc: Loc, builder: &mut dyn SyntaxBuilder) {
        for row in &self.table {
            if row.current_state == self.state && row.event == event {
                self.state = row.new_state;
                if let Some(action) = row.action {
                    action.apply(builder);
                }
                return;
            }
        }
        self.report_error(event, loc, builder);
    }

    fn report_error(&self, event: &str, loc: Loc, builder: &mut dyn SyntaxBuilder) {
        use ParserState::*;
        match self.state {
            Header | HeaderColon | HeaderValue => builder.header_error(self.state, event, loc),
            StateSpec | SuperStateName | SuperStateClose | StateModifier | EntryAction
            | ExitAction | StateBase => builder.state_spec_error(self.state, event, loc),
            SingleEvent | SingleNextState | SingleActionGroup | SingleActionGroupName => {
                builder.transition_error(self.state, event, loc)
            }
            SubtransitionGroup | GroupEvent | GroupNextState | GroupActionGroup
            | GroupActionGroupName => builder.transition_group_error(self.state, event, loc),
            End => builder.end_error(self.state, event, loc),
            // Reachable only via states not dispatched to from the table's
            // error buckets above (there are none left); kept exhaustive
            // for future table states.
            MultipleEntryActions | MultipleExitActions => {
                builder.state_spec_error(self.state, event, loc)
            }
        }
    }
}

/// Feeds lexer callbacks straight into a [`Parser`] and its [`SyntaxBuilder`].
pub struct ParserSink<'b, B: SyntaxBuilder> {
    parser: Parser,
    builder: &'b mut B,
}

impl<'b, B: SyntaxBuilder> ParserSink<'b, B> {
    pub fn new(builder: &'b mut B) -> Self {
        ParserSink {
            parser: Parser::new(),
            builder,
        }
    }

    /// Dispatches the synthetic end-of-input event the host sends once the
    /// token stream is exhausted.
    pub fn finish(&mut self) {
        self.parser.handle_event("EOF", Loc::EOF, self.builder);
    }
}

impl<'b, B: SyntaxBuilder> TokenSink for ParserSink<'b, B> {
    fn open_brace(&mut self, line: i64, pos: i64) {
        self.parser.handle_event("{", Loc::new(line, pos), self.builder);
    }
    fn close_brace(&mut self, line: i64, pos: i64) {
        self.parser.handle_event("}", Loc::new(line, pos), self.builder);
    }
    fn open_paren(&mut self, line: i64, pos: i64) {
        self.parser.handle_event("(", Loc::new(line, pos), self.builder);
    }
    fn close_paren(&mut self, line: i64, pos: i64) {
        self.parser.handle_event(")", Loc::new(line, pos), self.builder);
    }
    fn open_angle(&mut self, line: i64, pos: i64) {
        self.parser.handle_event("<", Loc::new(line, pos), self.builder);
    }
    fn close_angle(&mut self, line: i64, pos: i64) {
        self.parser.handle_event(">", Loc::new(line, pos), self.builder);
    }
    fn star(&mut self, line: i64, pos: i64) {
        self.parser.handle_event("*", Loc::new(line, pos), self.builder);
    }
    fn colon(&mut self, line: i64, pos: i64) {
        self.parser.handle_event(":", Loc::new(line, pos), self.builder);
    }
    fn name(&mut self, name: &str, line: i64, pos: i64) {
        self.builder.set_name(name);
        self.parser.handle_event("NAME", Loc::new(line, pos), self.builder);
    }
    fn error(&mut self, line: i64, pos: i64) {
        // The lexer's own errors bypass the transition table entirely, per
        // the reference grammar: they never change parser state.
        self.builder.syntax_error(Loc::new(line, pos));
    }
}

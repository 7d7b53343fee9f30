use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::fsm_syntax::{FsmSyntax, Header, StateSpec, SubTransition, Transition};
use crate::state::ParserState;
use hfsmc_common::Loc;

/// Side effects the parser's transition table can trigger. Every method
/// corresponds to exactly one table action; the parser never mutates
/// `FsmSyntax` directly.
pub trait SyntaxBuilder {
    fn set_name(&mut self, name: &str);

    fn new_header_with_name(&mut self);
    fn add_header_with_value(&mut self);

    fn set_state_name(&mut self);
    fn set_super_state_name(&mut self);
    fn set_state_base(&mut self);
    fn set_entry_action(&mut self);
    fn set_exit_action(&mut self);
    fn done(&mut self);

    fn set_event(&mut self);
    fn set_null_event(&mut self);
    fn set_next_state(&mut self);
    fn set_null_next_state(&mut self);
    fn add_action(&mut self);
    fn transition_with_action(&mut self);
    fn transition_null_action(&mut self);
    fn transition_with_actions(&mut self);

    fn header_error(&mut self, state: ParserState, event: &str, loc: Loc);
    fn state_spec_error(&mut self, state: ParserState, event: &str, loc: Loc);
    fn transition_error(&mut self, state: ParserState, event: &str, loc: Loc);
    fn transition_group_error(&mut self, state: ParserState, event: &str, loc: Loc);
    fn end_error(&mut self, state: ParserState, event: &str, loc: Loc);
    fn syntax_error(&mut self, loc: Loc);
}

/// The only production [`SyntaxBuilder`]: accumulates a plain [`FsmSyntax`]
/// tree while the parser drives it.
#[derive(Default)]
pub struct FsmSyntaxBuilder {
    fsm_syntax: FsmSyntax,
    parsed_name: String,
    header: Header,
    sub_transition: Option<SubTransition>,
}

impl FsmSyntaxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fsm_syntax(&self) -> &FsmSyntax {
        &self.fsm_syntax
    }

    pub fn into_fsm_syntax(self) -> FsmSyntax {
        self.fsm_syntax
    }

    fn push_error(&mut self, kind: SyntaxErrorKind, context: String, loc: Loc) {
        self.fsm_syntax.errors.push(SyntaxError { kind, context, loc });
    }
}

impl Default for Header {
    fn default() -> Self {
        Header {
            name: String::new(),
            value: String::new(),
        }
    }
}

impl SyntaxBuilder for FsmSyntaxBuilder {
    fn set_name(&mut self, name: &str) {
        self.parsed_name = name.to_string();
    }

    fn new_header_with_name(&mut self) {
        self.header = Header {
            name: self.parsed_name.clone(),
            value: String::new(),
        };
    }

    fn add_header_with_value(&mut self) {
        self.header.value = self.parsed_name.clone();
        self.fsm_syntax.headers.push(self.header.clone());
    }

    fn set_state_name(&mut self) {
        self.fsm_syntax.logic.push(Transition {
            state: StateSpec::named(self.parsed_name.clone()),
            sub_transitions: Vec::new(),
        });
    }

    fn set_super_state_name(&mut self) {
        self.set_state_name();
        if let Some(t) = self.fsm_syntax.logic.last_mut() {
            t.state.abstract_state = true;
        }
    }

    fn set_state_base(&mut self) {
        if let Some(t) = self.fsm_syntax.logic.last_mut() {
            t.state.super_states.push(self.parsed_name.clone());
        }
    }

    fn set_entry_action(&mut self) {
        if let Some(t) = self.fsm_syntax.logic.last_mut() {
            t.state.entry_actions.push(self.parsed_name.clone());
        }
    }

    fn set_exit_action(&mut self) {
        if let Some(t) = self.fsm_syntax.logic.last_mut() {
            t.state.exit_actions.push(self.parsed_name.clone());
        }
    }

    fn done(&mut self) {
        self.fsm_syntax.done = true;
    }

    fn set_event(&mut self) {
        self.sub_transition = Some(SubTransition {
            event: self.parsed_name.clone(),
            next_state: String::new(),
            actions: Vec::new(),
        });
    }

    fn set_null_event(&mut self) {
        self.sub_transition = Some(SubTransition {
            event: String::new(),
            next_state: String::new(),
            actions: Vec::new(),
        });
    }

    fn set_next_state(&mut self) {
        if let Some(st) = self.sub_transition.as_mut() {
            st.next_state = self.parsed_name.clone();
        }
    }

    fn set_null_next_state(&mut self) {
        if let Some(st) = self.sub_transition.as_mut() {
            st.next_state = String::new();
        }
    }

    fn add_action(&mut self) {
        if let Some(st) = self.sub_transition.as_mut() {
            st.actions.push(self.parsed_name.clone());
        }
    }

    fn transition_with_action(&mut self) {
        if let Some(st) = self.sub_transition.as_mut() {
            st.actions.push(self.parsed_name.clone());
        }
        self.commit_sub_transition();
    }

    fn transition_null_action(&mut self) {
        self.commit_sub_transition();
    }

    fn transition_with_actions(&mut self) {
        self.commit_sub_transition();
    }

    fn header_error(&mut self, state: ParserState, event: &str, loc: Loc) {
        self.push_error(SyntaxErrorKind::Header, format!("{}|{}", state, event), loc);
    }

    fn state_spec_error(&mut self, state: ParserState, event: &str, loc: Loc) {
        self.push_error(SyntaxErrorKind::State, format!("{}|{}", state, event), loc);
    }

    fn transition_error(&mut self, state: ParserState, event: &str, loc: Loc) {
        self.push_error(
            SyntaxErrorKind::Transition,
            format!("{}|{}", state, event),
            loc,
        );
    }

    fn transition_group_error(&mut self, state: ParserState, event: &str, loc: Loc) {
        self.push_error(
            SyntaxErrorKind::TransitionGroup,
            format!("{}|{}", state, event),
            loc,
        );
    }

    fn end_error(&mut self, state: ParserState, event: &str, loc: Loc) {
        self.push_error(SyntaxErrorKind::End, format!("{}|{}", state, event), loc);
    }

    fn syntax_error(&mut self, loc: Loc) {
        self.push_error(SyntaxErrorKind::Syntax, String::new(), loc);
    }
}

impl FsmSyntaxBuilder {
    fn commit_sub_transition(&mut self) {
        if let Some(st) = self.sub_transition.take() {
            if let Some(t) = self.fsm_syntax.logic.last_mut() {
                t.sub_transitions.push(st);
            }
        }
    }
}

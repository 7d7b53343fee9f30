use serde::Serialize;
use std::fmt;

/// Every state the parser's pushdown-free state machine can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParserState {
    Header,
    HeaderColon,
    HeaderValue,
    StateSpec,
    SuperStateName,
    SuperStateClose,
    StateModifier,
    StateBase,
    EntryAction,
    MultipleEntryActions,
    ExitAction,
    MultipleExitActions,
    SingleEvent,
    SingleNextState,
    SingleActionGroup,
    SingleActionGroupName,
    SubtransitionGroup,
    GroupEvent,
    GroupNextState,
    GroupActionGroup,
    GroupActionGroupName,
    End,
}

impl fmt::Display for ParserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParserState::Header => "HEADER",
            ParserState::HeaderColon => "HEADER_COLON",
            ParserState::HeaderValue => "HEADER_VALUE",
            ParserState::StateSpec => "STATE_SPEC",
            ParserState::SuperStateName => "SUPER_STATE_NAME",
            ParserState::SuperStateClose => "SUPER_STATE_CLOSE",
            ParserState::StateModifier => "STATE_MODIFIER",
            ParserState::StateBase => "STATE_BASE",
            ParserState::EntryAction => "ENTRY_ACTION",
            ParserState::MultipleEntryActions => "MULTIPLE_ENTRY_ACTIONS",
            ParserState::ExitAction => "EXIT_ACTION",
            ParserState::MultipleExitActions => "MULTIPLE_EXIT_ACTIONS",
            ParserState::SingleEvent => "SINGLE_EVENT",
            ParserState::SingleNextState => "SINGLE_NEXT_STATE",
            ParserState::SingleActionGroup => "SINGLE_ACTION_GROUP",
            ParserState::SingleActionGroupName => "SINGLE_ACTION_GROUP_NAME",
            ParserState::SubtransitionGroup => "SUBTRANSITION_GROUP",
            ParserState::GroupEvent => "GROUP_EVENT",
            ParserState::GroupNextState => "GROUP_NEXT_STATE",
            ParserState::GroupActionGroup => "GROUP_ACTION_GROUP",
            ParserState::GroupActionGroupName => "GROUP_ACTION_GROUP_NAME",
            ParserState::End => "END",
        };
        f.write_str(s)
    }
}

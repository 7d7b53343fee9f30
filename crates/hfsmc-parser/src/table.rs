use crate::builder::SyntaxBuilder;
use crate::state::ParserState;

/// One table-driven side effect, named after the [`SyntaxBuilder`] method it
/// invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderAction {
    NewHeaderWithName,
    AddHeaderWithValue,
    SetStateName,
    Done,
    SetSuperStateName,
    SetEvent,
    SetNullEvent,
    SetEntryAction,
    SetExitAction,
    SetStateBase,
    SetNextState,
    SetNullNextState,
    TransitionWithAction,
    TransitionNullAction,
    AddAction,
    TransitionWithActions,
}

impl BuilderAction {
    pub fn apply(self, builder: &mut dyn SyntaxBuilder) {
        match self {
            BuilderAction::NewHeaderWithName => builder.new_header_with_name(),
            BuilderAction::AddHeaderWithValue => builder.add_header_with_value(),
            BuilderAction::SetStateName => builder.set_state_name(),
            BuilderAction::Done => builder.done(),
            BuilderAction::SetSuperStateName => builder.set_super_state_name(),
            BuilderAction::SetEvent => builder.set_event(),
            BuilderAction::SetNullEvent => builder.set_null_event(),
            BuilderAction::SetEntryAction => builder.set_entry_action(),
            BuilderAction::SetExitAction => builder.set_exit_action(),
            BuilderAction::SetStateBase => builder.set_state_base(),
            BuilderAction::SetNextState => builder.set_next_state(),
            BuilderAction::SetNullNextState => builder.set_null_next_state(),
            BuilderAction::TransitionWithAction => builder.transition_with_action(),
            BuilderAction::TransitionNullAction => builder.transition_null_action(),
            BuilderAction::AddAction => builder.add_action(),
            BuilderAction::TransitionWithActions => builder.transition_with_actions(),
        }
    }
}

/// One row of the parser's transition table: in `current_state` on `event`,
/// move to `new_state`, optionally running `action` first.
pub struct Row {
    pub current_state: ParserState,
    pub event: &'static str,
    pub new_state: ParserState,
    pub action: Option<BuilderAction>,
}

macro_rules! row {
    ($cur:ident, $ev:expr, $new:ident, $action:expr) => {
        Row {
            current_state: ParserState::$cur,
            event: $ev,
            new_state: ParserState::$new,
            action: $action,
        }
    };
}

use BuilderAction::*;

/// The full 41-row transition table, reproduced exactly from the reference
/// grammar: `(state, event) -> (newState, action)`. Anything not matched
/// here falls through to one categorized syntax error and leaves the
/// parser's state unchanged.
pub fn build_table() -> Vec<Row> {
    vec![
        row!(Header, "NAME", HeaderColon, Some(NewHeaderWithName)),
        row!(Header, "{", StateSpec, None),
        row!(HeaderColon, ":", HeaderValue, None),
        row!(HeaderValue, "NAME", Header, Some(AddHeaderWithValue)),
        row!(StateSpec, "(", SuperStateName, None),
        row!(StateSpec, "NAME", StateModifier, Some(SetStateName)),
        row!(StateSpec, "}", End, Some(Done)),
        row!(SuperStateName, "NAME", SuperStateClose, Some(SetSuperStateName)),
        row!(SuperStateClose, ")", StateModifier, None),
        row!(StateModifier, "<", EntryAction, None),
        row!(StateModifier, ">", ExitAction, None),
        row!(StateModifier, ":", StateBase, None),
        row!(StateModifier, "NAME", SingleEvent, Some(SetEvent)),
        row!(StateModifier, "*", SingleEvent, Some(SetNullEvent)),
        row!(StateModifier, "{", SubtransitionGroup, None),
        row!(EntryAction, "NAME", StateModifier, Some(SetEntryAction)),
        row!(EntryAction, "{", MultipleEntryActions, None),
        row!(MultipleEntryActions, "NAME", MultipleEntryActions, Some(SetEntryAction)),
        row!(MultipleEntryActions, "}", StateModifier, None),
        row!(ExitAction, "NAME", StateModifier, Some(SetExitAction)),
        row!(ExitAction, "{", MultipleExitActions, None),
        row!(MultipleExitActions, "NAME", MultipleExitActions, Some(SetExitAction)),
        row!(MultipleExitActions, "}", StateModifier, None),
        row!(StateBase, "NAME", StateModifier, Some(SetStateBase)),
        row!(SingleEvent, "NAME", SingleNextState, Some(SetNextState)),
        row!(SingleEvent, "*", SingleNextState, Some(SetNullNextState)),
        row!(SingleNextState, "NAME", StateSpec, Some(TransitionWithAction)),
        row!(SingleNextState, "*", StateSpec, Some(TransitionNullAction)),
        row!(SingleNextState, "{", SingleActionGroup, None),
        row!(SingleActionGroup, "NAME", SingleActionGroupName, Some(AddAction)),
        row!(SingleActionGroup, "}", StateSpec, Some(TransitionNullAction)),
        row!(SingleActionGroupName, "NAME", SingleActionGroupName, Some(AddAction)),
        row!(SingleActionGroupName, "}", StateSpec, Some(TransitionWithActions)),
        row!(SubtransitionGroup, "}", StateSpec, None),
        row!(SubtransitionGroup, "NAME", GroupEvent, Some(SetEvent)),
        row!(SubtransitionGroup, "*", GroupEvent, Some(SetNullEvent)),
        row!(GroupEvent, "NAME", GroupNextState, Some(SetNextState)),
        row!(GroupEvent, "*", GroupNextState, Some(SetNullNextState)),
        row!(GroupNextState, "NAME", SubtransitionGroup, Some(TransitionWithAction)),
        row!(GroupNextState, "*", SubtransitionGroup, Some(TransitionNullAction)),
        row!(GroupNextState, "{", GroupActionGroup, None),
        row!(GroupActionGroup, "NAME", GroupActionGroupName, Some(AddAction)),
        row!(GroupActionGroup, "}", SubtransitionGroup, Some(TransitionNullAction)),
        row!(GroupActionGroupName, "NAME", GroupActionGroupName, Some(AddAction)),
        row!(GroupActionGroupName, "}", SubtransitionGroup, Some(TransitionWithActions)),
        row!(End, "EOF", End, None),
    ]
}

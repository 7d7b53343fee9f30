use crate::error::AnalysisError;
use hfsmc_common::OrderedSet;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Stable index into [`SemanticStateMachine::states`].
///
/// Per spec §9: the semantic graph is an arena of [`SemanticState`] values
/// addressed by index, never by owning pointer, so cross-references
/// (super-states, next-states, the initial state) stay plain value data
/// across the stage boundary into the optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StateId(pub usize);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemanticTransition {
    pub event: String,
    pub next_state: StateId,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemanticState {
    pub name: String,
    pub entry_actions: Vec<String>,
    pub exit_actions: Vec<String>,
    pub abstract_state: bool,
    /// Insertion-ordered, deduplicated — see [`hfsmc_common::OrderedSet`]'s
    /// doc comment for why this replaces the reference implementation's
    /// randomized-iteration-order `map[*SemanticState]bool`.
    pub super_states: Vec<StateId>,
    pub transitions: Vec<SemanticTransition>,
}

impl SemanticState {
    fn named(name: impl Into<String>) -> Self {
        SemanticState {
            name: name.into(),
            entry_actions: Vec::new(),
            exit_actions: Vec::new(),
            abstract_state: false,
            super_states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    fn add_super_state(&mut self, id: StateId) {
        if !self.super_states.contains(&id) {
            self.super_states.push(id);
        }
    }
}

/// The graph-shaped output of semantic analysis: every state referenced
/// anywhere (as a super-state, next-state, or the initial state) is
/// guaranteed present in `states` once `errors` is empty.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SemanticStateMachine {
    pub fsm_name: String,
    pub action_class: String,
    pub initial_state: Option<StateId>,
    pub states: Vec<SemanticState>,
    #[serde(skip)]
    name_to_id: FxHashMap<String, StateId>,
    pub events: OrderedSet<String>,
    pub actions: OrderedSet<String>,
    pub errors: Vec<AnalysisError>,
    pub warnings: Vec<AnalysisError>,
}

impl SemanticStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, id: StateId) -> &SemanticState {
        &self.states[id.0]
    }

    pub fn state_mut(&mut self, id: StateId) -> &mut SemanticState {
        &mut self.states[id.0]
    }

    pub fn find_state(&self, name: &str) -> Option<StateId> {
        self.name_to_id.get(name).copied()
    }

    /// Registers `name` if not already present; returns its id either way.
    /// Mirrors the Go analyzer's "first occurrence wins" state registration.
    pub fn intern_state(&mut self, name: &str) -> StateId {
        if let Some(&id) = self.name_to_id.get(name) {
            return id;
        }
        let id = StateId(self.states.len());
        self.states.push(SemanticState::named(name));
        self.name_to_id.insert(name.to_string(), id);
        id
    }

    pub fn add_super_state(&mut self, state: StateId, super_state: StateId) {
        self.state_mut(state).add_super_state(super_state);
    }

    pub fn add_error(&mut self, error: AnalysisError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: AnalysisError) {
        self.warnings.push(warning);
    }

    pub fn state_names_sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.states.iter().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        names
    }
}

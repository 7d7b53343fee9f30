use hfsmc_semck::{SemanticStateMachine, StateId};
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::fmt;

/// Flat, first-order header: the three top-level DSL headers copied
/// straight from the semantic model (§9's authoritative mapping —
/// `fsm`/`initial`/`actions` each come from their like-named field, not
/// cross-wired).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Header {
    pub fsm: String,
    pub initial: String,
    pub actions: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubTransition {
    pub event: String,
    pub next_state: String,
    /// Fully materialized: exit chain (leaf-first) ++ entry chain
    /// (root-first) ++ the user-declared actions, in that order.
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    pub current_state: String,
    pub sub_transitions: Vec<SubTransition>,
}

/// The flattened transition table: one [`Transition`] per concrete state,
/// with every inherited transition, override, and entry/exit chain already
/// resolved. No consumer of this type needs to know about inheritance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OptimizedStateMachine {
    pub header: Header,
    pub states: Vec<String>,
    pub events: Vec<String>,
    pub actions: Vec<String>,
    pub transitions: Vec<Transition>,
}

/// Acyclic super-states are a documented precondition (§9) the semantic
/// analyzer doesn't enforce. `optimize` detects a cycle defensively during
/// hierarchy linearization rather than recursing forever.
#[derive(Debug, Clone, PartialEq)]
pub enum OptimizeError {
    Cycle { state: String },
}

impl fmt::Display for OptimizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizeError::Cycle { state } => {
                write!(f, "hierarchy contains a cycle rooted at {state}")
            }
        }
    }
}

impl std::error::Error for OptimizeError {}

/// Flattens a [`SemanticStateMachine`] into an [`OptimizedStateMachine`] by
/// linearizing each concrete state's super-state hierarchy and stitching
/// exit/entry action chains into every outgoing transition. See
/// `DESIGN.md` for why the claiming walk must be leaf-first (self before
/// ancestors) even though it realizes the override rule the spec describes
/// as a "root-first" walk.
pub fn optimize(ssm: &SemanticStateMachine) -> Result<OptimizedStateMachine, OptimizeError> {
    Ok(OptimizedStateMachine {
        header: build_header(ssm),
        states: concrete_state_names(ssm),
        events: ssm.events.iter().cloned().collect(),
        actions: ssm.actions.iter().cloned().collect(),
        transitions: build_transitions(ssm)?,
    })
}

fn build_header(ssm: &SemanticStateMachine) -> Header {
    Header {
        fsm: ssm.fsm_name.clone(),
        initial: ssm
            .initial_state
            .map(|id| ssm.state(id).name.clone())
            .unwrap_or_default(),
        actions: ssm.action_class.clone(),
    }
}

fn concrete_state_names(ssm: &SemanticStateMachine) -> Vec<String> {
    ssm.states
        .iter()
        .filter(|s| !s.abstract_state)
        .map(|s| s.name.clone())
        .collect()
}

/// Accumulates `state`'s ancestors root-first (topmost ancestor first, the
/// state itself last), skipping any super-state already present — this is
/// what the original calls `addAllStatesInHiearchyLeafFirst` despite the
/// name; see `DESIGN.md` note 2.
fn hierarchy_root_first(
    ssm: &SemanticStateMachine,
    state: StateId,
    out: &mut Vec<StateId>,
) -> Result<(), OptimizeError> {
    let mut visiting = FxHashSet::default();
    hierarchy_root_first_guarded(ssm, state, out, &mut visiting)
}

fn hierarchy_root_first_guarded(
    ssm: &SemanticStateMachine,
    state: StateId,
    out: &mut Vec<StateId>,
    visiting: &mut FxHashSet<StateId>,
) -> Result<(), OptimizeError> {
    if !visiting.insert(state) {
        return Err(OptimizeError::Cycle {
            state: ssm.state(state).name.clone(),
        });
    }
    for &super_state in &ssm.state(state).super_states {
        if !out.contains(&super_state) {
            hierarchy_root_first_guarded(ssm, super_state, out, visiting)?;
        }
    }
    out.push(state);
    Ok(())
}

fn hierarchy_leaf_first(
    ssm: &SemanticStateMachine,
    state: StateId,
) -> Result<Vec<StateId>, OptimizeError> {
    let mut out = Vec::new();
    hierarchy_root_first(ssm, state, &mut out)?;
    out.reverse();
    Ok(out)
}

fn exit_chain(ssm: &SemanticStateMachine, exit_state: StateId) -> Result<Vec<String>, OptimizeError> {
    let mut actions = Vec::new();
    for state in hierarchy_leaf_first(ssm, exit_state)? {
        actions.extend(ssm.state(state).exit_actions.iter().cloned());
    }
    Ok(actions)
}

fn entry_chain(ssm: &SemanticStateMachine, entry_state: StateId) -> Result<Vec<String>, OptimizeError> {
    let mut actions = Vec::new();
    let mut hierarchy = Vec::new();
    hierarchy_root_first(ssm, entry_state, &mut hierarchy)?;
    for state in hierarchy {
        actions.extend(ssm.state(state).entry_actions.iter().cloned());
    }
    Ok(actions)
}

fn build_transitions(ssm: &SemanticStateMachine) -> Result<Vec<Transition>, OptimizeError> {
    ssm.states
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.abstract_state)
        .map(|(i, _)| build_transitions_for_state(ssm, StateId(i)))
        .collect()
}

fn build_transitions_for_state(
    ssm: &SemanticStateMachine,
    state: StateId,
) -> Result<Transition, OptimizeError> {
    let mut claimed: FxHashSet<String> = FxHashSet::default();
    let mut sub_transitions = Vec::new();

    // Self before ancestors: a concrete state's own declared transitions
    // claim their event first, so an inherited transition with the same
    // event never overrides them.
    for hierarchy_state in hierarchy_leaf_first(ssm, state)? {
        for semantic_transition in &ssm.state(hierarchy_state).transitions {
            if semantic_transition.event.is_empty() {
                continue;
            }
            if claimed.insert(semantic_transition.event.clone()) {
                sub_transitions.push(build_sub_transition(ssm, state, semantic_transition)?);
            }
        }
    }

    Ok(Transition {
        current_state: ssm.state(state).name.clone(),
        sub_transitions,
    })
}

fn build_sub_transition(
    ssm: &SemanticStateMachine,
    current_state: StateId,
    semantic_transition: &hfsmc_semck::SemanticTransition,
) -> Result<SubTransition, OptimizeError> {
    let mut actions = exit_chain(ssm, current_state)?;
    actions.extend(entry_chain(ssm, semantic_transition.next_state)?);
    actions.extend(semantic_transition.actions.iter().cloned());

    Ok(SubTransition {
        event: semantic_transition.event.clone(),
        next_state: ssm.state(semantic_transition.next_state).name.clone(),
        actions,
    })
}

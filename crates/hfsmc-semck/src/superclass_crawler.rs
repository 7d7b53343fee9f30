use crate::error::{AnalysisError, ErrorId};
use crate::model::{SemanticStateMachine, StateId};
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Clone)]
struct TransitionTuple {
    current_state: StateId,
    next_state: StateId,
    actions: Vec<String>,
}

/// For every concrete state, walks its super-state hierarchy ancestors-first
/// and records one claimed `(event -> tuple)` mapping, detecting the
/// ambiguous-multiple-inheritance case described in spec §4.3.
///
/// A later definition of the same event only replaces an earlier one if the
/// state declaring it is a subclass of whichever state declared the earlier
/// one (i.e. it is a legitimate override); otherwise the two inherited
/// definitions conflict and neither can be preferred, which is reported as
/// [`ErrorId::ConflictingSuperstates`]. Two definitions with identical
/// outcomes never conflict — they're redundant, not contradictory.
pub fn check_super_class_transitions(ssm: &mut SemanticStateMachine) {
    let concrete_ids: Vec<StateId> = ssm
        .states
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.abstract_state)
        .map(|(i, _)| StateId(i))
        .collect();

    for concrete in concrete_ids {
        let mut tuples: FxHashMap<String, TransitionTuple> = FxHashMap::default();
        let mut errors = Vec::new();
        let mut visiting: FxHashSet<StateId> = FxHashSet::default();
        check_transitions_for_state(ssm, &mut tuples, concrete, concrete, &mut errors, &mut visiting);
        ssm.errors.extend(errors);
    }
}

/// `visiting` breaks a cyclic super-state graph — not detected as a
/// dedicated error here (`spec.md` §9 leaves the choice to "detect and emit
/// a diagnostic" or "document that input must be acyclic"; the optimizer is
/// the stage that surfaces `OptimizeError::Cycle`) — so this walk degrades
/// gracefully instead of recursing forever.
fn check_transitions_for_state(
    ssm: &SemanticStateMachine,
    tuples: &mut FxHashMap<String, TransitionTuple>,
    concrete: StateId,
    state: StateId,
    errors: &mut Vec<AnalysisError>,
    visiting: &mut FxHashSet<StateId>,
) {
    if !visiting.insert(state) {
        return;
    }
    for super_state in ssm.state(state).super_states.clone() {
        check_transitions_for_state(ssm, tuples, concrete, super_state, errors, visiting);
    }
    check_state_for_previously_defined_transition(ssm, tuples, concrete, state, errors);
    visiting.remove(&state);
}

fn check_state_for_previously_defined_transition(
    ssm: &SemanticStateMachine,
    tuples: &mut FxHashMap<String, TransitionTuple>,
    concrete: StateId,
    state: StateId,
    errors: &mut Vec<AnalysisError>,
) {
    for semantic_transition in &ssm.state(state).transitions {
        let this_tuple = TransitionTuple {
            current_state: state,
            next_state: semantic_transition.next_state,
            actions: semantic_transition.actions.clone(),
        };
        match tuples.get(&semantic_transition.event).cloned() {
            Some(previous_tuple) => {
                if !transitions_have_same_outcomes(&this_tuple, &previous_tuple) {
                    check_for_overridden_transition(
                        ssm,
                        tuples,
                        concrete,
                        &semantic_transition.event,
                        this_tuple,
                        previous_tuple,
                        errors,
                    );
                }
            }
            None => {
                tuples.insert(semantic_transition.event.clone(), this_tuple);
            }
        }
    }
}

fn transitions_have_same_outcomes(a: &TransitionTuple, b: &TransitionTuple) -> bool {
    a.next_state == b.next_state && a.actions == b.actions
}

fn check_for_overridden_transition(
    ssm: &SemanticStateMachine,
    tuples: &mut FxHashMap<String, TransitionTuple>,
    concrete: StateId,
    event: &str,
    this_tuple: TransitionTuple,
    previous_tuple: TransitionTuple,
    errors: &mut Vec<AnalysisError>,
) {
    let defining_state = previous_tuple.current_state;
    if !is_super_state_of(ssm, defining_state, this_tuple.current_state) {
        errors.push(AnalysisError::with_extra(
            ErrorId::ConflictingSuperstates,
            format!("{}|{}", ssm.state(concrete).name, event),
        ));
    } else {
        tuples.insert(event.to_string(), this_tuple);
    }
}

fn is_super_state_of(ssm: &SemanticStateMachine, possible_super: StateId, state: StateId) -> bool {
    if possible_super == state {
        return true;
    }
    ssm.state(state)
        .super_states
        .iter()
        .any(|&s| is_super_state_of(ssm, possible_super, s))
}

use crate::error::{AnalysisError, ErrorId};
use crate::model::{SemanticState, SemanticStateMachine, SemanticTransition, StateId};
use crate::superclass_crawler;
use hfsmc_parser::{FsmSyntax, Header};
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Default, Clone)]
struct HeaderSlot {
    name: String,
    value: String,
}

impl HeaderSlot {
    fn is_null(&self) -> bool {
        self.name.is_empty() && self.value.is_empty()
    }
}

/// Runs the four analysis passes (header, name-collection, validation,
/// compilation) described in spec §4.3 and returns the accumulated
/// [`SemanticStateMachine`]. Never panics on malformed input: every failure
/// mode becomes an [`AnalysisError`] instead.
pub fn analyze(fsm_syntax: &FsmSyntax) -> SemanticStateMachine {
    let mut ssm = SemanticStateMachine::new();
    let mut fsm_header = HeaderSlot::default();
    let mut actions_header = HeaderSlot::default();
    let mut initial_header = HeaderSlot::default();

    analyze_headers(
        fsm_syntax,
        &mut ssm,
        &mut fsm_header,
        &mut actions_header,
        &mut initial_header,
    );
    check_semantic_validity(fsm_syntax, &mut ssm, &initial_header);
    produce_semantic_state_machine(fsm_syntax, &mut ssm, &fsm_header, &actions_header, &initial_header);

    ssm
}

fn analyze_headers(
    fsm_syntax: &FsmSyntax,
    ssm: &mut SemanticStateMachine,
    fsm_header: &mut HeaderSlot,
    actions_header: &mut HeaderSlot,
    initial_header: &mut HeaderSlot,
) {
    for header in &fsm_syntax.headers {
        match header.name.to_lowercase().as_str() {
            "fsm" => set_header(fsm_header, header, ssm),
            "actions" => set_header(actions_header, header, ssm),
            "initial" => set_header(initial_header, header, ssm),
            _ => ssm.add_error(AnalysisError::with_extra(
                ErrorId::InvalidHeader,
                header.to_string(),
            )),
        }
    }
    if fsm_header.is_null() {
        ssm.add_error(AnalysisError::new(ErrorId::NoFsm));
    }
    if initial_header.is_null() {
        ssm.add_error(AnalysisError::new(ErrorId::NoInitial));
    }
}

fn set_header(slot: &mut HeaderSlot, header: &Header, ssm: &mut SemanticStateMachine) {
    if slot.is_null() {
        slot.name = header.name.clone();
        slot.value = header.value.clone();
    } else {
        ssm.add_error(AnalysisError::with_extra(
            ErrorId::ExtraHeaderIgnored,
            header.to_string(),
        ));
    }
}

fn check_semantic_validity(
    fsm_syntax: &FsmSyntax,
    ssm: &mut SemanticStateMachine,
    initial_header: &HeaderSlot,
) {
    create_state_event_and_action_lists(fsm_syntax, ssm);
    check_undefined_states(fsm_syntax, ssm, initial_header);
    check_for_unused_states(fsm_syntax, ssm, initial_header);
    check_for_duplicate_transitions(fsm_syntax, ssm);
    check_abstract_states_are_not_targets(fsm_syntax, ssm);
    check_for_inconsistent_abstraction(fsm_syntax, ssm);
    check_for_multiply_defined_state_actions(fsm_syntax, ssm);
}

fn create_state_event_and_action_lists(fsm_syntax: &FsmSyntax, ssm: &mut SemanticStateMachine) {
    for transition in &fsm_syntax.logic {
        ssm.intern_state(&transition.state.name);
    }
    for transition in &fsm_syntax.logic {
        for action in &transition.state.entry_actions {
            ssm.actions.insert(action.clone());
        }
        for action in &transition.state.exit_actions {
            ssm.actions.insert(action.clone());
        }
    }
    for transition in &fsm_syntax.logic {
        for sub in &transition.sub_transitions {
            if !sub.event.is_empty() {
                ssm.events.insert(sub.event.clone());
            }
        }
    }
    for transition in &fsm_syntax.logic {
        for sub in &transition.sub_transitions {
            for action in &sub.actions {
                ssm.actions.insert(action.clone());
            }
        }
    }
}

fn check_undefined_states(
    fsm_syntax: &FsmSyntax,
    ssm: &mut SemanticStateMachine,
    initial_header: &HeaderSlot,
) {
    for transition in &fsm_syntax.logic {
        for super_state in &transition.state.super_states {
            check_undefined_state(ssm, super_state, ErrorId::UndefinedSuperState);
        }
        for sub in &transition.sub_transitions {
            check_undefined_state(ssm, &sub.next_state, ErrorId::UndefinedState);
        }
    }

    if !initial_header.value.is_empty() && ssm.find_state(&initial_header.value).is_none() {
        ssm.add_error(AnalysisError::with_extra(
            ErrorId::UndefinedState,
            format!("initial: {}", initial_header.value),
        ));
    }
}

fn check_undefined_state(ssm: &mut SemanticStateMachine, reference: &str, error_id: ErrorId) {
    if !reference.is_empty() && ssm.find_state(reference).is_none() {
        ssm.add_error(AnalysisError::with_extra(error_id, reference.to_string()));
    }
}

fn check_for_unused_states(
    fsm_syntax: &FsmSyntax,
    ssm: &mut SemanticStateMachine,
    initial_header: &HeaderSlot,
) {
    let mut used_states: FxHashSet<String> = FxHashSet::default();
    if !initial_header.value.is_empty() {
        used_states.insert(initial_header.value.clone());
    }
    for transition in &fsm_syntax.logic {
        for super_state in &transition.state.super_states {
            used_states.insert(super_state.clone());
        }
        for sub in &transition.sub_transitions {
            if sub.next_state.is_empty() {
                used_states.insert(transition.state.name.clone());
            } else {
                used_states.insert(sub.next_state.clone());
            }
        }
    }

    let defined_states_sorted: Vec<String> =
        ssm.state_names_sorted().into_iter().map(str::to_string).collect();
    for defined_state in defined_states_sorted {
        if !used_states.contains(&defined_state) {
            ssm.add_error(AnalysisError::with_extra(ErrorId::UnusedState, defined_state));
        }
    }
}

fn check_for_duplicate_transitions(fsm_syntax: &FsmSyntax, ssm: &mut SemanticStateMachine) {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    for transition in &fsm_syntax.logic {
        for sub in &transition.sub_transitions {
            let key = format!("{}({})", transition.state.name, sub.event);
            if seen.contains(&key) {
                ssm.add_error(AnalysisError::with_extra(ErrorId::DuplicateTransition, key));
            } else {
                seen.insert(key);
            }
        }
    }
}

fn find_abstract_states(fsm_syntax: &FsmSyntax) -> FxHashSet<String> {
    fsm_syntax
        .logic
        .iter()
        .filter(|t| t.state.abstract_state)
        .map(|t| t.state.name.clone())
        .collect()
}

fn check_abstract_states_are_not_targets(fsm_syntax: &FsmSyntax, ssm: &mut SemanticStateMachine) {
    let abstract_states = find_abstract_states(fsm_syntax);
    for transition in &fsm_syntax.logic {
        for sub in &transition.sub_transitions {
            if abstract_states.contains(&sub.next_state) {
                ssm.add_error(AnalysisError::with_extra(
                    ErrorId::AbstractStateUsedAsNextState,
                    format!(
                        "{}({})->{}",
                        transition.state.name, sub.event, sub.next_state
                    ),
                ));
            }
        }
    }
}

fn check_for_inconsistent_abstraction(fsm_syntax: &FsmSyntax, ssm: &mut SemanticStateMachine) {
    let abstract_states = find_abstract_states(fsm_syntax);
    for transition in &fsm_syntax.logic {
        if !transition.state.abstract_state && abstract_states.contains(&transition.state.name) {
            ssm.add_warning(AnalysisError::with_extra(
                ErrorId::InconsistentAbstraction,
                transition.state.name.clone(),
            ));
        }
    }
}

fn specifies_state_actions(transition: &hfsmc_parser::Transition) -> bool {
    !transition.state.entry_actions.is_empty() || !transition.state.exit_actions.is_empty()
}

fn make_actions_key(transition: &hfsmc_parser::Transition) -> String {
    transition
        .state
        .entry_actions
        .iter()
        .chain(transition.state.exit_actions.iter())
        .cloned()
        .collect::<Vec<_>>()
        .join(",")
}

fn check_for_multiply_defined_state_actions(fsm_syntax: &FsmSyntax, ssm: &mut SemanticStateMachine) {
    let mut first_actions_for_state: FxHashMap<String, String> = FxHashMap::default();
    for transition in &fsm_syntax.logic {
        if !specifies_state_actions(transition) {
            continue;
        }
        let key = make_actions_key(transition);
        match first_actions_for_state.get(&transition.state.name) {
            Some(existing) if existing != &key => {
                ssm.add_error(AnalysisError::with_extra(
                    ErrorId::StateActionsMultiplyDefined,
                    transition.state.name.clone(),
                ));
            }
            Some(_) => {}
            None => {
                first_actions_for_state.insert(transition.state.name.clone(), key);
            }
        }
    }
}

fn produce_semantic_state_machine(
    fsm_syntax: &FsmSyntax,
    ssm: &mut SemanticStateMachine,
    fsm_header: &HeaderSlot,
    actions_header: &HeaderSlot,
    initial_header: &HeaderSlot,
) {
    if !ssm.errors.is_empty() {
        return;
    }

    ssm.fsm_name = fsm_header.value.clone();
    ssm.action_class = actions_header.value.clone();
    ssm.initial_state = ssm.find_state(&initial_header.value);

    for transition in &fsm_syntax.logic {
        let id = ssm
            .find_state(&transition.state.name)
            .expect("every logic state was interned in the name-collection pass");
        let super_ids: Vec<StateId> = transition
            .state
            .super_states
            .iter()
            .filter_map(|name| ssm.find_state(name))
            .collect();

        {
            let state: &mut SemanticState = ssm.state_mut(id);
            state
                .entry_actions
                .extend(transition.state.entry_actions.iter().cloned());
            state
                .exit_actions
                .extend(transition.state.exit_actions.iter().cloned());
            state.abstract_state = state.abstract_state || transition.state.abstract_state;
        }
        for super_id in super_ids {
            ssm.add_super_state(id, super_id);
        }

        for sub in &transition.sub_transitions {
            let next_state = if sub.next_state.is_empty() {
                id
            } else {
                ssm.find_state(&sub.next_state)
                    .expect("validated as defined by check_undefined_states")
            };
            ssm.state_mut(id).transitions.push(SemanticTransition {
                event: sub.event.clone(),
                next_state,
                actions: sub.actions.clone(),
            });
        }
    }

    superclass_crawler::check_super_class_transitions(ssm);
}

//! Universal invariants over every `OptimizedStateMachine` (spec §8),
//! checked against fixtures rather than asserted algebraically since the IR
//! has no dedicated invariant-checking pass of its own.

/// Prepends default `fsm`/`initial`/`actions` headers when `src` doesn't
/// already declare its own (every fixture here uses `i` as its initial
/// state, mirroring the original test suite's header-less body convention).
fn with_default_headers(src: &str) -> String {
    if src.to_lowercase().contains("fsm:") {
        src.to_string()
    } else {
        format!("fsm:f initial:i actions:a {src}")
    }
}

fn optimize(src: &str) -> hfsmc_codegen::OptimizedStateMachine {
    let ssm = hfsmc_semck::analyze(&hfsmc_parser::parse(&with_default_headers(src)));
    assert!(ssm.errors.is_empty(), "{:?}", ssm.errors);
    hfsmc_codegen::optimize(&ssm).expect("acyclic fixture")
}

fn assert_invariants(osm: &hfsmc_codegen::OptimizedStateMachine) {
    // Every sub-transition's next state names a concrete state in `states`.
    for transition in &osm.transitions {
        for sub in &transition.sub_transitions {
            assert!(
                osm.states.contains(&sub.next_state),
                "next_state {} not among concrete states {:?}",
                sub.next_state,
                osm.states
            );
        }
    }

    // (currentState, event) pairs are unique within a flattened transition block.
    for transition in &osm.transitions {
        let mut seen = std::collections::HashSet::new();
        for sub in &transition.sub_transitions {
            assert!(
                seen.insert(sub.event.clone()),
                "duplicate event {} claimed twice for state {}",
                sub.event,
                transition.current_state
            );
        }
    }

    // states/events/actions are each free of duplicates.
    assert_no_duplicates(&osm.states, "states");
    assert_no_duplicates(&osm.events, "events");
    assert_no_duplicates(&osm.actions, "actions");
}

fn assert_no_duplicates(items: &[String], label: &str) {
    let unique: std::collections::HashSet<&String> = items.iter().collect();
    assert_eq!(unique.len(), items.len(), "{label} contains a duplicate: {items:?}");
}

#[test]
fn simple_turnstile_satisfies_universal_invariants() {
    let osm = optimize(
        "Actions: T\nFSM: OCT\nInitial: Locked\n\
         {Locked Coin Unlocked {alarmOff unlock} \
          Locked Pass Locked alarmOn \
          Unlocked Coin Unlocked thankyou \
          Unlocked Pass Locked lock}",
    );
    assert_invariants(&osm);
}

#[test]
fn diamond_inheritance_satisfies_universal_invariants() {
    let osm = optimize(
        "{ (ib1) >ib1x * * * (ib2) : ib1 >ib2x * * * (ib3) : ib1 >ib3x * * * \
         (sb1) <sb1n * * * (sb2) :sb1 <sb2n * * * (sb3) :sb1 <sb3n * * * \
         i:ib2 :ib3 >x e s a s :sb2 :sb3 <n e i * }",
    );
    assert_invariants(&osm);
}

#[test]
fn overriding_transitions_satisfy_universal_invariants() {
    let osm = optimize("{ (b) e s2 a2 i:b e s a s e i * s2 e i * }");
    assert_invariants(&osm);
}

#[test]
fn abstract_states_never_appear_among_concrete_states() {
    let osm = optimize("{(b) * * * i:b e i *}");
    assert!(!osm.states.contains(&"b".to_string()));
}

#[test]
fn reordering_independent_state_declarations_preserves_the_transition_set() {
    let forward = optimize("{i e1 s1 a1 s1 e2 i a2}");
    let reordered = optimize("{s1 e2 i a2 i e1 s1 a1}");

    let as_set = |osm: &hfsmc_codegen::OptimizedStateMachine| {
        let mut pairs: Vec<(String, String, String, Vec<String>)> = osm
            .transitions
            .iter()
            .flat_map(|t| {
                t.sub_transitions.iter().map(move |st| {
                    (
                        t.current_state.clone(),
                        st.event.clone(),
                        st.next_state.clone(),
                        st.actions.clone(),
                    )
                })
            })
            .collect();
        pairs.sort();
        pairs
    };
    assert_eq!(as_set(&forward), as_set(&reordered));
}

#[test]
fn cyclic_super_states_are_reported_instead_of_hanging() {
    let ssm = hfsmc_semck::analyze(&hfsmc_parser::parse(
        "fsm:f initial:i {(a):b * * * (b):a * * * i:a e i *}",
    ));
    assert!(ssm.errors.is_empty(), "{:?}", ssm.errors);
    let result = hfsmc_codegen::optimize(&ssm);
    assert!(matches!(result, Err(hfsmc_codegen::OptimizeError::Cycle { .. })));
}

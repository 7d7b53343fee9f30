//! Idempotence of semantic analysis (spec §8): running the analyzer twice
//! on the same parsed tree is deterministic and produces identical output.

fn analyze(src: &str) -> hfsmc_semck::SemanticStateMachine {
    hfsmc_semck::analyze(&hfsmc_parser::parse(src))
}

#[test]
fn analyzing_the_same_syntax_tree_twice_is_deterministic() {
    let source = "Actions: T\nFSM: OCT\nInitial: Locked\n\
         {Locked Coin Unlocked {alarmOff unlock} \
          Locked Pass Locked alarmOn \
          Unlocked Coin Unlocked thankyou \
          Unlocked Pass Locked lock}";
    let syntax = hfsmc_parser::parse(source);

    let first = hfsmc_semck::analyze(&syntax);
    let second = hfsmc_semck::analyze(&syntax);

    assert_eq!(first.fsm_name, second.fsm_name);
    assert_eq!(first.action_class, second.action_class);
    assert_eq!(
        first.events.iter().collect::<Vec<_>>(),
        second.events.iter().collect::<Vec<_>>()
    );
    assert_eq!(
        first.actions.iter().collect::<Vec<_>>(),
        second.actions.iter().collect::<Vec<_>>()
    );
    assert_eq!(first.errors, second.errors);
    assert_eq!(first.warnings, second.warnings);
    assert_eq!(
        first.states.iter().map(|s| s.name.clone()).collect::<Vec<_>>(),
        second.states.iter().map(|s| s.name.clone()).collect::<Vec<_>>()
    );
}

#[test]
fn diagnostics_are_reported_at_most_once_per_state_name() {
    let ssm = analyze("Fsm: F\nInitial: ias\n{(ias) e * * ias e * *}");
    let mut seen = std::collections::HashSet::new();
    for warning in ssm.warnings.iter().filter(|w| w.id == hfsmc_semck::ErrorId::InconsistentAbstraction) {
        assert!(seen.insert(warning.extra.clone()), "duplicate INCONSISTENT_ABSTRACTION for {}", warning.extra);
    }

    let unused = analyze("Fsm: F\nInitial: a\n{a e a * z e2 a * z2 e3 a *}");
    let mut seen_unused = std::collections::HashSet::new();
    for error in unused.errors.iter().filter(|e| e.id == hfsmc_semck::ErrorId::UnusedState) {
        assert!(seen_unused.insert(error.extra.clone()), "duplicate UNUSED_STATE for {}", error.extra);
    }
}

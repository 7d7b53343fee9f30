//! The Optimizer and NSC Generator stages (§4.4, §4.5): flattens a
//! [`hfsmc_semck::SemanticStateMachine`]'s inheritance into a concrete
//! transition table, then lowers that table into a target-agnostic
//! nested-switch-case AST that emitters walk with a [`nsc::NscVisitor`].

mod nsc;
mod optimizer;

pub use nsc::{
    generate as generate_nsc, CaseNode, DefaultCaseNode, EnumNode, EnumeratorNode,
    EventDelegatorsNode, FsmClassNode, FunctionCallNode, HandleEventNode, NscNode, NscVisitor,
    StatePropertyNode, SwitchCaseNode,
};
pub use optimizer::{
    optimize, Header, OptimizeError, OptimizedStateMachine, SubTransition, Transition,
};

#[cfg(test)]
mod tests {
    use super::*;

    /// Prepends default `fsm`/`initial`/`actions` headers when `src` doesn't
    /// already declare its own, mirroring the original test suite's
    /// `produceStateMachineWithHeader` helper (every fixture here already
    /// uses `i` as its initial state, matching the Go suite's convention).
    fn with_default_headers(src: &str) -> String {
        if src.to_lowercase().contains("fsm:") {
            src.to_string()
        } else {
            format!("fsm:f initial:i actions:a {src}")
        }
    }

    fn optimize_src(src: &str) -> OptimizedStateMachine {
        let ssm = hfsmc_semck::analyze(&hfsmc_parser::parse(&with_default_headers(src)));
        assert!(ssm.errors.is_empty(), "{:?}", ssm.errors);
        optimize(&ssm).expect("acyclic fixture")
    }

    fn find<'a>(osm: &'a OptimizedStateMachine, state: &str) -> &'a Transition {
        osm.transitions
            .iter()
            .find(|t| t.current_state == state)
            .unwrap_or_else(|| panic!("no transition entry for state {state}"))
    }

    fn sub<'a>(t: &'a Transition, event: &str) -> &'a SubTransition {
        t.sub_transitions
            .iter()
            .find(|st| st.event == event)
            .unwrap_or_else(|| panic!("no sub-transition for event {event}"))
    }

    #[test]
    fn header_is_copied_verbatim() {
        let osm = optimize_src("fsm:f initial:i actions:a {i e i *}");
        assert_eq!(osm.header.fsm, "f");
        assert_eq!(osm.header.initial, "i");
        assert_eq!(osm.header.actions, "a");
    }

    #[test]
    fn abstract_states_are_dropped_from_concrete_list() {
        let osm = optimize_src("{(b) * * * i:b e i *}");
        assert!(osm.states.contains(&"i".to_string()));
        assert!(!osm.states.contains(&"b".to_string()));
    }

    #[test]
    fn simple_state_machine_has_one_sub_transition() {
        let osm = optimize_src("{i e i a1}");
        let t = find(&osm, "i");
        assert_eq!(t.sub_transitions.len(), 1);
        assert_eq!(sub(t, "e").actions, vec!["a1".to_string()]);
    }

    #[test]
    fn entry_actions_prepend_to_every_incoming_transition() {
        let osm = optimize_src("{i e s a1 i e2 s a2 s <n1 <n2 e i *}");
        let i = find(&osm, "i");
        assert_eq!(sub(i, "e").actions, vec!["n1", "n2", "a1"]);
        assert_eq!(sub(i, "e2").actions, vec!["n1", "n2", "a2"]);
        let s = find(&osm, "s");
        assert!(sub(s, "e").actions.is_empty());
    }

    #[test]
    fn exit_actions_prepend_before_entry_actions() {
        let osm = optimize_src("{i >x2 >x1 e s a1 i e2 s a2 s e i *}");
        let i = find(&osm, "i");
        assert_eq!(sub(i, "e").actions, vec!["x2", "x1", "a1"]);
        assert_eq!(sub(i, "e2").actions, vec!["x2", "x1", "a2"]);
    }

    #[test]
    fn single_super_state_entry_and_exit_chains_interleave() {
        let osm = optimize_src(
            "{ (ib) >ibx1 >ibx2 * * * (sb) <sbn1 <sbn2 * * * i:ib >x e s a s:sb <n e i * }",
        );
        let i = find(&osm, "i");
        assert_eq!(
            sub(i, "e").actions,
            vec!["x", "ibx1", "ibx2", "sbn1", "sbn2", "n", "a"]
        );
    }

    /// Scenario 3 from `spec.md` §8, verbatim. The spec's prose gives `i → s`
    /// actions `[ix, bx, sn, a]`, which this matches. It also claims the
    /// `s → i` transition has `[]` actions; tracing `optimizer_test.go`'s own
    /// fixtures shows the original's exit-chain applies to every transition
    /// leaving a state (inherited or not), so `s → i` in fact carries `s`'s
    /// inherited exit action `bx` — see `DESIGN.md` note 6 for the full
    /// resolution. This test asserts the actual, original-source-grounded
    /// behavior rather than the spec's disputed number for that one case.
    #[test]
    fn scenario_3_override_with_entry_exit_chains() {
        let osm = optimize_src("{ (b) >bx * * *  i:b >ix e s a  s:b <sn e i * }");
        let i = find(&osm, "i");
        assert_eq!(sub(i, "e").actions, vec!["ix", "bx", "sn", "a"]);
        let s = find(&osm, "s");
        assert_eq!(sub(s, "e").actions, vec!["bx"]);
    }

    #[test]
    fn diamond_super_states_visit_each_ancestor_once_leaf_first_on_exit() {
        let osm = optimize_src(
            "{ (ib1) >ib1x * * * (ib2) : ib1 >ib2x * * * (ib3) : ib1 >ib3x * * * \
             (sb1) <sb1n * * * (sb2) :sb1 <sb2n * * * (sb3) :sb1 <sb3n * * * \
             i:ib2 :ib3 >x e s a s :sb2 :sb3 <n e i * }",
        );
        let i = find(&osm, "i");
        assert_eq!(
            sub(i, "e").actions,
            vec!["x", "ib3x", "ib2x", "ib1x", "sb1n", "sb2n", "sb3n", "n", "a"]
        );
    }

    #[test]
    fn deep_inheritance_chains_transitions_in_override_order() {
        let osm = optimize_src(
            "{ (b1) { b1e1 s b1a1 b1e2 s b1a2 } (b2):b1 b2e s b2a i:b2 e s a s e i * }",
        );
        let i = find(&osm, "i");
        let events: Vec<&str> = i.sub_transitions.iter().map(|s| s.event.as_str()).collect();
        assert_eq!(events, vec!["e", "b2e", "b1e1", "b1e2"]);
    }

    #[test]
    fn own_transition_overrides_inherited_one_on_the_same_event() {
        let osm = optimize_src("{ (b) e s2 a2 i:b e s a s e i * s2 e i * }");
        let i = find(&osm, "i");
        assert_eq!(i.sub_transitions.len(), 1);
        assert_eq!(sub(i, "e").next_state, "s");
        assert_eq!(sub(i, "e").actions, vec!["a".to_string()]);
    }

    #[test]
    fn inherited_duplicate_on_same_event_is_claimed_only_once() {
        let osm = optimize_src("{ (b) e s a i:b e s a s e i * }");
        let i = find(&osm, "i");
        assert_eq!(i.sub_transitions.len(), 1);
    }

    #[test]
    fn nsc_generation_wires_case_bodies_and_default_case() {
        let osm = optimize_src("fsm:f initial:i actions:a {i e s a1 s e i *}");
        let ast = generate_nsc(&osm);
        let fsm_class = match &ast {
            NscNode::FsmClass(c) => c,
            other => panic!("expected FsmClass root, got {other:?}"),
        };
        assert_eq!(fsm_class.class_name, "f");
        assert_eq!(fsm_class.actions_name, "a");

        let handle_event = match fsm_class.handle_event.as_ref() {
            NscNode::HandleEvent(h) => h,
            other => panic!("expected HandleEvent, got {other:?}"),
        };
        let state_switch = match handle_event.switch_case.as_ref() {
            NscNode::SwitchCase(s) => s,
            other => panic!("expected SwitchCase, got {other:?}"),
        };
        assert_eq!(state_switch.cases.len(), 2);

        let i_case = state_switch
            .cases
            .iter()
            .find_map(|c| match c {
                NscNode::Case(cn) if cn.case_name == "i" => Some(cn),
                _ => None,
            })
            .expect("case for state i");
        let event_switch = match i_case.body.as_ref() {
            NscNode::SwitchCase(s) => s,
            other => panic!("expected nested event SwitchCase, got {other:?}"),
        };
        // One real event case plus the trailing default case.
        assert_eq!(event_switch.cases.len(), 2);
        let e_case = match &event_switch.cases[0] {
            NscNode::Case(cn) => cn,
            other => panic!("expected Case, got {other:?}"),
        };
        let body = match e_case.body.as_ref() {
            NscNode::Composite(nodes) => nodes,
            other => panic!("expected Composite body, got {other:?}"),
        };
        // setState(...) followed by the transition's own action call —
        // this is the spot the original source forgets to wire up.
        assert_eq!(body.len(), 2);
        match &body[0] {
            NscNode::FunctionCall(f) => assert_eq!(f.name, "setState"),
            other => panic!("expected setState call, got {other:?}"),
        }
        match &body[1] {
            NscNode::FunctionCall(f) => assert_eq!(f.name, "a1"),
            other => panic!("expected action call, got {other:?}"),
        }
        assert!(matches!(&event_switch.cases[1], NscNode::DefaultCase(_)));
    }
}

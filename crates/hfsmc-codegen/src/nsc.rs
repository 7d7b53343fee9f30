//! The nested-switch-case abstract syntax tree: a language-agnostic
//! description of "switch over state, switch over event" dispatch plus the
//! class boilerplate around it (§4.5). Target-language emitters implement
//! [`NscVisitor`] and walk the tree via [`NscNode::accept`].

use crate::optimizer::{OptimizedStateMachine, Transition as OptTransition};

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCaseNode {
    pub variable_name: String,
    pub cases: Vec<NscNode>,
}

impl SwitchCaseNode {
    /// Visits each case in turn. A separate method (rather than folding
    /// this into `accept`) so a visitor can wrap the cases in its own
    /// `switch (...) { ... }` framing before/after, as the Java emitter
    /// does.
    pub fn generate_cases(&self, visitor: &mut dyn NscVisitor) {
        for case in &self.cases {
            case.accept(visitor);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseNode {
    pub switch_name: String,
    pub case_name: String,
    pub body: Box<NscNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefaultCaseNode {
    pub state: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCallNode {
    pub name: String,
    pub argument: Option<Box<NscNode>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumNode {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumeratorNode {
    pub enumeration: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatePropertyNode {
    pub initial: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventDelegatorsNode {
    pub events: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HandleEventNode {
    pub switch_case: Box<NscNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FsmClassNode {
    pub class_name: String,
    pub actions_name: String,
    pub state_enum: Box<NscNode>,
    pub event_enum: Box<NscNode>,
    pub state_property: Box<NscNode>,
    pub delegators: Box<NscNode>,
    pub handle_event: Box<NscNode>,
    pub actions: Vec<String>,
}

/// One node of the NSC AST. `Composite` is the only kind with no dedicated
/// visitor method — it just means "visit each child in order" (§9).
#[derive(Debug, Clone, PartialEq)]
pub enum NscNode {
    SwitchCase(SwitchCaseNode),
    Case(CaseNode),
    DefaultCase(DefaultCaseNode),
    FunctionCall(FunctionCallNode),
    Enum(EnumNode),
    Enumerator(EnumeratorNode),
    StateProperty(StatePropertyNode),
    EventDelegators(EventDelegatorsNode),
    HandleEvent(HandleEventNode),
    FsmClass(FsmClassNode),
    Composite(Vec<NscNode>),
}

impl NscNode {
    pub fn accept(&self, visitor: &mut dyn NscVisitor) {
        match self {
            NscNode::SwitchCase(n) => visitor.visit_switch_case(n),
            NscNode::Case(n) => visitor.visit_case(n),
            NscNode::DefaultCase(n) => visitor.visit_default_case(n),
            NscNode::FunctionCall(n) => visitor.visit_function_call(n),
            NscNode::Enum(n) => visitor.visit_enum(n),
            NscNode::Enumerator(n) => visitor.visit_enumerator(n),
            NscNode::StateProperty(n) => visitor.visit_state_property(n),
            NscNode::EventDelegators(n) => visitor.visit_event_delegators(n),
            NscNode::HandleEvent(n) => visitor.visit_handle_event(n),
            NscNode::FsmClass(n) => visitor.visit_fsm_class(n),
            NscNode::Composite(children) => {
                for child in children {
                    child.accept(visitor);
                }
            }
        }
    }
}

/// One method per node kind that carries its own rendering decision.
/// Implementors traverse children explicitly (e.g. `node.body.accept(self)`)
/// rather than relying on any built-in recursion, matching the reference
/// Java implementor.
pub trait NscVisitor {
    fn visit_switch_case(&mut self, node: &SwitchCaseNode);
    fn visit_case(&mut self, node: &CaseNode);
    fn visit_default_case(&mut self, node: &DefaultCaseNode);
    fn visit_function_call(&mut self, node: &FunctionCallNode);
    fn visit_enum(&mut self, node: &EnumNode);
    fn visit_enumerator(&mut self, node: &EnumeratorNode);
    fn visit_state_property(&mut self, node: &StatePropertyNode);
    fn visit_event_delegators(&mut self, node: &EventDelegatorsNode);
    fn visit_handle_event(&mut self, node: &HandleEventNode);
    fn visit_fsm_class(&mut self, node: &FsmClassNode);
}

/// Builds the NSC AST from a flattened [`OptimizedStateMachine`]: one
/// `Case("State", ...)` per concrete state, nesting a `Case("Event", ...)`
/// per sub-transition, each ending in a `setState(...)` call followed by
/// the transition's actions, and terminated by a `DefaultCase`.
pub fn generate(osm: &OptimizedStateMachine) -> NscNode {
    let state_cases: Vec<NscNode> = osm.transitions.iter().map(make_state_case).collect();
    let state_switch = NscNode::SwitchCase(SwitchCaseNode {
        variable_name: "state".to_string(),
        cases: state_cases,
    });
    let handle_event = NscNode::HandleEvent(HandleEventNode {
        switch_case: Box::new(state_switch),
    });

    NscNode::FsmClass(FsmClassNode {
        class_name: osm.header.fsm.clone(),
        actions_name: osm.header.actions.clone(),
        state_enum: Box::new(NscNode::Enum(EnumNode {
            name: "State".to_string(),
            values: osm.states.clone(),
        })),
        event_enum: Box::new(NscNode::Enum(EnumNode {
            name: "Event".to_string(),
            values: osm.events.clone(),
        })),
        state_property: Box::new(NscNode::StateProperty(StatePropertyNode {
            initial: osm.header.initial.clone(),
        })),
        delegators: Box::new(NscNode::EventDelegators(EventDelegatorsNode {
            events: osm.events.clone(),
        })),
        handle_event: Box::new(handle_event),
        actions: osm.actions.clone(),
    })
}

fn make_state_case(transition: &OptTransition) -> NscNode {
    let mut event_cases: Vec<NscNode> = transition
        .sub_transitions
        .iter()
        .map(|st| make_event_case(&transition.current_state, st))
        .collect();
    event_cases.push(NscNode::DefaultCase(DefaultCaseNode {
        state: transition.current_state.clone(),
    }));

    NscNode::Case(CaseNode {
        switch_name: "State".to_string(),
        case_name: transition.current_state.clone(),
        body: Box::new(NscNode::SwitchCase(SwitchCaseNode {
            variable_name: "event".to_string(),
            cases: event_cases,
        })),
    })
}

fn make_event_case(_current_state: &str, sub: &crate::optimizer::SubTransition) -> NscNode {
    let mut body = vec![NscNode::FunctionCall(FunctionCallNode {
        name: "setState".to_string(),
        argument: Some(Box::new(NscNode::Enumerator(EnumeratorNode {
            enumeration: "State".to_string(),
            value: sub.next_state.clone(),
        }))),
    })];
    for action in &sub.actions {
        body.push(NscNode::FunctionCall(FunctionCallNode {
            name: action.clone(),
            argument: None,
        }));
    }

    NscNode::Case(CaseNode {
        switch_name: "Event".to_string(),
        case_name: sub.event.clone(),
        body: Box::new(NscNode::Composite(body)),
    })
}

use crate::error::SyntaxError;
use serde::Serialize;
use std::fmt;

/// A `name:value` header line preceding the state table, e.g. `fsm:Turnstile`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// One declared state and the sub-transitions attached to it. A state name
/// may appear more than once in `FsmSyntax::logic`; semantic analysis
/// aggregates repeated occurrences.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSpec {
    pub name: String,
    pub super_states: Vec<String>,
    pub entry_actions: Vec<String>,
    pub exit_actions: Vec<String>,
    pub abstract_state: bool,
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.value)
    }
}

impl StateSpec {
    pub fn named(name: impl Into<String>) -> Self {
        StateSpec {
            name: name.into(),
            super_states: Vec::new(),
            entry_actions: Vec::new(),
            exit_actions: Vec::new(),
            abstract_state: false,
        }
    }
}

/// One `event nextState {actions}` entry. An empty `event` or `next_state`
/// string is the `*` null placeholder: `*` for event means "never matched by
/// the parser here" is not representable — it means the null/wildcard event
/// was written; `*` for next state means "stay" (resolved to self by
/// semantic analysis).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubTransition {
    pub event: String,
    pub next_state: String,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    pub state: StateSpec,
    pub sub_transitions: Vec<SubTransition>,
}

/// The full syntactic result of parsing one source file: headers, the
/// (possibly repeated-per-state) transition list, any syntax errors
/// encountered, and whether a closing `}` was ever seen.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FsmSyntax {
    pub headers: Vec<Header>,
    pub logic: Vec<Transition>,
    pub errors: Vec<SyntaxError>,
    pub done: bool,
}

fn placeholder(s: &str) -> &str {
    if s.is_empty() {
        "*"
    } else {
        s
    }
}

fn format_actions(actions: &[String]) -> String {
    match actions.len() {
        1 => actions[0].clone(),
        _ => format!("{{{}}}", actions.join(" ")),
    }
}

fn format_state_name(state: &StateSpec) -> String {
    let mut out = if state.abstract_state {
        format!("({})", state.name)
    } else {
        state.name.clone()
    };
    for s in &state.super_states {
        out.push(':');
        out.push_str(s);
    }
    for a in &state.entry_actions {
        out.push_str(" <");
        out.push_str(a);
    }
    for a in &state.exit_actions {
        out.push_str(" >");
        out.push_str(a);
    }
    out
}

fn format_sub_transition(sub: &SubTransition) -> String {
    format!(
        "{} {} {}",
        placeholder(&sub.event),
        placeholder(&sub.next_state),
        format_actions(&sub.actions)
    )
}

fn format_sub_transitions(trans: &Transition) -> String {
    if trans.sub_transitions.len() == 1 {
        return format_sub_transition(&trans.sub_transitions[0]);
    }
    let mut out = String::from("{\n");
    for sub in &trans.sub_transitions {
        out.push_str("    ");
        out.push_str(&format_sub_transition(sub));
        out.push('\n');
    }
    out.push_str("  }");
    out
}

impl fmt::Display for FsmSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for h in &self.headers {
            write!(f, "{}:{}\n", h.name, h.value)?;
        }
        if !self.logic.is_empty() {
            write!(f, "{{\n")?;
            for trans in &self.logic {
                write!(
                    f,
                    "  {} {}\n",
                    format_state_name(&trans.state),
                    format_sub_transitions(trans)
                )?;
            }
            write!(f, "}}\n")?;
        }
        write!(f, ".\n")?;
        // Only the first syntax error is rendered; later ones are still
        // present in `errors` for programmatic inspection.
        if let Some(first) = self.errors.first() {
            write!(f, "{}", first)?;
        }
        Ok(())
    }
}

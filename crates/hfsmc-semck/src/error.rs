use serde::Serialize;
use std::fmt;

/// The fixed enumeration of semantic diagnostics described in spec §7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorId {
    NoFsm,
    NoInitial,
    InvalidHeader,
    ExtraHeaderIgnored,
    UndefinedState,
    UndefinedSuperState,
    UnusedState,
    DuplicateTransition,
    AbstractStateUsedAsNextState,
    /// Warning only — never pushed to `errors`.
    InconsistentAbstraction,
    StateActionsMultiplyDefined,
    ConflictingSuperstates,
}

impl fmt::Display for ErrorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorId::NoFsm => "NO_FSM",
            ErrorId::NoInitial => "NO_INITIAL",
            ErrorId::InvalidHeader => "INVALID_HEADER",
            ErrorId::ExtraHeaderIgnored => "EXTRA_HEADER_IGNORED",
            ErrorId::UndefinedState => "UNDEFINED_STATE",
            ErrorId::UndefinedSuperState => "UNDEFINED_SUPER_STATE",
            ErrorId::UnusedState => "UNUSED_STATE",
            ErrorId::DuplicateTransition => "DUPLICATE_TRANSITION",
            ErrorId::AbstractStateUsedAsNextState => "ABSTRACT_STATE_USED_AS_NEXT_STATE",
            ErrorId::InconsistentAbstraction => "INCONSISTENT_ABSTRACTION",
            ErrorId::StateActionsMultiplyDefined => "STATE_ACTIONS_MULTIPLY_DEFINED",
            ErrorId::ConflictingSuperstates => "CONFLICTING_SUPERSTATES",
        };
        f.write_str(s)
    }
}

/// One diagnostic: a fixed `id` plus whatever free-text context the check
/// that raised it attached (a state name, a `"state(event)"` key, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisError {
    pub id: ErrorId,
    pub extra: String,
}

impl AnalysisError {
    pub fn new(id: ErrorId) -> Self {
        AnalysisError {
            id,
            extra: String::new(),
        }
    }

    pub fn with_extra(id: ErrorId, extra: impl Into<String>) -> Self {
        AnalysisError {
            id,
            extra: extra.into(),
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.extra.is_empty() {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{}: {}", self.id, self.extra)
        }
    }
}

//! Semantic analysis over a parsed [`hfsmc_parser::FsmSyntax`]: resolves
//! headers, aggregates repeated state declarations, validates references,
//! and linearizes multiple-inheritance overrides into a graph-shaped
//! [`SemanticStateMachine`].

mod analyzer;
mod error;
mod model;
mod superclass_crawler;

pub use analyzer::analyze;
pub use error::{AnalysisError, ErrorId};
pub use model::{SemanticState, SemanticStateMachine, SemanticTransition, StateId};

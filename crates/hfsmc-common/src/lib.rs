//! Shared vocabulary used by every stage of the hfsm compiler pipeline:
//! source positions and a small interned-name helper.

mod loc;
mod ordered_set;

pub use loc::Loc;
pub use ordered_set::OrderedSet;

/// A plain, non-interned identifier as written in source.
///
/// Kept as an owned `String` rather than an interned symbol: the grammar has
/// no scoping rules that make interning pay for itself, and every stage
/// downstream of the parser already holds names in `HashMap<String, _>`
/// tables keyed the same way.
pub type Ident = String;

//! Literals and clauses, as seen by the bridge.

pub mod clause;
pub mod literal;

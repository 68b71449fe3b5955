/*!
The interface between the bridge and a host solver.

The bridge does not solve anything.
Instead, it is driven by a host solver through the [bridge](crate::bridge) and calls back into the host through the [Host] trait to:
- Translate literals between the [internal](ILiteral) representation of the host and the [external](ELiteral) representation used on the wire.
- Inspect the value and decision level of a literal, when [shrinking](crate::proof::ProofEmitter::shrink_clause) a clause.
- Hand over clauses received from peers, assembled on the scratch [clause stack](Host::clause_stack) of the host.

All calls are synchronous, and the host makes no progress during a call.
*/

use crate::structures::literal::{ELiteral, ILiteral};

/// Hooks a host solver provides to the bridge.
pub trait Host {
    /// The external literal of `ilit`.
    ///
    /// Zero is returned if `ilit` has no external counterpart, which the bridge treats as an error.
    fn export_literal(&self, ilit: ILiteral) -> ELiteral;

    /// The internal literal of `elit`, importing the variable of `elit` if required.
    fn import_literal(&mut self, elit: ELiteral) -> ILiteral;

    /// The value of `ilit` on the current assignment: negative if false, zero if unassigned, positive if true.
    fn value(&self, ilit: ILiteral) -> i8;

    /// The decision level at which `ilit` was assigned.
    ///
    /// Only consulted for assigned literals.
    fn level(&self, ilit: ILiteral) -> u32;

    /// Learn the unit clause `ilit`.
    fn learned_unit(&mut self, ilit: ILiteral);

    /// Learn the clause on the [clause stack](Host::clause_stack) as a redundant clause with the given glue.
    fn new_redundant_clause(&mut self, glue: usize);

    /// The scratch stack on which a clause is assembled.
    fn clause_stack(&mut self) -> &mut Vec<ILiteral>;
}

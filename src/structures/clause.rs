/*!
Clauses, as handed to the bridge by a host solver.

A clause is anything which can be viewed as a slice of [internal literals](ILiteral).
The bridge performs no checks on a clause, so duplicate literals and tautologies are passed through as given.
The empty clause is a clause.
*/

use super::literal::ILiteral;

/// Something which can be viewed as a sequence of internal literals.
pub trait Clause {
    /// The literals of the clause, in order.
    fn literals(&self) -> &[ILiteral];
}

impl Clause for [ILiteral] {
    fn literals(&self) -> &[ILiteral] {
        self
    }
}

impl Clause for Vec<ILiteral> {
    fn literals(&self) -> &[ILiteral] {
        self.as_slice()
    }
}

impl<const N: usize> Clause for [ILiteral; N] {
    fn literals(&self) -> &[ILiteral] {
        self.as_slice()
    }
}

/*!
Ingesting clauses contributed by peers.

Peers write clauses to the store as lists under `to_solver:<id>`, with each element of a list a decimal external literal.
On a poll, the [Ingestor] reads the list at the next id, and continues to read lists at successive ids until it reads an empty list (which is also what a missing key reads as).

For each list read:
1. The list is parsed, as a whole, to external literals.
   If some element is not a literal the record is rejected, and nothing is passed to the host.
2. Each literal is imported by the host and pushed to the clause stack of the host.
3. A unit is given to the host as a learnt unit.
   Otherwise, the clause is given to the host as a redundant clause with glue one less than the size of the clause.
4. The clause stack is cleared.

In either case the id advances, and so each record is read once.
The bridge does not remove records from the store.

As peers do not send glue, the size of a clause is used in its place.
Likewise, the first literal of a clause is taken to be the asserting literal.

A poll is typically gated by a [backoff gate](backoff).
*/

pub mod backoff;

use crate::{
    host::Host,
    misc::log::targets::{self},
    store::{self, KVStore, Link, StoreConnection},
    structures::literal::{self, ELiteral},
    types::err::{self},
};

/// Counts of clauses ingested.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Units given to the host.
    pub units: u64,

    /// Non-unit clauses given to the host.
    pub clauses: u64,

    /// Records rejected.
    pub rejected: u64,
}

/// Reads clauses from peers and gives them to a host.
#[derive(Default)]
pub struct Ingestor {
    stats: IngestStats,
}

/// Parses the elements of the record with the given id as external literals.
pub fn parse_record(id: u64, elements: &[Vec<u8>]) -> Result<Vec<ELiteral>, err::IngestError> {
    elements
        .iter()
        .map(|element| {
            let integer = std::str::from_utf8(element)
                .ok()
                .and_then(|text| text.trim().parse::<i64>().ok())
                .ok_or_else(|| err::IngestError::MalformedRecord {
                    id,
                    element: element.clone(),
                })?;

            match ELiteral::try_from(integer) {
                Ok(elit) if literal::is_valid(elit) => Ok(elit),
                _ => Err(err::IngestError::InvalidLiteral {
                    id,
                    literal: integer,
                }),
            }
        })
        .collect()
}

impl Ingestor {
    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }

    /// Reads every available record, giving each clause read to `host`.
    ///
    /// Returns the count of records read, including any rejected records.
    pub fn poll<H: Host, S: KVStore>(&mut self, host: &mut H, link: &mut Link<S>) -> Result<usize, err::IngestError> {
        if !host.clause_stack().is_empty() {
            return Err(err::IngestError::ScratchNotEmpty);
        }

        let Some(mut connection) = link.connect() else {
            return Ok(0);
        };

        let mut count = 0;
        loop {
            let id = link.session.last_to_solver_id;
            let key = store::to_solver_key(id);

            let elements = match connection.range(&key, 0, -1) {
                Ok(elements) if elements.is_empty() => break,
                Ok(elements) => elements,
                Err(e) => {
                    log::error!(target: targets::STORE, "Failed to read {key}: {e}");
                    break;
                }
            };

            match parse_record(id, &elements) {
                Ok(elits) => self.load_clause(host, &elits),
                Err(e) => {
                    log::warn!(target: targets::INGEST, "Rejected: {e}");
                    self.stats.rejected += 1;
                }
            }

            link.session.last_to_solver_id += 1;
            count += 1;
        }

        log::debug!(target: targets::INGEST, "Read {count} records, next is {}", link.session.last_to_solver_id);
        Ok(count)
    }

    /// Gives the non-empty clause `elits` to `host`.
    fn load_clause<H: Host>(&mut self, host: &mut H, elits: &[ELiteral]) {
        debug_assert!(!elits.is_empty());
        for elit in elits {
            let ilit = host.import_literal(*elit);
            host.clause_stack().push(ilit);
        }

        let stack = host.clause_stack();
        let size = stack.len();
        let not_uip = stack[0];

        match size {
            1 => {
                log::trace!(target: targets::INGEST, "Unit {elits:?}");
                host.learned_unit(not_uip);
                self.stats.units += 1;
            }
            _ => {
                log::trace!(target: targets::INGEST, "Clause {elits:?}");
                host.new_redundant_clause(size - 1);
                self.stats.clauses += 1;
            }
        }

        host.clause_stack().clear();
    }
}

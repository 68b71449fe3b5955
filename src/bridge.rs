/*!
The bridge, as seen by a host solver.

A [Bridge] owns everything the bridge requires: the configuration, the store and session, the (optional) proof emitter, and the ingestor.
A host holds a bridge and calls into it:
- To trace a proof, [init_proof](Bridge::init_proof) is called once at the start of a solve, each addition and deletion of a clause is passed on, and [release_proof](Bridge::release_proof) is called at the end of a solve.
- To ingest clauses from peers, [loading_from_redis](Bridge::loading_from_redis) is called on each tick of the host, and on `true` [load_from_redis](Bridge::load_from_redis) is called.

All calls are synchronous.
Calls which may access the store (a flush, whether on a full buffer, by `flushproof`, or on release, and a load) block for the duration of the access.

If a bridge is dropped while a proof is traced the proof is released, and so any complete lines are flushed.

```rust
# use clause_bridge::{bridge::Bridge, config::Config, host::Host, store::memory::MemoryStore};
# use clause_bridge::store::{KVStore, StoreConnection};
# struct Identity(Vec<u32>, Vec<usize>);
# impl Host for Identity {
#     fn export_literal(&self, ilit: u32) -> i32 { ilit as i32 }
#     fn import_literal(&mut self, elit: i32) -> u32 { elit.unsigned_abs() }
#     fn value(&self, _: u32) -> i8 { 0 }
#     fn level(&self, _: u32) -> u32 { 0 }
#     fn learned_unit(&mut self, _: u32) { self.1.push(1) }
#     fn new_redundant_clause(&mut self, glue: usize) { self.1.push(glue + 1) }
#     fn clause_stack(&mut self) -> &mut Vec<u32> { &mut self.0 }
# }
let store = MemoryStore::default();
let mut config = Config::default();
config.backoff.value = 0;

let mut bridge = Bridge::new(config, store.clone());
let mut host = Identity(vec![], vec![]);

bridge.init_proof(true).unwrap();
bridge.add_unit(&host, 4).unwrap();
bridge.release_proof().unwrap();
assert_eq!(store.value("from_solver:0"), Some(vec![b'a', 8]));

let peer = store.clone();
let mut connection = peer.connect("", 0, None).unwrap();
connection.push("to_solver:0", b"2").unwrap();
connection.push("to_solver:0", b"3").unwrap();

assert!(bridge.loading_from_redis());
assert_eq!(bridge.load_from_redis(&mut host), Ok(1));
assert_eq!(host.1, vec![2]);
```
*/

use crate::{
    config::Config,
    host::Host,
    ingest::{IngestStats, Ingestor},
    proof::{stats::ProofStats, FlushReport, ProofEmitter},
    store::{KVStore, Link, Session},
    structures::{
        clause::Clause,
        literal::{ELiteral, ILiteral},
    },
    types::err::{self},
};

/// A bridge between a host solver and a store.
pub struct Bridge<S: KVStore> {
    config: Config,

    link: Link<S>,

    proof: Option<ProofEmitter>,

    ingestor: Ingestor,
}

impl<S: KVStore> Bridge<S> {
    pub fn new(config: Config, store: S) -> Self {
        let session = Session::from_config(&config);
        Bridge {
            config,
            link: Link::new(store, session),
            proof: None,
            ingestor: Ingestor::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.link.session
    }

    pub fn store(&self) -> &S {
        &self.link.store
    }

    /// The proof emitter, if a proof is being traced.
    pub fn proof(&self) -> Option<&ProofEmitter> {
        self.proof.as_ref()
    }

    pub fn ingest_stats(&self) -> &IngestStats {
        self.ingestor.stats()
    }

    /// Starts to trace a proof, in binary DRAT if `binary` and textual DRAT otherwise.
    pub fn init_proof(&mut self, binary: bool) -> Result<(), err::ErrorKind> {
        if self.proof.is_some() {
            return Err(err::ProofError::ProofActive.into());
        }
        self.proof = Some(ProofEmitter::new(binary, &self.config));
        Ok(())
    }

    /// Starts to trace a proof, in the format given by the `binary` option.
    pub fn init_proof_from_config(&mut self) -> Result<(), err::ErrorKind> {
        self.init_proof(self.config.binary.value)
    }

    /// Stops tracing a proof, after flushing the proof, and returns the statistics of the proof.
    pub fn release_proof(&mut self) -> Result<ProofStats, err::ErrorKind> {
        match self.proof.take() {
            Some(proof) => Ok(proof.release(&mut self.link)),
            None => Err(err::ProofError::ProofInactive.into()),
        }
    }

    /// Flushes the proof.
    pub fn flush_proof(&mut self) -> Result<FlushReport, err::ErrorKind> {
        let proof = self.proof.as_mut().ok_or(err::ProofError::ProofInactive)?;
        Ok(proof.flush(&mut self.link))
    }

    /// The report of proof statistics, one line to a string.
    pub fn proof_statistics(&self, verbose: bool) -> Vec<String> {
        match &self.proof {
            Some(proof) => proof
                .stats()
                .report(verbose)
                .iter()
                .map(|line| line.to_string())
                .collect(),
            None => Vec::default(),
        }
    }

    /// Prints the report of proof statistics to standard out.
    pub fn print_proof_statistics(&self, verbose: bool) {
        for line in self.proof_statistics(verbose) {
            println!("{line}");
        }
    }

    /// Whether clauses should be loaded from the store, on a tick of the host.
    pub fn loading_from_redis(&mut self) -> bool {
        self.link.session.backoff.should_poll()
    }

    /// Loads every clause available from peers into `host`, and returns the count of records read.
    pub fn load_from_redis<H: Host>(&mut self, host: &mut H) -> Result<usize, err::ErrorKind> {
        Ok(self.ingestor.poll(host, &mut self.link)?)
    }

    fn emitter(&mut self) -> Result<(&mut ProofEmitter, &mut Link<S>), err::ErrorKind> {
        match &mut self.proof {
            Some(proof) => Ok((proof, &mut self.link)),
            None => Err(err::ProofError::ProofInactive.into()),
        }
    }
}

/// Proof operations, each an error if no proof is being traced.
impl<S: KVStore> Bridge<S> {
    pub fn add_binary<H: Host>(&mut self, host: &H, a: ILiteral, b: ILiteral) -> Result<(), err::ErrorKind> {
        let (proof, link) = self.emitter()?;
        Ok(proof.add_binary(host, link, a, b)?)
    }

    pub fn add_clause<H: Host, C: Clause + ?Sized>(&mut self, host: &H, clause: &C) -> Result<(), err::ErrorKind> {
        let (proof, link) = self.emitter()?;
        Ok(proof.add_clause(host, link, clause)?)
    }

    pub fn add_empty(&mut self) -> Result<(), err::ErrorKind> {
        let (proof, link) = self.emitter()?;
        Ok(proof.add_empty(link)?)
    }

    pub fn add_lits<H: Host>(&mut self, host: &H, ilits: &[ILiteral]) -> Result<(), err::ErrorKind> {
        let (proof, link) = self.emitter()?;
        Ok(proof.add_lits(host, link, ilits)?)
    }

    pub fn add_unit<H: Host>(&mut self, host: &H, ilit: ILiteral) -> Result<(), err::ErrorKind> {
        let (proof, link) = self.emitter()?;
        Ok(proof.add_unit(host, link, ilit)?)
    }

    pub fn shrink_clause<H: Host, C: Clause + ?Sized>(
        &mut self,
        host: &H,
        clause: &C,
        remove: ILiteral,
        keep: ILiteral,
    ) -> Result<(), err::ErrorKind> {
        let (proof, link) = self.emitter()?;
        Ok(proof.shrink_clause(host, link, clause, remove, keep)?)
    }

    pub fn delete_binary<H: Host>(&mut self, host: &H, a: ILiteral, b: ILiteral) -> Result<(), err::ErrorKind> {
        let (proof, link) = self.emitter()?;
        Ok(proof.delete_binary(host, link, a, b)?)
    }

    pub fn delete_clause<H: Host, C: Clause + ?Sized>(&mut self, host: &H, clause: &C) -> Result<(), err::ErrorKind> {
        let (proof, link) = self.emitter()?;
        Ok(proof.delete_clause(host, link, clause)?)
    }

    pub fn delete_external(&mut self, elits: &[ELiteral]) -> Result<(), err::ErrorKind> {
        let (proof, link) = self.emitter()?;
        Ok(proof.delete_external(link, elits)?)
    }

    pub fn delete_internal<H: Host>(&mut self, host: &H, ilits: &[ILiteral]) -> Result<(), err::ErrorKind> {
        let (proof, link) = self.emitter()?;
        Ok(proof.delete_internal(host, link, ilits)?)
    }
}

impl<S: KVStore> Drop for Bridge<S> {
    fn drop(&mut self) {
        if let Some(proof) = self.proof.take() {
            proof.release(&mut self.link);
        }
    }
}

/*!
Tracing a DRAT proof to a store.

A [ProofEmitter] receives the additions and deletions of clauses made by a host solver, and writes each as a line of a DRAT proof, in either the binary or textual [format](encode::Format).

# Overview

For each operation:
1. The literals of the clause are collected on the line, as external literals.
   Internal literals are translated through the [host](crate::host::Host).
2. The line is [encoded](encode::write_line) to the [write buffer](buffer::WriteBuffer), byte by byte.
   If the buffer is full, the buffer is flushed before the byte is written.
3. The line is cleared.
4. If the `flushproof` option is set, the buffer is flushed.

A flush splits the buffer into records at the separator of the format, and writes each record to the store under `from_solver:<id>` with `id` counting up from zero.
Any incomplete line remains in the buffer, so each record is exactly one line.

# Failure

A store which cannot be reached, or which fails to write some record, does not stop the emitter.
Instead, the failure is logged and the remaining complete records of the flush are dropped.
The id of the next record is only advanced on a successful write, so the keys written always form a contiguous sequence.

# Example

```rust
# use clause_bridge::config::Config;
# use clause_bridge::host::Host;
# use clause_bridge::proof::ProofEmitter;
# use clause_bridge::store::{memory::MemoryStore, Link, Session};
# struct Identity(Vec<u32>);
# impl Host for Identity {
#     fn export_literal(&self, ilit: u32) -> i32 { ilit as i32 }
#     fn import_literal(&mut self, elit: i32) -> u32 { elit as u32 }
#     fn value(&self, _: u32) -> i8 { 0 }
#     fn level(&self, _: u32) -> u32 { 0 }
#     fn learned_unit(&mut self, _: u32) {}
#     fn new_redundant_clause(&mut self, _: usize) {}
#     fn clause_stack(&mut self) -> &mut Vec<u32> { &mut self.0 }
# }
let config = Config::default();
let store = MemoryStore::default();
let mut link = Link::new(store.clone(), Session::from_config(&config));
let host = Identity(vec![]);

let mut proof = ProofEmitter::new(false, &config);
proof.add_clause(&host, &mut link, &vec![1_u32, 2]).unwrap();
proof.delete_binary(&host, &mut link, 1, 2).unwrap();
proof.release(&mut link);

assert_eq!(store.sequence("from_solver"), vec![b"a 1 2 0".to_vec(), b"d 1 2 0".to_vec()]);
```
*/

pub mod buffer;
pub mod checks;
pub mod encode;
pub mod stats;

use buffer::WriteBuffer;
use checks::RepeatChecks;
use encode::{Format, LineKind};
use stats::ProofStats;

use crate::{
    config::{Config, BUFFER_CAPACITY},
    host::Host,
    misc::log::targets::{self},
    store::{self, KVStore, Link, StoreConnection},
    structures::{
        clause::Clause,
        literal::{self, ELiteral, ILiteral},
    },
    types::err::{self},
};

/// A summary of a flush.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Records written to the store.
    pub records: u64,

    /// Complete records not written, due to some failure of the store.
    pub dropped: u64,

    /// Bytes of an incomplete line kept in the buffer.
    pub retained: usize,
}

/// Whether `ilit` is kept when `remove` is removed from a clause containing `ilit`, and `keep` is kept.
///
/// A literal other than `keep` which is false at decision level zero is dropped, as it is false on every assignment.
pub fn retained_on_shrink<H: Host>(host: &H, ilit: ILiteral, remove: ILiteral, keep: ILiteral) -> bool {
    if ilit == remove {
        return false;
    }
    ilit == keep || host.value(ilit) >= 0 || host.level(ilit) > 0
}

/// Writes a DRAT proof to a store.
pub struct ProofEmitter {
    buffer: WriteBuffer,

    format: Format,

    /// Flush after every line.
    flush_proof: bool,

    /// The external literals of the line being assembled.
    line: Vec<ELiteral>,

    /// The bytes of the line being written.
    bytes: Vec<u8>,

    stats: ProofStats,

    checks: Option<RepeatChecks>,
}

impl ProofEmitter {
    /// A fresh emitter, writing binary DRAT if `binary` and textual DRAT otherwise.
    pub fn new(binary: bool, config: &Config) -> Self {
        Self::with_capacity(binary, config, BUFFER_CAPACITY)
    }

    /// A fresh emitter with a buffer of the given capacity.
    pub fn with_capacity(binary: bool, config: &Config, capacity: usize) -> Self {
        let format = Format::from_binary(binary);
        log::info!(target: targets::PROOF, "Starting to trace {format} proof");

        ProofEmitter {
            buffer: WriteBuffer::new(capacity),
            format,
            flush_proof: config.flush_proof.value,
            line: Vec::default(),
            bytes: Vec::default(),
            stats: ProofStats::default(),
            checks: match config.checks.value {
                true => Some(RepeatChecks::default()),
                false => None,
            },
        }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn stats(&self) -> &ProofStats {
        &self.stats
    }

    pub fn checks(&self) -> Option<&RepeatChecks> {
        self.checks.as_ref()
    }

    /// The bytes written but not yet flushed.
    pub fn pending(&self) -> &[u8] {
        self.buffer.contents()
    }

    /// Whether no line is being assembled.
    pub fn line_is_empty(&self) -> bool {
        self.line.is_empty()
    }

    /// Flushes the buffer and returns the statistics of the proof.
    pub fn release<S: KVStore>(mut self, link: &mut Link<S>) -> ProofStats {
        log::info!(target: targets::PROOF, "Stopping to trace proof");
        self.flush(link);
        if !self.buffer.is_empty() {
            log::warn!(target: targets::PROOF, "Discarding {} bytes of an incomplete line", self.buffer.pos());
        }
        self.stats
    }

    /// Writes every complete line in the buffer to the store, keeping any incomplete line.
    pub fn flush<S: KVStore>(&mut self, link: &mut Link<S>) -> FlushReport {
        let mut report = FlushReport::default();
        if self.buffer.is_empty() {
            return report;
        }

        let separator = self.format.separator();
        {
            let mut records = self.buffer.records(separator).peekable();
            if records.peek().is_some() {
                match link.connect() {
                    Some(mut connection) => {
                        for record in records.by_ref() {
                            let key = store::from_solver_key(link.session.last_from_solver_id);
                            match connection.set(&key, record) {
                                Ok(()) => {
                                    link.session.last_from_solver_id += 1;
                                    report.records += 1;
                                }
                                Err(e) => {
                                    log::error!(target: targets::STORE, "Failed to write {key}: {e}");
                                    report.dropped += 1;
                                    break;
                                }
                            }
                        }
                        report.dropped += records.count() as u64;
                    }

                    None => report.dropped += records.count() as u64,
                }
            }
        }

        self.buffer.retain_incomplete(separator);
        report.retained = self.buffer.pos();

        self.stats.records += report.records;
        self.stats.dropped += report.dropped;
        if report.dropped > 0 {
            log::error!(target: targets::PROOF, "Dropped {} proof records", report.dropped);
        }
        log::debug!(target: targets::PROOF, "Flushed {} records, retained {} bytes", report.records, report.retained);
        report
    }

    fn put<S: KVStore>(&mut self, byte: u8, link: &mut Link<S>) {
        if self.buffer.is_full() {
            self.flush(link);
            if self.buffer.is_full() {
                log::warn!(target: targets::PROOF, "Growing the proof buffer for a line of over {} bytes", self.buffer.capacity());
                self.buffer.grow();
            }
        }
        self.buffer.push(byte);
    }

    fn clear_line(&mut self) {
        self.line.clear();
        if let Some(checks) = &mut self.checks {
            checks.imported.clear();
        }
    }

    fn import_internal<H: Host>(&mut self, host: &H, ilit: ILiteral) -> Result<(), err::ProofError> {
        let elit = host.export_literal(ilit);
        if !literal::is_valid(elit) {
            self.clear_line();
            return Err(err::ProofError::InvalidLiteral(elit));
        }
        self.line.push(elit);
        if let Some(checks) = &mut self.checks {
            checks.imported.push(ilit);
        }
        Ok(())
    }

    fn import_internals<H: Host>(&mut self, host: &H, ilits: &[ILiteral]) -> Result<(), err::ProofError> {
        debug_assert!(self.line.is_empty());
        for ilit in ilits {
            self.import_internal(host, *ilit)?;
        }
        Ok(())
    }

    fn import_externals(&mut self, elits: &[ELiteral]) -> Result<(), err::ProofError> {
        debug_assert!(self.line.is_empty());
        for elit in elits {
            if !literal::is_valid(*elit) {
                self.clear_line();
                return Err(err::ProofError::InvalidLiteral(*elit));
            }
            self.line.push(*elit);
        }
        Ok(())
    }

    /// Writes the line, then clears the line.
    fn emit_line<S: KVStore>(&mut self, kind: LineKind, link: &mut Link<S>) -> Result<(), err::ProofError> {
        if kind == LineKind::Add {
            if let Some(checks) = &mut self.checks {
                if let Err(e) = checks.note_added(&self.line) {
                    self.clear_line();
                    return Err(e);
                }
            }
        }

        if log::log_enabled!(target: targets::PROOF, log::Level::Trace) {
            match &self.checks {
                Some(checks) if checks.imported.len() == self.line.len() && !self.line.is_empty() => {
                    log::trace!(target: targets::PROOF, "{kind:?} line {:?} (internal {:?})", self.line, checks.imported)
                }
                _ => log::trace!(target: targets::PROOF, "{kind:?} line {:?}", self.line),
            }
        }

        let mut bytes = std::mem::take(&mut self.bytes);
        bytes.clear();
        encode::write_line(self.format, kind, &self.line, &mut bytes);
        for byte in &bytes {
            self.put(*byte, link);
        }
        self.bytes = bytes;

        match kind {
            LineKind::Add => self.stats.added += 1,
            LineKind::Delete => self.stats.deleted += 1,
        }
        self.stats.lines += 1;
        self.stats.literals += self.line.len() as u64;

        self.clear_line();

        if self.flush_proof {
            self.flush(link);
        }
        Ok(())
    }
}

/// Additions.
impl ProofEmitter {
    /// Adds the binary clause of `a` and `b`.
    pub fn add_binary<H: Host, S: KVStore>(
        &mut self,
        host: &H,
        link: &mut Link<S>,
        a: ILiteral,
        b: ILiteral,
    ) -> Result<(), err::ProofError> {
        self.import_internals(host, &[a, b])?;
        self.emit_line(LineKind::Add, link)
    }

    /// Adds `clause`.
    pub fn add_clause<H: Host, S: KVStore, C: Clause + ?Sized>(
        &mut self,
        host: &H,
        link: &mut Link<S>,
        clause: &C,
    ) -> Result<(), err::ProofError> {
        self.import_internals(host, clause.literals())?;
        self.emit_line(LineKind::Add, link)
    }

    /// Adds the empty clause.
    pub fn add_empty<S: KVStore>(&mut self, link: &mut Link<S>) -> Result<(), err::ProofError> {
        debug_assert!(self.line.is_empty());
        self.emit_line(LineKind::Add, link)
    }

    /// Adds the clause of internal literals `ilits`.
    pub fn add_lits<H: Host, S: KVStore>(
        &mut self,
        host: &H,
        link: &mut Link<S>,
        ilits: &[ILiteral],
    ) -> Result<(), err::ProofError> {
        self.import_internals(host, ilits)?;
        self.emit_line(LineKind::Add, link)
    }

    /// Adds the unit clause `ilit`.
    pub fn add_unit<H: Host, S: KVStore>(
        &mut self,
        host: &H,
        link: &mut Link<S>,
        ilit: ILiteral,
    ) -> Result<(), err::ProofError> {
        self.import_internals(host, &[ilit])?;
        self.emit_line(LineKind::Add, link)
    }

    /// Adds `clause` without `remove` (and without literals false at level zero, other than `keep`), then deletes `clause`.
    pub fn shrink_clause<H: Host, S: KVStore, C: Clause + ?Sized>(
        &mut self,
        host: &H,
        link: &mut Link<S>,
        clause: &C,
        remove: ILiteral,
        keep: ILiteral,
    ) -> Result<(), err::ProofError> {
        debug_assert!(self.line.is_empty());
        if !clause.literals().contains(&remove) {
            return Err(err::ProofError::MissingShrinkLiteral);
        }

        for ilit in clause.literals() {
            if retained_on_shrink(host, *ilit, remove, keep) {
                self.import_internal(host, *ilit)?;
            }
        }
        self.emit_line(LineKind::Add, link)?;

        self.import_internals(host, clause.literals())?;
        self.emit_line(LineKind::Delete, link)
    }
}

/// Deletions.
impl ProofEmitter {
    /// Deletes the binary clause of `a` and `b`.
    pub fn delete_binary<H: Host, S: KVStore>(
        &mut self,
        host: &H,
        link: &mut Link<S>,
        a: ILiteral,
        b: ILiteral,
    ) -> Result<(), err::ProofError> {
        self.import_internals(host, &[a, b])?;
        self.emit_line(LineKind::Delete, link)
    }

    /// Deletes `clause`.
    pub fn delete_clause<H: Host, S: KVStore, C: Clause + ?Sized>(
        &mut self,
        host: &H,
        link: &mut Link<S>,
        clause: &C,
    ) -> Result<(), err::ProofError> {
        self.import_internals(host, clause.literals())?;
        self.emit_line(LineKind::Delete, link)
    }

    /// Deletes the clause of external literals `elits`, as given.
    pub fn delete_external<S: KVStore>(
        &mut self,
        link: &mut Link<S>,
        elits: &[ELiteral],
    ) -> Result<(), err::ProofError> {
        log::trace!(target: targets::PROOF, "Explicitly deleted {elits:?}");
        self.import_externals(elits)?;
        self.emit_line(LineKind::Delete, link)
    }

    /// Deletes the clause of internal literals `ilits`.
    pub fn delete_internal<H: Host, S: KVStore>(
        &mut self,
        host: &H,
        link: &mut Link<S>,
        ilits: &[ILiteral],
    ) -> Result<(), err::ProofError> {
        self.import_internals(host, ilits)?;
        self.emit_line(LineKind::Delete, link)
    }
}

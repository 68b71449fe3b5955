//! A bridge for exchanging clauses between cooperating SAT solvers through a key-value store.
//!
//! clause_bridge couples a conflict-driven clause-learning solver (the *host*) with a store shared by a group of solvers (the *peers*).
//! The bridge does two things:
//! - Traces the proof of the host (each addition and deletion of a clause) as DRAT, and writes each line of the proof to the store as a record.
//! - Reads clauses contributed by peers from the store, and gives these to the host as learnt clauses.
//!
//! # Orientation
//!
//! The library is designed around the [bridge](crate::bridge), which owns each of the parts below and offers the interface a host calls into.
//!
//! - The [host] trait gives the hooks a host solver provides, e.g. to translate literals.
//! - The [proof emitter](crate::proof) encodes lines in binary or textual DRAT to a write buffer, and on a flush splits the buffer into records, one to a line.
//! - The [ingestor](crate::ingest) polls the store for clauses from peers, with polls spaced out by a [backoff gate](crate::ingest::backoff).
//! - The [store] traits abstract over the key-value store, with implementations for [Redis](crate::store::redis) and for use [in memory](crate::store::memory).
//!
//! Records from the host are written under the keys `from_solver:0`, `from_solver:1`, …, and records to the host are read from the keys `to_solver:0`, `to_solver:1`, …
//!
//! # Example
//!
//! ```rust
//! # use clause_bridge::{bridge::Bridge, config::Config, host::Host, store::memory::MemoryStore};
//! # struct Offset(Vec<u32>);
//! # impl Host for Offset {
//! #     fn export_literal(&self, ilit: u32) -> i32 { if ilit % 2 == 0 { (ilit / 2) as i32 } else { -((ilit / 2) as i32) } }
//! #     fn import_literal(&mut self, elit: i32) -> u32 { 2 * elit.unsigned_abs() + (elit < 0) as u32 }
//! #     fn value(&self, _: u32) -> i8 { 0 }
//! #     fn level(&self, _: u32) -> u32 { 0 }
//! #     fn learned_unit(&mut self, _: u32) {}
//! #     fn new_redundant_clause(&mut self, _: usize) {}
//! #     fn clause_stack(&mut self) -> &mut Vec<u32> { &mut self.0 }
//! # }
//! let store = MemoryStore::default();
//! let mut config = Config::default();
//! config.set("flushproof", "1").unwrap();
//!
//! let mut bridge = Bridge::new(config, store.clone());
//! let host = Offset(vec![]);
//!
//! bridge.init_proof(false).unwrap();
//! bridge.add_clause(&host, &[2_u32, 5, 6]).unwrap();
//! assert_eq!(store.value("from_solver:0"), Some(b"a 1 -2 3 0".to_vec()));
//! ```
//!
//! # Logs
//!
//! Calls to [log!](log) are made with targets listed in [misc::log].
//! For example, when used with [env_logger](https://docs.rs/env_logger/latest/env_logger/), failures of the store can be found with `RUST_LOG=store=error …` and each line of the proof with `RUST_LOG=proof=trace …`.

pub mod bridge;
pub mod config;
pub mod host;
pub mod ingest;
pub mod misc;
pub mod proof;
pub mod store;
pub mod structures;
pub mod types;

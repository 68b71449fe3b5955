/*!
The key-value store used as a message bus between cooperating solvers.

The bridge requires very little of a store, and the requirements are given by two traits:
- [KVStore], something which can be connected to.
- [StoreConnection], a connection through which values are written and lists are read.

A connection is scoped to a single operation of the bridge.
That is, a connection is made at the start of a flush or poll, and dropped at the end of the flush or poll, on every path.

Two implementations are provided:
- [RedisStore](redis::RedisStore), for a Redis server.
- [MemoryStore](memory::MemoryStore), for use within a single process, and with support for simulating an unreachable store.

# Keys

Records travel in two directions, each an append-only sequence of keys:

| Direction       | Key                | Value                                        |
|-----------------|--------------------|----------------------------------------------|
| solver → peers  | `from_solver:<id>` | a single DRAT line, without its separator    |
| peers → solver  | `to_solver:<id>`   | a list of decimal external literals          |

Ids start at 0 and are never reused.
The position of the bridge in each sequence is kept in a [Session].
*/

pub mod memory;
pub mod redis;

use std::time::Duration;

use crate::{
    config::Config,
    ingest::backoff::BackoffGate,
    misc::log::targets::{self},
    types::err::{self},
};

/// Prefix of keys for records from the solver.
pub const FROM_SOLVER: &str = "from_solver";

/// Prefix of keys for records to the solver.
pub const TO_SOLVER: &str = "to_solver";

/// The key of the record from the solver with the given id.
pub fn from_solver_key(id: u64) -> String {
    format!("{FROM_SOLVER}:{id}")
}

/// The key of the record to the solver with the given id.
pub fn to_solver_key(id: u64) -> String {
    format!("{TO_SOLVER}:{id}")
}

/// Something which can be connected to.
pub trait KVStore {
    type Connection: StoreConnection;

    /// A fresh connection to the store at `host` and `port`.
    ///
    /// The connection is closed when dropped.
    fn connect(
        &self,
        host: &str,
        port: u16,
        timeout: Option<Duration>,
    ) -> Result<Self::Connection, err::StoreError>;
}

/// A connection to a store.
pub trait StoreConnection {
    /// Sets the value of `key` to `value`.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), err::StoreError>;

    /// The elements of the list at `key` from `lo` to `hi`, inclusive.
    ///
    /// As with Redis, negative indicies count from the end of the list, and a missing key is an empty list.
    fn range(&mut self, key: &str, lo: isize, hi: isize) -> Result<Vec<Vec<u8>>, err::StoreError>;

    /// Appends `value` to the list at `key`.
    fn push(&mut self, key: &str, value: &[u8]) -> Result<(), err::StoreError>;
}

/// Parameters of a session with a store, shared by the proof emitter and the ingestor.
#[derive(Clone, Debug)]
pub struct Session {
    pub host: String,

    pub port: u16,

    pub timeout: Option<Duration>,

    /// The id of the next record from the solver.
    pub last_from_solver_id: u64,

    /// The id of the next record to the solver.
    pub last_to_solver_id: u64,

    /// The gate on polls of the store.
    pub backoff: BackoffGate,
}

impl Session {
    pub fn from_config(config: &Config) -> Self {
        Session {
            host: config.host.clone(),
            port: config.port.value,
            timeout: config.timeout(),
            last_from_solver_id: 0,
            last_to_solver_id: 0,
            backoff: BackoffGate::new(config.backoff.value),
        }
    }

    /// A connection to `store`, or `None` if no connection could be made.
    ///
    /// Failure is logged, and otherwise treated as there being no work to do.
    pub fn connect<S: KVStore>(&self, store: &S) -> Option<S::Connection> {
        match store.connect(&self.host, self.port, self.timeout) {
            Ok(connection) => Some(connection),
            Err(e) => {
                log::error!(target: targets::STORE, "{}:{} unavailable: {e}", self.host, self.port);
                None
            }
        }
    }
}

/// A store together with the session used to access it.
pub struct Link<S: KVStore> {
    pub store: S,

    pub session: Session,
}

impl<S: KVStore> Link<S> {
    pub fn new(store: S, session: Session) -> Self {
        Link { store, session }
    }

    /// A connection to the store, or `None` if no connection could be made.
    pub fn connect(&self) -> Option<S::Connection> {
        self.session.connect(&self.store)
    }
}

/// Resolves a Redis style inclusive range over a list of the given length to a range of indicies.
pub(crate) fn resolve_range(len: usize, lo: isize, hi: isize) -> std::ops::Range<usize> {
    let resolve = |index: isize| -> isize {
        match index < 0 {
            true => len as isize + index,
            false => index,
        }
    };

    let lo = resolve(lo).max(0) as usize;
    let hi = resolve(hi);
    if hi < 0 {
        return 0..0;
    }
    let hi = (hi as usize).saturating_add(1).min(len);
    match lo < hi {
        true => lo..hi,
        false => 0..0,
    }
}

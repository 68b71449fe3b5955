//! Error types used in the library.
//!
//! - Store errors are recovered from within the bridge, and are only returned from direct use of a [store](crate::store).
//! - Ingest errors are contained to a single record, and are returned from direct use of the [ingestor](crate::ingest) to note the record was rejected.
//! - Proof errors note a misuse of the [proof emitter](crate::proof::ProofEmitter) by a host, e.g. a literal without an external counterpart.
//!
//! Names of the error enums overlap with the corresponding structs.
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

use crate::structures::literal::ELiteral;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Config(ConfigError),
    Ingest(IngestError),
    Proof(ProofError),
    Store(StoreError),
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Ingest(e) => write!(f, "ingest: {e}"),
            Self::Proof(e) => write!(f, "proof: {e}"),
            Self::Store(e) => write!(f, "store: {e}"),
        }
    }
}

impl std::error::Error for ErrorKind {}

/// Errors when configuring a bridge.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// No option has the given name.
    UnknownOption(String),

    /// The value could not be read as a value of the option.
    InvalidValue { option: &'static str, value: String },

    /// The value is outside the bounds of the option.
    OutOfBounds { option: &'static str },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownOption(name) => write!(f, "unknown option '{name}'"),
            Self::InvalidValue { option, value } => {
                write!(f, "invalid value '{value}' for option '{option}'")
            }
            Self::OutOfBounds { option } => write!(f, "value out of bounds for option '{option}'"),
        }
    }
}

impl From<ConfigError> for ErrorKind {
    fn from(e: ConfigError) -> Self {
        ErrorKind::Config(e)
    }
}

/// Noted errors when ingesting a record from a peer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IngestError {
    /// Some element of the record is not a decimal integer.
    MalformedRecord { id: u64, element: Vec<u8> },

    /// Some element of the record is an integer, but not an external literal (e.g. zero).
    InvalidLiteral { id: u64, literal: i64 },

    /// The scratch clause stack of the host was not empty.
    ScratchNotEmpty,
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedRecord { id, element } => write!(
                f,
                "record {id} contains the non-integer element '{}'",
                String::from_utf8_lossy(element)
            ),
            Self::InvalidLiteral { id, literal } => {
                write!(f, "record {id} contains the invalid literal {literal}")
            }
            Self::ScratchNotEmpty => write!(f, "the clause stack of the host is not empty"),
        }
    }
}

impl From<IngestError> for ErrorKind {
    fn from(e: IngestError) -> Self {
        ErrorKind::Ingest(e)
    }
}

/// Errors when emitting a proof.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProofError {
    /// A literal without an external counterpart, or an external literal which is not a literal.
    InvalidLiteral(ELiteral),

    /// A second empty clause was added, while checks are enabled.
    RepeatedEmpty,

    /// The literal to remove when shrinking a clause is not in the clause.
    MissingShrinkLiteral,

    /// A proof is already being traced.
    ProofActive,

    /// No proof is being traced.
    ProofInactive,
}

impl std::fmt::Display for ProofError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLiteral(elit) => write!(f, "invalid literal {elit}"),
            Self::RepeatedEmpty => write!(f, "the empty clause was added twice"),
            Self::MissingShrinkLiteral => write!(f, "the literal to remove is not in the clause"),
            Self::ProofActive => write!(f, "a proof is already being traced"),
            Self::ProofInactive => write!(f, "no proof is being traced"),
        }
    }
}

impl From<ProofError> for ErrorKind {
    fn from(e: ProofError) -> Self {
        ErrorKind::Proof(e)
    }
}

/// Errors from a key-value store.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    /// A connection to the store could not be made.
    Connection(String),

    /// The store failed to perform a command.
    Command(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection(msg) => write!(f, "connection failed: {msg}"),
            Self::Command(msg) => write!(f, "command failed: {msg}"),
        }
    }
}

impl From<StoreError> for ErrorKind {
    fn from(e: StoreError) -> Self {
        ErrorKind::Store(e)
    }
}

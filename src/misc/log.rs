/*!
Items related to [logging](log).

Calls to the log macro are made throughout the library.
Store failures are logged at `error`, rejected peer records at `warn`, and each proof line at `trace`.

Note, no log implementation is provided.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to the [proof emitter](crate::proof)
    pub const PROOF: &str = "proof";

    /// Logs related to the [store](crate::store)
    pub const STORE: &str = "store";

    /// Logs related to [ingesting](crate::ingest) clauses from peers
    pub const INGEST: &str = "ingest";

    /// Logs related to the [backoff gate](crate::ingest::backoff)
    pub const BACKOFF: &str = "backoff";
}

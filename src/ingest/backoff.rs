/*!
A gate to space out polls of the store.

A host may ask whether to poll on every tick (e.g. every decision), but a poll requires a round trip to the store.
So, the gate declines requests until the count of declined requests exceeds some limit, at which point a request is admitted and the count resets.

With the default limit of 10 000, every 10 001st request is admitted.

```rust
# use clause_bridge::ingest::backoff::BackoffGate;
let mut gate = BackoffGate::new(2);
let admits = (0..9).map(|_| gate.should_poll()).collect::<Vec<_>>();
assert_eq!(admits, [false, false, true, false, false, true, false, false, true]);
```
*/

use crate::misc::log::targets::{self};

/// A counter of declined polls, and the limit after which a poll is admitted.
#[derive(Clone, Debug)]
pub struct BackoffGate {
    /// Count of requests since the last admitted request.
    nope_counter: u32,

    limit: u32,
}

impl BackoffGate {
    pub fn new(limit: u32) -> Self {
        BackoffGate {
            nope_counter: 0,
            limit,
        }
    }

    /// Whether to poll, given a request to do so.
    pub fn should_poll(&mut self) -> bool {
        self.nope_counter = self.nope_counter.saturating_add(1);
        if self.nope_counter > self.limit {
            log::trace!(target: targets::BACKOFF, "Admitted after {} requests", self.nope_counter);
            self.nope_counter = 0;
            return true;
        }
        false
    }

    /// The count of requests since the last admitted request.
    pub fn nope_counter(&self) -> u32 {
        self.nope_counter
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}

impl Default for BackoffGate {
    fn default() -> Self {
        BackoffGate::new(crate::config::BACKOFF_LIMIT)
    }
}

/*!
Configuration of a bridge.

All configuration for a bridge is contained within a [Config].
The [proof emitter](crate::proof::ProofEmitter) and the [ingestor](crate::ingest) read the parts relevant to them when created.

Options may be set directly, or from text through [Config::set], as an option string of the host would be applied:

```rust
# use clause_bridge::config::Config;
let mut config = Config::default();
assert!(config.set("flushproof", "1").is_ok());
assert!(config.apply("port=7001").is_ok());
assert!(config.flush_proof.value);
assert_eq!(config.port.value, 7001);
assert!(config.set("speed", "fast").is_err());
```
*/

mod config_option;
pub use config_option::ConfigOption;

use std::time::Duration;

use crate::types::err::{self};

/// The capacity of the proof write buffer, 1 MiB.
pub const BUFFER_CAPACITY: usize = 1 << 20;

/// The default limit of the backoff gate.
pub const BACKOFF_LIMIT: u32 = 10_000;

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// Flush the proof buffer to the store after every line.
    pub flush_proof: ConfigOption<bool>,

    /// Trace the proof in binary DRAT, rather than textual DRAT.
    pub binary: ConfigOption<bool>,

    /// The host of the store.
    pub host: String,

    /// The port of the store.
    pub port: ConfigOption<u16>,

    /// The count of declined polls after which a poll is admitted.
    pub backoff: ConfigOption<u32>,

    /// Check for repeated empty clauses, record units, and keep imported internal literals for logs.
    pub checks: ConfigOption<bool>,

    /// Timeout for connecting to and reading from the store, in milliseconds, with 0 for no timeout.
    pub timeout: ConfigOption<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            flush_proof: ConfigOption {
                name: "flushproof",
                min: false,
                max: true,
                value: false,
            },

            binary: ConfigOption {
                name: "binary",
                min: false,
                max: true,
                value: true,
            },

            host: "127.0.0.1".to_string(),

            port: ConfigOption {
                name: "port",
                min: 1,
                max: u16::MAX,
                value: 6379,
            },

            backoff: ConfigOption {
                name: "backoff",
                min: 0,
                max: u32::MAX,
                value: BACKOFF_LIMIT,
            },

            checks: ConfigOption {
                name: "checks",
                min: false,
                max: true,
                value: cfg!(debug_assertions),
            },

            timeout: ConfigOption {
                name: "timeout",
                min: 0,
                max: u64::MAX,
                value: 5_000,
            },
        }
    }
}

impl Config {
    /// Sets the option `name` to `value`, read from text.
    ///
    /// Boolean options accept `true`/`false` and `1`/`0`.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), err::ConfigError> {
        match name.trim() {
            "flushproof" => Self::set_bool(&mut self.flush_proof, value),
            "binary" => Self::set_bool(&mut self.binary, value),
            "checks" => Self::set_bool(&mut self.checks, value),

            "host" => {
                let host = value.trim();
                if host.is_empty() {
                    return Err(err::ConfigError::InvalidValue {
                        option: "host",
                        value: value.to_string(),
                    });
                }
                self.host = host.to_string();
                Ok(())
            }

            "port" => self.port.set_str(value),
            "backoff" => self.backoff.set_str(value),
            "timeout" => self.timeout.set_str(value),

            _ => Err(err::ConfigError::UnknownOption(name.to_string())),
        }
    }

    /// Applies an option of the form `name=value`.
    pub fn apply(&mut self, option: &str) -> Result<(), err::ConfigError> {
        match option.split_once('=') {
            Some((name, value)) => self.set(name, value),
            None => Err(err::ConfigError::InvalidValue {
                option: "",
                value: option.to_string(),
            }),
        }
    }

    /// The timeout for store operations, if any.
    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout.value {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    fn set_bool(option: &mut ConfigOption<bool>, value: &str) -> Result<(), err::ConfigError> {
        match value.trim() {
            "1" => option.set(true),
            "0" => option.set(false),
            other => option.set_str(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(!config.flush_proof.value);
        assert!(config.binary.value);
        assert_eq!(config.port.value, 6379);
        assert_eq!(config.backoff.value, 10_000);
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn textual_options() {
        let mut config = Config::default();

        assert!(config.set("binary", "false").is_ok());
        assert!(!config.binary.value);

        assert!(config.apply("host=store.local").is_ok());
        assert_eq!(config.host, "store.local");

        assert!(config.set("timeout", "0").is_ok());
        assert_eq!(config.timeout(), None);

        assert_eq!(
            config.set("port", "0"),
            Err(err::ConfigError::OutOfBounds { option: "port" })
        );
        assert!(config.set("host", "  ").is_err());
        assert!(config.apply("flushproof").is_err());
        assert_eq!(
            config.set("nope", "1"),
            Err(err::ConfigError::UnknownOption("nope".to_string()))
        );
    }
}

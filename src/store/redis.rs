//! A [Redis](https://redis.io) server as a store.
//!
//! Values are written with `SET`, lists are read with `LRANGE` and appended to with `RPUSH`.
//! Values are binary safe, so binary DRAT records are written as is.

use std::time::Duration;

use crate::types::err::{self};

use super::{KVStore, StoreConnection};

/// A Redis server, connected to through [redis](::redis).
#[derive(Clone, Copy, Debug, Default)]
pub struct RedisStore;

/// A connection to a Redis server.
pub struct RedisConnection {
    connection: ::redis::Connection,
}

fn command_error(e: ::redis::RedisError) -> err::StoreError {
    err::StoreError::Command(e.to_string())
}

fn connection_error(e: ::redis::RedisError) -> err::StoreError {
    err::StoreError::Connection(e.to_string())
}

impl KVStore for RedisStore {
    type Connection = RedisConnection;

    fn connect(
        &self,
        host: &str,
        port: u16,
        timeout: Option<Duration>,
    ) -> Result<RedisConnection, err::StoreError> {
        let client = ::redis::Client::open(format!("redis://{host}:{port}/")).map_err(connection_error)?;

        let connection = match timeout {
            Some(timeout) => client.get_connection_with_timeout(timeout),
            None => client.get_connection(),
        }
        .map_err(connection_error)?;

        connection.set_read_timeout(timeout).map_err(connection_error)?;
        connection.set_write_timeout(timeout).map_err(connection_error)?;

        Ok(RedisConnection { connection })
    }
}

impl StoreConnection for RedisConnection {
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), err::StoreError> {
        ::redis::cmd("SET")
            .arg(key)
            .arg(value)
            .query::<()>(&mut self.connection)
            .map_err(command_error)
    }

    fn range(&mut self, key: &str, lo: isize, hi: isize) -> Result<Vec<Vec<u8>>, err::StoreError> {
        ::redis::cmd("LRANGE")
            .arg(key)
            .arg(lo)
            .arg(hi)
            .query::<Vec<Vec<u8>>>(&mut self.connection)
            .map_err(command_error)
    }

    fn push(&mut self, key: &str, value: &[u8]) -> Result<(), err::StoreError> {
        ::redis::cmd("RPUSH")
            .arg(key)
            .arg(value)
            .query::<()>(&mut self.connection)
            .map_err(command_error)
    }
}

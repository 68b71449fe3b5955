/*!
A store held in memory.

Clones of a [MemoryStore] share the same contents, so one clone may be given to a bridge while another is used to inspect records or to act as a peer.

```rust
# use clause_bridge::store::{memory::MemoryStore, KVStore, StoreConnection};
let store = MemoryStore::default();
let peer = store.clone();

let mut connection = store.connect("localhost", 6379, None).unwrap();
connection.push("to_solver:0", b"-2").unwrap();

assert_eq!(peer.list("to_solver:0"), vec![b"-2".to_vec()]);
```

The store may be made unreachable, or set to fail writes after some count of writes, to exercise the paths taken when a store fails.
*/

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use crate::types::err::{self};

use super::{resolve_range, KVStore, StoreConnection};

#[derive(Default)]
struct Contents {
    values: HashMap<String, Vec<u8>>,

    lists: HashMap<String, Vec<Vec<u8>>>,

    unreachable: bool,

    /// Count of further writes which succeed, if limited.
    write_allowance: Option<usize>,

    /// Count of connections made.
    connections: usize,
}

/// A store held in memory.
#[derive(Clone, Default)]
pub struct MemoryStore {
    contents: Arc<Mutex<Contents>>,
}

/// A connection to a [MemoryStore].
pub struct MemoryConnection {
    contents: Arc<Mutex<Contents>>,
}

fn lock(contents: &Mutex<Contents>) -> MutexGuard<'_, Contents> {
    contents.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryStore {
    /// Sets whether connections to the store fail.
    pub fn set_reachable(&self, reachable: bool) {
        lock(&self.contents).unreachable = !reachable;
    }

    /// Fails every write after the next `count` writes, or no write if `None`.
    pub fn fail_writes_after(&self, count: Option<usize>) {
        lock(&self.contents).write_allowance = count;
    }

    /// The value at `key`, if any.
    pub fn value(&self, key: &str) -> Option<Vec<u8>> {
        lock(&self.contents).values.get(key).cloned()
    }

    /// The list at `key`, which is empty if there is no list.
    pub fn list(&self, key: &str) -> Vec<Vec<u8>> {
        lock(&self.contents)
            .lists
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    /// The values at `<prefix>:0`, `<prefix>:1`, … up to the first missing id.
    pub fn sequence(&self, prefix: &str) -> Vec<Vec<u8>> {
        let contents = lock(&self.contents);
        (0..)
            .map_while(|id: u32| contents.values.get(&format!("{prefix}:{id}")).cloned())
            .collect()
    }

    /// The count of values with a key beginning `<prefix>:`.
    pub fn count(&self, prefix: &str) -> usize {
        let prefix = format!("{prefix}:");
        lock(&self.contents)
            .values
            .keys()
            .filter(|key| key.starts_with(&prefix))
            .count()
    }

    /// The count of connections made to the store.
    pub fn connections(&self) -> usize {
        lock(&self.contents).connections
    }
}

impl KVStore for MemoryStore {
    type Connection = MemoryConnection;

    fn connect(
        &self,
        host: &str,
        port: u16,
        _timeout: Option<Duration>,
    ) -> Result<MemoryConnection, err::StoreError> {
        let mut contents = lock(&self.contents);
        if contents.unreachable {
            return Err(err::StoreError::Connection(format!(
                "Connection refused ({host}:{port})"
            )));
        }
        contents.connections += 1;
        Ok(MemoryConnection {
            contents: self.contents.clone(),
        })
    }
}

impl MemoryConnection {
    fn check_write(contents: &mut Contents) -> Result<(), err::StoreError> {
        if contents.unreachable {
            return Err(err::StoreError::Command("Connection lost".to_string()));
        }
        match &mut contents.write_allowance {
            Some(0) => Err(err::StoreError::Command("Write refused".to_string())),
            Some(allowance) => {
                *allowance -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl StoreConnection for MemoryConnection {
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), err::StoreError> {
        let mut contents = lock(&self.contents);
        Self::check_write(&mut contents)?;
        contents.values.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn range(&mut self, key: &str, lo: isize, hi: isize) -> Result<Vec<Vec<u8>>, err::StoreError> {
        let contents = lock(&self.contents);
        if contents.unreachable {
            return Err(err::StoreError::Command("Connection lost".to_string()));
        }
        if contents.values.contains_key(key) {
            return Err(err::StoreError::Command(format!(
                "WRONGTYPE {key} holds a value, not a list"
            )));
        }
        match contents.lists.get(key) {
            Some(list) => Ok(list[resolve_range(list.len(), lo, hi)].to_vec()),
            None => Ok(Vec::default()),
        }
    }

    fn push(&mut self, key: &str, value: &[u8]) -> Result<(), err::StoreError> {
        let mut contents = lock(&self.contents);
        Self::check_write(&mut contents)?;
        contents
            .lists
            .entry(key.to_string())
            .or_default()
            .push(value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_contents() {
        let store = MemoryStore::default();
        let mut connection = store.connect("h", 1, None).unwrap();

        connection.set("from_solver:0", b"a").unwrap();
        connection.set("from_solver:1", b"b").unwrap();
        connection.set("from_solver:3", b"d").unwrap();

        assert_eq!(store.sequence("from_solver"), vec![b"a".to_vec(), b"b".to_vec()]);
        assert_eq!(store.count("from_solver"), 3);
        assert_eq!(store.connections(), 1);
    }

    #[test]
    fn unreachable() {
        let store = MemoryStore::default();
        store.set_reachable(false);
        assert!(store.connect("h", 1, None).is_err());

        store.set_reachable(true);
        assert!(store.connect("h", 1, None).is_ok());
    }

    #[test]
    fn write_allowance() {
        let store = MemoryStore::default();
        store.fail_writes_after(Some(1));
        let mut connection = store.connect("h", 1, None).unwrap();

        assert!(connection.set("k", b"1").is_ok());
        assert!(connection.set("k", b"2").is_err());
        assert_eq!(store.value("k"), Some(b"1".to_vec()));
    }

    #[test]
    fn lists() {
        let store = MemoryStore::default();
        let mut connection = store.connect("h", 1, None).unwrap();

        assert_eq!(connection.range("l", 0, -1), Ok(vec![]));

        for element in [b"1", b"2", b"3"] {
            connection.push("l", element).unwrap();
        }
        assert_eq!(
            connection.range("l", 1, -1),
            Ok(vec![b"2".to_vec(), b"3".to_vec()])
        );

        connection.set("v", b"x").unwrap();
        assert!(connection.range("v", 0, -1).is_err());
    }
}

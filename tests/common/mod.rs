#![allow(dead_code)]

use std::collections::HashMap;

use clause_bridge::{
    config::Config,
    host::Host,
    store::{memory::MemoryStore, KVStore, StoreConnection},
    structures::literal::{ELiteral, ILiteral},
};

/// A host which encodes literals as `2·(|e| − 1) + sign`, with overrides.
#[derive(Default)]
pub struct MockHost {
    /// Exports which differ from the encoding.
    pub exports: HashMap<ILiteral, ELiteral>,

    pub values: HashMap<ILiteral, i8>,

    pub levels: HashMap<ILiteral, u32>,

    pub clause: Vec<ILiteral>,

    /// Literals imported, in order.
    pub imported: Vec<ELiteral>,

    /// Learnt units.
    pub units: Vec<ILiteral>,

    /// Learnt clauses, with glue.
    pub redundant: Vec<(Vec<ILiteral>, usize)>,
}

pub fn ilit(elit: ELiteral) -> ILiteral {
    2 * (elit.unsigned_abs() - 1) + (elit < 0) as u32
}

pub fn elit(ilit: ILiteral) -> ELiteral {
    let idx = (ilit / 2 + 1) as ELiteral;
    match ilit % 2 {
        0 => idx,
        _ => -idx,
    }
}

impl Host for MockHost {
    fn export_literal(&self, ilit: ILiteral) -> ELiteral {
        match self.exports.get(&ilit) {
            Some(elit) => *elit,
            None => elit(ilit),
        }
    }

    fn import_literal(&mut self, elit: ELiteral) -> ILiteral {
        self.imported.push(elit);
        ilit(elit)
    }

    fn value(&self, ilit: ILiteral) -> i8 {
        self.values.get(&ilit).copied().unwrap_or(0)
    }

    fn level(&self, ilit: ILiteral) -> u32 {
        self.levels.get(&ilit).copied().unwrap_or(0)
    }

    fn learned_unit(&mut self, ilit: ILiteral) {
        assert_eq!(self.clause, vec![ilit]);
        self.units.push(ilit);
    }

    fn new_redundant_clause(&mut self, glue: usize) {
        self.redundant.push((self.clause.clone(), glue));
    }

    fn clause_stack(&mut self) -> &mut Vec<ILiteral> {
        &mut self.clause
    }
}

/// A config with checks on, and no backoff.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.checks.value = true;
    config.backoff.value = 0;
    config
}

/// Appends each record of `records` as a list at `to_solver:<n>`, from `n = first`.
pub fn contribute(store: &MemoryStore, first: u64, records: &[&[&str]]) {
    let mut connection = store.connect("peer", 0, None).expect("store reachable");
    for (offset, record) in records.iter().enumerate() {
        let key = format!("to_solver:{}", first + offset as u64);
        for element in record.iter() {
            connection.push(&key, element.as_bytes()).expect("push");
        }
    }
}

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

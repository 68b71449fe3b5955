mod common;

use clause_bridge::{
    proof::{
        encode::{self, Format, LineKind},
        ProofEmitter,
    },
    store::{memory::MemoryStore, Link, Session},
    structures::literal::ELiteral,
};
use common::{ilit, test_config, MockHost};
use rand::Rng;

fn random_elit(rng: &mut impl Rng) -> ELiteral {
    let magnitude = match rng.random_bool(0.8) {
        true => rng.random_range(1..=1_000),
        false => rng.random_range(1..=i32::MAX),
    };
    match rng.random_bool(0.5) {
        true => magnitude,
        false => -magnitude,
    }
}

/// Checks off, as checks index units by literal.
fn unchecked_config() -> clause_bridge::config::Config {
    let mut config = test_config();
    config.checks.value = false;
    config
}

fn random_line(rng: &mut impl Rng) -> (LineKind, Vec<ELiteral>) {
    let kind = match rng.random_bool(0.7) {
        true => LineKind::Add,
        false => LineKind::Delete,
    };
    let length = rng.random_range(1..=12);
    (kind, (0..length).map(|_| random_elit(rng)).collect())
}

mod lines {
    use super::*;

    #[test]
    fn records_read_back() {
        let mut rng = rand::rng();

        for format in [Format::Binary, Format::Text] {
            for _ in 0..200 {
                let (kind, elits) = random_line(&mut rng);
                let mut bytes = Vec::default();
                encode::write_line(format, kind, &elits, &mut bytes);

                let (separator, record) = bytes.split_last().expect("non-empty line");
                assert_eq!(*separator, format.separator());
                // a separator only ever ends a line
                assert!(!record.contains(&format.separator()));

                assert_eq!(encode::read_record(format, record), Some((kind, elits)));
            }
        }
    }
}

mod emitter {
    use super::*;

    #[test]
    fn one_record_per_line() {
        let mut rng = rand::rng();
        let config = unchecked_config();
        let host = MockHost::default();

        for format in [Format::Binary, Format::Text] {
            for _ in 0..20 {
                let store = MemoryStore::default();
                let mut link = Link::new(store.clone(), Session::from_config(&config));

                let capacity = rng.random_range(4..=64);
                let mut proof = ProofEmitter::with_capacity(format == Format::Binary, &config, capacity);

                let mut expected = Vec::default();
                for _ in 0..rng.random_range(1..=60) {
                    let (kind, elits) = random_line(&mut rng);
                    let added = match kind {
                        LineKind::Add => {
                            let ilits = elits.iter().map(|elit| ilit(*elit)).collect::<Vec<_>>();
                            proof.add_lits(&host, &mut link, &ilits)
                        }
                        LineKind::Delete => proof.delete_external(&mut link, &elits),
                    };
                    assert!(added.is_ok());
                    expected.push((kind, elits));

                    if rng.random_bool(0.1) {
                        proof.flush(&mut link);
                    }
                }

                let stats = proof.release(&mut link);
                assert_eq!(stats.records, expected.len() as u64);
                assert_eq!(stats.dropped, 0);

                let records = store.sequence("from_solver");
                assert_eq!(records.len(), store.count("from_solver"));
                assert_eq!(link.session.last_from_solver_id, records.len() as u64);

                let read = records
                    .iter()
                    .map(|record| encode::read_record(format, record))
                    .collect::<Option<Vec<_>>>();
                assert_eq!(read, Some(expected));
            }
        }
    }

    #[test]
    fn contiguous_under_failure() {
        let mut rng = rand::rng();
        let config = unchecked_config();
        let host = MockHost::default();

        for _ in 0..20 {
            let store = MemoryStore::default();
            let mut link = Link::new(store.clone(), Session::from_config(&config));
            let mut proof = ProofEmitter::with_capacity(true, &config, 16);

            for _ in 0..rng.random_range(1..=80) {
                if rng.random_bool(0.05) {
                    store.set_reachable(rng.random_bool(0.5));
                }
                if rng.random_bool(0.05) {
                    store.fail_writes_after(Some(rng.random_range(0..3)));
                }
                let (_, elits) = random_line(&mut rng);
                let ilits = elits.iter().map(|elit| ilit(*elit)).collect::<Vec<_>>();
                assert!(proof.add_lits(&host, &mut link, &ilits).is_ok());
            }

            store.set_reachable(true);
            store.fail_writes_after(None);
            let stats = proof.release(&mut link);

            assert_eq!(stats.records + stats.dropped, stats.lines);
            assert_eq!(store.count("from_solver") as u64, stats.records);
            assert_eq!(store.sequence("from_solver").len() as u64, stats.records);
        }
    }
}

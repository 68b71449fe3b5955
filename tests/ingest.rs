mod common;

use clause_bridge::{
    ingest::Ingestor,
    store::{memory::MemoryStore, KVStore, Link, Session, StoreConnection},
    types::err,
};
use common::{contribute, ilit, test_config, MockHost};

fn link(store: &MemoryStore) -> Link<MemoryStore> {
    Link::new(store.clone(), Session::from_config(&test_config()))
}

mod loading {
    use super::*;

    #[test]
    fn clause_then_unit() {
        let store = MemoryStore::default();
        let mut link = link(&store);
        let mut host = MockHost::default();
        let mut ingestor = Ingestor::default();

        contribute(&store, 0, &[&["4", "-5", "6"], &["7"]]);

        assert_eq!(ingestor.poll(&mut host, &mut link), Ok(2));

        assert_eq!(host.imported, vec![4, -5, 6, 7]);
        assert_eq!(host.redundant, vec![(vec![ilit(4), ilit(-5), ilit(6)], 2)]);
        assert_eq!(host.units, vec![ilit(7)]);
        assert!(host.clause.is_empty());
        assert_eq!(link.session.last_to_solver_id, 2);

        let stats = ingestor.stats();
        assert_eq!((stats.units, stats.clauses, stats.rejected), (1, 1, 0));
    }

    #[test]
    fn resumes_from_last_id() {
        let store = MemoryStore::default();
        let mut link = link(&store);
        let mut host = MockHost::default();
        let mut ingestor = Ingestor::default();

        assert_eq!(ingestor.poll(&mut host, &mut link), Ok(0));
        assert_eq!(link.session.last_to_solver_id, 0);

        contribute(&store, 0, &[&["1", "2"]]);
        assert_eq!(ingestor.poll(&mut host, &mut link), Ok(1));

        // nothing new
        assert_eq!(ingestor.poll(&mut host, &mut link), Ok(0));

        contribute(&store, 1, &[&["-3", "4", "5"], &["6", "-7"]]);
        assert_eq!(ingestor.poll(&mut host, &mut link), Ok(2));
        assert_eq!(link.session.last_to_solver_id, 3);

        let glues = host.redundant.iter().map(|(_, glue)| *glue).collect::<Vec<_>>();
        assert_eq!(glues, vec![1, 2, 1]);
    }

    #[test]
    fn stops_at_gap() {
        let store = MemoryStore::default();
        let mut link = link(&store);
        let mut host = MockHost::default();
        let mut ingestor = Ingestor::default();

        contribute(&store, 0, &[&["1"]]);
        contribute(&store, 2, &[&["2"]]);

        assert_eq!(ingestor.poll(&mut host, &mut link), Ok(1));
        assert_eq!(host.units, vec![ilit(1)]);

        contribute(&store, 1, &[&["3"]]);
        assert_eq!(ingestor.poll(&mut host, &mut link), Ok(2));
        assert_eq!(host.units, vec![ilit(1), ilit(3), ilit(2)]);
    }

    #[test]
    fn records_are_not_removed() {
        let store = MemoryStore::default();
        let mut link = link(&store);
        let mut host = MockHost::default();
        let mut ingestor = Ingestor::default();

        contribute(&store, 0, &[&["1", "2"]]);
        assert_eq!(ingestor.poll(&mut host, &mut link), Ok(1));
        assert_eq!(store.list("to_solver:0"), vec![b"1".to_vec(), b"2".to_vec()]);
    }
}

mod rejection {
    use super::*;

    #[test]
    fn malformed_record() {
        common::init_logs();
        let store = MemoryStore::default();
        let mut link = link(&store);
        let mut host = MockHost::default();
        let mut ingestor = Ingestor::default();

        contribute(&store, 0, &[&["1", "two", "3"], &["4", "0"], &["5", "6"]]);

        assert_eq!(ingestor.poll(&mut host, &mut link), Ok(3));

        // nothing of a rejected record reaches the host
        assert_eq!(host.imported, vec![5, 6]);
        assert_eq!(host.redundant, vec![(vec![ilit(5), ilit(6)], 1)]);
        assert!(host.units.is_empty());
        assert!(host.clause.is_empty());

        assert_eq!(link.session.last_to_solver_id, 3);
        assert_eq!(ingestor.stats().rejected, 2);
    }

    #[test]
    fn empty_element() {
        let store = MemoryStore::default();
        let mut link = link(&store);
        let mut host = MockHost::default();
        let mut ingestor = Ingestor::default();

        contribute(&store, 0, &[&["", "1"], &["2"]]);

        assert_eq!(ingestor.poll(&mut host, &mut link), Ok(2));
        assert_eq!(host.imported, vec![2]);
        assert_eq!(host.units, vec![ilit(2)]);
        assert_eq!(ingestor.stats().rejected, 1);
    }

    #[test]
    fn value_in_place_of_list() {
        common::init_logs();
        let store = MemoryStore::default();
        let mut link = link(&store);
        let mut host = MockHost::default();
        let mut ingestor = Ingestor::default();

        let mut connection = store.connect("peer", 0, None).expect("reachable");
        connection.set("to_solver:0", b"1").expect("set");

        assert_eq!(ingestor.poll(&mut host, &mut link), Ok(0));
        assert_eq!(link.session.last_to_solver_id, 0);
    }

    #[test]
    fn scratch_not_empty() {
        let store = MemoryStore::default();
        let mut link = link(&store);
        let mut host = MockHost::default();
        let mut ingestor = Ingestor::default();

        contribute(&store, 0, &[&["1"]]);
        host.clause.push(ilit(9));

        assert_eq!(
            ingestor.poll(&mut host, &mut link),
            Err(err::IngestError::ScratchNotEmpty)
        );
        assert_eq!(link.session.last_to_solver_id, 0);
        assert_eq!(store.connections(), 1);
    }
}

mod failures {
    use super::*;

    #[test]
    fn unreachable_store() {
        common::init_logs();
        let store = MemoryStore::default();
        let mut link = link(&store);
        let mut host = MockHost::default();
        let mut ingestor = Ingestor::default();

        contribute(&store, 0, &[&["1"]]);
        store.set_reachable(false);

        assert_eq!(ingestor.poll(&mut host, &mut link), Ok(0));
        assert!(host.units.is_empty());
        assert_eq!(link.session.last_to_solver_id, 0);

        store.set_reachable(true);
        assert_eq!(ingestor.poll(&mut host, &mut link), Ok(1));
        assert_eq!(host.units, vec![ilit(1)]);
    }
}

// Path: crates/api/src/state/tests/mod.rs
use crate::state::{MemoryState, StateAccess, StateOverlay};

fn seeded() -> MemoryState {
    let mut state = MemoryState::new();
    state.insert(b"a", b"1").unwrap();
    state.insert(b"b", b"2").unwrap();
    state
}

#[test]
fn overlay_reads_through_to_base() {
    let base = seeded();
    let overlay = StateOverlay::new(&base);
    assert_eq!(overlay.get(b"a").unwrap(), Some(b"1".to_vec()));
    assert_eq!(overlay.get(b"missing").unwrap(), None);
}

#[test]
fn overlay_writes_do_not_touch_base_until_committed() {
    let mut base = seeded();
    let (inserts, deletes) = {
        let mut overlay = StateOverlay::new(&base);
        overlay.insert(b"a", b"10").unwrap();
        overlay.delete(b"b").unwrap();
        overlay.insert(b"c", b"3").unwrap();

        assert_eq!(overlay.get(b"a").unwrap(), Some(b"10".to_vec()));
        assert_eq!(overlay.get(b"b").unwrap(), None);
        assert_eq!(overlay.staged_len(), 3);
        assert_eq!(base.get(b"a").unwrap(), Some(b"1".to_vec()));
        overlay.into_ordered_batch()
    };

    assert_eq!(
        inserts,
        vec![(b"a".to_vec(), b"10".to_vec()), (b"c".to_vec(), b"3".to_vec())]
    );
    assert_eq!(deletes, vec![b"b".to_vec()]);

    base.batch_apply(&inserts, &deletes).unwrap();
    assert_eq!(base.get(b"a").unwrap(), Some(b"10".to_vec()));
    assert_eq!(base.get(b"b").unwrap(), None);
    assert_eq!(base.get(b"c").unwrap(), Some(b"3".to_vec()));
}

#[test]
fn dropped_overlay_leaves_no_trace() {
    let base = seeded();
    let before = base.clone();
    {
        let mut overlay = StateOverlay::new(&base);
        overlay.insert(b"z", b"26").unwrap();
    }
    assert_eq!(base, before);
}

#[test]
fn batch_get_preserves_order() {
    let state = seeded();
    let got = state
        .batch_get(&[b"b".to_vec(), b"x".to_vec(), b"a".to_vec()])
        .unwrap();
    assert_eq!(got, vec![Some(b"2".to_vec()), None, Some(b"1".to_vec())]);
}

use super::*;

fn buf(v: u8) -> PixelBuffer {
    PixelBuffer::filled(2, 2, &[v, v, v]).unwrap()
}

#[test]
fn push_push_pop_pop_pop_respects_the_floor() {
    let mut h = History::new(buf(0));
    h.push(buf(1));
    h.push(buf(2));
    assert_eq!(h.len(), 3);
    assert_eq!(h.pop(), Some(&buf(1)));
    assert_eq!(h.pop(), Some(&buf(0)));
    assert_eq!(h.pop(), None);
    assert_eq!(h.len(), 1);
    assert_eq!(h.top(), &buf(0));
}

#[test]
fn undo_on_fresh_history_is_noop() {
    let mut h = History::new(buf(7));
    assert!(!h.can_undo());
    assert!(h.pop().is_none());
    assert_eq!(h.top(), &buf(7));
}

#[test]
fn snapshots_are_deep_copies() {
    let mut live = buf(3);
    let mut h = History::new(live.clone());
    live.as_raw_mut()[0] = 99;
    h.push(live.clone());
    assert_eq!(h.pop(), Some(&buf(3)));
}

#[test]
fn limit_drops_oldest_edit_but_keeps_initial() {
    let mut h = History::with_limit(buf(0), 2).unwrap();
    h.push(buf(1));
    h.push(buf(2));
    assert_eq!(h.len(), 2);
    assert_eq!(h.pop(), Some(&buf(0)));
    assert!(h.pop().is_none());
    assert_eq!(h.top(), &buf(0));
}

#[test]
fn limit_of_three_keeps_newest_edits() {
    let mut h = History::with_limit(buf(0), 3).unwrap();
    for v in 1..=5 {
        h.push(buf(v));
    }
    assert_eq!(h.len(), 3);
    assert_eq!(h.pop(), Some(&buf(4)));
    assert_eq!(h.pop(), Some(&buf(0)));
    assert!(h.pop().is_none());
}

#[test]
fn limit_below_two_is_rejected() {
    assert!(History::with_limit(buf(0), 0).is_err());
    assert!(History::with_limit(buf(0), 1).is_err());
}

#[test]
fn holds_any_snapshot_type() {
    let mut h = History::new((buf(0), 0usize));
    h.push((buf(1), 3));
    assert_eq!(h.top().1, 3);
    assert_eq!(h.pop().map(|s| s.1), Some(0));
}

#[test]
fn reset_starts_over() {
    let mut h = History::new(buf(0));
    h.push(buf(1));
    h.reset(buf(5));
    assert_eq!(h.len(), 1);
    assert_eq!(h.top(), &buf(5));
}

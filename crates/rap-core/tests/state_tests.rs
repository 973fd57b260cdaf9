// Tests for the canonical ratio state: clamping, lock reconciliation and
// change notification.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use rap_core::notify::Notifier;
use rap_core::{RapConfig, RatioState, RatioTerm, RatioTuple, TupleChange};

const DT: Duration = Duration::from_millis(16);

fn make_state() -> RatioState {
    RatioState::new(&RapConfig::default())
}

fn record_changes(state: &mut RatioState) -> Rc<RefCell<Vec<TupleChange>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    state.on_tuple_changed(move |change| sink.borrow_mut().push(*change));
    log
}

#[test]
fn unlocked_writes_are_clamped_into_range() {
    let mut state = make_state();
    let settled = state.set_tuple(RatioTuple::new(1.3, -0.2));
    assert_eq!(settled, RatioTuple::new(1.0, 0.0));
    assert_eq!(state.tuple(), settled);
}

#[test]
fn locked_antecedent_write_rederives_consequent() {
    let mut state = make_state();
    state.set_locked(true);
    let settled = state.set_term(RatioTerm::Antecedent, 0.4);
    assert!(
        settled.approx_eq(&RatioTuple::new(0.4, 0.8), 1e-12),
        "expected (0.4, 0.8), got {settled:?}"
    );
}

#[test]
fn locked_consequent_write_rederives_antecedent() {
    let mut state = make_state();
    state.set_locked(true);
    let settled = state.set_term(RatioTerm::Consequent, 0.9);
    assert!(settled.approx_eq(&RatioTuple::new(0.45, 0.9), 1e-12), "got {settled:?}");
}

#[test]
fn locked_write_past_range_clamps_and_keeps_ratio() {
    let mut state = make_state();
    state.set_locked(true);
    let settled = state.set_term(RatioTerm::Antecedent, 0.6);
    assert!(
        settled.approx_eq(&RatioTuple::new(0.5, 1.0), 1e-12),
        "expected (0.5, 1.0), got {settled:?}"
    );
    assert!((settled.ratio() - 0.5).abs() < 1e-12);
}

#[test]
fn locked_write_changing_both_terms_is_repaired_from_antecedent() {
    let mut state = make_state();
    state.set_locked(true);
    let settled = state.set_tuple(RatioTuple::new(0.3, 0.3));
    assert!(settled.approx_eq(&RatioTuple::new(0.3, 0.6), 1e-12), "got {settled:?}");

    // Same ratio on both terms is accepted as is.
    let settled = state.set_tuple(RatioTuple::new(0.35, 0.7));
    assert!(settled.approx_eq(&RatioTuple::new(0.35, 0.7), 1e-12), "got {settled:?}");
}

#[test]
fn ratio_stays_locked_over_many_writes() {
    let mut state = make_state();
    state.set_locked(true);
    for i in 0..=40 {
        let v = i as f64 / 40.0;
        let term = if i % 2 == 0 {
            RatioTerm::Antecedent
        } else {
            RatioTerm::Consequent
        };
        let settled = state.set_term(term, v);
        assert!(
            (settled.ratio() - 0.5).abs() < 1e-9,
            "ratio drifted to {} after writing {v} to {term:?}",
            settled.ratio()
        );
        let range = state.enabled_range();
        assert!(range.contains(settled.antecedent()) && range.contains(settled.consequent()));
    }
}

#[test]
fn locking_narrows_range_and_pulls_tuple_off_zero() {
    let mut state = make_state();
    state.set_tuple(RatioTuple::new(0.0, 0.5));
    let changes = record_changes(&mut state);
    state.set_locked(true);

    let range = state.enabled_range();
    assert!((range.min - 0.011).abs() < 1e-12, "locked min {}", range.min);
    assert!((state.tuple().antecedent() - 0.011).abs() < 1e-12);
    assert_eq!(changes.borrow().len(), 1);

    state.set_locked(false);
    assert_eq!(state.enabled_range().min, 0.0);
}

#[test]
fn listeners_see_one_change_per_effective_write() {
    let mut state = make_state();
    let changes = record_changes(&mut state);

    state.set_term(RatioTerm::Antecedent, 0.3);
    state.set_term(RatioTerm::Antecedent, 0.3);
    state.set_tuple(RatioTuple::new(1.5, 0.4)); // clamps to (1.0, 0.4)
    state.set_tuple(RatioTuple::new(2.0, 0.4)); // clamps to the same value

    let changes = changes.borrow();
    assert_eq!(changes.len(), 2, "got {changes:?}");
    assert_eq!(changes[0].old, RatioTuple::new(0.2, 0.4));
    assert_eq!(changes[0].new, RatioTuple::new(0.3, 0.4));
    assert_eq!(changes[1].new, RatioTuple::new(1.0, 0.4));
}

#[test]
fn lock_listeners_fire_on_toggle_only() {
    let mut state = make_state();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let id = state.on_locked_changed(move |locked| sink.borrow_mut().push(*locked));

    state.set_locked(true);
    state.set_locked(true);
    state.set_locked(false);
    assert_eq!(*seen.borrow(), vec![true, false]);

    assert!(state.unsubscribe_locked_changed(id));
    assert!(!state.unsubscribe_locked_changed(id));
    state.set_locked(true);
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn set_ratio_to_target_moves_the_closer_term() {
    let mut state = make_state();
    state.set_tuple(RatioTuple::new(0.2, 0.8));
    // Antecedent needs +0.2, consequent would need -0.4.
    let settled = state.set_ratio_to_target(0.5);
    assert!(settled.approx_eq(&RatioTuple::new(0.4, 0.8), 1e-12), "got {settled:?}");

    state.set_tuple(RatioTuple::new(0.9, 0.5));
    // Ratio 2 needs antecedent 1.0 (+0.1) or consequent 0.45 (-0.05).
    let settled = state.set_ratio_to_target(2.0);
    assert!(settled.approx_eq(&RatioTuple::new(0.9, 0.45), 1e-12), "got {settled:?}");
}

#[test]
fn set_ratio_to_target_overrides_lock() {
    let mut state = make_state();
    state.set_locked(true);
    let settled = state.set_ratio_to_target(3.0);
    assert!((settled.ratio() - 3.0).abs() < 1e-9, "got {settled:?}");
    // Later locked writes keep the new ratio.
    let settled = state.set_term(RatioTerm::Consequent, 0.2);
    assert!((settled.ratio() - 3.0).abs() < 1e-9, "got {settled:?}");
}

#[test]
fn moving_together_needs_both_hands_same_direction() {
    let config = RapConfig::default().with_velocity_window(3, 3);
    let mut state = RatioState::new(&config);
    for v in [0.2, 0.3, 0.4] {
        state.set_tuple(RatioTuple::new(v, v + 0.1));
        state.step(DT);
    }
    assert!(state.moving_together());
    assert!((state.velocity(RatioTerm::Antecedent) - 0.2).abs() < 1e-12);

    for v in [0.5, 0.4, 0.3] {
        state.set_tuple(RatioTuple::new(v, 1.0 - v));
        state.step(DT);
    }
    assert!(!state.moving_together());
}

#[test]
fn reset_restores_initial_tuple_and_unlocks() {
    let mut state = make_state();
    state.set_locked(true);
    state.set_term(RatioTerm::Antecedent, 0.45);
    state.step(DT);
    state.reset();
    assert_eq!(state.tuple(), RatioTuple::new(0.2, 0.4));
    assert!(!state.locked());
    assert_eq!(state.enabled_range().min, 0.0);
    assert!(!state.moving_together());
}

#[test]
#[should_panic(expected = "nested tuple write")]
fn nested_write_from_listener_panics() {
    let state = Rc::new(RefCell::new(make_state()));
    let inner = Rc::clone(&state);
    state.borrow_mut().on_tuple_changed(move |_| {
        // Either the RefCell or the settling latch rejects the reentrant write.
        match inner.try_borrow_mut() {
            Ok(mut s) => {
                s.set_term(RatioTerm::Consequent, 0.9);
            }
            Err(_) => panic!("nested tuple write rejected by borrow"),
        }
    });
    state.borrow_mut().set_term(RatioTerm::Antecedent, 0.3);
}

#[test]
fn notifier_calls_listeners_in_order_and_unsubscribes() {
    let mut notifier: Notifier<u32> = Notifier::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    let a = Rc::clone(&order);
    let b = Rc::clone(&order);
    let first = notifier.subscribe(move |v| a.borrow_mut().push(("first", *v)));
    notifier.subscribe(move |v| b.borrow_mut().push(("second", *v)));

    notifier.emit(&1);
    assert!(notifier.unsubscribe(first));
    notifier.emit(&2);

    assert_eq!(
        *order.borrow(),
        vec![("first", 1), ("second", 1), ("second", 2)]
    );
    assert_eq!(notifier.listener_count(), 1);
}

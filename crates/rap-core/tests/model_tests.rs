// Tests for the session model: writes, keyboard input, target changes and
// the feedback events they produce.

use std::time::Duration;

use rap_core::input::KeyAction;
use rap_core::{ConfigError, Edge, FeedbackEvent, RapConfig, RatioModel, RatioTerm, RatioTuple};

const DT: Duration = Duration::from_millis(16);

fn make_model() -> RatioModel {
    RatioModel::new(RapConfig::default()).expect("default config is valid")
}

#[test]
fn starts_in_proportion_with_initial_values() {
    let model = make_model();
    let snap = model.snapshot();
    assert_eq!(snap.tuple, RatioTuple::new(0.2, 0.4));
    assert_eq!(snap.target_ratio, 0.5);
    assert!(snap.reading.in_proportion);
    assert!(!snap.locked);
    assert!(!snap.moving_together);
}

#[test]
fn invalid_config_is_rejected() {
    let config = RapConfig::default().with_fitness_tolerance(0.0);
    assert!(matches!(
        RatioModel::new(config),
        Err(ConfigError::NotPositive { .. })
    ));
}

#[test]
fn proportion_events_fire_once_per_transition() {
    let mut model = make_model();
    let mut events = Vec::new();

    model.set_term_value(RatioTerm::Consequent, 0.8, &mut events);
    assert_eq!(events, vec![FeedbackEvent::LeftProportion]);
    events.clear();

    model.set_term_value(RatioTerm::Consequent, 0.7, &mut events);
    assert!(events.is_empty(), "still out of proportion: {events:?}");

    model.set_term_value(RatioTerm::Consequent, 0.4, &mut events);
    assert_eq!(events, vec![FeedbackEvent::EnteredProportion]);
    events.clear();

    model.set_term_value(RatioTerm::Consequent, 0.4, &mut events);
    assert!(events.is_empty());
}

#[test]
fn crossing_target_is_reported() {
    let mut model = make_model();
    let mut events = Vec::new();
    model.set_term_value(RatioTerm::Consequent, 0.8, &mut events);
    events.clear();

    model.set_term_value(RatioTerm::Antecedent, 0.6, &mut events);
    assert_eq!(
        events,
        vec![FeedbackEvent::TargetCrossed { now_larger: true }]
    );
}

#[test]
fn boundary_events_fire_on_arrival() {
    let mut model = make_model();
    let mut events = Vec::new();

    model.set_term_value(RatioTerm::Antecedent, 1.0, &mut events);
    assert_eq!(
        events,
        vec![
            FeedbackEvent::Boundary {
                term: RatioTerm::Antecedent,
                edge: Edge::Max
            },
            FeedbackEvent::TargetCrossed { now_larger: true },
            FeedbackEvent::LeftProportion,
        ]
    );
    events.clear();

    model.set_term_value(RatioTerm::Antecedent, 1.0, &mut events);
    assert!(events.is_empty());

    model.set_term_value(RatioTerm::Antecedent, 0.0, &mut events);
    assert_eq!(
        events,
        vec![
            FeedbackEvent::Boundary {
                term: RatioTerm::Antecedent,
                edge: Edge::Min
            },
            FeedbackEvent::TargetCrossed { now_larger: false },
        ]
    );
}

#[test]
fn target_ratio_is_clamped_and_does_not_report_crossing() {
    let mut model = make_model();
    let mut events = Vec::new();

    assert_eq!(model.set_target_ratio(20.0, &mut events), 10.0);
    assert_eq!(model.target_ratio(), 10.0);
    assert_eq!(events, vec![FeedbackEvent::LeftProportion]);
    events.clear();

    assert_eq!(model.set_target_ratio(0.01, &mut events), 0.1);
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, FeedbackEvent::TargetCrossed { .. })),
        "target change reported as crossing: {events:?}"
    );
}

#[test]
fn snap_to_target_enters_proportion() {
    let mut model = make_model();
    let mut events = Vec::new();
    model.set_term_value(RatioTerm::Consequent, 0.8, &mut events);
    events.clear();

    let settled = model.set_ratio_to_target(&mut events);
    assert!(settled.approx_eq(&RatioTuple::new(0.4, 0.8), 1e-12), "got {settled:?}");
    assert_eq!(events, vec![FeedbackEvent::EnteredProportion]);
}

#[test]
fn tick_mark_jump_moves_both_hands_unless_locked() {
    let mut model = make_model();
    let mut events = Vec::new();

    let t = model.jump_to_tick_mark(3, &mut events);
    assert!(t.approx_eq(&RatioTuple::new(0.3, 0.3), 1e-12), "got {t:?}");

    model.reset();
    model.set_locked(true, &mut events);
    let t = model.jump_to_tick_mark(3, &mut events);
    assert!(t.approx_eq(&RatioTuple::new(0.3, 0.6), 1e-12), "got {t:?}");
    assert!(model.snapshot().locked);
}

#[test]
fn keyboard_stops_on_value_that_hits_target() {
    let mut model = make_model();
    let mut events = Vec::new();
    model.set_term_value(RatioTerm::Consequent, 0.45, &mut events);
    assert!((model.ideal_value(RatioTerm::Antecedent) - 0.225).abs() < 1e-12);
    events.clear();

    let t = model.keyboard_action(RatioTerm::Antecedent, KeyAction::Increase, false, &mut events);
    assert!((t.antecedent() - 0.225).abs() < 1e-12, "got {t:?}");
    assert!(events.contains(&FeedbackEvent::EnteredProportion));

    let t = model.keyboard_action(RatioTerm::Antecedent, KeyAction::Increase, false, &mut events);
    assert!((t.antecedent() - 0.3).abs() < 1e-12, "got {t:?}");
}

#[test]
fn home_key_reaches_range_edge() {
    let mut model = make_model();
    let mut events = Vec::new();
    let t = model.keyboard_action(RatioTerm::Consequent, KeyAction::Home, false, &mut events);
    assert_eq!(t.consequent(), 0.0);
    assert!(events.contains(&FeedbackEvent::Boundary {
        term: RatioTerm::Consequent,
        edge: Edge::Min
    }));
}

#[test]
fn home_after_stopping_on_ideal_reaches_bottom() {
    let mut model = make_model();
    let mut events = Vec::new();
    model.set_tuple(RatioTuple::new(0.2, 0.45), &mut events);

    let t = model.keyboard_action(RatioTerm::Antecedent, KeyAction::Increase, false, &mut events);
    assert!((t.antecedent() - 0.225).abs() < 1e-12, "got {t:?}");
    events.clear();

    let t = model.keyboard_action(RatioTerm::Antecedent, KeyAction::Home, false, &mut events);
    assert_eq!(t.antecedent(), 0.0);
    assert!(
        events.contains(&FeedbackEvent::Boundary {
            term: RatioTerm::Antecedent,
            edge: Edge::Min
        }),
        "no boundary event: {events:?}"
    );
}

#[test]
fn end_after_stopping_on_ideal_reaches_top() {
    let mut model = make_model();
    let mut events = Vec::new();
    model.set_tuple(RatioTuple::new(0.25, 0.45), &mut events);

    let t = model.keyboard_action(RatioTerm::Antecedent, KeyAction::Decrease, false, &mut events);
    assert!((t.antecedent() - 0.225).abs() < 1e-12, "got {t:?}");
    events.clear();

    let t = model.keyboard_action(RatioTerm::Antecedent, KeyAction::End, false, &mut events);
    assert_eq!(t.antecedent(), 1.0);
    assert!(
        events.contains(&FeedbackEvent::Boundary {
            term: RatioTerm::Antecedent,
            edge: Edge::Max
        }),
        "no boundary event: {events:?}"
    );
}

#[test]
fn drag_discards_carried_keyboard_overshoot() {
    let mut model = make_model();
    let mut events = Vec::new();
    model.set_tuple(RatioTuple::new(0.2, 0.45), &mut events);
    model.keyboard_action(RatioTerm::Antecedent, KeyAction::Increase, false, &mut events);

    model.set_term_value(RatioTerm::Antecedent, 0.6, &mut events);
    let t = model.keyboard_action(RatioTerm::Antecedent, KeyAction::Increase, false, &mut events);
    assert!(
        (t.antecedent() - 0.65).abs() < 1e-12,
        "step after drag left the grid: {t:?}"
    );
}

#[test]
fn moving_together_loosens_success_during_step() {
    let config = RapConfig::default().with_velocity_window(3, 3);
    let mut model = RatioModel::new(config).expect("valid config");
    let mut events = Vec::new();

    model.step(DT, &mut events);
    model.set_tuple(RatioTuple::new(0.24, 0.45), &mut events);
    model.step(DT, &mut events);
    model.set_tuple(RatioTuple::new(0.27, 0.5), &mut events);
    assert!(!model.reading().in_proportion, "0.92 is short of the still threshold");
    events.clear();

    model.step(DT, &mut events);
    assert!(model.snapshot().moving_together);
    assert_eq!(events, vec![FeedbackEvent::EnteredProportion]);
}

#[test]
fn reset_restores_initial_session() {
    let mut model = make_model();
    let mut events = Vec::new();
    model.set_locked(true, &mut events);
    model.set_target_ratio(3.0, &mut events);
    model.set_term_value(RatioTerm::Antecedent, 0.9, &mut events);
    model.reset();

    let snap = model.snapshot();
    assert_eq!(snap.tuple, RatioTuple::new(0.2, 0.4));
    assert_eq!(snap.target_ratio, 0.5);
    assert!(!snap.locked);
    assert!(snap.reading.in_proportion);

    events.clear();
    model.set_term_value(RatioTerm::Consequent, 0.8, &mut events);
    assert_eq!(events, vec![FeedbackEvent::LeftProportion]);
}

#[test]
fn tuple_listeners_see_model_writes() {
    use std::cell::Cell;
    use std::rc::Rc;

    let mut model = make_model();
    let count = Rc::new(Cell::new(0));
    let sink = Rc::clone(&count);
    model
        .state_mut()
        .on_tuple_changed(move |_| sink.set(sink.get() + 1));

    let mut events = Vec::new();
    model.set_term_value(RatioTerm::Antecedent, 0.3, &mut events);
    model.set_term_value(RatioTerm::Antecedent, 0.3, &mut events);
    model.jump_to_tick_mark(5, &mut events);
    assert_eq!(count.get(), 2);
}

#[test]
fn describes_tick_marks_for_each_hand() {
    let model = make_model();
    let left = model.describe_tick_marks(RatioTerm::Antecedent, false);
    let right = model.describe_tick_marks(RatioTerm::Consequent, false);
    assert_eq!(left.ordinal, Some(2));
    assert_eq!(right.ordinal, Some(4));
}

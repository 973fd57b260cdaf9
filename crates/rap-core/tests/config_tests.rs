// Tests for configuration defaults and validation.

use rap_core::constants::*;
use rap_core::{ConfigError, Range, RapConfig, RatioTuple};

#[test]
fn default_config_is_valid() {
    assert_eq!(RapConfig::default().validate(), Ok(()));
}

#[test]
fn defaults_come_from_constants() {
    let config = RapConfig::default();
    assert_eq!(config.term_range, Range::new(TERM_MIN, TERM_MAX));
    assert_eq!(config.keyboard_step, KEYBOARD_STEP);
    assert_eq!(config.tick_mark_count, TICK_MARK_COUNT);
    assert!((config.shift_step() - 0.01).abs() < 1e-12);
}

#[test]
fn locked_range_lifts_lower_edge() {
    let range = RapConfig::default().locked_range();
    assert!((range.min - (NO_SUCCESS_THRESHOLD + LOCK_RANGE_EPSILON)).abs() < 1e-12);
    assert_eq!(range.max, TERM_MAX);
}

#[test]
fn rejects_bad_values() {
    let mut config = RapConfig::default();
    config.term_range = Range::new(1.0, 0.0);
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidRange { name: "term", .. })
    ));

    let config = RapConfig::default().with_fitness_tolerance(-1.0);
    assert_eq!(
        config.validate(),
        Err(ConfigError::NotPositive {
            name: "fitness_tolerance",
            value: -1.0
        })
    );

    let mut config = RapConfig::default();
    config.in_proportion_threshold = 1.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotUnitFraction { .. })
    ));

    let config = RapConfig::default().with_tick_mark_count(0);
    assert_eq!(
        config.validate(),
        Err(ConfigError::ZeroCount {
            name: "tick_mark_count"
        })
    );

    let config = RapConfig::default().with_velocity_window(0, 1);
    assert!(matches!(config.validate(), Err(ConfigError::ZeroCount { .. })));
}

#[test]
fn rejects_initial_values_outside_ranges() {
    let config = RapConfig::default().with_initial_tuple(RatioTuple::new(1.5, 0.4));
    assert_eq!(
        config.validate(),
        Err(ConfigError::InitialOutOfRange {
            name: "antecedent",
            value: 1.5,
            range: "term"
        })
    );

    let config = RapConfig::default().with_initial_target_ratio(50.0);
    let err = config.validate().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InitialOutOfRange {
            name: "target ratio",
            range: "target ratio",
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        "initial target ratio 50 is outside the target ratio range"
    );
}

#[test]
fn min_distinct_larger_than_window_is_rejected() {
    let mut config = RapConfig::default().with_velocity_window(2, 2);
    assert_eq!(
        config.validate(),
        Err(ConfigError::MinDistinctExceedsWindow {
            min_distinct: 3,
            window: 2
        })
    );

    config.velocity_min_distinct = 2;
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn too_narrow_term_range_cannot_lock() {
    let mut config = RapConfig::default();
    config.term_range = Range::new(0.0, 0.005);
    config.initial_tuple = RatioTuple::new(0.001, 0.002);
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidRange {
            name: "locked term",
            ..
        })
    ));
}

#[test]
fn errors_have_readable_messages() {
    let err = ConfigError::ZeroCount {
        name: "velocity_window",
    };
    assert_eq!(err.to_string(), "velocity_window must be at least 1");
}

//! Runtime configuration for the ratio core.
//!
//! Built once at startup and handed by reference to every component that needs
//! a tuning value. `Default` gives the values in `constants.rs`.

use crate::constants::*;
use crate::error::ConfigError;
use crate::range::Range;
use crate::tuple::RatioTuple;

#[derive(Clone, Debug, PartialEq)]
pub struct RapConfig {
    /// Legal span of each term while unlocked
    pub term_range: Range,
    /// Ratio error that maps to minimum fitness
    pub fitness_tolerance: f64,
    /// Fitness distance from max that still counts as in proportion
    pub in_proportion_threshold: f64,
    /// Same, while both hands move together
    pub moving_in_proportion_threshold: f64,
    /// Terms below this never produce a success
    pub no_success_threshold: f64,
    /// Added to `no_success_threshold` for the locked lower bound
    pub lock_range_epsilon: f64,
    /// Arrow-key step
    pub keyboard_step: f64,
    /// Shift+arrow step as a fraction of `keyboard_step`
    pub shift_step_multiplier: f64,
    /// Page up/down step
    pub page_step: f64,
    /// Minimum |velocity| per window for unlocked "moving together"
    pub velocity_threshold: f64,
    pub velocity_window: usize,
    pub velocity_decimation: usize,
    pub velocity_min_distinct: usize,
    pub tick_mark_count: u32,
    /// Allowed target ratios
    pub target_ratio_range: Range,
    pub initial_tuple: RatioTuple,
    pub initial_target_ratio: f64,
}

impl Default for RapConfig {
    fn default() -> Self {
        Self {
            term_range: Range::new(TERM_MIN, TERM_MAX),
            fitness_tolerance: FITNESS_TOLERANCE,
            in_proportion_threshold: IN_PROPORTION_THRESHOLD,
            moving_in_proportion_threshold: MOVING_IN_PROPORTION_THRESHOLD,
            no_success_threshold: NO_SUCCESS_THRESHOLD,
            lock_range_epsilon: LOCK_RANGE_EPSILON,
            keyboard_step: KEYBOARD_STEP,
            shift_step_multiplier: SHIFT_STEP_MULTIPLIER,
            page_step: PAGE_STEP,
            velocity_threshold: VELOCITY_THRESHOLD,
            velocity_window: VELOCITY_WINDOW,
            velocity_decimation: VELOCITY_DECIMATION,
            velocity_min_distinct: VELOCITY_MIN_DISTINCT,
            tick_mark_count: TICK_MARK_COUNT,
            target_ratio_range: Range::new(TARGET_RATIO_MIN, TARGET_RATIO_MAX),
            initial_tuple: RatioTuple::new(INITIAL_ANTECEDENT, INITIAL_CONSEQUENT),
            initial_target_ratio: INITIAL_TARGET_RATIO,
        }
    }
}

impl RapConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("term", self.term_range)?;
        check_range("target ratio", self.target_ratio_range)?;
        check_positive("fitness_tolerance", self.fitness_tolerance)?;
        check_unit("in_proportion_threshold", self.in_proportion_threshold)?;
        check_unit(
            "moving_in_proportion_threshold",
            self.moving_in_proportion_threshold,
        )?;
        check_positive("keyboard_step", self.keyboard_step)?;
        check_positive("shift_step_multiplier", self.shift_step_multiplier)?;
        check_positive("page_step", self.page_step)?;
        check_positive("velocity_threshold", self.velocity_threshold)?;
        if self.velocity_window == 0 {
            return Err(ConfigError::ZeroCount {
                name: "velocity_window",
            });
        }
        if self.velocity_decimation == 0 {
            return Err(ConfigError::ZeroCount {
                name: "velocity_decimation",
            });
        }
        // More distinct samples than the window holds would pin unlocked
        // velocity to zero.
        if self.velocity_min_distinct > self.velocity_window {
            return Err(ConfigError::MinDistinctExceedsWindow {
                min_distinct: self.velocity_min_distinct,
                window: self.velocity_window,
            });
        }
        if self.tick_mark_count == 0 {
            return Err(ConfigError::ZeroCount {
                name: "tick_mark_count",
            });
        }
        // The locked range must still have room in it.
        check_range("locked term", self.locked_range())?;
        for (name, value) in [
            ("antecedent", self.initial_tuple.antecedent()),
            ("consequent", self.initial_tuple.consequent()),
        ] {
            if !self.term_range.contains(value) {
                return Err(ConfigError::InitialOutOfRange {
                    name,
                    value,
                    range: "term",
                });
            }
        }
        if !self.target_ratio_range.contains(self.initial_target_ratio) {
            return Err(ConfigError::InitialOutOfRange {
                name: "target ratio",
                value: self.initial_target_ratio,
                range: "target ratio",
            });
        }
        Ok(())
    }

    #[inline]
    pub fn shift_step(&self) -> f64 {
        self.keyboard_step * self.shift_step_multiplier
    }

    /// Term range while the ratio is locked: the lower edge is lifted off the
    /// no-success region so the locked ratio is always evaluable.
    pub fn locked_range(&self) -> Range {
        Range::new(
            self.term_range.min + self.no_success_threshold + self.lock_range_epsilon,
            self.term_range.max,
        )
    }

    pub fn with_tick_mark_count(mut self, count: u32) -> Self {
        self.tick_mark_count = count;
        self
    }

    pub fn with_initial_tuple(mut self, tuple: RatioTuple) -> Self {
        self.initial_tuple = tuple;
        self
    }

    pub fn with_initial_target_ratio(mut self, ratio: f64) -> Self {
        self.initial_target_ratio = ratio;
        self
    }

    pub fn with_fitness_tolerance(mut self, tolerance: f64) -> Self {
        self.fitness_tolerance = tolerance;
        self
    }

    pub fn with_keyboard_step(mut self, step: f64) -> Self {
        self.keyboard_step = step;
        self
    }

    pub fn with_velocity_window(mut self, window: usize, decimation: usize) -> Self {
        self.velocity_window = window;
        self.velocity_decimation = decimation;
        self
    }
}

fn check_range(name: &'static str, range: Range) -> Result<(), ConfigError> {
    if range.min.is_finite() && range.max.is_finite() && range.min < range.max {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange {
            name,
            min: range.min,
            max: range.max,
        })
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn check_unit(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::NotUnitFraction { name, value })
    }
}

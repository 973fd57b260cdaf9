//! How close the current ratio is to the target.
//!
//! Fitness is `1 - |current - target| / tolerance`. The unclamped value is
//! signed and unbounded below so hysteresis can compare it across frames; the
//! clamped value lives in `[FITNESS_MIN, FITNESS_MAX]` with 1 meaning exactly
//! in proportion.

use crate::config::RapConfig;
use crate::constants::{FITNESS_MAX, FITNESS_MIN};
use crate::range::Range;
use crate::tuple::RatioTuple;

pub const FITNESS_RANGE: Range = Range::new(FITNESS_MIN, FITNESS_MAX);

/// Signed fitness. A `0/0` tuple has no ratio and gets the minimum.
pub fn unclamped_fitness(tuple: RatioTuple, target_ratio: f64, tolerance: f64) -> f64 {
    let current = tuple.antecedent() / tuple.consequent();
    if current.is_nan() {
        return FITNESS_MIN;
    }
    FITNESS_MAX - (current - target_ratio).abs() / tolerance
}

pub fn fitness(tuple: RatioTuple, target_ratio: f64, tolerance: f64) -> f64 {
    FITNESS_RANGE.constrain(unclamped_fitness(tuple, target_ratio, tolerance))
}

pub fn current_ratio_larger_than_target(tuple: RatioTuple, target_ratio: f64) -> bool {
    tuple.antecedent() / tuple.consequent() > target_ratio
}

/// Everything consumers need from one fitness evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitnessReading {
    pub fitness: f64,
    pub unclamped_fitness: f64,
    pub in_proportion: bool,
    pub larger_than_target: bool,
}

#[derive(Clone, Debug)]
pub struct FitnessEngine {
    tolerance: f64,
    in_proportion_threshold: f64,
    moving_in_proportion_threshold: f64,
    no_success_threshold: f64,
}

impl FitnessEngine {
    pub fn new(config: &RapConfig) -> Self {
        Self {
            tolerance: config.fitness_tolerance,
            in_proportion_threshold: config.in_proportion_threshold,
            moving_in_proportion_threshold: config.moving_in_proportion_threshold,
            no_success_threshold: config.no_success_threshold,
        }
    }

    #[inline]
    pub fn min_fitness(&self) -> f64 {
        FITNESS_RANGE.min
    }

    #[inline]
    pub fn max_fitness(&self) -> f64 {
        FITNESS_RANGE.max
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Fitness distance from max that still counts as in proportion.
    pub fn in_proportion_threshold(&self, moving_together: bool) -> f64 {
        if moving_together {
            self.moving_in_proportion_threshold
        } else {
            self.in_proportion_threshold
        }
    }

    /// Either hand inside the no-success region pins fitness to the minimum.
    pub fn in_no_success_region(&self, tuple: RatioTuple) -> bool {
        tuple.antecedent() < self.no_success_threshold
            || tuple.consequent() < self.no_success_threshold
    }

    pub fn unclamped_fitness(&self, tuple: RatioTuple, target_ratio: f64) -> f64 {
        if self.in_no_success_region(tuple) {
            return FITNESS_MIN;
        }
        unclamped_fitness(tuple, target_ratio, self.tolerance)
    }

    pub fn fitness(&self, tuple: RatioTuple, target_ratio: f64) -> f64 {
        FITNESS_RANGE.constrain(self.unclamped_fitness(tuple, target_ratio))
    }

    pub fn in_proportion(&self, fitness: f64, moving_together: bool) -> bool {
        fitness >= self.max_fitness() - self.in_proportion_threshold(moving_together)
    }

    pub fn evaluate(
        &self,
        tuple: RatioTuple,
        target_ratio: f64,
        moving_together: bool,
    ) -> FitnessReading {
        let unclamped = self.unclamped_fitness(tuple, target_ratio);
        let fitness = FITNESS_RANGE.constrain(unclamped);
        FitnessReading {
            fitness,
            unclamped_fitness: unclamped,
            in_proportion: self.in_proportion(fitness, moving_together),
            larger_than_target: current_ratio_larger_than_target(tuple, target_ratio),
        }
    }
}

//! Windowed velocity tracking for one hand.
//!
//! Keeps a short history of term values and recomputes a signed velocity
//! (newest minus oldest retained sample) every `decimation` samples. A window
//! with too few distinct values counts as standing still, which filters out
//! jitter from input devices that report the same position repeatedly.

use std::collections::VecDeque;

use crate::config::RapConfig;

#[derive(Clone, Debug)]
pub struct VelocityTracker {
    history: VecDeque<f64>,
    window: usize,
    decimation: usize,
    min_distinct: usize,
    step_count: usize,
    current_velocity: f64,
}

impl VelocityTracker {
    pub fn new(window: usize, decimation: usize, min_distinct: usize) -> Self {
        assert!(window > 0, "velocity window must be non-empty");
        assert!(decimation > 0, "velocity decimation must be positive");
        Self {
            history: VecDeque::with_capacity(window + 1),
            window,
            decimation,
            min_distinct,
            step_count: 0,
            current_velocity: 0.0,
        }
    }

    pub fn from_config(config: &RapConfig) -> Self {
        Self::new(
            config.velocity_window,
            config.velocity_decimation,
            config.velocity_min_distinct,
        )
    }

    /// Record a new sample. When the ratio is locked the hand is driven by
    /// the other one, so the distinctness requirement is waived.
    pub fn step(&mut self, value: f64, locked: bool) {
        self.step_count += 1;
        self.history.push_back(value);
        if self.history.len() > self.window {
            self.history.pop_front();
        }

        if self.step_count % self.decimation != 0 {
            return;
        }

        self.current_velocity = if locked || self.distinct_values() >= self.min_distinct {
            match (self.history.front(), self.history.back()) {
                (Some(first), Some(last)) => last - first,
                _ => 0.0,
            }
        } else {
            0.0
        };
    }

    #[inline]
    pub fn current_velocity(&self) -> f64 {
        self.current_velocity
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.step_count = 0;
        self.current_velocity = 0.0;
    }

    fn distinct_values(&self) -> usize {
        let mut seen: smallvec::SmallVec<[f64; 8]> = smallvec::SmallVec::new();
        for v in &self.history {
            if !seen.iter().any(|s| s == v) {
                seen.push(*v);
                if seen.len() >= self.min_distinct {
                    break;
                }
            }
        }
        seen.len()
    }
}

/// True when both hands are moving in the same direction. Outside of a lock
/// both velocities must also exceed `threshold`.
pub fn moving_in_direction(
    antecedent_velocity: f64,
    consequent_velocity: f64,
    threshold: f64,
    locked: bool,
) -> bool {
    let both_moving = antecedent_velocity != 0.0 && consequent_velocity != 0.0;
    let same_direction = antecedent_velocity.signum() == consequent_velocity.signum();
    let fast_enough = locked
        || (antecedent_velocity.abs() > threshold && consequent_velocity.abs() > threshold);
    both_moving && same_direction && fast_enough
}

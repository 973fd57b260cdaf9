//! Keyboard stepping that never skips the ideal value.
//!
//! The arrow-key step is usually too coarse to land exactly on the value that
//! puts the hands in proportion. When a granular step would jump over that
//! value, the mapper stops on it and carries the overshoot; the next step pays
//! the overshoot back, so the hand returns to the step grid and the number of
//! presses needed to cross the whole range does not change.

use crate::config::RapConfig;
use crate::constants::SNAP_DECIMALS;

#[derive(Clone, Debug)]
pub struct KeyboardStepMapper {
    step: f64,
    shift_step: f64,
    remainder: f64,
}

impl KeyboardStepMapper {
    pub fn new(step: f64, shift_step: f64) -> Self {
        debug_assert!(step > 0.0 && shift_step > 0.0);
        Self {
            step,
            shift_step,
            remainder: 0.0,
        }
    }

    pub fn from_config(config: &RapConfig) -> Self {
        Self::new(config.keyboard_step, config.shift_step())
    }

    #[inline]
    pub fn remainder(&self) -> f64 {
        self.remainder
    }

    pub fn reset(&mut self) {
        self.remainder = 0.0;
    }

    /// Correct a keyboard-proposed `new_value` (moving from `old_value`) so that
    /// `ideal` is never stepped over.
    pub fn map(&mut self, new_value: f64, old_value: f64, ideal: f64, use_shift_step: bool) -> f64 {
        let step_size = if use_shift_step {
            self.shift_step
        } else {
            self.step
        };

        // Page up/down and home/end are larger than any granular step: they
        // land where they were aimed and drop any carried overshoot.
        let granular = round_to((new_value - old_value).abs(), SNAP_DECIMALS)
            <= round_to(self.step.max(self.shift_step), SNAP_DECIMALS);
        if !granular {
            self.remainder = 0.0;
            return round_to(new_value, SNAP_DECIMALS);
        }

        let mut value = new_value;
        if self.remainder == 0.0 {
            value = round_to(
                (value / step_size).round() * step_size,
                decimal_places(step_size),
            );
        }

        let steps_over_ideal = old_value != ideal && (value - ideal) * (old_value - ideal) < 0.0;

        if steps_over_ideal {
            self.remainder = value - ideal;
            log::debug!(
                "[keys] stopped on ideal {:.6}, carrying {:.6}",
                ideal,
                self.remainder
            );
            value = ideal;
        } else if self.remainder != 0.0 {
            value += self.remainder;
            self.remainder = 0.0;
        }

        round_to(value, SNAP_DECIMALS)
    }
}

/// Round half away from zero at `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Decimal places needed to write `value` exactly, up to 10.
pub fn decimal_places(value: f64) -> i32 {
    let mut scaled = value.abs();
    for places in 0..10 {
        if (scaled - scaled.round()).abs() < 1e-9 {
            return places;
        }
        scaled *= 10.0;
    }
    10
}

//! Canonical ratio state: the current tuple, the enabled term range, the lock,
//! and per-hand velocity.
//!
//! Every external write goes through [`RatioState::set_tuple`], which settles
//! the value (clamping, and ratio reconciliation while locked) before anything
//! observes it. Listeners see exactly one `TupleChange` per write that changed
//! the value and nothing for writes that settle back onto the current value.

use std::time::Duration;

use crate::config::RapConfig;
use crate::constants::RATIO_EPSILON;
use crate::notify::{ListenerId, Notifier};
use crate::range::Range;
use crate::term::RatioTerm;
use crate::tuple::{clamp_ratio_tuple_values_in_range, RatioTuple};
use crate::velocity::{moving_in_direction, VelocityTracker};

/// A settled tuple write.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TupleChange {
    pub old: RatioTuple,
    pub new: RatioTuple,
}

#[derive(Debug)]
pub struct RatioState {
    tuple: RatioTuple,
    initial_tuple: RatioTuple,
    default_range: Range,
    locked_range: Range,
    enabled_range: Range,
    locked: bool,
    // Set for the duration of one external write.
    settling: bool,
    velocity_threshold: f64,
    antecedent_velocity: VelocityTracker,
    consequent_velocity: VelocityTracker,
    moving_together: bool,
    tuple_changed: Notifier<TupleChange>,
    locked_changed: Notifier<bool>,
}

impl RatioState {
    pub fn new(config: &RapConfig) -> Self {
        Self {
            tuple: config.initial_tuple,
            initial_tuple: config.initial_tuple,
            default_range: config.term_range,
            locked_range: config.locked_range(),
            enabled_range: config.term_range,
            locked: false,
            settling: false,
            velocity_threshold: config.velocity_threshold,
            antecedent_velocity: VelocityTracker::from_config(config),
            consequent_velocity: VelocityTracker::from_config(config),
            moving_together: false,
            tuple_changed: Notifier::new(),
            locked_changed: Notifier::new(),
        }
    }

    #[inline]
    pub fn tuple(&self) -> RatioTuple {
        self.tuple
    }

    #[inline]
    pub fn enabled_range(&self) -> Range {
        self.enabled_range
    }

    #[inline]
    pub fn locked(&self) -> bool {
        self.locked
    }

    #[inline]
    pub fn moving_together(&self) -> bool {
        self.moving_together
    }

    pub fn velocity(&self, term: RatioTerm) -> f64 {
        match term {
            RatioTerm::Antecedent => self.antecedent_velocity.current_velocity(),
            RatioTerm::Consequent => self.consequent_velocity.current_velocity(),
        }
    }

    pub fn on_tuple_changed(&mut self, listener: impl FnMut(&TupleChange) + 'static) -> ListenerId {
        self.tuple_changed.subscribe(listener)
    }

    pub fn on_locked_changed(&mut self, listener: impl FnMut(&bool) + 'static) -> ListenerId {
        self.locked_changed.subscribe(listener)
    }

    pub fn unsubscribe_tuple_changed(&mut self, id: ListenerId) -> bool {
        self.tuple_changed.unsubscribe(id)
    }

    pub fn unsubscribe_locked_changed(&mut self, id: ListenerId) -> bool {
        self.locked_changed.unsubscribe(id)
    }

    /// Replace the tuple. Out-of-range terms are clamped; while locked, the
    /// write is reconciled so the previous ratio is kept. Returns the settled
    /// tuple.
    pub fn set_tuple(&mut self, requested: RatioTuple) -> RatioTuple {
        assert!(
            !self.settling,
            "nested tuple write while a previous write is still settling"
        );
        self.settling = true;
        let old = self.tuple;
        let settled = if self.locked {
            self.reconcile(old, requested)
        } else {
            requested.constrain_fields(self.enabled_range)
        };
        self.publish(old, settled);
        self.settling = false;
        settled
    }

    pub fn set_term(&mut self, term: RatioTerm, value: f64) -> RatioTuple {
        let requested = self.tuple.with_term(term, value);
        self.set_tuple(requested)
    }

    /// Move one term so the tuple has exactly `target_ratio`, adjusting
    /// whichever term needs the smaller change, then clamp into the enabled
    /// range keeping that ratio.
    pub fn set_ratio_to_target(&mut self, target_ratio: f64) -> RatioTuple {
        debug_assert!(
            target_ratio.is_finite() && target_ratio > 0.0,
            "target ratio must be positive, got {target_ratio}"
        );
        assert!(!self.settling, "nested tuple write during set_ratio_to_target");
        self.settling = true;

        let old = self.tuple;
        let ideal_antecedent = old.consequent() * target_ratio;
        let ideal_consequent = old.antecedent() / target_ratio;
        let antecedent_change = (ideal_antecedent - old.antecedent()).abs();
        let consequent_change = (ideal_consequent - old.consequent()).abs();

        let (antecedent, consequent) = if consequent_change < antecedent_change {
            (old.antecedent(), ideal_consequent)
        } else {
            (ideal_antecedent, old.consequent())
        };
        // Bypasses lock reconciliation: the write establishes a new ratio.
        let settled =
            clamp_ratio_tuple_values_in_range(antecedent, consequent, target_ratio, self.enabled_range);
        log::debug!(
            "[ratio] snap to target {:.4}: ({:.4}, {:.4}) -> ({:.4}, {:.4})",
            target_ratio,
            old.antecedent(),
            old.consequent(),
            settled.antecedent(),
            settled.consequent()
        );
        self.publish(old, settled);
        self.settling = false;
        settled
    }

    /// Locking narrows the enabled range off the zero edge and pulls the
    /// current tuple into it; unlocking restores the default range.
    pub fn set_locked(&mut self, locked: bool) {
        if locked == self.locked {
            return;
        }
        assert!(!self.settling, "lock toggled while a write is settling");
        if locked {
            self.enabled_range = self.locked_range;
            let old = self.tuple;
            let constrained = old.constrain_fields(self.enabled_range);
            self.publish(old, constrained);
            self.locked = true;
        } else {
            self.locked = false;
            self.enabled_range = self.default_range;
        }
        log::info!(
            "[ratio] locked={} range=[{:.3}, {:.3}] ratio={:.4}",
            self.locked,
            self.enabled_range.min,
            self.enabled_range.max,
            self.tuple.ratio()
        );
        let value = self.locked;
        self.locked_changed.emit(&value);
    }

    /// Feed both velocity trackers with the current tuple, then derive
    /// `moving_together` from the fresh velocities.
    pub fn step(&mut self, _dt: Duration) {
        let tuple = self.tuple;
        self.antecedent_velocity.step(tuple.antecedent(), self.locked);
        self.consequent_velocity.step(tuple.consequent(), self.locked);
        self.moving_together = moving_in_direction(
            self.antecedent_velocity.current_velocity(),
            self.consequent_velocity.current_velocity(),
            self.velocity_threshold,
            self.locked,
        );
    }

    /// Unlock first: tuple listeners read the lock state.
    pub fn reset(&mut self) {
        self.set_locked(false);
        self.enabled_range = self.default_range;
        let initial = self.initial_tuple;
        self.set_tuple(initial);
        self.antecedent_velocity.reset();
        self.consequent_velocity.reset();
        self.moving_together = false;
    }

    fn publish(&mut self, old: RatioTuple, new: RatioTuple) {
        if new == old {
            return;
        }
        self.tuple = new;
        self.tuple_changed.emit(&TupleChange { old, new });
    }

    fn reconcile(&self, old: RatioTuple, requested: RatioTuple) -> RatioTuple {
        let range = self.enabled_range;
        let previous_ratio = old.ratio();
        if !previous_ratio.is_finite() || previous_ratio <= 0.0 {
            return requested.constrain_fields(range);
        }

        let antecedent_changed = requested.antecedent() != old.antecedent();
        let consequent_changed = requested.consequent() != old.consequent();

        let (antecedent, consequent) = match (antecedent_changed, consequent_changed) {
            (false, false) => return old,
            (true, false) => {
                let a = requested.antecedent();
                (a, a / previous_ratio)
            }
            (false, true) => {
                let c = requested.consequent();
                (c * previous_ratio, c)
            }
            (true, true) => {
                let requested_ratio = requested.ratio();
                if (requested_ratio - previous_ratio).abs() <= RATIO_EPSILON {
                    (requested.antecedent(), requested.consequent())
                } else {
                    log::warn!(
                        "[ratio] locked write changed both terms to ratio {:.6} (locked at {:.6}); re-deriving consequent",
                        requested_ratio,
                        previous_ratio
                    );
                    let a = requested.antecedent();
                    (a, a / previous_ratio)
                }
            }
        };

        let settled = clamp_ratio_tuple_values_in_range(antecedent, consequent, previous_ratio, range);
        log::debug!(
            "[ratio] reconciled ({:.4}, {:.4}) -> ({:.4}, {:.4}) at ratio {:.4}",
            requested.antecedent(),
            requested.consequent(),
            settled.antecedent(),
            settled.consequent(),
            previous_ratio
        );
        settled
    }
}

//! Session model tying the ratio state to the target and fitness.
//!
//! Inputs arrive as term writes, keyboard actions, tick-mark jumps and lock
//! toggles; each settles the tuple first and then re-evaluates fitness, pushing
//! any resulting `FeedbackEvent`s into the caller's buffer. Consumers read the
//! settled values through [`RatioModel::snapshot`].

use std::time::Duration;

use crate::config::RapConfig;
use crate::error::ConfigError;
use crate::feedback::{BoundaryTracker, CrossingTracker, Edge, FeedbackEvent, ProportionTracker};
use crate::fitness::{FitnessEngine, FitnessReading};
use crate::input::{proposed_value, KeyAction};
use crate::keyboard::KeyboardStepMapper;
use crate::state::RatioState;
use crate::term::RatioTerm;
use crate::tick_marks::{self, position_for_tick_mark, TickMarkDescription};
use crate::tuple::RatioTuple;

/// Read-only view of the settled model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelSnapshot {
    pub tuple: RatioTuple,
    pub target_ratio: f64,
    pub reading: FitnessReading,
    pub moving_together: bool,
    pub locked: bool,
}

pub struct RatioModel {
    config: RapConfig,
    state: RatioState,
    fitness: FitnessEngine,
    target_ratio: f64,
    keyboard: [KeyboardStepMapper; 2],
    proportion: ProportionTracker,
    crossing: CrossingTracker,
    boundary: BoundaryTracker,
    reading: FitnessReading,
}

impl RatioModel {
    pub fn new(config: RapConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = RatioState::new(&config);
        let fitness = FitnessEngine::new(&config);
        let target_ratio = config.initial_target_ratio;
        let reading = fitness.evaluate(state.tuple(), target_ratio, false);
        let mut model = Self {
            keyboard: [
                KeyboardStepMapper::from_config(&config),
                KeyboardStepMapper::from_config(&config),
            ],
            config,
            state,
            fitness,
            target_ratio,
            proportion: ProportionTracker::default(),
            crossing: CrossingTracker::default(),
            boundary: BoundaryTracker::default(),
            reading,
        };
        model.seed_trackers();
        Ok(model)
    }

    pub fn config(&self) -> &RapConfig {
        &self.config
    }

    pub fn state(&self) -> &RatioState {
        &self.state
    }

    /// For subscribing to tuple and lock notifications.
    pub fn state_mut(&mut self) -> &mut RatioState {
        &mut self.state
    }

    pub fn fitness_engine(&self) -> &FitnessEngine {
        &self.fitness
    }

    pub fn target_ratio(&self) -> f64 {
        self.target_ratio
    }

    pub fn reading(&self) -> FitnessReading {
        self.reading
    }

    pub fn snapshot(&self) -> ModelSnapshot {
        ModelSnapshot {
            tuple: self.state.tuple(),
            target_ratio: self.target_ratio,
            reading: self.reading,
            moving_together: self.state.moving_together(),
            locked: self.state.locked(),
        }
    }

    /// The value `term` would need for the current tuple to hit the target.
    pub fn ideal_value(&self, term: RatioTerm) -> f64 {
        let tuple = self.state.tuple();
        match term {
            RatioTerm::Antecedent => tuple.consequent() * self.target_ratio,
            RatioTerm::Consequent => tuple.antecedent() / self.target_ratio,
        }
    }

    /// Direct write of one term (drag, marker, hand tracking). Any keyboard
    /// overshoot carried for that hand belonged to the old position and is
    /// dropped.
    pub fn set_term_value(
        &mut self,
        term: RatioTerm,
        value: f64,
        out_events: &mut Vec<FeedbackEvent>,
    ) -> RatioTuple {
        self.keyboard[term.index()].reset();
        self.write_term(term, value, out_events)
    }

    pub fn set_tuple(&mut self, tuple: RatioTuple, out_events: &mut Vec<FeedbackEvent>) -> RatioTuple {
        self.reset_keyboard();
        let settled = self.state.set_tuple(tuple);
        self.after_write(out_events);
        settled
    }

    /// Keyboard movement of one hand through its step mapper.
    pub fn keyboard_action(
        &mut self,
        term: RatioTerm,
        action: KeyAction,
        use_shift_step: bool,
        out_events: &mut Vec<FeedbackEvent>,
    ) -> RatioTuple {
        let range = self.state.enabled_range();
        let old = self.state.tuple().get_for_term(term);
        let proposed = proposed_value(action, old, use_shift_step, &self.config, range);
        let ideal = self.ideal_value(term);
        let mapper = &mut self.keyboard[term.index()];
        let mapped = match action {
            // Always land on the range edge.
            KeyAction::Home | KeyAction::End => {
                mapper.reset();
                proposed
            }
            _ => mapper.map(proposed, old, ideal, use_shift_step),
        };
        log::debug!(
            "[keys] {:?} {:?}: {:.6} -> proposed {:.6} -> {:.6}",
            term,
            action,
            old,
            proposed,
            mapped
        );
        self.write_term(term, mapped, out_events)
    }

    /// Move both hands to tick mark `index`.
    pub fn jump_to_tick_mark(&mut self, index: u32, out_events: &mut Vec<FeedbackEvent>) -> RatioTuple {
        self.reset_keyboard();
        let position = position_for_tick_mark(
            index,
            self.config.tick_mark_count,
            self.config.term_range,
        );
        let settled = if self.state.locked() {
            // Only one term may change per locked write.
            self.state.set_term(RatioTerm::Antecedent, position)
        } else {
            self.state.set_tuple(RatioTuple::new(position, position))
        };
        self.after_write(out_events);
        settled
    }

    /// Focus left a hand: drop any carried keyboard remainder.
    pub fn interaction_ended(&mut self, term: RatioTerm) {
        self.keyboard[term.index()].reset();
    }

    pub fn set_locked(&mut self, locked: bool, out_events: &mut Vec<FeedbackEvent>) {
        self.state.set_locked(locked);
        self.after_write(out_events);
    }

    /// Clamped into the configured target range. Returns the applied ratio.
    pub fn set_target_ratio(&mut self, ratio: f64, out_events: &mut Vec<FeedbackEvent>) -> f64 {
        let ratio = self.config.target_ratio_range.constrain(ratio);
        if ratio != self.target_ratio {
            log::info!("[fitness] target ratio {:.4} -> {:.4}", self.target_ratio, ratio);
            self.target_ratio = ratio;
            self.crossing.reset();
            self.reset_keyboard();
        }
        self.evaluate(out_events);
        ratio
    }

    pub fn set_ratio_to_target(&mut self, out_events: &mut Vec<FeedbackEvent>) -> RatioTuple {
        self.reset_keyboard();
        let settled = self.state.set_ratio_to_target(self.target_ratio);
        self.after_write(out_events);
        settled
    }

    /// Advance velocity tracking, then re-evaluate since moving together
    /// changes the in-proportion threshold.
    pub fn step(&mut self, dt: Duration, out_events: &mut Vec<FeedbackEvent>) {
        self.state.step(dt);
        self.evaluate(out_events);
    }

    pub fn describe_tick_marks(&self, term: RatioTerm, exact_numeric: bool) -> TickMarkDescription {
        tick_marks::describe(
            self.state.tuple().get_for_term(term),
            self.config.term_range,
            self.config.tick_mark_count,
            exact_numeric,
        )
    }

    /// Back to the construction-time state without emitting feedback.
    pub fn reset(&mut self) {
        self.state.reset();
        self.target_ratio = self.config.initial_target_ratio;
        self.reset_keyboard();
        self.proportion.reset();
        self.crossing.reset();
        self.boundary.reset();
        self.reading = self
            .fitness
            .evaluate(self.state.tuple(), self.target_ratio, false);
        self.seed_trackers();
        log::info!("[ratio] reset");
    }

    fn reset_keyboard(&mut self) {
        for mapper in &mut self.keyboard {
            mapper.reset();
        }
    }

    fn write_term(
        &mut self,
        term: RatioTerm,
        value: f64,
        out_events: &mut Vec<FeedbackEvent>,
    ) -> RatioTuple {
        let settled = self.state.set_term(term, value);
        self.after_write(out_events);
        settled
    }

    fn seed_trackers(&mut self) {
        self.proportion.update(self.reading.in_proportion);
        self.crossing.update(self.reading.larger_than_target);
        let tuple = self.state.tuple();
        for term in RatioTerm::ALL {
            let edge = self.edge_for(tuple.get_for_term(term));
            self.boundary.update(term, edge);
        }
    }

    fn edge_for(&self, value: f64) -> Option<Edge> {
        let range = self.state.enabled_range();
        if value <= range.min {
            Some(Edge::Min)
        } else if value >= range.max {
            Some(Edge::Max)
        } else {
            None
        }
    }

    fn after_write(&mut self, out_events: &mut Vec<FeedbackEvent>) {
        let tuple = self.state.tuple();
        for term in RatioTerm::ALL {
            let edge = self.edge_for(tuple.get_for_term(term));
            if let Some(ev) = self.boundary.update(term, edge) {
                out_events.push(ev);
            }
        }
        self.evaluate(out_events);
    }

    fn evaluate(&mut self, out_events: &mut Vec<FeedbackEvent>) {
        self.reading = self.fitness.evaluate(
            self.state.tuple(),
            self.target_ratio,
            self.state.moving_together(),
        );
        if let Some(ev) = self.crossing.update(self.reading.larger_than_target) {
            out_events.push(ev);
        }
        if let Some(ev) = self.proportion.update(self.reading.in_proportion) {
            log::debug!("[fitness] {:?} at fitness {:.4}", ev, self.reading.fitness);
            out_events.push(ev);
        }
    }
}

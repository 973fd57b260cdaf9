//! Discrete feedback events derived from continuous state.
//!
//! Each tracker remembers the last value it saw and reports a transition once,
//! so sound and description consumers can react to edges instead of levels.

use crate::term::RatioTerm;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Min,
    Max,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FeedbackEvent {
    EnteredProportion,
    LeftProportion,
    /// The current ratio moved to the other side of the target.
    TargetCrossed { now_larger: bool },
    /// A hand reached the edge of its enabled range.
    Boundary { term: RatioTerm, edge: Edge },
}

#[derive(Clone, Debug, Default)]
pub struct ProportionTracker {
    in_proportion: bool,
}

impl ProportionTracker {
    pub fn update(&mut self, in_proportion: bool) -> Option<FeedbackEvent> {
        if in_proportion == self.in_proportion {
            return None;
        }
        self.in_proportion = in_proportion;
        Some(if in_proportion {
            FeedbackEvent::EnteredProportion
        } else {
            FeedbackEvent::LeftProportion
        })
    }

    pub fn in_proportion(&self) -> bool {
        self.in_proportion
    }

    pub fn reset(&mut self) {
        self.in_proportion = false;
    }
}

/// Tracks which side of the target the ratio is on. The first observation
/// only seeds the tracker.
#[derive(Clone, Debug, Default)]
pub struct CrossingTracker {
    previous_larger: Option<bool>,
}

impl CrossingTracker {
    pub fn update(&mut self, larger_than_target: bool) -> Option<FeedbackEvent> {
        let previous = self.previous_larger.replace(larger_than_target);
        match previous {
            Some(p) if p != larger_than_target => Some(FeedbackEvent::TargetCrossed {
                now_larger: larger_than_target,
            }),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.previous_larger = None;
    }
}

/// Reports a hand arriving at a range edge, once per arrival.
#[derive(Clone, Debug, Default)]
pub struct BoundaryTracker {
    at_edge: [Option<Edge>; 2],
}

impl BoundaryTracker {
    pub fn update(&mut self, term: RatioTerm, edge: Option<Edge>) -> Option<FeedbackEvent> {
        let slot = &mut self.at_edge[term.index()];
        let previous = std::mem::replace(slot, edge);
        match edge {
            Some(e) if previous != Some(e) => Some(FeedbackEvent::Boundary { term, edge: e }),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.at_edge = [None, None];
    }
}

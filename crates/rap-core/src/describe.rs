//! Description phrases for screen-reader narration.
//!
//! Only the phrase fragments are produced here; templating them into full
//! sentences and queueing speech belongs to the front-end.

use crate::fitness::FitnessReading;
use crate::range::Range;
use crate::regions::{
    Case, DistanceRegion, FitnessRegion, Region, DISTANCE_REGIONS, FITNESS_REGIONS,
    POSITION_REGIONS,
};
use crate::term::RatioTerm;
use crate::tick_marks::{ordinal_word, TickMarkDescription};
use crate::tuple::RatioTuple;

/// Either a region, or a direction relative to an unchanged region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress<R> {
    Region(R),
    Closer,
    Farther,
}

/// Last reported region and value for one describer.
#[derive(Clone, Debug)]
pub struct ProgressMemo<R> {
    previous_region: Option<R>,
    previous_value: Option<f64>,
}

impl<R> Default for ProgressMemo<R> {
    fn default() -> Self {
        Self {
            previous_region: None,
            previous_value: None,
        }
    }
}

impl<R: Region> ProgressMemo<R> {
    /// Repeating the same region is replaced by closer/farther, unless the value
    /// did not move or sits at an extremity of its range. `closer` says whether
    /// the move from the previous value went towards the goal.
    pub fn update(
        &mut self,
        region: R,
        value: f64,
        at_extremity: bool,
        closer: impl FnOnce(f64, f64) -> bool,
    ) -> Progress<R> {
        let previous_value = self.previous_value.replace(value);
        if self.previous_region == Some(region) && !at_extremity {
            if let Some(prev) = previous_value {
                if prev != value {
                    return if closer(prev, value) {
                        Progress::Closer
                    } else {
                        Progress::Farther
                    };
                }
            }
        }
        self.previous_region = Some(region);
        Progress::Region(region)
    }

    pub fn previous_region(&self) -> Option<R> {
        self.previous_region
    }

    pub fn reset(&mut self) {
        self.previous_region = None;
        self.previous_value = None;
    }
}

fn case_str(case: Case, lower: &'static str, capitalized: &'static str) -> &'static str {
    match case {
        Case::Lower => lower,
        Case::Capitalized => capitalized,
    }
}

/// "left hand in lower region"
pub fn hand_position_phrase(term: RatioTerm, value: f64, range: Range, case: Case) -> String {
    let normalized = range.normalize(range.constrain(value));
    let region = POSITION_REGIONS.classify(normalized);
    let hand = match case {
        Case::Lower => term.label().to_string(),
        Case::Capitalized => capitalize(term.label()),
    };
    format!("{} {}", hand, region.label(Case::Lower))
}

/// "near 3rd tick mark", "at zero", "around 3.5"
pub fn tick_mark_phrase(desc: &TickMarkDescription, tick_mark_count: u32) -> String {
    let relative = desc.relative.phrase();
    match desc.ordinal {
        Some(n) => format!("{} {} tick mark", relative, ordinal_word(n)),
        None if desc.display_number >= tick_mark_count as f64 => {
            format!("{} top tick mark", relative)
        }
        None => format!("{} {}", relative, desc.display_label()),
    }
}

/// Distance between the hands, with the closer/farther substitution.
#[derive(Clone, Debug, Default)]
pub struct DistanceDescriber {
    memo: ProgressMemo<DistanceRegion>,
}

impl DistanceDescriber {
    pub fn describe(&mut self, tuple: RatioTuple, range: Range, case: Case) -> String {
        let normalized = (tuple.distance() / range.length()).clamp(0.0, 1.0);
        let region = DISTANCE_REGIONS.classify(normalized);
        let at_extremity = normalized == 0.0 || normalized == 1.0;
        match self
            .memo
            .update(region, normalized, at_extremity, |prev, now| now < prev)
        {
            Progress::Region(r) => format!("{} each other", r.label(case)),
            Progress::Closer => case_str(case, "closer to each other", "Closer to each other")
                .to_string(),
            Progress::Farther => {
                case_str(case, "farther from each other", "Farther from each other").to_string()
            }
        }
    }

    pub fn reset(&mut self) {
        self.memo.reset();
    }
}

/// Closeness of the ratio to the target. In proportion always reads "at".
#[derive(Clone, Debug, Default)]
pub struct RatioDescriber {
    memo: ProgressMemo<FitnessRegion>,
}

impl RatioDescriber {
    pub fn describe(&mut self, reading: &FitnessReading, case: Case) -> String {
        if reading.in_proportion {
            self.memo.reset();
            return case_str(case, "at target ratio", "At target ratio").to_string();
        }
        let region = FITNESS_REGIONS.classify(reading.fitness);
        let at_extremity = reading.fitness == 0.0 || reading.fitness == 1.0;
        match self
            .memo
            .update(region, reading.fitness, at_extremity, |prev, now| now > prev)
        {
            Progress::Region(r) => format!("{} target ratio", r.label(case)),
            Progress::Closer => case_str(
                case,
                "a little closer to target ratio",
                "A little closer to target ratio",
            )
            .to_string(),
            Progress::Farther => case_str(
                case,
                "a little farther from target ratio",
                "A little farther from target ratio",
            )
            .to_string(),
        }
    }

    pub fn reset(&mut self) {
        self.memo.reset();
    }
}

/// All per-session narration memos behind one reset.
#[derive(Clone, Debug, Default)]
pub struct Narrator {
    pub distance: DistanceDescriber,
    pub ratio: RatioDescriber,
}

impl Narrator {
    pub fn reset(&mut self) {
        self.distance.reset();
        self.ratio.reset();
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

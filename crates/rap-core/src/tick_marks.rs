//! Hand position relative to the tick marks.
//!
//! The position is scaled to tick-mark units and split into the tick mark
//! below it and the fraction past it. The fraction picks a qualifier and which
//! tick mark (or half tick mark, when tick marks carry numbers) is named.
//! Boundary operators here are part of the narration contract: a value exactly
//! on 0.5 reads differently from one a hair below it.

use crate::constants::TICK_DECIMALS;
use crate::keyboard::round_to;
use crate::range::Range;

const NEAR_FRACTION: f64 = 0.2;
const HALFWAY_FRACTION: f64 = 0.5;
const PAST_HALFWAY_FRACTION: f64 = 0.7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelativePosition {
    /// Exactly on zero.
    At,
    On,
    Near,
    AlmostHalfwayPast,
    HalfwayPast,
    OverHalfwayTo,
    AlmostOn,
    Around,
}

impl RelativePosition {
    pub fn phrase(self) -> &'static str {
        match self {
            RelativePosition::At => "at",
            RelativePosition::On => "on",
            RelativePosition::Near => "near",
            RelativePosition::AlmostHalfwayPast => "almost halfway past",
            RelativePosition::HalfwayPast => "halfway past",
            RelativePosition::OverHalfwayTo => "over halfway to",
            RelativePosition::AlmostOn => "almost on",
            RelativePosition::Around => "around",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickMarkDescription {
    /// Tick mark (or half tick mark) being named.
    pub display_number: f64,
    pub relative: RelativePosition,
    /// Ordinal of `display_number`; none for zero, the top tick mark, and
    /// half tick marks.
    pub ordinal: Option<u32>,
}

impl TickMarkDescription {
    pub fn is_zero(&self) -> bool {
        self.display_number == 0.0
    }

    /// "zero", a whole number, or a half value like "3.5".
    pub fn display_label(&self) -> String {
        if self.is_zero() {
            "zero".to_string()
        } else if self.display_number.fract() == 0.0 {
            format!("{}", self.display_number as u32)
        } else {
            format!("{:.1}", self.display_number)
        }
    }

    /// The tick-mark position being named, in term units.
    pub fn snapped_position(&self, tick_mark_count: u32, range: Range) -> f64 {
        range.expand(self.display_number / tick_mark_count as f64)
    }
}

/// Describe `position` (in `range`) against `tick_mark_count` tick marks.
/// `exact_numeric` is set when tick marks are labelled with numbers, which
/// allows half values to be named.
pub fn describe(
    position: f64,
    range: Range,
    tick_mark_count: u32,
    exact_numeric: bool,
) -> TickMarkDescription {
    assert!(tick_mark_count > 0, "tick mark count must be positive");
    let normalized = range.normalize(range.constrain(position));
    let tick_number = round_to(normalized * tick_mark_count as f64, TICK_DECIMALS);
    let whole = tick_number.floor();
    let fraction = round_to(tick_number - whole, TICK_DECIMALS);

    let (relative, display_number) = if fraction == 0.0 {
        let relative = if whole == 0.0 {
            RelativePosition::At
        } else {
            RelativePosition::On
        };
        (relative, whole)
    } else if fraction <= NEAR_FRACTION {
        (RelativePosition::Near, whole)
    } else if fraction < HALFWAY_FRACTION {
        if exact_numeric {
            (RelativePosition::Around, whole + 0.5)
        } else {
            (RelativePosition::AlmostHalfwayPast, whole)
        }
    } else if fraction == HALFWAY_FRACTION {
        if exact_numeric {
            (RelativePosition::On, whole + 0.5)
        } else {
            (RelativePosition::HalfwayPast, whole)
        }
    } else if fraction <= PAST_HALFWAY_FRACTION {
        if exact_numeric {
            (RelativePosition::Around, whole + 0.5)
        } else {
            (RelativePosition::OverHalfwayTo, whole + 1.0)
        }
    } else {
        (RelativePosition::AlmostOn, whole + 1.0)
    };

    let ordinal = if display_number.fract() != 0.0
        || display_number == 0.0
        || display_number >= tick_mark_count as f64
    {
        None
    } else {
        Some(display_number as u32)
    };

    TickMarkDescription {
        display_number,
        relative,
        ordinal,
    }
}

/// Position of tick mark `index`, clamped to the top tick mark.
pub fn position_for_tick_mark(index: u32, tick_mark_count: u32, range: Range) -> f64 {
    let index = index.min(tick_mark_count);
    range.expand(index as f64 / tick_mark_count as f64)
}

pub fn ordinal_word(n: u32) -> String {
    const WORDS: [&str; 20] = [
        "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth",
        "tenth", "eleventh", "twelfth", "thirteenth", "fourteenth", "fifteenth", "sixteenth",
        "seventeenth", "eighteenth", "nineteenth", "twentieth",
    ];
    match n {
        1..=20 => WORDS[(n - 1) as usize].to_string(),
        _ => {
            let suffix = match (n % 10, n % 100) {
                (_, 11..=13) => "th",
                (1, _) => "st",
                (2, _) => "nd",
                (3, _) => "rd",
                _ => "th",
            };
            format!("{n}{suffix}")
        }
    }
}

//! The ratio value type.
//!
//! A `RatioTuple` is a plain `Copy` value: every "modifying" method returns a
//! new tuple, so observers can always compare the old and new value of a
//! write. A consequent of zero is legal and gives an infinite ratio.

use crate::range::Range;
use crate::term::RatioTerm;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RatioTuple {
    antecedent: f64,
    consequent: f64,
}

impl RatioTuple {
    /// Both terms must be finite; checked in debug builds.
    pub fn new(antecedent: f64, consequent: f64) -> Self {
        debug_assert!(
            antecedent.is_finite(),
            "antecedent must be finite, got {antecedent}"
        );
        debug_assert!(
            consequent.is_finite(),
            "consequent must be finite, got {consequent}"
        );
        Self {
            antecedent,
            consequent,
        }
    }

    #[inline]
    pub fn antecedent(&self) -> f64 {
        self.antecedent
    }

    #[inline]
    pub fn consequent(&self) -> f64 {
        self.consequent
    }

    /// `antecedent / consequent`; `+inf` when the consequent is zero, including
    /// the `0/0` case.
    pub fn ratio(&self) -> f64 {
        if self.consequent == 0.0 {
            f64::INFINITY
        } else {
            self.antecedent / self.consequent
        }
    }

    /// Absolute vertical separation between the two hands.
    #[inline]
    pub fn distance(&self) -> f64 {
        (self.antecedent - self.consequent).abs()
    }

    pub fn get_for_term(&self, term: RatioTerm) -> f64 {
        match term {
            RatioTerm::Antecedent => self.antecedent,
            RatioTerm::Consequent => self.consequent,
        }
    }

    pub fn with_term(&self, term: RatioTerm, value: f64) -> Self {
        match term {
            RatioTerm::Antecedent => self.with_antecedent(value),
            RatioTerm::Consequent => self.with_consequent(value),
        }
    }

    pub fn with_antecedent(&self, antecedent: f64) -> Self {
        Self::new(antecedent, self.consequent)
    }

    pub fn with_consequent(&self, consequent: f64) -> Self {
        Self::new(self.antecedent, consequent)
    }

    pub fn plus_antecedent(&self, delta: f64) -> Self {
        self.with_antecedent(self.antecedent + delta)
    }

    pub fn plus_consequent(&self, delta: f64) -> Self {
        self.with_consequent(self.consequent + delta)
    }

    /// Clamp both terms independently into `range`.
    pub fn constrain_fields(&self, range: Range) -> Self {
        Self::new(
            range.constrain(self.antecedent),
            range.constrain(self.consequent),
        )
    }

    pub fn approx_eq(&self, other: &RatioTuple, epsilon: f64) -> bool {
        (self.antecedent - other.antecedent).abs() <= epsilon
            && (self.consequent - other.consequent).abs() <= epsilon
    }
}

/// Clamp `antecedent` and `consequent` into `range` while keeping
/// `antecedent / consequent == ratio` where the range allows it.
///
/// The antecedent is handled first: if it is out of range it is clamped and the
/// consequent re-derived from it, then the same is done for the consequent.
pub fn clamp_ratio_tuple_values_in_range(
    antecedent: f64,
    consequent: f64,
    ratio: f64,
    range: Range,
) -> RatioTuple {
    if ratio.is_nan() || ratio <= 0.0 || ratio.is_infinite() {
        // No ratio to preserve.
        return RatioTuple::new(range.constrain(antecedent), range.constrain(consequent));
    }

    let mut antecedent = antecedent;
    let mut consequent = consequent;

    if !range.contains(antecedent) {
        antecedent = range.constrain(antecedent);
        consequent = antecedent / ratio;
    }
    if !range.contains(consequent) {
        consequent = range.constrain(consequent);
        antecedent = consequent * ratio;
    }

    // With a narrow range the second pass can push the antecedent out again;
    // the ratio cannot be kept in that case, so stay in range instead.
    RatioTuple::new(range.constrain(antecedent), range.constrain(consequent))
}

/// One of the two terms of a ratio. The antecedent is the left hand, the
/// consequent the right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RatioTerm {
    Antecedent,
    Consequent,
}

impl RatioTerm {
    pub const ALL: [RatioTerm; 2] = [RatioTerm::Antecedent, RatioTerm::Consequent];

    #[inline]
    pub fn other(self) -> RatioTerm {
        match self {
            RatioTerm::Antecedent => RatioTerm::Consequent,
            RatioTerm::Consequent => RatioTerm::Antecedent,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            RatioTerm::Antecedent => 0,
            RatioTerm::Consequent => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RatioTerm::Antecedent => "left hand",
            RatioTerm::Consequent => "right hand",
        }
    }
}

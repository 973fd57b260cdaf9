//! Table-driven classification of continuous values into ordered regions.
//!
//! Narration and closeness sounds share these tables, so the same bucket
//! boundaries drive both. A table is scanned top to bottom and the first entry
//! whose bound admits the value wins. Every table must cover `[0, 1]`; a value
//! no entry admits is a defect in the table, not a runtime condition.

/// Admission rule for one table entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bound {
    Exactly(f64),
    AtLeast(f64),
    Above(f64),
}

impl Bound {
    #[inline]
    pub fn admits(self, value: f64) -> bool {
        match self {
            Bound::Exactly(b) => value == b,
            Bound::AtLeast(b) => value >= b,
            Bound::Above(b) => value > b,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RegionEntry<R> {
    pub bound: Bound,
    pub region: R,
}

const fn entry<R>(bound: Bound, region: R) -> RegionEntry<R> {
    RegionEntry { bound, region }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Case {
    Lower,
    Capitalized,
}

/// A region enum with lowercase and capitalized label sets indexed the same
/// way.
pub trait Region: Copy + PartialEq + std::fmt::Debug + 'static {
    const LOWERCASE: &'static [&'static str];
    const CAPITALIZED: &'static [&'static str];

    fn index(self) -> usize;

    fn label(self, case: Case) -> &'static str {
        match case {
            Case::Lower => Self::LOWERCASE[self.index()],
            Case::Capitalized => Self::CAPITALIZED[self.index()],
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RegionTable<R: 'static> {
    pub name: &'static str,
    pub entries: &'static [RegionEntry<R>],
}

impl<R: Region> RegionTable<R> {
    pub fn try_classify(&self, value: f64) -> Option<R> {
        self.entries
            .iter()
            .find(|e| e.bound.admits(value))
            .map(|e| e.region)
    }

    /// Panics if no entry admits `value`.
    pub fn classify(&self, value: f64) -> R {
        match self.try_classify(value) {
            Some(region) => region,
            None => panic!("{} region table has no entry for {}", self.name, value),
        }
    }

    pub fn label(&self, value: f64, case: Case) -> &'static str {
        self.classify(value).label(case)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------- Hand position ----------------

/// Where a single hand sits in its normalized range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PositionRegion {
    AtTop,
    NearTop,
    UpperRegion,
    UpperMiddleRegion,
    AtMiddle,
    LowerMiddleRegion,
    LowerRegion,
    NearBottom,
    AtBottom,
}

impl Region for PositionRegion {
    const LOWERCASE: &'static [&'static str] = &[
        "at top",
        "near top",
        "in upper region",
        "in upper-middle region",
        "at middle",
        "in lower-middle region",
        "in lower region",
        "near bottom",
        "at bottom",
    ];
    const CAPITALIZED: &'static [&'static str] = &[
        "At top",
        "Near top",
        "In upper region",
        "In upper-middle region",
        "At middle",
        "In lower-middle region",
        "In lower region",
        "Near bottom",
        "At bottom",
    ];

    fn index(self) -> usize {
        self as usize
    }
}

pub const POSITION_REGIONS: RegionTable<PositionRegion> = RegionTable {
    name: "hand position",
    entries: &[
        entry(Bound::Exactly(1.0), PositionRegion::AtTop),
        entry(Bound::AtLeast(0.9), PositionRegion::NearTop),
        entry(Bound::Above(0.65), PositionRegion::UpperRegion),
        entry(Bound::Above(0.5), PositionRegion::UpperMiddleRegion),
        entry(Bound::Exactly(0.5), PositionRegion::AtMiddle),
        entry(Bound::AtLeast(0.35), PositionRegion::LowerMiddleRegion),
        entry(Bound::AtLeast(0.1), PositionRegion::LowerRegion),
        entry(Bound::Above(0.0), PositionRegion::NearBottom),
        entry(Bound::Exactly(0.0), PositionRegion::AtBottom),
    ],
};

// ---------------- Distance between hands ----------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistanceRegion {
    ExtremelyFar,
    VeryFar,
    Far,
    NotSoFar,
    SomewhatNear,
    FairlyNear,
    Near,
    VeryNear,
    ExtremelyNear,
    EvenWith,
}

impl Region for DistanceRegion {
    const LOWERCASE: &'static [&'static str] = &[
        "extremely far from",
        "very far from",
        "far from",
        "not so far from",
        "somewhat near",
        "fairly near",
        "near",
        "very near",
        "extremely near",
        "even with",
    ];
    const CAPITALIZED: &'static [&'static str] = &[
        "Extremely far from",
        "Very far from",
        "Far from",
        "Not so far from",
        "Somewhat near",
        "Fairly near",
        "Near",
        "Very near",
        "Extremely near",
        "Even with",
    ];

    fn index(self) -> usize {
        self as usize
    }
}

pub const DISTANCE_REGIONS: RegionTable<DistanceRegion> = RegionTable {
    name: "hand distance",
    entries: &[
        entry(Bound::AtLeast(0.9), DistanceRegion::ExtremelyFar),
        entry(Bound::AtLeast(0.75), DistanceRegion::VeryFar),
        entry(Bound::AtLeast(0.6), DistanceRegion::Far),
        entry(Bound::AtLeast(0.45), DistanceRegion::NotSoFar),
        entry(Bound::AtLeast(0.3), DistanceRegion::SomewhatNear),
        entry(Bound::AtLeast(0.2), DistanceRegion::FairlyNear),
        entry(Bound::AtLeast(0.1), DistanceRegion::Near),
        entry(Bound::AtLeast(0.05), DistanceRegion::VeryNear),
        entry(Bound::Above(0.0), DistanceRegion::ExtremelyNear),
        entry(Bound::Exactly(0.0), DistanceRegion::EvenWith),
    ],
};

// ---------------- Ratio fitness ----------------

/// Closeness of the current ratio to the target. Being in proportion is
/// reported separately ("at"), these cover everything short of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FitnessRegion {
    ExtremelyClose,
    VeryClose,
    Close,
    SomewhatClose,
    NotSoClose,
    Far,
    VeryFar,
    ExtremelyFar,
}

impl FitnessRegion {
    /// 0 for the farthest region, rising towards the target.
    pub fn closeness_rank(self) -> usize {
        Self::LOWERCASE.len() - 1 - self.index()
    }
}

impl Region for FitnessRegion {
    const LOWERCASE: &'static [&'static str] = &[
        "extremely close to",
        "very close to",
        "close to",
        "somewhat close to",
        "not so close to",
        "far from",
        "very far from",
        "extremely far from",
    ];
    const CAPITALIZED: &'static [&'static str] = &[
        "Extremely close to",
        "Very close to",
        "Close to",
        "Somewhat close to",
        "Not so close to",
        "Far from",
        "Very far from",
        "Extremely far from",
    ];

    fn index(self) -> usize {
        self as usize
    }
}

pub const FITNESS_REGIONS: RegionTable<FitnessRegion> = RegionTable {
    name: "ratio fitness",
    entries: &[
        entry(Bound::AtLeast(0.9), FitnessRegion::ExtremelyClose),
        entry(Bound::AtLeast(0.8), FitnessRegion::VeryClose),
        entry(Bound::AtLeast(0.65), FitnessRegion::Close),
        entry(Bound::AtLeast(0.5), FitnessRegion::SomewhatClose),
        entry(Bound::AtLeast(0.35), FitnessRegion::NotSoClose),
        entry(Bound::AtLeast(0.2), FitnessRegion::Far),
        entry(Bound::AtLeast(0.1), FitnessRegion::VeryFar),
        entry(Bound::AtLeast(0.0), FitnessRegion::ExtremelyFar),
    ],
};

/// Closed numeric interval `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp `value` into the range. NaN passes through unchanged.
    #[inline]
    pub fn constrain(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Map `value` to `[0, 1]` relative to this range (not clamped).
    #[inline]
    pub fn normalize(&self, value: f64) -> f64 {
        let len = self.length();
        if len == 0.0 {
            0.0
        } else {
            (value - self.min) / len
        }
    }

    /// Inverse of [`Range::normalize`].
    #[inline]
    pub fn expand(&self, normalized: f64) -> f64 {
        self.min + normalized * self.length()
    }
}

// Shared tuning constants for the ratio core. `RapConfig::default()` is built
// from these; nothing else should read them directly.

// Term range
pub const TERM_MIN: f64 = 0.0;
pub const TERM_MAX: f64 = 1.0;

// Fitness
pub const FITNESS_MIN: f64 = 0.0;
pub const FITNESS_MAX: f64 = 1.0;
pub const FITNESS_TOLERANCE: f64 = 0.5; // ratio error that maps to minimum fitness
pub const IN_PROPORTION_THRESHOLD: f64 = 0.05; // fitness >= 1 - this is "in proportion"
pub const MOVING_IN_PROPORTION_THRESHOLD: f64 = 0.1; // looser while both hands move together

// Below this value a term cannot take part in a success.
pub const NO_SUCCESS_THRESHOLD: f64 = 0.01;
// Added to NO_SUCCESS_THRESHOLD to form the lower bound of the locked range.
pub const LOCK_RANGE_EPSILON: f64 = 0.001;

// Keyboard interaction
pub const KEYBOARD_STEP: f64 = 1.0 / 20.0;
pub const SHIFT_STEP_MULTIPLIER: f64 = 1.0 / 5.0;
pub const PAGE_STEP: f64 = 1.0 / 5.0;
pub const SNAP_DECIMALS: i32 = 6; // precision of values leaving the step mapper

// Velocity
pub const VELOCITY_THRESHOLD: f64 = 0.01;
pub const VELOCITY_WINDOW: usize = 30; // samples kept per channel
pub const VELOCITY_DECIMATION: usize = 30; // recompute every N samples
pub const VELOCITY_MIN_DISTINCT: usize = 3;

// Tick marks
pub const TICK_MARK_COUNT: u32 = 10;
pub const TICK_DECIMALS: i32 = 6;

// Target ratio pickers (numerator and denominator each 1..=10)
pub const TARGET_RATIO_MIN: f64 = 0.1;
pub const TARGET_RATIO_MAX: f64 = 10.0;

// Startup state
pub const INITIAL_ANTECEDENT: f64 = 0.2;
pub const INITIAL_CONSEQUENT: f64 = 0.4;
pub const INITIAL_TARGET_RATIO: f64 = 0.5;

// Tolerance used when comparing ratios for equality.
pub const RATIO_EPSILON: f64 = 1e-6;

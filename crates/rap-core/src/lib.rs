pub mod config;
pub mod constants;
pub mod describe;
pub mod error;
pub mod feedback;
pub mod fitness;
pub mod input;
pub mod keyboard;
pub mod model;
pub mod notify;
pub mod range;
pub mod regions;
pub mod sound;
pub mod state;
pub mod term;
pub mod tick_marks;
pub mod tuple;
pub mod velocity;

pub use config::RapConfig;
pub use error::ConfigError;
pub use feedback::{Edge, FeedbackEvent};
pub use fitness::{FitnessEngine, FitnessReading};
pub use keyboard::KeyboardStepMapper;
pub use model::{ModelSnapshot, RatioModel};
pub use range::Range;
pub use regions::{Case, Region, RegionTable};
pub use state::{RatioState, TupleChange};
pub use term::RatioTerm;
pub use tick_marks::TickMarkDescription;
pub use tuple::{clamp_ratio_tuple_values_in_range, RatioTuple};
pub use velocity::VelocityTracker;

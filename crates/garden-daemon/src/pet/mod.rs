pub mod stage;
pub mod state;

pub use stage::{GrowthStage, PetCondition};
pub use state::{GAUGE_MAX, GAUGE_MIN, Gauges, PetState, Timestamp, clamp_gauge};

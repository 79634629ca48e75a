// Core algorithm exports
pub mod classify;
pub mod distance;
pub mod evaluator;

pub use classify::{classify, ALL_FIREARMS_THRESHOLD_FEET, LIMITED_THRESHOLD_FEET};
pub use distance::{haversine_distance_m, meters_to_feet, min_distance_m, METERS_TO_FEET};
pub use evaluator::{DistanceEvaluator, EvaluateError};

// Service exports
pub mod cache;
pub mod overpass;

pub use cache::{CacheKey, EvaluationCache};
pub use overpass::{OverpassClient, OverpassError};

// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BuildingFeature, Coordinate, DistanceResult, FeaturePoint, LegalityCategory, ValidationError,
};
pub use requests::EvaluateRequest;
pub use responses::{ErrorResponse, EvaluateResponse, HealthResponse};

use crate::models::domain::LegalityCategory;
use serde::{Deserialize, Serialize};

/// Response for the evaluate endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateResponse {
    /// Distance to the nearest building, `null` when none was found
    /// within the widest search radius
    #[serde(rename = "distanceFeet")]
    pub distance_feet: Option<u64>,
    pub category: LegalityCategory,
    pub message: String,
    #[serde(rename = "buildingsScanned")]
    pub buildings_scanned: usize,
    #[serde(rename = "radiusM")]
    pub radius_m: u32,
    pub cached: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

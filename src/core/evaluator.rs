use crate::core::distance::{meters_to_feet, min_distance_m};
use crate::models::{Coordinate, DistanceResult};
use crate::services::{OverpassClient, OverpassError};
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by the evaluator
#[derive(Debug, Error)]
pub enum EvaluateError {
    /// Every radius attempt failed outright. Distinct from "no buildings
    /// found", which is a successful result.
    #[error("building lookup failed after {attempts} radius attempts: {source}")]
    ServiceUnavailable {
        attempts: usize,
        #[source]
        source: OverpassError,
    },
}

/// Nearest-dwelling distance evaluator.
///
/// Queries the building-footprint service with a progressively widening
/// search radius and returns the minimum distance in feet. Widening doubles
/// as the retry strategy: a failed or timed-out attempt advances to the
/// next radius instead of aborting, and each radius is attempted exactly
/// once. Stateless; safe to share across concurrent requests.
pub struct DistanceEvaluator {
    client: Arc<OverpassClient>,
    radii_m: Vec<u32>,
}

impl DistanceEvaluator {
    /// Create an evaluator with the given radius schedule in meters.
    /// The schedule is sorted ascending and deduplicated; an empty
    /// schedule falls back to the default.
    pub fn new(client: Arc<OverpassClient>, radii_m: Vec<u32>) -> Self {
        let mut radii_m = if radii_m.is_empty() {
            Self::default_radii()
        } else {
            radii_m
        };
        radii_m.sort_unstable();
        radii_m.dedup();

        Self { client, radii_m }
    }

    /// Default schedule: a fast first try, then wide enough that
    /// exhaustion legitimately implies remoteness
    pub fn default_radii() -> Vec<u32> {
        vec![5_000, 10_000, 20_000]
    }

    pub fn radii_m(&self) -> &[u32] {
        &self.radii_m
    }

    /// Find the nearest building to `coordinate`.
    ///
    /// Returns `distance_feet: None` when the widest radius was scanned
    /// without finding a building — a valid outcome meaning "remote area".
    /// Fails only when every radius attempt errored.
    pub async fn evaluate(&self, coordinate: &Coordinate) -> Result<DistanceResult, EvaluateError> {
        let mut last_error: Option<OverpassError> = None;
        let mut failed_attempts = 0;

        for &radius_m in &self.radii_m {
            match self.client.query_buildings(coordinate, radius_m).await {
                Ok(features) => {
                    let (min_m, scanned) = min_distance_m(coordinate, &features);
                    match min_m {
                        Some(meters) => {
                            let distance_feet = meters_to_feet(meters);
                            tracing::debug!(
                                "Nearest building at {}ft ({} scanned, radius {}m)",
                                distance_feet,
                                scanned,
                                radius_m
                            );
                            return Ok(DistanceResult {
                                distance_feet: Some(distance_feet),
                                buildings_scanned: scanned,
                                radius_m,
                            });
                        }
                        None => {
                            tracing::debug!("No buildings within {}m, widening", radius_m);
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("Radius attempt {}m failed, widening: {}", radius_m, e);
                    failed_attempts += 1;
                    last_error = Some(e);
                }
            }
        }

        // Every attempt errored: report the failure rather than
        // masquerading as a verified-empty result
        if failed_attempts == self.radii_m.len() {
            let source = last_error.expect("failed attempts imply a recorded error");
            return Err(EvaluateError::ServiceUnavailable {
                attempts: failed_attempts,
                source,
            });
        }

        Ok(DistanceResult {
            distance_feet: None,
            buildings_scanned: 0,
            radius_m: *self.radii_m.last().expect("radius schedule is non-empty"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_client() -> Arc<OverpassClient> {
        Arc::new(OverpassClient::new(
            "http://127.0.0.1:1".to_string(),
            Duration::from_secs(1),
            25,
        ))
    }

    #[test]
    fn radius_schedule_is_sorted_and_deduplicated() {
        let evaluator = DistanceEvaluator::new(test_client(), vec![20_000, 5_000, 5_000, 10_000]);
        assert_eq!(evaluator.radii_m(), &[5_000, 10_000, 20_000]);
    }

    #[test]
    fn empty_schedule_falls_back_to_default() {
        let evaluator = DistanceEvaluator::new(test_client(), vec![]);
        assert_eq!(evaluator.radii_m(), DistanceEvaluator::default_radii().as_slice());
    }

    #[tokio::test]
    async fn unreachable_service_surfaces_error() {
        // Port 1 refuses connections, so every radius attempt fails
        let evaluator = DistanceEvaluator::new(test_client(), vec![5_000, 10_000]);
        let coordinate = Coordinate::new(39.5296, -119.8138).unwrap();

        let result = evaluator.evaluate(&coordinate).await;
        match result {
            Err(EvaluateError::ServiceUnavailable { attempts, .. }) => assert_eq!(attempts, 2),
            other => panic!("expected ServiceUnavailable, got {:?}", other),
        }
    }
}

use crate::core::{classify, DistanceEvaluator};
use crate::models::{
    Coordinate, DistanceResult, ErrorResponse, EvaluateRequest, EvaluateResponse, HealthResponse,
};
use crate::services::{CacheKey, EvaluationCache};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub evaluator: Arc<DistanceEvaluator>,
    pub cache: Arc<EvaluationCache>,
}

/// Configure all evaluation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/evaluate", web::get().to(evaluate));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Evaluate endpoint
///
/// GET /api/v1/evaluate?lat=39.5296&lon=-119.8138
///
/// Returns the distance to the nearest building in feet and the legality
/// category it maps to. `distanceFeet` is null when no building was found
/// within the widest search radius.
async fn evaluate(
    state: web::Data<AppState>,
    query: web::Query<EvaluateRequest>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for evaluate request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let coordinate = match Coordinate::new(query.lat, query.lon) {
        Ok(c) => c,
        Err(e) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid coordinate".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    let cache_key = CacheKey::evaluation(&coordinate);
    if let Some(result) = state.cache.get(&cache_key).await {
        tracing::debug!("Serving cached evaluation for {}", cache_key);
        return HttpResponse::Ok().json(build_response(result, true));
    }

    tracing::info!(
        "Evaluating nearest dwelling for {:.4},{:.4}",
        coordinate.lat,
        coordinate.lon
    );

    match state.evaluator.evaluate(&coordinate).await {
        Ok(result) => {
            state.cache.insert(cache_key, result).await;
            HttpResponse::Ok().json(build_response(result, false))
        }
        Err(e) => {
            // Never report "likely legal" on a lookup failure
            tracing::error!(
                "Evaluation failed for {:.4},{:.4}: {}",
                coordinate.lat,
                coordinate.lon,
                e
            );
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "Building lookup failed".to_string(),
                message: e.to_string(),
                status_code: 502,
            })
        }
    }
}

fn build_response(result: DistanceResult, cached: bool) -> EvaluateResponse {
    let category = classify(result.distance_feet);

    EvaluateResponse {
        distance_feet: result.distance_feet,
        category,
        message: category.describe().to_string(),
        buildings_scanned: result.buildings_scanned,
        radius_m: result.radius_m,
        cached,
    }
}

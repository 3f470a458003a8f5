use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{Engine, EngineError};
use crate::models::{
    BuilderRequest, BuilderResponse, ComplexityTrendResponse, ErrorResponse, HealthResponse,
    MechanicsTrendResponse, QuizResultRequest, QuizResultResponse,
};
use crate::services::DatasetStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DatasetStore>,
    pub engine: Engine,
    pub tracked_mechanics: Vec<String>,
}

/// Configure all insight routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/builder/predict", web::post().to(builder_predict))
        .route("/quiz/result", web::post().to(quiz_result))
        .route("/trends/complexity", web::get().to(complexity_trend))
        .route("/trends/mechanics", web::get().to(mechanics_trend));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        games: state.store.len(),
        timestamp: chrono::Utc::now(),
    })
}

/// Builder prediction endpoint
///
/// POST /api/v1/builder/predict
///
/// Request body:
/// ```json
/// {
///   "weight": 3.0,
///   "playtime": 60,
///   "mechanic": "all"
/// }
/// ```
async fn builder_predict(
    state: web::Data<AppState>,
    req: web::Json<BuilderRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for builder request: {:?}", errors);
        return validation_failure(errors);
    }

    let prefs = req.into_inner().into_preferences();
    tracing::debug!(
        "Builder lookup: weight={:?}, playtime={:?}, mechanic={:?}",
        prefs.weight,
        prefs.playtime,
        prefs.mechanic
    );

    match state.engine.query_builder(state.store.records(), &prefs) {
        Ok(outcome) => HttpResponse::Ok().json(BuilderResponse::from(outcome)),
        Err(e) => engine_failure(e),
    }
}

/// Quiz result endpoint
///
/// POST /api/v1/quiz/result
///
/// Request body: the five quiz answers, all optional:
/// ```json
/// {
///   "playtime": 90,
///   "weight": 4.0,
///   "players": 2,
///   "mechanic": "Dice Rolling",
///   "year": 2018
/// }
/// ```
async fn quiz_result(
    state: web::Data<AppState>,
    req: web::Json<QuizResultRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for quiz request: {:?}", errors);
        return validation_failure(errors);
    }

    let prefs = req.into_inner().into_preferences();
    tracing::info!(
        "Computing quiz result: weight={:?}, playtime={:?}, mechanic={:?}, year={:?}",
        prefs.weight,
        prefs.playtime,
        prefs.mechanic,
        prefs.year
    );

    match state.engine.query_quiz(state.store.records(), &prefs) {
        Ok(summary) => {
            tracing::debug!(
                "Quiz result: {} similar, {} best, background {}",
                summary.top_similar.len(),
                summary.best_matches.len(),
                summary.background.len()
            );
            HttpResponse::Ok().json(QuizResultResponse::from(summary))
        }
        Err(e) => engine_failure(e),
    }
}

/// Complexity trend endpoint
///
/// GET /api/v1/trends/complexity
///
/// Returns the fitted rating-over-weight line (null when degenerate) and a
/// stride-sampled scatter of the weight/rating plane.
async fn complexity_trend(state: web::Data<AppState>) -> impl Responder {
    let trend = state.engine.complexity_trend(state.store.records());
    HttpResponse::Ok().json(ComplexityTrendResponse::from(trend))
}

/// Mechanics evolution endpoint
///
/// GET /api/v1/trends/mechanics
///
/// Returns per-year counts of the configured tracked mechanics.
async fn mechanics_trend(state: web::Data<AppState>) -> impl Responder {
    let series = state
        .engine
        .mechanics_by_year(state.store.records(), &state.tracked_mechanics);

    HttpResponse::Ok().json(MechanicsTrendResponse {
        mechanics: state.tracked_mechanics.clone(),
        series: series.into_iter().map(Into::into).collect(),
    })
}

fn validation_failure(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn engine_failure(error: EngineError) -> HttpResponse {
    match error {
        EngineError::InvalidPreference(_) => {
            tracing::info!("Rejected preference vector: {}", error);
            HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid preferences".to_string(),
                message: error.to_string(),
                status_code: 400,
            })
        }
        EngineError::EmptyRecordSet => {
            tracing::error!("Query ran against an empty record set: {}", error);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Dataset unavailable".to_string(),
                message: error.to_string(),
                status_code: 500,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_shape() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            games: 42,
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
        assert_eq!(response.games, 42);
    }
}

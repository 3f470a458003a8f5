use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use std::sync::Arc;
use tracing::{error, info};

use tabletop_algo::config::Settings;
use tabletop_algo::core::Engine;
use tabletop_algo::models::{BuilderTolerances, SamplingLimits, ScoringWeights};
use tabletop_algo::routes;
use tabletop_algo::routes::insights::AppState;
use tabletop_algo::services::DatasetStore;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST),
        )
        .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(
    err: error::JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(
    err: error::QueryPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Tabletop Algo insight service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Load the game dataset into the immutable record store
    let store = Arc::new(DatasetStore::load(&settings.dataset.path).unwrap_or_else(|e| {
        error!("Failed to load dataset from {}: {}", settings.dataset.path, e);
        panic!("Dataset error: {}", e);
    }));

    // Initialize the engine with configured weights, tolerances and budgets
    let weights = ScoringWeights {
        weight: settings.scoring.weights.weight,
        playtime: settings.scoring.weights.playtime,
        mechanic: settings.scoring.weights.mechanic,
        year: settings.scoring.weights.year,
    };

    let tolerances = BuilderTolerances {
        weight: settings.builder.weight_tolerance,
        playtime_min: settings.builder.playtime_tolerance_min,
        min_matches: settings.builder.min_matches,
    };

    let limits = SamplingLimits {
        scatter_max_points: settings.sampling.scatter_max_points,
        background_max_points: settings.sampling.background_max_points,
    };

    let engine = Engine::new(weights, tolerances, limits);

    info!("Engine initialized with weights: {:?}", weights);

    // Build application state
    let app_state = AppState {
        store,
        engine,
        tracked_mechanics: settings.trends.mechanics.clone(),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use jeju_guide::catalog::Catalog;
use jeju_guide::config::{LoggingSettings, Settings, WeatherBackend, WeatherSettings};
use jeju_guide::core::Ranker;
use jeju_guide::models::{ErrorResponse, ScoringWeights};
use jeju_guide::routes::{self, AppState};
use jeju_guide::services::{
    CachedWeather, InMemoryUserDirectory, OpenWeatherClient, StaticWeather, WeatherError,
    WeatherProvider,
};

/// JSON body for malformed request payloads
fn payload_error(kind: &str, message: String) -> actix_web::Error {
    let response = HttpResponse::build(StatusCode::BAD_REQUEST).json(ErrorResponse {
        error: kind.to_string(),
        message,
        status_code: StatusCode::BAD_REQUEST.as_u16(),
    });
    error::InternalError::from_response(kind.to_string(), response).into()
}

/// Handle JSON payload errors
fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    payload_error("invalid_json", format!("Invalid JSON: {}", err))
}

/// Handle query payload errors
fn handle_query_payload_error(err: error::QueryPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    payload_error("invalid_query", format!("Invalid query: {}", err))
}

/// RUST_LOG wins, then LOG_LEVEL, then the configured level
fn init_logging(logging: &LoggingSettings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

fn build_weather(settings: &WeatherSettings) -> Result<Arc<dyn WeatherProvider>, WeatherError> {
    let provider: Arc<dyn WeatherProvider> = match settings.provider {
        WeatherBackend::OpenWeather => Arc::new(OpenWeatherClient::new(
            settings.endpoint.clone(),
            settings.api_key.clone(),
            Duration::from_secs(settings.timeout_secs),
        )?),
        WeatherBackend::Static => Arc::new(StaticWeather::new(settings.static_label.clone())),
    };

    Ok(Arc::new(CachedWeather::new(
        provider,
        settings.cache_capacity,
        Duration::from_secs(settings.cache_ttl_secs),
    )))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration before logging so the logging section can apply
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    init_logging(&settings.logging);

    info!("Starting Jeju Guide recommendation service...");

    info!("Configuration loaded successfully");

    // Load the catalog once; any malformed row aborts startup
    let catalog = Catalog::load(&settings.catalog.places_path, &settings.catalog.menus_path)
        .map_err(|e| {
            error!("Failed to load catalog: {}", e);
            std::io::Error::new(std::io::ErrorKind::InvalidData, e)
        })?;

    info!(
        "Catalog loaded: {} places in {:?}",
        catalog.len(),
        catalog.categories()
    );

    let weather = build_weather(&settings.weather).map_err(|e| {
        error!("Failed to initialize weather provider: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    info!("Weather provider initialized ({:?})", settings.weather.provider);

    let weights = ScoringWeights::from(&settings.ranking.weights);
    let ranker = Ranker::new(weights, settings.ranking.strict_gender);

    info!("Ranker initialized with weights: {:?}", weights);

    // Build application state
    let app_state = AppState {
        catalog: Arc::new(catalog),
        ranker,
        weather,
        users: Arc::new(InMemoryUserDirectory::new()),
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
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                payload_error("invalid_path", format!("Invalid path: {}", err))
            }))
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

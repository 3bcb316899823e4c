use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::catalog::Catalog;
use crate::core::{parse_time, Ranker};
use crate::error::RankError;
use crate::models::{
    ErrorResponse, Gender, HealthResponse, JoinRequest, JoinResponse, LocationDetailResponse,
    LocationQuery, LocationSummary, LocationsResponse, RankingRequest, RecommendQuery,
    TypesResponse, WeatherResponse,
};
use crate::services::{UserDirectory, UserDirectoryError, WeatherProvider};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub ranker: Ranker,
    pub weather: Arc<dyn WeatherProvider>,
    pub users: Arc<dyn UserDirectory>,
}

/// Configure all place-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/join", web::post().to(join))
        .route("/weather", web::get().to(current_weather))
        .route("/users/{user_id}/types", web::get().to(list_types))
        .route("/users/{user_id}/types/{place_type}", web::get().to(recommend))
        .route("/users/{user_id}/locations/{location_id}", web::get().to(location_detail));
}

fn error_response(status: StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

fn rank_error_response(err: RankError) -> HttpResponse {
    let error = match err {
        RankError::InvalidTimeFormat(_) => "Invalid time format",
        RankError::InvalidInput(_) => "Invalid input",
    };
    error_response(StatusCode::BAD_REQUEST, error, err.to_string())
}

async fn resolve_gender(state: &AppState, user_id: &str) -> Result<Gender, HttpResponse> {
    state.users.gender_of(user_id).await.map_err(|e| match e {
        UserDirectoryError::UnknownUser(_) => {
            error_response(StatusCode::NOT_FOUND, "User not found", e.to_string())
        }
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        places: state.catalog.len(),
        timestamp: chrono::Utc::now(),
    })
}

/// Register a user
///
/// POST /api/v1/join
///
/// Request body:
/// ```json
/// { "gender": "male|female" }
/// ```
async fn join(state: web::Data<AppState>, req: web::Json<JoinRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let gender = match req.gender.parse::<Gender>() {
        Ok(gender) => gender,
        Err(e) => return rank_error_response(e),
    };

    let user_id = state.users.register(gender).await;
    tracing::info!("New user joined: {} ({})", user_id, gender);

    HttpResponse::Ok().json(JoinResponse { user_id })
}

/// Current weather at a location
///
/// GET /api/v1/weather?latitude={lat}&longitude={lon}
async fn current_weather(
    state: web::Data<AppState>,
    query: web::Query<LocationQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    match state.weather.current_weather(query.latitude, query.longitude).await {
        Ok(current_weather) => HttpResponse::Ok().json(WeatherResponse { current_weather }),
        Err(e) => {
            tracing::error!("Weather lookup failed: {}", e);
            error_response(StatusCode::BAD_GATEWAY, "Weather lookup failed", e.to_string())
        }
    }
}

/// Place types available to a user
///
/// GET /api/v1/users/{user_id}/types
async fn list_types(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let user_id = path.into_inner();
    if let Err(response) = resolve_gender(&state, &user_id).await {
        return response;
    }

    HttpResponse::Ok().json(TypesResponse {
        types: state.catalog.categories(),
    })
}

/// Ranked places of one type for a user
///
/// GET /api/v1/users/{user_id}/types/{place_type}?latitude={lat}&longitude={lon}[&time=HH:MM]
async fn recommend(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    query: web::Query<RecommendQuery>,
) -> impl Responder {
    let (user_id, place_type) = path.into_inner();

    if let Err(errors) = query.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let gender = match resolve_gender(&state, &user_id).await {
        Ok(gender) => gender,
        Err(response) => return response,
    };

    let reference_time = match query.time.as_deref() {
        Some(time) => match parse_time(time) {
            Ok(time) => time,
            Err(e) => return rank_error_response(e),
        },
        None => chrono::Local::now().time(),
    };

    // A failed weather lookup fails the whole request
    let weather = match state.weather.current_weather(query.latitude, query.longitude).await {
        Ok(weather) => weather,
        Err(e) => {
            tracing::error!("Weather lookup failed for {}: {}", user_id, e);
            return error_response(StatusCode::BAD_GATEWAY, "Weather lookup failed", e.to_string());
        }
    };

    let request = RankingRequest::at(
        place_type,
        query.latitude,
        query.longitude,
        gender.as_str(),
        weather,
        reference_time,
    );

    let ranked = match state.ranker.rank(&state.catalog, &request) {
        Ok(ranked) => ranked,
        Err(e) => {
            tracing::warn!("Ranking failed for {}: {}", user_id, e);
            return rank_error_response(e);
        }
    };

    tracing::info!(
        "Returning {} {} for user {} (weather: {}, time: {})",
        ranked.len(),
        request.category,
        user_id,
        request.weather,
        request.reference_time.format("%H:%M")
    );

    HttpResponse::Ok().json(LocationsResponse {
        locations: ranked.iter().map(LocationSummary::from).collect(),
        weather: request.weather.clone(),
        total_results: ranked.len(),
    })
}

/// Full detail for one place
///
/// GET /api/v1/users/{user_id}/locations/{location_id}
async fn location_detail(
    state: web::Data<AppState>,
    path: web::Path<(String, usize)>,
) -> impl Responder {
    let (user_id, location_id) = path.into_inner();
    if let Err(response) = resolve_gender(&state, &user_id).await {
        return response;
    }

    match state.catalog.get(location_id) {
        Some(place) => HttpResponse::Ok().json(LocationDetailResponse::from(place)),
        None => error_response(
            StatusCode::NOT_FOUND,
            "Location not found",
            format!("No location with id {}", location_id),
        ),
    }
}

use serde::{Deserialize, Serialize};
use crate::models::domain::{MenuItem, Place, RankedPlace};

/// Response for the join endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinResponse {
    pub user_id: String,
}

/// Response for the weather endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub current_weather: String,
}

/// Response listing the place types a user can browse
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypesResponse {
    pub types: Vec<String>,
}

/// One entry in a ranked location list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationSummary {
    pub id: usize,
    pub name: String,
    pub category: String,
    pub photo: Option<String>,
    pub score: f64,
    pub price: String,
    pub distance_km: f64,
    pub meta_score: i64,
}

impl From<&RankedPlace<'_>> for LocationSummary {
    fn from(ranked: &RankedPlace<'_>) -> Self {
        let place = ranked.place;
        Self {
            id: place.id,
            name: place.name.clone(),
            category: place.category.clone(),
            photo: place.photo().map(str::to_string),
            score: place.score,
            price: place.price.clone(),
            distance_km: ranked.distance_km,
            meta_score: ranked.meta_score,
        }
    }
}

/// Response for the ranked location list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationsResponse {
    pub locations: Vec<LocationSummary>,
    pub weather: String,
    pub total_results: usize,
}

/// Full detail for a single place
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationDetailResponse {
    pub id: usize,
    pub name: String,
    pub category: String,
    pub photos: Vec<String>,
    pub information: String,
    pub score: f64,
    pub reviews: u32,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub price: String,
    pub latitude: f64,
    pub longitude: f64,
    pub menu: Option<Vec<MenuItem>>,
}

impl From<&Place> for LocationDetailResponse {
    fn from(place: &Place) -> Self {
        Self {
            id: place.id,
            name: place.name.clone(),
            category: place.category.clone(),
            photos: place.images.clone(),
            information: place.information.clone(),
            score: place.score,
            reviews: place.reviews,
            open_time: place.open_time.clone(),
            close_time: place.close_time.clone(),
            price: place.price.clone(),
            latitude: place.latitude,
            longitude: place.longitude,
            menu: place.menu.clone(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub places: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

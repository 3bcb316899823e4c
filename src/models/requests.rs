use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to register a new user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct JoinRequest {
    #[validate(length(min = 1))]
    pub gender: String,
}

/// Coordinates supplied by the client on location-aware endpoints
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LocationQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

/// Query for the ranked location list
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    /// Reference time as "HH:MM"; defaults to the server's wall clock
    #[serde(default)]
    pub time: Option<String>,
}

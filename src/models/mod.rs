// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Place, MenuItem, TimeWindow, Gender, RankingRequest, RankedPlace, ScoringWeights, WEATHER_WILDCARD, AFFINITY_BOTH};
pub use requests::{JoinRequest, LocationQuery, RecommendQuery};
pub use responses::{JoinResponse, WeatherResponse, TypesResponse, LocationSummary, LocationsResponse, LocationDetailResponse, HealthResponse, ErrorResponse};

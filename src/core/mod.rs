// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod ranker;
pub mod scoring;
pub mod time_window;

pub use distance::geodesic_distance_km;
pub use filters::{matches_category, is_open_at, suits_weather};
pub use ranker::Ranker;
pub use scoring::meta_score;
pub use time_window::parse_time;

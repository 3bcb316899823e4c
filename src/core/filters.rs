use chrono::NaiveTime;

use crate::error::RankError;
use crate::models::{Place, WEATHER_WILDCARD};

/// Exact category match against the requested place type
#[inline]
pub fn matches_category(place: &Place, category: &str) -> bool {
    place.category == category
}

/// Check whether a place is open at the reference time
///
/// Places without both an opening and a closing time are always open.
/// Otherwise the place is open during `[open_time, close_time)`, wrapping
/// past midnight when the closing time is not after the opening time.
#[inline]
pub fn is_open_at(place: &Place, reference_time: NaiveTime) -> Result<bool, RankError> {
    match place.opening_hours() {
        Some(hours) => hours.contains_half_open(reference_time),
        None => Ok(true),
    }
}

/// Check whether a place suits the current weather
///
/// Weather tags are lower-cased at load time, so only the request label
/// needs normalising here.
#[inline]
pub fn suits_weather(place: &Place, weather: &str) -> bool {
    let weather = weather.trim().to_lowercase();
    place
        .weather_tags
        .iter()
        .any(|tag| tag == WEATHER_WILDCARD || *tag == weather)
}

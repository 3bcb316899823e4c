use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RankError;

/// Weather tag meaning "suits all weather"
pub const WEATHER_WILDCARD: &str = "all";

/// Gender affinity value that earns the universal bonus
pub const AFFINITY_BOTH: &str = "both";

/// One catalog entry: an attraction, accommodation or food venue.
///
/// Built once by the catalog loader and never mutated afterwards. Per-request
/// values (distance, meta score) live on [`RankedPlace`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: usize,
    pub category: String,
    pub name: String,
    pub score: f64,
    pub reviews: u32,
    pub information: String,
    pub images: Vec<String>,
    #[serde(rename = "openTime")]
    pub open_time: Option<String>,
    #[serde(rename = "closeTime")]
    pub close_time: Option<String>,
    pub price: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "genderAffinity")]
    pub gender_affinity: String,
    #[serde(rename = "weatherTags")]
    pub weather_tags: Vec<String>,
    #[serde(rename = "recommendedWindows")]
    pub recommended_windows: Vec<TimeWindow>,
    pub menu: Option<Vec<MenuItem>>,
}

impl Place {
    /// First image, used as the list thumbnail
    pub fn photo(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Opening hours, or `None` when the place is always open
    pub fn opening_hours(&self) -> Option<TimeWindow> {
        match (&self.open_time, &self.close_time) {
            (Some(open), Some(close)) => Some(TimeWindow::new(open.clone(), close.clone())),
            _ => None,
        }
    }
}

/// A dish (or other line item) offered by a place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub price: String,
    pub images: Vec<String>,
}

/// A time-of-day interval kept as the raw "HH:MM" strings from the catalog.
///
/// Parsing is deferred to evaluation so a bad value surfaces as a request
/// error rather than a startup failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
}

impl TimeWindow {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Requester gender, as accepted from clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = RankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(RankError::InvalidInput(format!(
                "gender must be one of: male, female (got {:?})",
                other
            ))),
        }
    }
}

/// Inputs for one ranking call
#[derive(Debug, Clone)]
pub struct RankingRequest {
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
    pub gender: String,
    pub weather: String,
    pub reference_time: NaiveTime,
}

impl RankingRequest {
    /// Build a request evaluated at the current local wall-clock time
    pub fn now(
        category: impl Into<String>,
        latitude: f64,
        longitude: f64,
        gender: impl Into<String>,
        weather: impl Into<String>,
    ) -> Self {
        Self::at(
            category,
            latitude,
            longitude,
            gender,
            weather,
            chrono::Local::now().time(),
        )
    }

    /// Build a request evaluated at a fixed time of day
    pub fn at(
        category: impl Into<String>,
        latitude: f64,
        longitude: f64,
        gender: impl Into<String>,
        weather: impl Into<String>,
        reference_time: NaiveTime,
    ) -> Self {
        Self {
            category: category.into(),
            latitude,
            longitude,
            gender: gender.into(),
            weather: weather.into().trim().to_lowercase(),
            reference_time: truncate_to_minute(reference_time),
        }
    }

    /// Reject coordinates that cannot be measured from and, when `strict_gender`
    /// is set, genders other than male/female.
    pub fn validate(&self, strict_gender: bool) -> Result<(), RankError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(RankError::InvalidInput(format!(
                "latitude out of range: {}",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(RankError::InvalidInput(format!(
                "longitude out of range: {}",
                self.longitude
            )));
        }
        if strict_gender {
            self.gender.parse::<Gender>()?;
        }
        Ok(())
    }
}

/// Times are compared at minute granularity
pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

/// A catalog place together with the values computed for one request
#[derive(Debug, Clone, Serialize)]
pub struct RankedPlace<'a> {
    #[serde(flatten)]
    pub place: &'a Place,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
    #[serde(rename = "metaScore")]
    pub meta_score: i64,
}

/// Point values for each meta score signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    pub proximity_near: i64,
    pub proximity_mid: i64,
    pub proximity_far: i64,
    pub gender_both: i64,
    pub gender_match: i64,
    pub rating_top: i64,
    pub rating_high: i64,
    pub rating_good: i64,
    pub rating_fair: i64,
    pub rating_poor_penalty: i64,
    pub recommended_window: i64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            proximity_near: 300,
            proximity_mid: 200,
            proximity_far: 150,
            gender_both: 80,
            gender_match: 150,
            rating_top: 200,
            rating_high: 150,
            rating_good: 100,
            rating_fair: 50,
            rating_poor_penalty: -200,
            recommended_window: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_parse_is_case_insensitive() {
        assert_eq!("Male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!(" FEMALE ".parse::<Gender>().unwrap(), Gender::Female);
        assert!("both".parse::<Gender>().is_err());
    }

    #[test]
    fn test_request_truncates_seconds() {
        let time = NaiveTime::from_hms_opt(12, 30, 59).unwrap();
        let request = RankingRequest::at("foods", 33.5, 126.5, "female", "Rain", time);

        assert_eq!(request.reference_time, NaiveTime::from_hms_opt(12, 30, 0).unwrap());
        assert_eq!(request.weather, "rain");
    }

    #[test]
    fn test_validate_rejects_bad_coordinates() {
        let time = NaiveTime::from_hms_opt(12, 0, 0).unwrap();

        let request = RankingRequest::at("foods", f64::NAN, 126.5, "male", "rain", time);
        assert!(matches!(request.validate(true), Err(RankError::InvalidInput(_))));

        let request = RankingRequest::at("foods", 33.5, 181.0, "male", "rain", time);
        assert!(matches!(request.validate(true), Err(RankError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_strict_gender() {
        let time = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        let request = RankingRequest::at("foods", 33.5, 126.5, "other", "rain", time);

        assert!(request.validate(true).is_err());
        assert!(request.validate(false).is_ok());
    }

    #[test]
    fn test_opening_hours_requires_both_ends() {
        let mut place = Place {
            id: 1,
            category: "foods".to_string(),
            name: "Test".to_string(),
            score: 8.0,
            reviews: 0,
            information: String::new(),
            images: vec!["a.jpg".to_string(), "b.jpg".to_string()],
            open_time: Some("09:00".to_string()),
            close_time: None,
            price: String::new(),
            latitude: 33.5,
            longitude: 126.5,
            gender_affinity: "both".to_string(),
            weather_tags: vec!["all".to_string()],
            recommended_windows: vec![],
            menu: None,
        };

        assert_eq!(place.opening_hours(), None);
        assert_eq!(place.photo(), Some("a.jpg"));

        place.close_time = Some("22:00".to_string());
        assert_eq!(place.opening_hours(), Some(TimeWindow::new("09:00", "22:00")));
    }
}

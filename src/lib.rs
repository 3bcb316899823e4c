//! Jeju Guide - place recommendation service
//!
//! This library ranks attractions, accommodations and restaurants for a
//! traveller using distance, gender affinity, live weather and time of day.

pub mod catalog;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::catalog::Catalog;
pub use crate::core::{Ranker, distance::geodesic_distance_km};
pub use error::{CatalogError, RankError};
pub use models::{Place, MenuItem, TimeWindow, Gender, RankingRequest, RankedPlace, ScoringWeights};

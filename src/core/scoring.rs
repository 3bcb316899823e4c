use chrono::NaiveTime;

use crate::error::RankError;
use crate::models::{Place, ScoringWeights, AFFINITY_BOTH};

/// Calculate the meta score for a place
///
/// Additive over independent signals, with no clamping:
/// score = (
///     proximity_points +      # < 10 km, < 20 km, < 40 km tiers
///     gender_points +         # "both" bonus and exact-match bonus
///     rating_points +         # base rating tiers, penalty below 4.8
///     window_points           # per recommended window containing the time
/// )
///
/// # Errors
/// `InvalidTimeFormat` if any recommended window has an unparseable endpoint.
pub fn meta_score(
    place: &Place,
    distance_km: f64,
    gender: &str,
    reference_time: NaiveTime,
    weights: &ScoringWeights,
) -> Result<i64, RankError> {
    let window_points = recommended_window_points(place, reference_time, weights)?;

    Ok(proximity_points(distance_km, weights)
        + gender_points(&place.gender_affinity, gender, weights)
        + rating_points(place.score, weights)
        + window_points)
}

/// Proximity tier points
#[inline]
pub fn proximity_points(distance_km: f64, weights: &ScoringWeights) -> i64 {
    if distance_km < 10.0 {
        weights.proximity_near
    } else if distance_km < 20.0 {
        weights.proximity_mid
    } else if distance_km < 40.0 {
        weights.proximity_far
    } else {
        0
    }
}

/// Gender affinity points.
///
/// The universal bonus needs the literal affinity "both"; the match bonus
/// compares affinity and requester gender case-insensitively. Both checks
/// run independently.
#[inline]
pub fn gender_points(affinity: &str, gender: &str, weights: &ScoringWeights) -> i64 {
    let mut points = 0;
    if affinity == AFFINITY_BOTH {
        points += weights.gender_both;
    }
    if affinity.eq_ignore_ascii_case(gender.trim()) {
        points += weights.gender_match;
    }
    points
}

/// Base rating tier points
#[inline]
pub fn rating_points(score: f64, weights: &ScoringWeights) -> i64 {
    if score >= 9.5 {
        weights.rating_top
    } else if score >= 8.5 {
        weights.rating_high
    } else if score >= 7.0 {
        weights.rating_good
    } else if score >= 6.0 {
        weights.rating_fair
    } else if score >= 4.8 {
        0
    } else {
        weights.rating_poor_penalty
    }
}

/// Bonus for each recommended window containing the reference time
fn recommended_window_points(
    place: &Place,
    reference_time: NaiveTime,
    weights: &ScoringWeights,
) -> Result<i64, RankError> {
    let mut points = 0;
    for window in &place.recommended_windows {
        if window.contains(reference_time)? {
            points += weights.recommended_window;
        }
    }
    Ok(points)
}

use std::collections::HashMap;

use crate::catalog::records::{MenuRecord, PlaceRecord};
use crate::error::CatalogError;
use crate::models::{MenuItem, Place, TimeWindow};

/// Placeholder used in the source tables for "no value"
const PLACEHOLDER: &str = "-";

/// Separator between the start and end of a recommended window
const WINDOW_SEPARATOR: char = '~';

/// Build typed places from raw place and menu rows
///
/// Menus are grouped by place name first; a place with no menu rows gets
/// `menu = None`. Row numbers in errors are 1-based data rows.
pub fn build_places(
    place_records: Vec<PlaceRecord>,
    menu_records: Vec<MenuRecord>,
) -> Result<Vec<Place>, CatalogError> {
    let menus = group_menus(menu_records);

    place_records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| {
            let row = idx + 1;
            let menu = menus.get(record.name.trim()).cloned();
            build_place(row, record, menu)
        })
        .collect()
}

/// Group menu rows by the exact (trimmed) place name they reference
fn group_menus(records: Vec<MenuRecord>) -> HashMap<String, Vec<MenuItem>> {
    let mut menus: HashMap<String, Vec<MenuItem>> = HashMap::new();
    for record in records {
        menus
            .entry(record.place_name.trim().to_string())
            .or_default()
            .push(MenuItem {
                name: record.menu.trim().to_string(),
                price: record.price.trim().to_string(),
                images: split_list(&record.images),
            });
    }
    menus
}

fn build_place(
    row: usize,
    record: PlaceRecord,
    menu: Option<Vec<MenuItem>>,
) -> Result<Place, CatalogError> {
    let category = record.category.trim().to_string();
    if category.is_empty() {
        return Err(malformed("Category", row, &record.category));
    }

    let recommended_windows = parse_windows(&record.recommend_time, row);

    Ok(Place {
        id: row,
        category,
        name: record.name.trim().to_string(),
        score: parse_float("Score", row, &record.score)?,
        reviews: parse_int("Reviews", row, &record.reviews)?,
        information: record.information.trim().to_string(),
        images: split_list(&record.images),
        open_time: optional_time(&record.open_time),
        close_time: optional_time(&record.close_time),
        price: record.price.trim().to_string(),
        latitude: parse_coordinate("Latitude", row, &record.latitude)?,
        longitude: parse_coordinate("Longitude", row, &record.longitude)?,
        gender_affinity: record.gender.trim().to_string(),
        weather_tags: split_list(&record.weather)
            .into_iter()
            .map(|tag| tag.to_lowercase())
            .collect(),
        recommended_windows,
        menu,
    })
}

fn malformed(field: &str, row: usize, value: &str) -> CatalogError {
    CatalogError::MalformedRecord {
        field: field.to_string(),
        row,
        value: value.to_string(),
    }
}

fn is_placeholder(value: &str) -> bool {
    value.is_empty() || value == PLACEHOLDER
}

/// Parse a float, treating empty and "-" as 0.0 and ignoring thousands separators
pub fn parse_float(field: &str, row: usize, value: &str) -> Result<f64, CatalogError> {
    let trimmed = value.trim();
    if is_placeholder(trimmed) {
        return Ok(0.0);
    }
    trimmed
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| malformed(field, row, value))
}

/// Parse an integer, treating empty and "-" as 0 and ignoring thousands separators
pub fn parse_int(field: &str, row: usize, value: &str) -> Result<u32, CatalogError> {
    let trimmed = value.trim();
    if is_placeholder(trimmed) {
        return Ok(0);
    }
    trimmed
        .replace(',', "")
        .parse::<u32>()
        .map_err(|_| malformed(field, row, value))
}

/// Coordinates are required: no placeholder fallback
fn parse_coordinate(field: &str, row: usize, value: &str) -> Result<f64, CatalogError> {
    if is_placeholder(value.trim()) {
        return Err(malformed(field, row, value));
    }
    parse_float(field, row, value)
}

/// Split a list-valued cell on commas and newlines, dropping empty fragments
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split([',', '\n'])
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect()
}

fn optional_time(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if is_placeholder(trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse "start~end" fragments; anything not splitting into exactly two parts is dropped
pub fn parse_windows(value: &str, row: usize) -> Vec<TimeWindow> {
    split_list(value)
        .into_iter()
        .filter_map(|fragment| {
            let parts: Vec<&str> = fragment.split(WINDOW_SEPARATOR).map(str::trim).collect();
            match parts.as_slice() {
                [start, end] => Some(TimeWindow::new(*start, *end)),
                _ => {
                    tracing::warn!(
                        "Dropping malformed recommended window {:?} at row {}",
                        fragment,
                        row
                    );
                    None
                }
            }
        })
        .collect()
}

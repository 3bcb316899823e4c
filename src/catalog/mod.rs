//! In-memory place catalog, built once at startup and shared read-only.

pub mod loader;
pub mod records;

pub use loader::build_places;
pub use records::{read_records, MenuRecord, PlaceRecord};

use std::path::Path;

use crate::error::CatalogError;
use crate::models::Place;

/// Immutable set of places
///
/// Wrap in an `Arc` to share across request handlers; nothing here needs
/// locking because nothing here ever changes after construction.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    places: Vec<Place>,
}

impl Catalog {
    pub fn new(places: Vec<Place>) -> Self {
        Self { places }
    }

    /// Build a catalog from already-read place and menu rows
    pub fn from_records(
        places: Vec<PlaceRecord>,
        menus: Vec<MenuRecord>,
    ) -> Result<Self, CatalogError> {
        Ok(Self::new(build_places(places, menus)?))
    }

    /// Read both CSV files and build the catalog
    pub fn load<P: AsRef<Path>, M: AsRef<Path>>(
        places_path: P,
        menus_path: M,
    ) -> Result<Self, CatalogError> {
        let places: Vec<PlaceRecord> = read_records(places_path)?;
        let menus: Vec<MenuRecord> = read_records(menus_path)?;

        tracing::debug!("Read {} place rows and {} menu rows", places.len(), menus.len());

        Self::from_records(places, menus)
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Look up a place by its catalog id (its 1-based row)
    pub fn get(&self, id: usize) -> Option<&Place> {
        self.places
            .get(id.checked_sub(1)?)
            .filter(|place| place.id == id)
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for place in &self.places {
            if !categories.contains(&place.category) {
                categories.push(place.category.clone());
            }
        }
        categories
    }
}

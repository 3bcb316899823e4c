use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CatalogError;

/// One raw row of the places table, every column kept as text
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceRecord {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Score")]
    pub score: String,
    #[serde(rename = "Reviews")]
    pub reviews: String,
    #[serde(rename = "Information")]
    pub information: String,
    #[serde(rename = "Images")]
    pub images: String,
    #[serde(rename = "OpenTime")]
    pub open_time: String,
    #[serde(rename = "CloseTime")]
    pub close_time: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Latitude")]
    pub latitude: String,
    #[serde(rename = "Longitude")]
    pub longitude: String,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Weather")]
    pub weather: String,
    #[serde(rename = "RecommendTime")]
    pub recommend_time: String,
}

/// One raw row of the menu table, joined onto places by `place_name`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuRecord {
    #[serde(rename = "Name")]
    pub place_name: String,
    #[serde(rename = "Menu")]
    pub menu: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Images")]
    pub images: String,
}

/// Read every row of a headered CSV file
pub fn read_records<T, P>(path: P) -> Result<Vec<T>, CatalogError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let to_error = |source| CatalogError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(to_error)?;

    reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(to_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_records_with_missing_columns() {
        let path = std::env::temp_dir().join(format!("menus-{}.csv", uuid::Uuid::new_v4()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Name,Menu").unwrap();
        writeln!(file, "Olle Noodle,\"Pork noodle\"").unwrap();
        drop(file);

        let records: Vec<MenuRecord> = read_records(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].place_name, "Olle Noodle");
        assert_eq!(records[0].menu, "Pork noodle");
        assert_eq!(records[0].price, "");
    }

    #[test]
    fn test_missing_file_reports_path() {
        let result: Result<Vec<PlaceRecord>, _> = read_records("/nonexistent/places.csv");
        match result {
            Err(CatalogError::Csv { path, .. }) => {
                assert_eq!(path, std::path::PathBuf::from("/nonexistent/places.csv"));
            }
            other => panic!("expected Csv error, got {:?}", other),
        }
    }
}

// HTTP API tests for Jeju Guide

use actix_web::{test, web, App};
use async_trait::async_trait;
use jeju_guide::catalog::Catalog;
use jeju_guide::core::Ranker;
use jeju_guide::models::{
    JoinResponse, LocationDetailResponse, LocationsResponse, MenuItem, Place, TimeWindow,
    TypesResponse, WeatherResponse,
};
use jeju_guide::routes::{self, AppState};
use jeju_guide::services::{InMemoryUserDirectory, StaticWeather, WeatherError, WeatherProvider};
use serde_json::json;
use std::sync::Arc;

struct BrokenWeather;

#[async_trait]
impl WeatherProvider for BrokenWeather {
    async fn current_weather(&self, _latitude: f64, _longitude: f64) -> Result<String, WeatherError> {
        Err(WeatherError::ApiError("service unavailable".to_string()))
    }
}

fn create_place(id: usize, category: &str, name: &str, score: f64, tags: &[&str]) -> Place {
    Place {
        id,
        category: category.to_string(),
        name: name.to_string(),
        score,
        reviews: 12,
        information: format!("About {}", name),
        images: vec![format!("{}.jpg", id)],
        open_time: None,
        close_time: None,
        price: "-".to_string(),
        latitude: 33.50,
        longitude: 126.53,
        gender_affinity: "both".to_string(),
        weather_tags: tags.iter().map(|s| s.to_string()).collect(),
        recommended_windows: vec![TimeWindow::new("12:00", "13:00")],
        menu: None,
    }
}

fn create_state(weather: Arc<dyn WeatherProvider>) -> AppState {
    let mut restaurant = create_place(2, "foods", "Myeongjin Jeonbok", 9.6, &["all"]);
    restaurant.menu = Some(vec![MenuItem {
        name: "Abalone stone pot rice".to_string(),
        price: "15,000".to_string(),
        images: vec![],
    }]);

    let catalog = Catalog::new(vec![
        create_place(1, "attractions", "Art And Jeju", 8.8, &["all"]),
        restaurant,
        create_place(3, "foods", "Sunny Cafe", 9.0, &["clear"]),
        create_place(4, "accommodations", "Harbor Hotel", 7.5, &["all"]),
    ]);

    AppState {
        catalog: Arc::new(catalog),
        ranker: Ranker::with_default_weights(),
        weather,
        users: Arc::new(InMemoryUserDirectory::new()),
    }
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(routes::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_join_and_recommend() {
    let app = init_app!(create_state(Arc::new(StaticWeather::new("rain"))));

    let req = test::TestRequest::post()
        .uri("/api/v1/join")
        .set_json(json!({ "gender": "female" }))
        .to_request();
    let joined: JoinResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/users/{}/types/foods?latitude=33.4996&longitude=126.5312&time=12:30",
            joined.user_id
        ))
        .to_request();
    let body: LocationsResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.weather, "rain");
    assert_eq!(body.total_results, 1);
    assert_eq!(body.locations[0].name, "Myeongjin Jeonbok");
    assert_eq!(body.locations[0].meta_score, 300 + 80 + 200 + 100);
    assert_eq!(body.locations[0].photo.as_deref(), Some("2.jpg"));
}

#[actix_web::test]
async fn test_types_lists_catalog_categories() {
    let app = init_app!(create_state(Arc::new(StaticWeather::default())));

    let req = test::TestRequest::post()
        .uri("/api/v1/join")
        .set_json(json!({ "gender": "Male" }))
        .to_request();
    let joined: JoinResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/users/{}/types", joined.user_id))
        .to_request();
    let body: TypesResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.types, vec!["attractions", "foods", "accommodations"]);
}

#[actix_web::test]
async fn test_location_detail_includes_menu() {
    let app = init_app!(create_state(Arc::new(StaticWeather::default())));

    let req = test::TestRequest::post()
        .uri("/api/v1/join")
        .set_json(json!({ "gender": "male" }))
        .to_request();
    let joined: JoinResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/users/{}/locations/2", joined.user_id))
        .to_request();
    let body: LocationDetailResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.name, "Myeongjin Jeonbok");
    assert_eq!(body.menu.unwrap()[0].name, "Abalone stone pot rice");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/users/{}/locations/99", joined.user_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_weather_endpoint() {
    let app = init_app!(create_state(Arc::new(StaticWeather::new("Clear"))));

    let req = test::TestRequest::get()
        .uri("/api/v1/weather?latitude=33.5&longitude=126.5")
        .to_request();
    let body: WeatherResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.current_weather, "clear");
}

#[actix_web::test]
async fn test_unknown_user_is_not_found() {
    let app = init_app!(create_state(Arc::new(StaticWeather::default())));

    let req = test::TestRequest::get()
        .uri("/api/v1/users/ghost/types/foods?latitude=33.5&longitude=126.5")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_invalid_gender_rejected() {
    let app = init_app!(create_state(Arc::new(StaticWeather::default())));

    let req = test::TestRequest::post()
        .uri("/api/v1/join")
        .set_json(json!({ "gender": "robot" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_bad_time_and_coordinates_rejected() {
    let app = init_app!(create_state(Arc::new(StaticWeather::default())));

    let req = test::TestRequest::post()
        .uri("/api/v1/join")
        .set_json(json!({ "gender": "female" }))
        .to_request();
    let joined: JoinResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/users/{}/types/foods?latitude=33.5&longitude=126.5&time=noon",
            joined.user_id
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/users/{}/types/foods?latitude=133.5&longitude=126.5",
            joined.user_id
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_weather_failure_fails_request() {
    let app = init_app!(create_state(Arc::new(BrokenWeather)));

    let req = test::TestRequest::post()
        .uri("/api/v1/join")
        .set_json(json!({ "gender": "female" }))
        .to_request();
    let joined: JoinResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/users/{}/types/foods?latitude=33.5&longitude=126.5",
            joined.user_id
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 502);
}

#[actix_web::test]
async fn test_unknown_type_is_empty() {
    let app = init_app!(create_state(Arc::new(StaticWeather::default())));

    let req = test::TestRequest::post()
        .uri("/api/v1/join")
        .set_json(json!({ "gender": "female" }))
        .to_request();
    let joined: JoinResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/users/{}/types/casinos?latitude=33.5&longitude=126.5",
            joined.user_id
        ))
        .to_request();
    let body: LocationsResponse = test::call_and_read_body_json(&app, req).await;

    assert!(body.locations.is_empty());
    assert_eq!(body.total_results, 0);
}

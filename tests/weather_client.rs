//! OpenWeather client against an in-process fake of the three endpoints

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde_json::{Value, json};

use trip_planner::models::{Month, TripRequest};
use trip_planner::narrative::TemplateNarrator;
use trip_planner::{
    Catalog, OpenWeatherClient, TripPlanner, TripPlannerConfig, TripPlannerError, WeatherProvider,
    WeatherReport,
};

type Queries = Arc<Mutex<Vec<String>>>;

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn geocode(
    State(queries): State<Queries>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let q = params.get("q").cloned().unwrap_or_default();
    queries.lock().unwrap().push(q.clone());
    if q.starts_with("Atlantis") {
        return Json(json!([]));
    }
    Json(json!([
        {"name": "Tokyo", "lat": 35.6828, "lon": 139.759, "country": "JP", "local_names": {"ja": "東京都"}}
    ]))
}

async fn current() -> Json<Value> {
    Json(json!({
        "coord": {"lon": 139.759, "lat": 35.6828},
        "weather": [{"id": 801, "main": "Clouds", "description": "few clouds", "icon": "02d"}],
        "main": {"temp": 21.4, "feels_like": 21.0, "temp_min": 20.1, "temp_max": 22.3, "pressure": 1015, "humidity": 64},
        "name": "Tokyo"
    }))
}

async fn forecast() -> Json<Value> {
    let list: Vec<Value> = (0..40_i32)
        .map(|i| {
            let condition = if i % 2 == 0 { "Clear" } else { "Rain" };
            json!({
                "dt": 1_777_593_600 + i * 10_800,
                "main": {"temp": 15.0 + f64::from(i) * 0.25, "humidity": 60},
                "weather": [{"main": condition, "description": "x"}]
            })
        })
        .collect();
    Json(json!({"cod": "200", "cnt": 40, "list": list}))
}

fn fake_openweather(queries: Queries) -> Router {
    Router::new()
        .route("/geo/1.0/direct", get(geocode))
        .route("/data/2.5/weather", get(current))
        .route("/data/2.5/forecast", get(forecast))
        .with_state(queries)
}

fn config(base: &str) -> TripPlannerConfig {
    let mut config = TripPlannerConfig::default();
    config.weather.api_key = Some("test_key_12345".to_string());
    config.weather.geo_base_url = format!("{base}/geo/1.0");
    config.weather.base_url = format!("{base}/data/2.5");
    config
}

#[tokio::test]
async fn test_fetch_snapshot() {
    let queries = Queries::default();
    let base = spawn(fake_openweather(Arc::clone(&queries))).await;
    let client = OpenWeatherClient::from_config(&config(&base)).unwrap();

    let snapshot = client.fetch("Tokyo", Some("JP")).await.unwrap();

    assert_eq!(snapshot.location.name, "Tokyo");
    assert_eq!(snapshot.location.country.as_deref(), Some("JP"));
    assert_eq!(snapshot.current.humidity, 64);
    assert_eq!(snapshot.current.condition, "Clouds");
    assert_eq!(snapshot.current.description, "few clouds");
    assert_eq!(snapshot.current.format_temperature(), "21.4°C");

    assert_eq!(snapshot.forecast.len(), 5);
    let temps: Vec<f32> = snapshot.forecast.iter().map(|d| d.temperature).collect();
    assert_eq!(temps, vec![15.0, 17.0, 19.0, 21.0, 23.0]);
    assert!(snapshot.forecast.iter().all(|d| d.condition == "Clear"));

    assert_eq!(queries.lock().unwrap().as_slice(), &["Tokyo,JP".to_string()]);
}

#[tokio::test]
async fn test_geocode_without_country_code() {
    let queries = Queries::default();
    let base = spawn(fake_openweather(Arc::clone(&queries))).await;
    let client = OpenWeatherClient::from_config(&config(&base)).unwrap();

    client.geocode("San José", None).await.unwrap();

    assert_eq!(queries.lock().unwrap().as_slice(), &["San José".to_string()]);
}

#[tokio::test]
async fn test_unknown_city() {
    let base = spawn(fake_openweather(Queries::default())).await;
    let client = OpenWeatherClient::from_config(&config(&base)).unwrap();

    let err = client.fetch("Atlantis", None).await.unwrap_err();

    assert!(matches!(err, TripPlannerError::CityNotFound { .. }));
    assert_eq!(err.to_string(), "City not found: Atlantis");
}

#[tokio::test]
async fn test_server_error_on_current_weather() {
    let app = Router::new()
        .route("/geo/1.0/direct", get(geocode))
        .route(
            "/data/2.5/weather",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .route("/data/2.5/forecast", get(forecast))
        .with_state(Queries::default());
    let base = spawn(app).await;
    let client = OpenWeatherClient::from_config(&config(&base)).unwrap();

    let err = client.fetch("Tokyo", Some("JP")).await.unwrap_err();

    assert!(matches!(err, TripPlannerError::Api { .. }));
    assert!(err.to_string().contains("Failed to fetch weather data: 500"));
}

#[tokio::test]
async fn test_rejected_key() {
    let app = Router::new()
        .route("/geo/1.0/direct", get(geocode))
        .route("/data/2.5/weather", get(|| async { StatusCode::UNAUTHORIZED }))
        .with_state(Queries::default());
    let base = spawn(app).await;
    let client = OpenWeatherClient::from_config(&config(&base)).unwrap();

    let err = client.fetch("Tokyo", None).await.unwrap_err();

    assert!(err.to_string().contains("Invalid API key"));
}

#[tokio::test]
async fn test_unreachable_service() {
    let client = OpenWeatherClient::from_config(&config("http://127.0.0.1:9")).unwrap();

    let err = client.fetch("Tokyo", Some("JP")).await.unwrap_err();

    assert!(matches!(err, TripPlannerError::Api { .. }));
    assert!(err.to_string().starts_with("API error: Weather API error"));
}

#[tokio::test]
async fn test_planner_with_live_weather() {
    let base = spawn(fake_openweather(Queries::default())).await;
    let config = config(&base);
    let catalog = Arc::new(Catalog::embedded().unwrap());
    let planner = TripPlanner::new(
        Box::new(OpenWeatherClient::from_config(&config).unwrap()),
        Arc::clone(&catalog),
        Box::new(TemplateNarrator::new(catalog)),
    );

    let plan = planner
        .plan_trip(&TripRequest::new("Tokyo", 3, Month::May).unwrap())
        .await;

    match &plan.weather {
        WeatherReport::Available(snapshot) => assert_eq!(snapshot.forecast.len(), 5),
        WeatherReport::Unavailable { reason } => panic!("weather unavailable: {reason}"),
    }
    assert!(plan.itinerary.contains("**Day 3:**"));
}

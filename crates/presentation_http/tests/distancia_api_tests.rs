//! End-to-end tests for the distance service router
#![allow(clippy::expect_used)]

use std::sync::Arc;

use application::ports::{GeoRecord, GeocodeError, MockGeocodePort};
use application::services::DistanceService;
use axum_test::TestServer;
use mockall::predicate::eq;
use presentation_http::{distance_router, state::DistanceState};
use serde_json::{Value, json};

fn record(cep: &str, lat: Option<f64>, lon: Option<f64>) -> GeoRecord {
    GeoRecord {
        cep: cep.to_string(),
        latitude: lat,
        longitude: lon,
        city: Some("São Paulo".to_string()),
        state: Some("SP".to_string()),
        street: None,
        neighborhood: None,
        service: Some("open-cep".to_string()),
    }
}

fn server_with(geocode: MockGeocodePort) -> TestServer {
    let state = DistanceState {
        distance_service: Arc::new(DistanceService::new(Arc::new(geocode))),
    };
    TestServer::new(distance_router(state)).expect("test server")
}

#[tokio::test]
async fn root_returns_banner() {
    let server = server_with(MockGeocodePort::new());
    let response = server.get("/").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Distancia API ok");
}

#[tokio::test]
async fn by_coords_sao_paulo_to_rio() {
    let server = server_with(MockGeocodePort::new());
    let response = server
        .post("/distance/by-coords")
        .json(&json!({
            "origem": {"lat": -23.55, "lon": -46.63},
            "destino": {"lat": -22.90, "lon": -43.17},
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let km = body["distancia_km"].as_f64().expect("number");
    assert!((357.0..=362.0).contains(&km), "got {km}");
}

#[tokio::test]
async fn by_coords_same_point_is_zero() {
    let server = server_with(MockGeocodePort::new());
    let response = server
        .post("/distance/by-coords")
        .json(&json!({
            "origem": {"lat": -23.55, "lon": -46.63},
            "destino": {"lat": -23.55, "lon": -46.63},
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["distancia_km"].as_f64().expect("number").abs() < 1e-9);
}

#[tokio::test]
async fn by_coords_malformed_body_is_bad_request() {
    let server = server_with(MockGeocodePort::new());
    let response = server
        .post("/distance/by-coords")
        .json(&json!({"origem": {"lat": "not a number", "lon": 1.0}}))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "invalid_input");
}

#[tokio::test]
async fn by_cep_returns_distance_and_records() {
    let mut geocode = MockGeocodePort::new();
    geocode
        .expect_lookup()
        .with(eq("01310930"), eq(false))
        .times(1)
        .returning(|_, _| Ok(record("01310930", Some(-23.55), Some(-46.63))));
    geocode
        .expect_lookup()
        .with(eq("20040030"), eq(false))
        .times(1)
        .returning(|_, _| Ok(record("20040030", Some(-22.90), Some(-43.17))));

    let server = server_with(geocode);
    let response = server
        .post("/distance/by-cep")
        .json(&json!({"origem": "01310930", "destino": "20040030"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let km = body["distancia_km"].as_f64().expect("number");
    assert!((357.0..=362.0).contains(&km), "got {km}");
    assert_eq!(body["origem"]["cep"], "01310930");
    assert_eq!(body["destino"]["cep"], "20040030");
    assert_eq!(body["origem"]["city"], "São Paulo");
}

#[tokio::test]
async fn by_cep_unknown_code_is_bad_request() {
    let mut geocode = MockGeocodePort::new();
    geocode.expect_lookup().times(1).returning(|cep, _| {
        Err(GeocodeError::NotFound {
            cep: cep.to_string(),
        })
    });

    let server = server_with(geocode);
    let response = server
        .post("/distance/by-cep")
        .json(&json!({"origem": "00000000", "destino": "20040030"}))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "invalid_cep");
    assert_eq!(body["cep"], "00000000");
}

#[tokio::test]
async fn by_cep_without_coordinates_is_bad_request() {
    let mut geocode = MockGeocodePort::new();
    geocode
        .expect_lookup()
        .with(eq("01310930"), eq(false))
        .returning(|_, _| Ok(record("01310930", None, None)));
    geocode
        .expect_lookup()
        .with(eq("20040030"), eq(false))
        .returning(|_, _| Ok(record("20040030", Some(-22.90), Some(-43.17))));

    let server = server_with(geocode);
    let response = server
        .post("/distance/by-cep")
        .json(&json!({"origem": "01310930", "destino": "20040030"}))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "missing_coordinates");
    assert_eq!(body["cep"], "01310930");
}

#[tokio::test]
async fn by_cep_transport_failure_is_bad_gateway() {
    let mut geocode = MockGeocodePort::new();
    geocode
        .expect_lookup()
        .times(1)
        .returning(|_, _| Err(GeocodeError::Transport("connect timeout".to_string())));

    let server = server_with(geocode);
    let response = server
        .post("/distance/by-cep")
        .json(&json!({"origem": "01310930", "destino": "20040030"}))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["error"], "cep_lookup_failed");
}

//! API integration tests

use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use labbook_server::{api, repository::MemoryStore, AppConfig, AppState};

struct TestApp {
    base_url: String,
    client: Client,
}

impl TestApp {
    /// Serve a fresh seeded store on an ephemeral port
    async fn spawn() -> Self {
        let state = AppState::new(
            AppConfig::default(),
            Arc::new(MemoryStore::with_sample_assets()),
        );
        let app = api::create_router(state);

        let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("Failed to bind test listener");
        let addr: SocketAddr = listener.local_addr().expect("No local address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            base_url: format!("http://{}/api", addr),
            client: Client::new(),
        }
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("Failed to send request");
        let status = response.status();
        let body = response.json().await.expect("Failed to parse response");
        (status, body)
    }

    async fn send(&self, method: reqwest::Method, path: &str, body: &Value) -> (StatusCode, Value) {
        let response = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .expect("Failed to send request");
        let status = response.status();
        let body = response.json().await.expect("Failed to parse response");
        (status, body)
    }

    async fn post(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        self.send(reqwest::Method::POST, path, body).await
    }

    async fn patch(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        self.send(reqwest::Method::PATCH, path, body).await
    }
}

fn booking(asset_id: i64, slot: &str) -> Value {
    json!({
        "assetId": asset_id,
        "userEmail": "tech@lab.example",
        "purpose": "Power rail ripple measurement",
        "bookingDate": "2025-01-10",
        "timeSlot": slot,
        "duration": 1
    })
}

fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .expect("Expected an array")
        .iter()
        .map(|v| v.as_str().expect("Expected a string").to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = app.get("/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_list_assets() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/assets").await;
    assert_eq!(status, StatusCode::OK);

    let assets = body.as_array().expect("Expected an array");
    assert_eq!(assets.len(), 6);
    assert_eq!(assets[0]["id"], 1);
    assert_eq!(assets[0]["assetId"], "OSC-001");
    assert_eq!(assets[0]["calibrationStatus"], "calibrated");
    assert_eq!(assets[0]["isAvailable"], true);
    assert!(assets[0]["maintenanceStatus"].is_null());
    assert_eq!(assets[3]["maintenanceStatus"], "maintenance");
}

#[tokio::test]
async fn test_filter_assets() {
    let app = TestApp::spawn().await;

    let (_, body) = app.get("/assets?category=Multimeters").await;
    let codes: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["assetId"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["DMM-003", "DMM-004"]);

    let (_, body) = app.get("/assets?status=due_soon").await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = app.get("/assets?search=tektronix&status=all").await;
    assert_eq!(body[0]["assetId"], "OSC-002");

    let (_, body) = app.get("/assets/categories").await;
    assert_eq!(
        strings(&body),
        vec!["Oscilloscopes", "Multimeters", "Power Supplies", "Signal Generators"]
    );
}

#[tokio::test]
async fn test_get_asset() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/assets/3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["assetId"], "PSU-002");

    let (status, body) = app.get("/assets/by-code/DMM-004").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 6);

    for path in ["/assets/99", "/assets/abc", "/assets/by-code/XYZ-000"] {
        let (status, body) = app.get(path).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(body["message"], "Asset not found");
    }
}

#[tokio::test]
async fn test_booking_scenario() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/assets/1/availability/2025-01-10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        strings(&body["availableSlots"]),
        vec!["09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "16:30"]
    );
    assert!(body["bookedSlots"].as_array().unwrap().is_empty());

    let (status, created) = app.post("/bookings", &booking(1, "10:00")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["status"], "pending");
    assert_eq!(created["bookingDate"], "2025-01-10");
    assert!(created["createdAt"].is_string());

    let (_, body) = app.get("/assets/1/availability/2025-01-10").await;
    let available = strings(&body["availableSlots"]);
    assert_eq!(available.len(), 8);
    assert!(!available.contains(&"10:00".to_string()));
    assert_eq!(strings(&body["bookedSlots"]), vec!["10:00"]);

    // Other dates are unaffected
    let (_, body) = app.get("/assets/1/availability/2025-01-11").await;
    assert_eq!(strings(&body["availableSlots"]).len(), 9);

    let (status, body) = app.post("/bookings", &booking(1, "10:00")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Time slot is already booked");

    let (_, body) = app.get("/bookings").await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unavailable_asset() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/assets/4/availability/2025-01-10").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["availableSlots"].as_array().unwrap().is_empty());

    let (status, body) = app.post("/bookings", &booking(4, "09:00")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Asset is not available for booking");

    let (status, body) = app.post("/bookings", &booking(42, "09:00")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Asset not found");

    let (status, _) = app.get("/assets/42/availability/2025-01-10").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_booking_validation() {
    let app = TestApp::spawn().await;

    let mut request = booking(1, "09:00");
    request["purpose"] = json!("too short");
    request["userEmail"] = json!("nobody");

    let (status, body) = app.post("/bookings", &request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation error");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["purpose", "userEmail"]);

    let mut request = booking(1, "09:00");
    request["duration"] = json!(0);
    request["timeSlot"] = json!("17:00");
    let (status, body) = app.post("/bookings", &request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 2);

    let (status, body) = app.post("/bookings", &json!({"assetId": 1})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(
        fields,
        vec!["bookingDate", "duration", "purpose", "timeSlot", "userEmail"]
    );

    let mut request = booking(1, "09:00");
    request.as_object_mut().unwrap().remove("purpose");
    let (status, body) = app.post("/bookings", &request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "purpose");
    assert_eq!(body["errors"][0]["message"], "Purpose is required");

    // Nothing was stored
    let (_, body) = app.get("/bookings").await;
    assert!(body.as_array().unwrap().is_empty());

    let (status, _) = app.get("/assets/1/availability/not-a-date").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bad_query_string() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/assets?status=bogus").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation error");
    assert_eq!(body["errors"][0]["field"], "query");

    let (status, body) = app.get("/bookings?date=bad").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "date");
}

#[tokio::test]
async fn test_booking_lifecycle() {
    let app = TestApp::spawn().await;

    let (_, created) = app.post("/bookings", &booking(2, "13:00")).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = app
        .patch(&format!("/bookings/{id}"), &json!({"status": "confirmed"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "confirmed");
    assert_eq!(body["createdAt"], created["createdAt"]);

    let (_, stats) = app.get("/stats").await;
    assert_eq!(stats["myBookings"], 1);

    let (_, body) = app.get(&format!("/bookings/{id}")).await;
    assert_eq!(body["status"], "confirmed");

    let (_, body) = app.get("/bookings?date=2025-01-10").await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    let (_, body) = app.get("/bookings?date=2025-01-11").await;
    assert!(body.as_array().unwrap().is_empty());

    let (_, body) = app.get("/assets/2/bookings").await;
    assert_eq!(body[0]["id"], id);

    // Cancelling frees the slot
    app.patch(&format!("/bookings/{id}"), &json!({"status": "cancelled"}))
        .await;
    let (status, _) = app.post("/bookings", &booking(2, "13:00")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.get("/bookings/77").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_and_update_asset() {
    let app = TestApp::spawn().await;

    let new_asset = json!({
        "assetId": "SPA-001",
        "name": "Rigol DSA815 Spectrum Analyzer",
        "location": "Lab A-101",
        "category": "Analyzers",
        "calibrationStatus": "calibrated",
        "lastCalibrated": "2024-06-01T00:00:00Z",
        "nextDue": "2025-06-01T00:00:00Z"
    });

    let (status, created) = app.post("/assets", &new_asset).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 7);
    assert_eq!(created["isAvailable"], true);
    assert!(created["description"].is_null());

    let (_, fetched) = app.get("/assets/7").await;
    assert_eq!(fetched, created);

    let (status, _) = app.post("/assets", &new_asset).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, updated) = app
        .patch("/assets/7", &json!({"isAvailable": false, "maintenanceStatus": "repair"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["maintenanceStatus"], "repair");
    assert_eq!(updated["name"], created["name"]);

    let (_, stats) = app.get("/stats").await;
    assert_eq!(stats["available"], 5);
    assert_eq!(stats["inUse"], 0);
    assert_eq!(stats["maintenance"], 2);

    let (_, updated) = app
        .patch("/assets/7", &json!({"isAvailable": true, "maintenanceStatus": null}))
        .await;
    assert!(updated["maintenanceStatus"].is_null());

    let (status, _) = app.patch("/assets/70", &json!({"name": "Ghost"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.post("/assets", &json!({"assetId": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation error");
}

#[tokio::test]
async fn test_stats() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"available": 5, "inUse": 0, "maintenance": 1, "myBookings": 0})
    );
}

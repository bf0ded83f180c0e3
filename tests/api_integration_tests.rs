// API Integration Tests
//
// Purpose: Exercise every endpoint against the built-in catalog
// Run with: cargo test --features api --test api_integration_tests

#[cfg(feature = "api")]
mod api_tests {
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use crop_scorer_rust::{create_router, estimate_soil, AppState, ServerConfig};
    use serde_json::{json, Value};
    use tower::ServiceExt; // for oneshot

    // Helper: Create test app with the reference catalog and no simulated latency
    fn create_test_app() -> axum::Router {
        let state = AppState::new(ServerConfig::default()).expect("reference catalog must load");
        create_router(state)
    }

    // Helper: Parse JSON response
    async fn json_response(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&body).expect("Failed to parse JSON")
    }

    async fn get(uri: &str) -> axum::response::Response {
        create_test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_json(uri: &str, payload: Value) -> axum::response::Response {
        create_test_app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    fn alluvial_soil() -> Value {
        json!({
            "type": "Alluvial",
            "ph": 7.0,
            "nitrogen": "Medium",
            "phosphorus": "Medium",
            "potassium": "Medium",
            "organicMatter": "Medium"
        })
    }

    // =========================================================================
    // Section 1: Health, locations, languages
    // =========================================================================

    #[tokio::test]
    async fn test_health_check() {
        let response = get("/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_list_locations() {
        let response = get("/api/locations").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        let locations = body.as_array().unwrap();
        assert_eq!(locations.len(), 4);
        assert_eq!(locations[0]["name"], "North Field");
        assert!(locations[0]["lat"].is_f64());
    }

    #[tokio::test]
    async fn test_list_languages() {
        let body = json_response(get("/api/languages").await).await;
        let codes: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["code"].as_str().unwrap())
            .collect();
        assert_eq!(codes, ["en", "hi", "te"]);
    }

    #[tokio::test]
    async fn test_location_report() {
        let response = get("/api/locations/2/report").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        let report = &body["report"];
        assert_eq!(report["location"]["id"], 2);
        assert!(report["weather"]["temperature"].is_f64());
        assert!(report["soil"]["type"].is_string());

        let suggestions = report["suggestions"].as_array().unwrap();
        assert!(suggestions.len() <= 5);
        assert_eq!(report["calendar"].as_array().unwrap().len(), suggestions.len());
        assert_eq!(body["monthLabels"].as_array().unwrap().len(), 12);
        assert!(body["weatherIconUrl"].as_str().unwrap().ends_with(".png"));
    }

    #[tokio::test]
    async fn test_location_report_non_numeric_id() {
        let response = get("/api/locations/north/report").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_response(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_location_report_not_found() {
        let response = get("/api/locations/99/report").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = json_response(response).await;
        assert!(body["error"].as_str().unwrap().contains("99"));
    }

    // =========================================================================
    // Section 2: Estimators
    // =========================================================================

    #[tokio::test]
    async fn test_soil_estimate_is_deterministic() {
        let app = create_test_app();
        let uri = "/api/soil?lat=28.7041&lng=77.1025";

        let first = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let second = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(first.status(), StatusCode::OK);
        let first = json_response(first).await;
        let second = json_response(second).await;
        assert_eq!(first, second);

        let ph = first["ph"].as_f64().unwrap();
        assert!((5.5..=8.5).contains(&ph));
    }

    #[tokio::test]
    async fn test_soil_nearby_coordinates_not_shared() {
        let app = create_test_app();

        // Both round to 0.070000 but straddle a soil type boundary
        for (lat, lng) in [(0.07, 100.0), (0.0699996, 100.0)] {
            let uri = format!("/api/soil?lat={}&lng={}", lat, lng);
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            let body = json_response(response).await;
            assert_eq!(body, serde_json::to_value(estimate_soil(lat, lng)).unwrap(), "({}, {})", lat, lng);
        }
    }

    #[tokio::test]
    async fn test_soil_requires_coordinates() {
        let response = get("/api/soil?lat=10.0").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_response(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_weather_rejects_malformed_coordinates() {
        let response = get("/api/weather?lat=north&lng=77.1").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_response(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_weather_estimate() {
        let response = get("/api/weather?lat=0.0&lng=0.0").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        let weather = &body["weather"];
        assert_eq!(weather["temperature"].as_f64().unwrap(), 25.0);
        assert_eq!(weather["humidity"].as_f64().unwrap(), 70.0);
        assert_eq!(weather["location"], "Farm at 0.00, 0.00");
        assert!(weather["description"].is_string());
    }

    #[tokio::test]
    async fn test_current_season() {
        let body = json_response(get("/api/season").await).await;
        let season = body["season"].as_str().unwrap();
        assert!(["Kharif", "Rabi", "Zaid"].contains(&season));
    }

    // =========================================================================
    // Section 3: Catalog and calendar
    // =========================================================================

    #[tokio::test]
    async fn test_catalog() {
        let body = json_response(get("/api/crops/catalog").await).await;
        let crops = body.as_array().unwrap();
        assert_eq!(crops.len(), 8);
        assert_eq!(crops[0]["name"], "Wheat");
        assert_eq!(crops[0]["waterRequirement"], "Medium");
        assert_eq!(crops[3]["season"], "Year-round");
    }

    #[tokio::test]
    async fn test_crop_calendar() {
        let response = get("/api/crops/mustard/calendar").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["crop"], "Mustard");
        let months = body["months"].as_array().unwrap();
        assert_eq!(months.len(), 12);
        // Rabi sowing in November, 110 days wraps into the new year
        assert_eq!(months[10], "sowing");
        assert_eq!(months[1], "harvest");
    }

    #[tokio::test]
    async fn test_crop_calendar_unknown_crop() {
        let response = get("/api/crops/quinoa/calendar").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // =========================================================================
    // Section 4: Suggestions
    // =========================================================================

    #[tokio::test]
    async fn test_suggest_crops() {
        let response = post_json(
            "/api/crops/suggest",
            json!({
                "soil": alluvial_soil(),
                "temperature": 30.0,
                "humidity": 55.0,
                "season": "Kharif"
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["season"], "Kharif");
        assert!(body.get("breakdown").is_none());

        let suggestions = body["suggestions"].as_array().unwrap();
        let names: Vec<&str> = suggestions.iter().map(|s| s["name"].as_str().unwrap()).collect();
        assert_eq!(names, ["Cotton", "Maize", "Rice", "Sugarcane", "Tomato"]);
        assert_eq!(suggestions[0]["confidence"], 100);
        assert_eq!(suggestions[4]["confidence"], 75);
    }

    #[tokio::test]
    async fn test_suggest_crops_with_breakdown() {
        let response = post_json(
            "/api/crops/suggest",
            json!({
                "soil": alluvial_soil(),
                "temperature": 30.0,
                "humidity": 55.0,
                "season": "Kharif",
                "explain": true
            }),
        )
        .await;

        let body = json_response(response).await;
        let breakdown = body["breakdown"].as_array().unwrap();
        assert_eq!(breakdown.len(), 5);
        assert_eq!(breakdown[2]["crop"], "Rice");
        assert_eq!(breakdown[2]["points"]["water"], 0);
        assert_eq!(breakdown[2]["points"]["season"], 30);
    }

    #[tokio::test]
    async fn test_suggest_crops_nothing_suitable() {
        let response = post_json(
            "/api/crops/suggest",
            json!({
                "soil": {
                    "type": "Black",
                    "ph": 7.0,
                    "nitrogen": "Low",
                    "phosphorus": "Low",
                    "potassium": "Low",
                    "organicMatter": "Low"
                },
                "temperature": -20.0,
                "humidity": 30.0,
                "season": "None"
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert!(body["suggestions"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_suggest_crops_rejects_malformed_body() {
        let response = post_json("/api/crops/suggest", json!({ "temperature": 30.0 })).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_response(response).await;
        assert!(body["error"].as_str().unwrap().contains("soil"));
    }

    #[tokio::test]
    async fn test_suggest_batch() {
        let request = |humidity: f64| {
            json!({
                "soil": alluvial_soil(),
                "temperature": 30.0,
                "humidity": humidity,
                "season": "Kharif"
            })
        };
        let response = post_json(
            "/api/crops/suggest/batch",
            json!({ "requests": [request(55.0), request(65.0)] }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["count"], 2);
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0][0]["name"], "Cotton");

        // At 65% both Medium and High water needs are met
        let names: Vec<&str> = results[1]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["Rice", "Cotton", "Sugarcane", "Maize", "Tomato"]);
        assert_eq!(results[1][0]["confidence"], 100);
    }
}

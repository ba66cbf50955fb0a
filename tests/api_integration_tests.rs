// API integration tests
//
// Purpose: Exercise every endpoint against the embedded dictionaries
// Run with: cargo test --features api --test api_integration_tests

#[cfg(feature = "api")]
mod api_tests {
    use agri_advisor::{create_router, AppConfig, AppState, LanguageCode};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt; // for oneshot

    // Helper: Router over embedded dictionaries with default config
    fn create_test_app() -> axum::Router {
        let state = AppState::new(AppConfig::default()).expect("embedded dictionaries load");
        create_router(state)
    }

    // Helper: Parse JSON response
    async fn json_response(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&body).expect("Failed to parse JSON")
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        let response = create_test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        (status, json_response(response).await)
    }

    async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        (status, json_response(response).await)
    }

    // =========================================================================
    // Section 1: Health Check
    // =========================================================================

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }

    // =========================================================================
    // Section 2: Languages and dictionaries
    // =========================================================================

    #[tokio::test]
    async fn test_list_languages() {
        let (status, body) = get("/api/languages").await;
        assert_eq!(status, StatusCode::OK);

        let languages = body.as_array().unwrap();
        assert_eq!(languages.len(), 8);
        assert_eq!(languages[0]["code"], "en");
        assert_eq!(languages[1]["nativeName"], "हिंदी");
    }

    #[tokio::test]
    async fn test_get_translations() {
        let (status, body) = get("/api/translations/hi").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["language"], "hi");
        assert!(body["translations"]["navbar.home"].is_string());
        assert_eq!(body["count"], body["translations"].as_object().unwrap().len());
    }

    #[tokio::test]
    async fn test_get_translations_unknown_language() {
        let (status, body) = get("/api/translations/fr").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("fr"));
    }

    // =========================================================================
    // Section 3: Translate
    // =========================================================================

    #[tokio::test]
    async fn test_translate_with_params() {
        let (status, body) = post(
            "/api/translate",
            json!({"key": "greeting.welcome", "params": {"name": "Ramesh"}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "Welcome back, Ramesh!");
        assert_eq!(body["language"], "en");
        assert_eq!(body["source"], "active");
    }

    #[tokio::test]
    async fn test_translate_falls_back_to_english() {
        let (status, body) = post(
            "/api/translate",
            json!({"key": "economic.note", "language": "hi"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["text"],
            "Figures are estimates based on average market rates and yields."
        );
        assert_eq!(body["source"], "default");
    }

    #[tokio::test]
    async fn test_translate_missing_key() {
        let (_, body) = post("/api/translate", json!({"key": "nope.missing"})).await;
        assert_eq!(body["text"], "nope.missing");
        assert_eq!(body["source"], "key");

        let (_, body) = post(
            "/api/translate",
            json!({"key": "nope.missing", "fallback": "Not available"}),
        )
        .await;
        assert_eq!(body["text"], "Not available");
    }

    #[tokio::test]
    async fn test_translate_rejects_unknown_language() {
        let (status, body) = post(
            "/api/translate",
            json!({"key": "navbar.home", "language": "xx"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_translate_plural() {
        let (status, body) = post(
            "/api/translate/plural",
            json!({"key": "items", "count": 3}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "You have 3 items");

        let (_, body) = post("/api/translate/plural", json!({"key": "items", "count": 1})).await;
        assert_eq!(body["text"], "You have 1 item");
    }

    // =========================================================================
    // Section 4: Coverage
    // =========================================================================

    #[tokio::test]
    async fn test_coverage() {
        let (status, body) = get("/api/coverage").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["default_language"], "en");

        let languages = body["languages"].as_array().unwrap();
        let hindi = languages
            .iter()
            .find(|l| l["language"] == LanguageCode::Hi.code())
            .unwrap();
        assert!(hindi["orphans"].as_array().unwrap().is_empty());
        assert!(!hindi["missing"].as_array().unwrap().is_empty());
    }

    // =========================================================================
    // Section 5: Economics and seasons
    // =========================================================================

    #[tokio::test]
    async fn test_economics_rice() {
        let (status, body) = post("/api/economics", json!({"crop": "Rice", "area": 2.0})).await;
        assert_eq!(status, StatusCode::OK);

        let report = &body["report"];
        assert_eq!(report["crop"], "Rice");
        assert_eq!(report["total_cost"].as_f64().unwrap(), 64_800.0);
        assert_eq!(report["gross_income"].as_f64().unwrap(), 280_000.0);
        assert_eq!(report["verdict"], "profitable");
        assert_eq!(
            body["localized"]["verdict_text"],
            "This looks like a profitable venture"
        );
    }

    #[tokio::test]
    async fn test_economics_localized_with_multipliers() {
        let (status, body) = post(
            "/api/economics",
            json!({
                "crop": "cotton",
                "area": 1.0,
                "season": "kharif",
                "irrigation": "drip",
                "language": "hi"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["report"]["season"], "monsoon");
        assert_eq!(body["report"]["irrigation"], "drip");
        assert_eq!(body["localized"]["language"], "hi");
    }

    #[tokio::test]
    async fn test_economics_invalid_input() {
        let (status, _) = post("/api/economics", json!({"crop": "Rice", "area": 0.0})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post("/api/economics", json!({"crop": "  ", "area": 1.0})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = post(
            "/api/economics",
            json!({"crop": "Rice", "area": 1.0, "irrigation": "canal"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("canal"));
    }

    #[tokio::test]
    async fn test_seasons() {
        let (status, body) = get("/api/seasons?language=en").await;
        assert_eq!(status, StatusCode::OK);

        let seasons = body["seasons"].as_array().unwrap();
        assert_eq!(seasons.len(), 4);
        assert_eq!(seasons[0]["season"], "monsoon");
        assert_eq!(seasons[0]["crops"][0], "Rice");
        assert_eq!(body["tips"].as_array().unwrap().len(), 4);
    }
}

//! Tests for the MailGuard proxy server
//!
//! Endpoint tests run the real router against a stub analyzer served on a
//! local socket, so the upstream hop is exercised for real. Property tests
//! fuzz request validation.

#[cfg(test)]
mod http_endpoint_tests {
    use axum::{
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use axum_test::TestServer;
    use serde_json::json;

    use crate::api::{handle_analyze, handle_health, handle_list_rules, handle_preview};
    use crate::client::AnalyzerClient;
    use crate::AppState;

    /// Serve a canned analyzer on a local socket; returns its base URL.
    async fn spawn_stub_analyzer(verdict: serde_json::Value) -> String {
        let rules = json!([
            {
                "id": "urgency_wire",
                "title": "Urgent wire transfer request",
                "weight": 40,
                "severity": "high",
                "tags": ["payment", "urgency"]
            },
            {
                "id": "reply_to_mismatch",
                "title": "Reply-To differs from sender",
                "weight": 25,
                "severity": "medium",
                "tags": ["headers"]
            }
        ]);

        let analyze_body = verdict.clone();
        let app = Router::new()
            .route("/health", get(|| async { Json(json!({"status": "ok"})) }))
            .route(
                "/rules",
                get(move || {
                    let body = rules.clone();
                    async move { Json(body) }
                }),
            )
            .route(
                "/analyze",
                post(move || {
                    let body = analyze_body.clone();
                    async move { Json(body) }
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// Serve an analyzer that fails every call.
    async fn spawn_broken_analyzer() -> String {
        let app = Router::new().route(
            "/analyze",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// Create a test server for the proxy pointed at the given analyzer.
    fn create_test_server(analyzer_url: &str) -> TestServer {
        let state = AppState {
            analyzer: AnalyzerClient::new(analyzer_url, 2000).unwrap(),
        };

        let app = Router::new()
            .route("/health", get(handle_health))
            .route("/api/rules", get(handle_list_rules))
            .route("/api/preview", post(handle_preview))
            .route("/api/analyze", post(handle_analyze))
            .with_state(state);

        TestServer::new(app).unwrap()
    }

    fn sample_verdict() -> serde_json::Value {
        json!({
            "score": 72,
            "severity": "high",
            "action": "block",
            "recommendations": ["block", "report"],
            "hits": [
                {
                    "rule_id": "urgency_wire",
                    "title": "Urgent wire transfer request",
                    "weight": 40,
                    "severity": "high",
                    "action": "block",
                    "explain": "Urgent payment language is a common pressure tactic.",
                    "tags": ["payment"],
                    "evidence": [
                        {
                            "kind": "keyword",
                            "pattern": "wire transfer",
                            "match": "wire transfer",
                            "start": 20,
                            "end": 33,
                            "snippet": "...urgent wire transfer today..."
                        }
                    ]
                }
            ],
            "highlights": [
                {"start": 9, "end": 15, "rule_id": "urgency_wire", "label": "Urgency"},
                {"start": 11, "end": 15, "rule_id": "urgency_wire", "label": "Urgency"},
                {"start": 26, "end": 39, "rule_id": "urgency_wire", "label": "Payment pressure"}
            ]
        })
    }

    #[tokio::test]
    async fn test_health_returns_200() {
        let analyzer = spawn_stub_analyzer(sample_verdict()).await;
        let server = create_test_server(&analyzer);

        let response = server.get("/health").await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "mailguard-api");
    }

    #[tokio::test]
    async fn test_rules_forwarded_from_analyzer() {
        let analyzer = spawn_stub_analyzer(sample_verdict()).await;
        let server = create_test_server(&analyzer);

        let response = server.get("/api/rules").await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert!(json["success"].as_bool().unwrap());
        assert_eq!(json["count"], 2);
        assert_eq!(json["rules"][0]["id"], "urgency_wire");
    }

    #[tokio::test]
    async fn test_preview_returns_assembled_text() {
        let analyzer = spawn_stub_analyzer(sample_verdict()).await;
        let server = create_test_server(&analyzer);

        let response = server
            .post("/api/preview")
            .json(&json!({
                "subject": "Urgent!",
                "body": "Send the wire transfer today.",
                "from_email": "ceo@c0mpany.example"
            }))
            .await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(
            json["text"],
            "Subject: Urgent!\nFrom: ceo@c0mpany.example\nBody:\nSend the wire transfer today."
        );
        assert_eq!(
            json["char_count"].as_u64().unwrap() as usize,
            json["text"].as_str().unwrap().chars().count()
        );
    }

    #[tokio::test]
    async fn test_analyze_enriches_verdict_with_segments() {
        let analyzer = spawn_stub_analyzer(sample_verdict()).await;
        let server = create_test_server(&analyzer);

        let response = server
            .post("/api/analyze")
            .json(&json!({
                "subject": "Urgent!",
                "body": "Send the wire transfer today."
            }))
            .await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert!(json["success"].as_bool().unwrap());
        assert_eq!(json["score"], 72);
        assert_eq!(json["severity"], "high");
        assert_eq!(json["action"], "block");
        assert_eq!(json["hits"][0]["rule_id"], "urgency_wire");
        assert!(json["checked_at"].as_u64().unwrap() > 0);

        // The two overlapping urgency spans collapse to one mark.
        assert_eq!(json["marked_count"], 2);

        // Segments must rebuild the text exactly.
        let text = json["text"].as_str().unwrap();
        let rebuilt: String = json["segments"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["text"].as_str().unwrap())
            .collect();
        assert_eq!(rebuilt, text);
    }

    #[tokio::test]
    async fn test_analyze_rejects_empty_request() {
        let analyzer = spawn_stub_analyzer(sample_verdict()).await;
        let server = create_test_server(&analyzer);

        let response = server.post("/api/analyze").json(&json!({})).await;
        response.assert_status_bad_request();

        let json = response.json::<serde_json::Value>();
        assert!(!json["success"].as_bool().unwrap());
        assert_eq!(json["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_analyze_surfaces_upstream_failure_as_bad_gateway() {
        let analyzer = spawn_broken_analyzer().await;
        let server = create_test_server(&analyzer);

        let response = server
            .post("/api/analyze")
            .json(&json!({"body": "hello"}))
            .await;
        response.assert_status(StatusCode::BAD_GATEWAY);

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["code"], "ANALYZER_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_drops_out_of_range_highlights() {
        let verdict = json!({
            "score": 10,
            "severity": "low",
            "action": "allow",
            "recommendations": ["allow"],
            "hits": [],
            "highlights": [
                {"start": 5000, "end": 6000, "rule_id": "ghost", "label": "Ghost"},
                {"start": 7, "end": 2, "rule_id": "inverted", "label": "Inverted"}
            ]
        });
        let analyzer = spawn_stub_analyzer(verdict).await;
        let server = create_test_server(&analyzer);

        let response = server
            .post("/api/analyze")
            .json(&json!({"body": "hi"}))
            .await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["marked_count"], 0);
        assert_eq!(json["segments"].as_array().unwrap().len(), 1);
        assert_eq!(json["segments"][0]["kind"], "plain");
    }
}

#[cfg(test)]
mod validation_property_tests {
    use proptest::prelude::*;
    use shared_types::{AnalyzeRequest, AttachmentMeta};

    fn arb_optional_text(max: usize) -> impl Strategy<Value = Option<String>> {
        prop::option::of(proptest::collection::vec(any::<char>(), 0..max).prop_map(|chars| {
            chars.into_iter().collect::<String>()
        }))
    }

    proptest! {
        /// Property: validation accepts exactly the requests with content.
        #[test]
        fn validation_matches_content_presence(
            subject in arb_optional_text(40),
            body in arb_optional_text(40),
            headers_raw in arb_optional_text(40),
            filenames in prop::collection::vec("[a-z]{1,12}\\.(pdf|zip|exe)", 0..4),
        ) {
            let request = AnalyzeRequest {
                subject: subject.clone(),
                body: body.clone(),
                headers_raw: headers_raw.clone(),
                attachments: filenames.iter().map(|f| AttachmentMeta::new(f)).collect(),
                ..Default::default()
            };

            let has_text = [&subject, &body, &headers_raw]
                .iter()
                .any(|f| f.as_deref().is_some_and(|s| !s.trim().is_empty()));
            let expected_ok = has_text || !filenames.is_empty();

            prop_assert_eq!(request.validate().is_ok(), expected_ok);
        }

        /// Property: serialization round-trips every well-formed request.
        #[test]
        fn request_json_roundtrip(
            subject in arb_optional_text(40),
            body in arb_optional_text(40),
            from_email in prop::option::of("[a-z]{1,10}@[a-z]{1,10}\\.example"),
        ) {
            let request = AnalyzeRequest {
                subject,
                body,
                from_email,
                ..Default::default()
            };
            let json = serde_json::to_string(&request).unwrap();
            let back: AnalyzeRequest = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back, request);
        }
    }
}

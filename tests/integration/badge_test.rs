//! Integration tests for badge upload, retrieval, update, search, and reports.

mod helpers;

use axum::http::StatusCode;
use serde_json::{Value, json};
use sha2::{Digest, Sha256};

use badgehub_core::config::AppConfig;
use helpers::{Part, TestApp};

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-bytes";

fn badge_data(id: &str) -> Value {
    json!({
        "id": id,
        "version": "2.0",
        "type": "Assertion",
        "badgeName": format!("Badge {id}"),
        "description": "Awarded for testing",
        "issuerName": "Test Issuer",
        "issuerUrl": "https://issuer.example",
        "issuerEmail": "badges@issuer.example",
        "credentialProvider": "Credly",
        "issuanceDate": "2024-05-01",
        "expiresDate": null,
        "recipientIdentity": "sha256$cafe",
        "rawData": {"@context": "https://w3id.org/openbadges/v2", "evidence": [1, 2]}
    })
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({"status": "healthy", "message": "Backend is running"})
    );
}

#[tokio::test]
async fn test_upload_then_get_round_trips_with_hash() {
    let app = TestApp::new().await;

    let created = app.upload_badge(badge_data("b-1"), Some(("image/png", PNG))).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["id"], "b-1");
    assert_eq!(created.body["hasImage"], true);
    assert!(created.body.get("imageData").is_none());

    let fetched = app.request("GET", "/api/badges/b-1", None).await;
    assert_eq!(fetched.status, StatusCode::OK);

    let body = &fetched.body;
    for key in [
        "version",
        "type",
        "badgeName",
        "description",
        "issuerName",
        "issuerUrl",
        "issuerEmail",
        "credentialProvider",
        "issuanceDate",
        "expiresDate",
        "recipientIdentity",
        "rawData",
    ] {
        assert_eq!(body[key], badge_data("b-1")[key], "field {key}");
    }

    let expected_hash = hex::encode(Sha256::digest(PNG));
    assert_eq!(body["imageHash"], expected_hash.as_str());
    assert_eq!(body["imageData"], hex::encode(PNG).as_str());
    assert_eq!(body["imageMimeType"], "image/png");
    assert!(body["uploadedAt"].is_string());
}

#[tokio::test]
async fn test_upload_without_image() {
    let app = TestApp::new().await;

    let created = app.upload_badge(json!({"id": "plain"}), None).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["hasImage"], false);
    assert_eq!(created.body["imageHash"], Value::Null);
    assert_eq!(created.body["badgeName"], Value::Null);

    let image = app.request("GET", "/api/badges/plain/image", None).await;
    assert_eq!(image.status, StatusCode::NOT_FOUND);
    assert_eq!(image.error(), "Badge or image not found");
}

#[tokio::test]
async fn test_empty_file_part_is_ignored() {
    let app = TestApp::new().await;
    let data = json!({"id": "blank-file"}).to_string();

    let response = app
        .upload(&[
            Part::Text {
                name: "badgeData",
                value: &data,
            },
            Part::File {
                name: "file",
                file_name: "",
                content_type: "application/octet-stream",
                data: b"",
            },
        ])
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["hasImage"], false);

    let stats = app.request("GET", "/api/stats", None).await;
    assert_eq!(stats.body["badgesWithImages"], 0);
}

#[tokio::test]
async fn test_upload_rejects_bad_metadata() {
    let app = TestApp::new().await;

    let missing = app.upload(&[]).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.error(), "Missing badgeData");

    let garbled = app
        .upload(&[Part::Text {
            name: "badgeData",
            value: "{not json",
        }])
        .await;
    assert_eq!(garbled.status, StatusCode::BAD_REQUEST);
    assert!(garbled.error().starts_with("Invalid badgeData"));

    let no_id = app.upload_badge(json!({"badgeName": "Anonymous"}), None).await;
    assert_eq!(no_id.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_id.error(), "Missing badge id");

    let long_id = app.upload_badge(json!({"id": "x".repeat(51)}), None).await;
    assert_eq!(long_id.status, StatusCode::BAD_REQUEST);

    let not_multipart = app
        .request("POST", "/api/badges", Some(json!({"id": "json"})))
        .await;
    assert_eq!(not_multipart.status, StatusCode::BAD_REQUEST);
    assert!(!not_multipart.error().is_empty());

    let listed = app.request("GET", "/api/badges", None).await;
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn test_duplicate_upload_is_rejected_and_original_kept() {
    let app = TestApp::new().await;
    app.upload_badge(badge_data("dup"), Some(("image/png", PNG))).await;

    let mut second = badge_data("dup");
    second["badgeName"] = json!("Replacement");
    let response = app.upload_badge(second, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.error().contains("already exists"));

    let stored = app.request("GET", "/api/badges/dup", None).await;
    assert_eq!(stored.body["badgeName"], "Badge dup");
    assert_eq!(stored.body["hasImage"], true);
}

#[tokio::test]
async fn test_get_unknown_badge_is_404() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/badges/nope", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({"error": "Badge not found"}));
}

#[tokio::test]
async fn test_image_route_serves_raw_bytes() {
    let app = TestApp::new().await;
    app.upload_badge(json!({"id": "svg"}), Some(("image/svg+xml", &b"<svg/>"[..])))
        .await;

    let response = app.request("GET", "/api/badges/svg/image", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers["content-type"], "image/svg+xml");
    assert_eq!(response.bytes, b"<svg/>");
}

#[tokio::test]
async fn test_list_omits_image_bytes() {
    let app = TestApp::new().await;
    app.upload_badge(badge_data("with"), Some(("image/png", PNG))).await;
    app.upload_badge(badge_data("without"), None).await;

    let response = app.request("GET", "/api/badges", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let badges = response.body.as_array().unwrap();
    assert_eq!(badges.len(), 2);
    for badge in badges {
        assert!(badge.get("imageData").is_none());
        assert!(badge.get("imageMimeType").is_some());
        let expect_image = badge["id"] == "with";
        assert_eq!(badge["hasImage"], expect_image);
    }
}

#[tokio::test]
async fn test_partial_update() {
    let app = TestApp::new().await;
    app.upload_badge(badge_data("u"), Some(("image/png", PNG))).await;
    let before = app.request("GET", "/api/badges/u", None).await.body;

    let response = app
        .request(
            "PUT",
            "/api/badges/u",
            Some(json!({
                "badgeName": "Renamed",
                "issuerUrl": null,
                "id": "other",
                "imageData": "00",
                "uploadedAt": "1999-01-01T00:00:00Z"
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["badgeName"], "Renamed");
    assert_eq!(response.body["issuerUrl"], Value::Null);
    assert!(response.body.get("imageData").is_none());

    let after = app.request("GET", "/api/badges/u", None).await.body;
    assert_eq!(after["id"], "u");
    assert_eq!(after["description"], before["description"]);
    assert_eq!(after["issuerName"], before["issuerName"]);
    assert_eq!(after["imageData"], before["imageData"]);
    assert_eq!(after["imageHash"], before["imageHash"]);
    assert_eq!(after["uploadedAt"], before["uploadedAt"]);
    assert_eq!(after["rawData"], before["rawData"]);
}

#[tokio::test]
async fn test_update_errors() {
    let app = TestApp::new().await;

    let missing = app
        .request("PUT", "/api/badges/ghost", Some(json!({"badgeName": "x"})))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    app.upload_badge(json!({"id": "u2"}), None).await;
    let bad_type = app
        .request("PUT", "/api/badges/u2", Some(json!({"badgeName": 7})))
        .await;
    assert_eq!(bad_type.status, StatusCode::BAD_REQUEST);
    assert!(!bad_type.error().is_empty());

    let not_json = app
        .send("PUT", "/api/badges/u2", Some("application/json"), b"{oops".to_vec())
        .await;
    assert_eq!(not_json.status, StatusCode::BAD_REQUEST);

    let ghost_not_json = app
        .send("PUT", "/api/badges/ghost", Some("application/json"), b"{oops".to_vec())
        .await;
    assert_eq!(ghost_not_json.status, StatusCode::NOT_FOUND);
    assert_eq!(ghost_not_json.error(), "Badge not found");

    let ghost_array = app
        .request("PUT", "/api/badges/ghost", Some(json!(["x"])))
        .await;
    assert_eq!(ghost_array.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_with_non_object_body_changes_nothing() {
    let app = TestApp::new().await;
    let mut data = badge_data("p");
    data["badgeName"] = json!("Orig");
    app.upload_badge(data, None).await;

    for body in [json!(["Hacked"]), json!("Hacked"), json!(42)] {
        let response = app.request("PUT", "/api/badges/p", Some(body.clone())).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(response.error(), "Request body must be a JSON object");
    }

    let stored = app.request("GET", "/api/badges/p", None).await;
    assert_eq!(stored.body["badgeName"], "Orig");
    assert_eq!(stored.body["description"], "Awarded for testing");
}

#[tokio::test]
async fn test_upload_with_array_badge_data_is_rejected() {
    let app = TestApp::new().await;

    let positional = json!([
        "arr", "2.0", "Assertion", "Array Badge", "desc", "Issuer", "https://issuer.example",
        "a@b.example", "Credly", "2024-01-01", null, "someone", {}
    ]);
    let response = app.upload_badge(positional, Some(("image/png", PNG))).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Invalid badgeData: expected a JSON object");

    let missing = app.request("GET", "/api/badges/arr", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    let listed = app.request("GET", "/api/badges", None).await;
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn test_delete_then_get_and_delete_again() {
    let app = TestApp::new().await;
    app.upload_badge(badge_data("d"), Some(("image/png", PNG))).await;

    let deleted = app.request("DELETE", "/api/badges/d", None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body, json!({"message": "Badge deleted successfully"}));

    let get = app.request("GET", "/api/badges/d", None).await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);

    let again = app.request("DELETE", "/api/badges/d", None).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search() {
    let app = TestApp::new().await;

    let mut alpha = badge_data("alpha");
    alpha["badgeName"] = json!("Alpha Award");
    app.upload_badge(alpha, None).await;

    let mut described = badge_data("described");
    described["badgeName"] = json!("Something");
    described["description"] = json!("part of the alpha program");
    described["credentialProvider"] = json!("Badgr");
    app.upload_badge(described, None).await;

    let mut unrelated = badge_data("unrelated");
    unrelated["badgeName"] = json!("Gamma");
    unrelated["description"] = json!("nothing here");
    unrelated["issuerName"] = json!("Other Org");
    unrelated["issuerUrl"] = json!("https://other.example");
    app.upload_badge(unrelated, None).await;

    let ids = |body: &Value| -> Vec<String> {
        let mut ids: Vec<String> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["id"].as_str().unwrap().to_string())
            .collect();
        ids.sort();
        ids
    };

    let term = app
        .request("POST", "/api/badges/search", Some(json!({"search": "alpha"})))
        .await;
    assert_eq!(term.status, StatusCode::OK);
    assert_eq!(ids(&term.body), vec!["alpha", "described"]);

    let by_url = app
        .request(
            "POST",
            "/api/badges/search",
            Some(json!({"issuer": "https://other.example"})),
        )
        .await;
    assert_eq!(ids(&by_url.body), vec!["unrelated"]);

    let combined = app
        .request(
            "POST",
            "/api/badges/search",
            Some(json!({"issuer": "Test Issuer", "provider": "Credly", "search": "ALPHA"})),
        )
        .await;
    assert_eq!(ids(&combined.body), vec!["alpha"]);

    let blank = app
        .request(
            "POST",
            "/api/badges/search",
            Some(json!({"issuer": "", "provider": "", "search": ""})),
        )
        .await;
    assert_eq!(ids(&blank.body).len(), 3);

    let empty_body = app.send("POST", "/api/badges/search", None, Vec::new()).await;
    assert_eq!(empty_body.status, StatusCode::OK);
    assert_eq!(ids(&empty_body.body).len(), 3);

    let null_body = app
        .send("POST", "/api/badges/search", Some("application/json"), b"null".to_vec())
        .await;
    assert_eq!(null_body.status, StatusCode::OK);
    assert_eq!(ids(&null_body.body).len(), 3);

    let malformed = app
        .send("POST", "/api/badges/search", Some("application/json"), b"[1,".to_vec())
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);

    let positional = app
        .request("POST", "/api/badges/search", Some(json!(["Other Org"])))
        .await;
    assert_eq!(positional.status, StatusCode::BAD_REQUEST);
    assert_eq!(positional.error(), "Request body must be a JSON object");
}

#[tokio::test]
async fn test_stats() {
    let app = TestApp::new().await;

    let empty = app.request("GET", "/api/stats", None).await;
    assert_eq!(
        empty.body,
        json!({"totalBadges": 0, "uniqueIssuers": 0, "uniqueProviders": 0, "badgesWithImages": 0})
    );

    app.upload_badge(
        json!({"id": "one", "issuerName": "A", "issuerUrl": "http://a", "credentialProvider": "P"}),
        Some(("image/png", PNG)),
    )
    .await;

    let stats = app.request("GET", "/api/stats", None).await;
    assert_eq!(stats.status, StatusCode::OK);
    assert_eq!(
        stats.body,
        json!({"totalBadges": 1, "uniqueIssuers": 2, "uniqueProviders": 1, "badgesWithImages": 1})
    );
}

#[tokio::test]
async fn test_export() {
    let app = TestApp::new().await;
    app.upload_badge(badge_data("e1"), Some(("image/png", PNG))).await;
    app.upload_badge(badge_data("e2"), None).await;

    let response = app.request("GET", "/api/export", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["totalBadges"], 2);
    assert!(response.body["exportDate"].is_string());

    let badges = response.body["badges"].as_array().unwrap();
    assert_eq!(badges.len(), 2);
    let e1 = badges.iter().find(|b| b["id"] == "e1").unwrap();
    assert_eq!(e1["imageData"], hex::encode(PNG).as_str());
    let e2 = badges.iter().find(|b| b["id"] == "e2").unwrap();
    assert!(e2.get("imageData").is_none());
}

#[tokio::test]
async fn test_oversized_upload_is_413() {
    let mut config = AppConfig::default();
    config.server.max_body_bytes = 1024;
    let app = TestApp::with_config(config).await;

    let big = vec![7u8; 4096];
    let response = app
        .upload_badge(json!({"id": "big"}), Some(("image/png", &big[..])))
        .await;
    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(!response.error().is_empty());

    let listed = app.request("GET", "/api/badges", None).await;
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/nothing-here", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({"error": "Not found"}));
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let app = TestApp::new().await;
    let req = axum::http::Request::builder()
        .method("OPTIONS")
        .uri("/api/badges")
        .header("Origin", "https://frontend.example")
        .header("Access-Control-Request-Method", "POST")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app.router.clone(), req)
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#![allow(clippy::unwrap_used)]
// Integration tests for `OarClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use oar_api::{Error, OarClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, OarClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = OarClient::new(base_url, &TransportConfig::default()).unwrap();
    (server, client)
}

// ── Claimed facility details ────────────────────────────────────────

#[tokio::test]
async fn test_get_claimed_facility_details() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/facility-claims/42/claimed/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "facility_name": "Mill One",
            "facility_website": null,
            "office_info_publicly_visible": true
        })))
        .mount(&server)
        .await;

    let details = client.get_claimed_facility_details("42").await.unwrap();

    assert_eq!(details["facility_name"], json!("Mill One"));
    assert_eq!(details["facility_website"], json!(null));
    assert_eq!(details["office_info_publicly_visible"], json!(true));
    // Field order survives decoding.
    let keys: Vec<&str> = details.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        ["id", "facility_name", "facility_website", "office_info_publicly_visible"]
    );
}

#[tokio::test]
async fn test_update_claimed_facility_details_sends_body() {
    let (server, client) = setup().await;

    let edited = json!({ "facility_name": "Mill Two", "facility_phone_number": "555" });

    Mock::given(method("PUT"))
        .and(path("/api/facility-claims/42/claimed/"))
        .and(body_json(&edited))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "facility_name": "MILL TWO",
            "facility_phone_number": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client
        .update_claimed_facility_details("42", &edited)
        .await
        .unwrap();

    assert_eq!(response["facility_name"], json!("MILL TWO"));
    assert_eq!(response["facility_phone_number"], json!(null));
}

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/facility-claims/7/claimed/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client.get_claimed_facility_details("7").await;

    match result {
        Err(Error::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected Status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_not_found_is_detected() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/facility-claims/404/claimed/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&server)
        .await;

    let err = client.get_claimed_facility_details("404").await.unwrap_err();
    assert!(err.is_not_found(), "expected not-found, got: {err:?}");
}

#[tokio::test]
async fn test_claim_id_is_a_single_escaped_segment() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/facility-claims/a%2Fb/claimed/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"facility_name": "Slash"})))
        .expect(1)
        .mount(&server)
        .await;

    let details = client.get_claimed_facility_details("a/b").await.unwrap();
    assert_eq!(details["facility_name"], json!("Slash"));
}

#[tokio::test]
async fn test_dot_segment_claim_ids_are_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hit": "wrong endpoint"})))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hit": "wrong endpoint"})))
        .mount(&server)
        .await;

    for claim_id in ["..", "."] {
        let err = client.get_claimed_facility_details(claim_id).await.unwrap_err();
        assert!(
            matches!(&err, Error::InvalidPathSegment(s) if s == claim_id),
            "got: {err:?}"
        );
        let err = client
            .update_claimed_facility_details(claim_id, &json!({"facility_name": "x"}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPathSegment(_)), "got: {err:?}");
    }

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/oar/", server.uri())).unwrap();
    let client = OarClient::new(base_url, &TransportConfig::default()).unwrap();

    Mock::given(method("GET"))
        .and(path("/oar/api/client-info/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"country": "BD"})))
        .expect(1)
        .mount(&server)
        .await;

    let info = client.get_client_info().await.unwrap();
    assert_eq!(info.country.as_deref(), Some("BD"));
}

#[tokio::test]
async fn test_non_object_body_is_a_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/facility-claims/1/claimed/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["not", "an", "object"])))
        .mount(&server)
        .await;

    let result = client.get_claimed_facility_details("1").await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

// ── CSRF ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_csrf_token_is_sent_from_cookie_jar() {
    let (server, client) = setup().await;
    client.add_cookie("csrftoken=tok123; Path=/");

    Mock::given(method("PUT"))
        .and(path("/api/facility-claims/9/claimed/"))
        .and(header("X-CSRFToken", "tok123"))
        .and(header("X-Requested-With", "XMLHttpRequest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client
        .update_claimed_facility_details("9", &json!({}))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_csrf_token_lookup() {
    let (_server, client) = setup().await;
    let url = client.base_url().join("/api/").unwrap();

    assert_eq!(client.csrf_token(&url), None);

    client.add_cookie("sessionid=abc; Path=/");
    client.add_cookie("csrftoken=xyz; Path=/");
    assert_eq!(client.csrf_token(&url).as_deref(), Some("xyz"));
}

// ── Session endpoints ───────────────────────────────────────────────

#[tokio::test]
async fn test_feature_flags() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api-feature-flags/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "claim_a_facility": true,
            "vector_tile": false
        })))
        .mount(&server)
        .await;

    let flags = client.get_feature_flags().await.unwrap();
    assert_eq!(flags.get("claim_a_facility"), Some(&true));
    assert_eq!(flags.get("vector_tile"), Some(&false));
}

#[tokio::test]
async fn test_client_info() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/client-info/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "country": "BD" })))
        .mount(&server)
        .await;

    let info = client.get_client_info().await.unwrap();
    assert_eq!(info.country.as_deref(), Some("BD"));
}

#[tokio::test]
async fn test_session_user_logged_in() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/user-login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "email": "someone@example.com",
            "name": "Someone",
            "contributor_id": 11
        })))
        .mount(&server)
        .await;

    let user = client.get_session_user().await.unwrap().unwrap();
    assert_eq!(user.id, 3);
    assert_eq!(user.email, "someone@example.com");
    assert_eq!(user.contributor_id, Some(11));
    assert!(!user.is_superuser);
}

#[tokio::test]
async fn test_session_user_anonymous() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/user-login/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "no session"})))
        .mount(&server)
        .await;

    let user = client.get_session_user().await.unwrap();
    assert_eq!(user, None);
}

#[tokio::test]
async fn test_connection_refused_maps_to_transport() {
    // Nothing listens on the discard port of localhost in CI sandboxes.
    let base_url = Url::parse("http://127.0.0.1:9").unwrap();
    let client = OarClient::new(base_url, &TransportConfig::default()).unwrap();

    let err = client.get_feature_flags().await.unwrap_err();
    assert!(
        matches!(err, Error::Transport(_)),
        "expected Transport error, got: {err:?}"
    );
}

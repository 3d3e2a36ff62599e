#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for the gravatar-api crate.
//!
//! Covers: ProfileClient, AvatarClient, and failure classification against a
//! mock upstream.

use gravatar_api::{ApiConfig, AvatarClient, AvatarParams, ProfileClient};
use gravatar_core::GravatarError;
use wiremock::matchers::{header, header_exists, method, path, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SHA256_HASH: &str = "973dfe463ec85785f5f95af5ba3906eedb2d931c24e69824a89ea65dba4e813b";
const MD5_HASH: &str = "00000000000000000000000000000000";

fn config_for(server: &MockServer) -> ApiConfig {
    ApiConfig {
        profile_base_url: format!("{}/v3/profiles", server.uri()),
        avatar_base_url: format!("{}/avatar", server.uri()),
        ..ApiConfig::default()
    }
}

// ---------------------------------------------------------------------------
// 1. Profile fetch -- success returns the upstream payload unmodified
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_fetch_profile_success() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "hash": SHA256_HASH,
        "display_name": "Test User",
        "location": "Somewhere",
    });

    Mock::given(method("GET"))
        .and(path(format!("/v3/profiles/{SHA256_HASH}")))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = ProfileClient::new(config_for(&server));
    let profile = client.fetch_profile(SHA256_HASH).await.unwrap();
    assert_eq!(profile, body);
}

// ---------------------------------------------------------------------------
// 2. Profile fetch -- bearer auth sent when an API key is configured
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_fetch_profile_sends_bearer_auth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v3/profiles/{SHA256_HASH}")))
        .and(header("authorization", "Bearer sekrit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.api_key = Some("sekrit".to_string());
    let client = ProfileClient::new(config);
    client.fetch_profile(SHA256_HASH).await.unwrap();
}

// ---------------------------------------------------------------------------
// 3. Interests fetch -- success parses the {id, name} records
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_fetch_interests_success() {
    let server = MockServer::start().await;
    let body = serde_json::json!([
        {"id": 1, "name": "rust"},
        {"id": 2, "name": "photography"},
    ]);

    Mock::given(method("GET"))
        .and(path(format!("/v3/profiles/{SHA256_HASH}/inferred-interests")))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = ProfileClient::new(config_for(&server));
    let interests = client.fetch_interests(SHA256_HASH).await.unwrap();
    assert_eq!(interests.len(), 2);
    assert_eq!(interests[0].id, 1);
    assert_eq!(interests[0].name, "rust");
    assert_eq!(interests[1].name, "photography");
}

// ---------------------------------------------------------------------------
// 4. Interests 404 -- classified as NotFound, message from the error body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_fetch_interests_404_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v3/profiles/{SHA256_HASH}/inferred-interests")))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"error": "Profile not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ProfileClient::new(config_for(&server));
    let err = client.fetch_interests(SHA256_HASH).await.unwrap_err();
    match err {
        GravatarError::NotFound(msg) => assert_eq!(msg, "Profile not found"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// 5. Invalid hash -- rejected locally, zero network calls
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_invalid_hash_never_reaches_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let profiles = ProfileClient::new(config_for(&server));
    let avatars = AvatarClient::new(config_for(&server));

    let err = profiles.fetch_profile("invalid-hash").await.unwrap_err();
    assert!(err.is_validation());
    let err = profiles.fetch_interests("invalid-hash").await.unwrap_err();
    assert!(err.is_validation());
    let err = avatars
        .fetch_avatar("invalid-hash", &AvatarParams::default())
        .await
        .unwrap_err();
    assert!(err.is_validation());

    server.verify().await;
}

// ---------------------------------------------------------------------------
// 6. Rate limiting -- 429 carries the reset from the upstream header
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_429_carries_reset_from_header() {
    let server = MockServer::start().await;
    // 2033-05-18T03:33:20Z
    let reset_epoch = 2_000_000_000i64;

    Mock::given(method("GET"))
        .and(path(format!("/v3/profiles/{SHA256_HASH}")))
        .respond_with(
            ResponseTemplate::new(429)
                .append_header("x-ratelimit-reset", reset_epoch.to_string().as_str())
                .set_body_json(serde_json::json!({"error": "Too many requests"})),
        )
        .mount(&server)
        .await;

    let client = ProfileClient::new(config_for(&server));
    let err = client.fetch_profile(SHA256_HASH).await.unwrap_err();
    match err {
        GravatarError::RateLimit { message, reset } => {
            assert_eq!(message, "Too many requests");
            assert_eq!(reset.timestamp(), reset_epoch);
        }
        other => panic!("expected RateLimit, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// 7. Malformed upstream JSON -- wrapped into the generic Api kind
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_malformed_profile_json_is_generic() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v3/profiles/{SHA256_HASH}")))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json {"))
        .mount(&server)
        .await;

    let client = ProfileClient::new(config_for(&server));
    let err = client.fetch_profile(SHA256_HASH).await.unwrap_err();
    assert!(matches!(err, GravatarError::Api { status: 200, .. }));
}

// ---------------------------------------------------------------------------
// 8. Transport failure -- no response at all maps to Transport, not Api
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_connection_refused_is_transport() {
    let config = ApiConfig {
        profile_base_url: "http://127.0.0.1:1/v3/profiles".to_string(),
        ..ApiConfig::default()
    };
    let client = ProfileClient::new(config);
    let err = client.fetch_profile(SHA256_HASH).await.unwrap_err();
    assert!(matches!(err, GravatarError::Transport(_)));
}

// ---------------------------------------------------------------------------
// 9. Avatar fetch -- legacy 32-char hash, no params, bytes pass through
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_fetch_avatar_no_params() {
    let server = MockServer::start().await;
    let png: Vec<u8> = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    Mock::given(method("GET"))
        .and(path(format!("/avatar/{MD5_HASH}")))
        .and(query_param_is_missing("s"))
        .and(query_param_is_missing("d"))
        .and(query_param_is_missing("f"))
        .and(query_param_is_missing("r"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = AvatarClient::new(config_for(&server));
    let bytes = client
        .fetch_avatar(MD5_HASH, &AvatarParams::default())
        .await
        .unwrap();
    assert!(!bytes.is_empty());
    assert_eq!(bytes, png);
}

// ---------------------------------------------------------------------------
// 10. Avatar 404 -- surfaced as a Validation-kind error with the status text
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_fetch_avatar_404() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/avatar/{MD5_HASH}")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = AvatarClient::new(config_for(&server));
    let err = client
        .fetch_avatar(MD5_HASH, &AvatarParams::default())
        .await
        .unwrap_err();
    match err {
        GravatarError::Validation(msg) => assert!(msg.contains("Not Found")),
        other => panic!("expected Validation, got {other:?}"),
    }
}

//! API Integration Tests

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tokio_test::assert_ok;
use tower::util::ServiceExt;
use uuid::Uuid;

use currency_service::api::middleware::CORRELATION_ID_HEADER;
use currency_service::api::routes::{CONVERT_PATH, GET_SUPPORTED_CURRENCIES_PATH, HEALTH_CHECK_PATH};
use currency_service::Money;

mod common;

#[tokio::test]
async fn test_get_supported_currencies() {
    let (_state, app) = common::setup_app();

    let (status, json) = common::post_json(&app, GET_SUPPORTED_CURRENCIES_PATH, json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let codes: Vec<String> = serde_json::from_value(json["currency_codes"].clone()).unwrap();
    assert_eq!(codes.len(), 33);
    assert!(codes.windows(2).all(|pair| pair[0] < pair[1]), "codes must be sorted and unique");

    // Same list on every call
    let (_, again) = common::post_json(&app, GET_SUPPORTED_CURRENCIES_PATH, json!({})).await;
    assert_eq!(json, again);
}

#[tokio::test]
async fn test_convert_eur_to_usd_e2e() {
    let (state, app) = common::setup_app();

    let (status, json) = common::post_json(
        &app,
        CONVERT_PATH,
        json!({
            "from": {"currency_code": "EUR", "units": 10, "nanos": 0},
            "to_code": "USD"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "Conversion failed: {json}");
    let money: Money = serde_json::from_value(json).unwrap();
    assert_eq!(money, Money::new("USD", 11, 305_000_000));

    // Counter incremented once, for the target currency
    assert_eq!(state.counter.get("USD"), 1);
    assert_eq!(state.counter.total(), 1);
}

#[tokio::test]
async fn test_convert_round_trip_e2e() {
    let (_state, app) = common::setup_app();

    let (status, there) = common::post_json(
        &app,
        CONVERT_PATH,
        json!({
            "from": {"currency_code": "GBP", "units": 42, "nanos": 420_000_000},
            "to_code": "KRW"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(there["currency_code"], "KRW");

    let (status, back) = common::post_json(
        &app,
        CONVERT_PATH,
        json!({ "from": there, "to_code": "GBP" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let back: Money = serde_json::from_value(back).unwrap();
    assert_eq!(back.currency_code, "GBP");
    assert_eq!(back.units, 42);
    assert!((back.nanos - 420_000_000).abs() <= 2, "round trip drifted: {back}");
}

#[tokio::test]
async fn test_convert_unknown_currency_is_cancelled() {
    let (state, app) = common::setup_app();

    let (status, json) = common::post_json(
        &app,
        CONVERT_PATH,
        json!({
            "from": {"currency_code": "XXX", "units": 1, "nanos": 0},
            "to_code": "USD"
        }),
    )
    .await;

    assert_eq!(status.as_u16(), 499);
    assert_eq!(json["rpc_status"], "CANCELLED");
    assert_eq!(json["error_code"], "unknown_currency");
    assert_eq!(json["details"], "XXX");
    assert!(json.get("currency_code").is_none(), "no Money on failure");
    assert_eq!(state.counter.total(), 0);
}

#[tokio::test]
async fn test_convert_unknown_target_is_cancelled() {
    let (_state, app) = common::setup_app();

    let (status, json) = common::post_json(
        &app,
        CONVERT_PATH,
        json!({
            "from": {"currency_code": "EUR", "units": 1},
            "to_code": "ABC"
        }),
    )
    .await;

    assert_eq!(status.as_u16(), 499);
    assert_eq!(json["details"], "ABC");
}

#[tokio::test]
async fn test_convert_malformed_money_is_cancelled() {
    let (state, app) = common::setup_app();

    let (status, json) = common::post_json(
        &app,
        CONVERT_PATH,
        json!({
            "from": {"currency_code": "EUR", "units": 1, "nanos": 1_500_000_000},
            "to_code": "USD"
        }),
    )
    .await;

    assert_eq!(status.as_u16(), 499);
    assert_eq!(json["rpc_status"], "CANCELLED");
    assert_eq!(json["error_code"], "malformed_money");
    assert_eq!(state.counter.total(), 0);
}

/// Send a raw Convert body and decode the structured error reply
async fn convert_raw(
    app: &axum::Router,
    content_type: Option<&str>,
    body: &'static str,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("POST").uri(CONVERT_PATH);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let response = app
        .clone()
        .oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = assert_ok!(response.into_body().collect().await).to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_convert_invalid_json_never_reaches_engine() {
    let (state, app) = common::setup_app();

    let (status, json) = convert_raw(&app, Some("application/json"), "{not json").await;

    assert_eq!(status.as_u16(), 499);
    assert_eq!(json["rpc_status"], "CANCELLED");
    assert_eq!(json["error_code"], "invalid_request");
    assert!(json["details"].is_string());
    assert_eq!(state.counter.total(), 0);
}

#[tokio::test]
async fn test_convert_missing_currency_code_is_unknown_currency() {
    let (state, app) = common::setup_app();

    let (status, json) = convert_raw(
        &app,
        Some("application/json"),
        r#"{"from":{"units":1,"nanos":0},"to_code":"USD"}"#,
    )
    .await;

    assert_eq!(status.as_u16(), 499);
    assert_eq!(json["rpc_status"], "CANCELLED");
    assert_eq!(json["error_code"], "unknown_currency");
    assert_eq!(json["details"], "");
    assert_eq!(state.counter.total(), 0);
}

#[tokio::test]
async fn test_convert_undecodable_bodies_are_cancelled() {
    let (state, app) = common::setup_app();

    let cases = [
        (
            Some("application/json"),
            r#"{"from":{"currency_code":"EUR","units":1,"nanos":3000000000},"to_code":"USD"}"#,
        ),
        (None, r#"{"from":{"currency_code":"EUR","units":1},"to_code":"USD"}"#),
        (
            Some("application/json"),
            r#"{"from":{"currency_code":"EUR","units":1},"to_code":null}"#,
        ),
    ];

    for (content_type, body) in cases {
        let (status, json) = convert_raw(&app, content_type, body).await;

        assert_eq!(status.as_u16(), 499, "body {body}: {json}");
        assert_eq!(json["rpc_status"], "CANCELLED");
        assert_eq!(json["error_code"], "invalid_request");
        assert!(json["details"].is_string());
        assert!(json.get("currency_code").is_none());
    }
    assert_eq!(state.counter.total(), 0);
}

#[tokio::test]
async fn test_health_check_serving() {
    let (_state, app) = common::setup_app();

    let (status, json) = common::post_json(&app, HEALTH_CHECK_PATH, json!({"service": ""})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "SERVING");

    let (status, body) = common::get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn test_metrics_reflect_conversions() {
    let (_state, app) = common::setup_app();

    for _ in 0..2 {
        let (status, _) = common::post_json(
            &app,
            CONVERT_PATH,
            json!({
                "from": {"currency_code": "USD", "units": 5, "nanos": 0},
                "to_code": "JPY"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = common::get(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["app_currency_counter"]["JPY"], 2);
    assert_eq!(json["app_currency_counter"]["USD"], 0);
    assert_eq!(json["unlabeled"], 0);
}

#[tokio::test]
async fn test_correlation_id_is_echoed() {
    let (_state, app) = common::setup_app();
    let correlation_id = Uuid::new_v4();

    let req = Request::builder()
        .method("POST")
        .uri(GET_SUPPORTED_CURRENCIES_PATH)
        .header(CORRELATION_ID_HEADER, correlation_id.to_string())
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[CORRELATION_ID_HEADER],
        correlation_id.to_string().as_str()
    );

    let body = assert_ok!(response.into_body().collect().await).to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["currency_codes"].is_array());
}

#[tokio::test]
async fn test_concurrent_conversions() {
    let (state, app) = common::setup_app();

    let tasks: Vec<_> = (0..50)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                common::post_json(
                    &app,
                    CONVERT_PATH,
                    json!({
                        "from": {"currency_code": "EUR", "units": i, "nanos": 0},
                        "to_code": "CHF"
                    }),
                )
                .await
            })
        })
        .collect();

    for task in tasks {
        let (status, _) = task.await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }

    assert_eq!(state.counter.get("CHF"), 50);
}

//! Failure injection tests for the event relay.

use axum::http::StatusCode;
use serde_json::json;
use std::time::{Duration, Instant};

mod common;

const REQUIRED_FIELDS: [&str; 9] = ["ev", "et", "id", "uid", "mid", "t", "p", "l", "sc"];

#[tokio::test]
async fn test_downstream_non_200_is_500() {
    for status in [201u16, 202, 400, 404, 429, 500, 503] {
        let receiver = common::start_mock_receiver(status).await;
        let (relay_addr, shutdown) =
            common::start_relay(common::test_config(receiver.url())).await;

        let res = common::http_client()
            .post(format!("http://{}/", relay_addr))
            .json(&common::base_payload())
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR, "downstream {}", status);
        assert_eq!(
            res.text().await.unwrap(),
            format!("unexpected response status code from downstream: {}", status)
        );
        assert_eq!(receiver.count(), 1);

        shutdown.trigger();
    }
}

#[tokio::test]
async fn test_missing_required_field_makes_no_outbound_call() {
    let receiver = common::start_mock_receiver(200).await;
    let (relay_addr, shutdown) = common::start_relay(common::test_config(receiver.url())).await;
    let client = common::http_client();

    for field in REQUIRED_FIELDS {
        let mut payload = common::base_payload();
        payload.remove(field);

        let res = client
            .post(format!("http://{}/", relay_addr))
            .json(&payload)
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            res.text().await.unwrap(),
            format!("missing required field `{}`", field)
        );
    }

    let mut payload = common::base_payload();
    payload.insert("uid".into(), json!(12345));
    let res = client
        .post(format!("http://{}/", relay_addr))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        res.text().await.unwrap(),
        "field `uid` must be a string, got number"
    );

    assert_eq!(receiver.count(), 0);
    shutdown.trigger();
}

#[tokio::test]
async fn test_incomplete_triplet_makes_no_outbound_call() {
    let receiver = common::start_mock_receiver(200).await;
    let (relay_addr, shutdown) = common::start_relay(common::test_config(receiver.url())).await;

    let mut payload = common::base_payload();
    payload.insert("atrk1".into(), json!("color"));
    payload.insert("atrv1".into(), json!("red"));
    payload.insert("atrt1".into(), json!("string"));
    payload.insert("uatrk1".into(), json!("email"));
    payload.insert("uatrt1".into(), json!("string"));

    let res = common::http_client()
        .post(format!("http://{}/", relay_addr))
        .json(&payload)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.text().await.unwrap(), "missing required field `uatrv1`");
    assert_eq!(receiver.count(), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn test_malformed_json_is_500() {
    let receiver = common::start_mock_receiver(200).await;
    let (relay_addr, shutdown) = common::start_relay(common::test_config(receiver.url())).await;

    for body in ["{\"ev\": ", "[1, 2, 3]", "plain text"] {
        let res = common::http_client()
            .post(format!("http://{}/", relay_addr))
            .body(body)
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(res
            .text()
            .await
            .unwrap()
            .starts_with("error decoding JSON request"));
    }
    assert_eq!(receiver.count(), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn test_unreachable_downstream_is_500() {
    let dead = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_addr = dead.local_addr().unwrap();
    drop(dead);

    let (relay_addr, shutdown) =
        common::start_relay(common::test_config(format!("http://{}/events", dead_addr))).await;

    let res = common::http_client()
        .post(format!("http://{}/", relay_addr))
        .json(&common::base_payload())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res
        .text()
        .await
        .unwrap()
        .starts_with("error sending event downstream"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_stalled_downstream_hits_dispatch_deadline() {
    let receiver = common::start_stalled_receiver().await;
    let mut config = common::test_config(receiver.url());
    config.dispatch.timeout_secs = 1;
    config.downstream.timeout_secs = 30;
    let (relay_addr, shutdown) = common::start_relay(config).await;

    let start = Instant::now();
    let res = common::http_client()
        .post(format!("http://{}/", relay_addr))
        .json(&common::base_payload())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        res.text().await.unwrap(),
        "event pipeline did not complete within 1s"
    );
    assert!(start.elapsed() < Duration::from_secs(10));
    assert_eq!(receiver.count(), 1);

    shutdown.trigger();
}

#[tokio::test]
async fn test_keeps_serving_after_failures() {
    let receiver = common::start_programmable_receiver(|body| async move {
        let event: serde_json::Value = serde_json::from_slice(&body).unwrap_or_default();
        if event["event"] == "fail" {
            (503, "down".to_string())
        } else {
            (200, "ok".to_string())
        }
    })
    .await;
    let (relay_addr, shutdown) = common::start_relay(common::test_config(receiver.url())).await;
    let client = common::http_client();
    let url = format!("http://{}/", relay_addr);

    let mut failing = common::base_payload();
    failing.insert("ev".into(), json!("fail"));

    for _ in 0..3 {
        let res = client.post(&url).json(&failing).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let res = client.post(&url).body("garbage").send().await.unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let res = client.post(&url).json(&common::base_payload()).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
    assert_eq!(receiver.count(), 6);

    shutdown.trigger();
}

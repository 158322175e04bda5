//! `POST /feedback` translation and forwarding tests.

use axum::http::{Method, StatusCode};
use chat_gateway::transform::FeedbackShape;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_post_feedback_shape() {
    let bot = common::start_backend(200, "{}").await;
    let feedback = common::start_backend(200, r#"{"status":"recorded"}"#).await;
    let gateway = common::start_gateway(common::gateway_config(
        &bot.base_url(),
        &feedback.base_url(),
        FeedbackShape::PostFeedback,
    ))
    .await;

    let res = gateway
        .client
        .post(gateway.url("/feedback"))
        .json(&json!({"interaction_id": "i-42", "feedback": "like"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({"status": "recorded"}));

    let calls = feedback.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, Method::POST);
    assert_eq!(calls[0].path, "/feedback");
    assert_eq!(
        calls[0].body,
        Some(json!({"interaction_id": "i-42", "feedback_score": 1}))
    );
    assert!(bot.calls().is_empty());
}

#[tokio::test]
async fn test_patch_interaction_shape() {
    let bot = common::start_backend(200, "{}").await;
    let interactions = common::start_backend(200, r#"{"interaction_id":"i-42","feedback_score":-1}"#).await;
    let gateway = common::start_gateway(common::gateway_config(
        &bot.base_url(),
        &interactions.base_url(),
        FeedbackShape::PatchInteraction,
    ))
    .await;

    let res = gateway
        .client
        .post(gateway.url("/feedback"))
        .json(&json!({"interaction_id": "i-42", "feedback": "dislike"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"interaction_id": "i-42", "feedback_score": -1})
    );

    let calls = interactions.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, Method::PATCH);
    assert_eq!(calls[0].path, "/interactions/i-42/feedback");
    let body = calls[0].body.clone().unwrap();
    assert_eq!(body, json!({"feedback_score": -1}));
    assert!(body.get("interaction_id").is_none());
}

#[tokio::test]
async fn test_invalid_feedback_bodies_never_reach_downstream() {
    let feedback = common::start_backend(200, "{}").await;
    let gateway = common::start_gateway(common::gateway_config(
        &feedback.base_url(),
        &feedback.base_url(),
        FeedbackShape::PostFeedback,
    ))
    .await;

    // Unknown literal: well-formed but invalid.
    let res = gateway
        .client
        .post(gateway.url("/feedback"))
        .json(&json!({"interaction_id": "i-1", "feedback": "love"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["detail"], "feedback must be 'like' or 'dislike', got 'love'");

    // Missing field.
    let res = gateway
        .client
        .post(gateway.url("/feedback"))
        .json(&json!({"interaction_id": "i-1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Malformed JSON.
    let res = gateway
        .client
        .post(gateway.url("/feedback"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Empty interaction id.
    let res = gateway
        .client
        .post(gateway.url("/feedback"))
        .json(&json!({"interaction_id": "", "feedback": "like"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    assert!(feedback.calls().is_empty());
}

#[tokio::test]
async fn test_interaction_id_cannot_escape_path_segment() {
    let interactions = common::start_backend(200, "{}").await;
    let gateway = common::start_gateway(common::gateway_config(
        &interactions.base_url(),
        &interactions.base_url(),
        FeedbackShape::PatchInteraction,
    ))
    .await;

    let res = gateway
        .client
        .post(gateway.url("/feedback"))
        .json(&json!({"interaction_id": "../admin", "feedback": "like"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(interactions.calls()[0].path, "/interactions/..%2Fadmin/feedback");
}

#[tokio::test]
async fn test_dot_interaction_id_forwarded_in_body_shape() {
    let feedback = common::start_backend(200, r#"{"status":"recorded"}"#).await;
    let gateway = common::start_gateway(common::gateway_config(
        &feedback.base_url(),
        &feedback.base_url(),
        FeedbackShape::PostFeedback,
    ))
    .await;

    let res = gateway
        .client
        .post(gateway.url("/feedback"))
        .json(&json!({"interaction_id": ".", "feedback": "like"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let calls = feedback.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path, "/feedback");
    assert_eq!(calls[0].body, Some(json!({"interaction_id": ".", "feedback_score": 1})));
}

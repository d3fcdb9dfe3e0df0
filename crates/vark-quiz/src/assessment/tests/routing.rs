use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::assessment::router::{shared_handler, submit_handler, SubmissionRequest};
use crate::assessment::{NewResult, QuizService, ResultRepository};

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn questions_route_serves_bank() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(Request::get("/api/v1/questions").body(Body::empty()).unwrap())
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["origin"], "source");
    assert_eq!(payload["questions"].as_array().map(Vec::len), Some(4));
    assert_eq!(payload["questions"][0]["options"][2]["type"], "R");
}

#[tokio::test]
async fn inference_route_scores_answers() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/inference",
            json!({ "answers": ["V", "V", "A", "K"] }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["percentages"]["V"], 50);
    assert_eq!(payload["dominant"], "V");
}

#[tokio::test]
async fn unknown_answer_tags_are_rejected() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/results",
            json!({ "user_name": "Rina", "answers": ["V", "X"] }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn submit_route_returns_share_path() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/results",
            json!({ "user_name": "Rina", "answers": ["K", "K", "A"] }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["id"], 1);
    assert_eq!(payload["userName"], "Rina");
    assert_eq!(payload["share_path"], "/shared/1");
    assert_eq!(payload["dominant"], "K");
}

#[tokio::test]
async fn submit_handler_rejects_blank_name() {
    let (service, _) = build_service();

    let response = submit_handler(
        State(Arc::new(service)),
        axum::Json(SubmissionRequest {
            user_name: " ".to_string(),
            answers: vec![V],
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn submit_without_store_omits_share_path() {
    let service = Arc::new(QuizService::new(
        Arc::new(StaticQuestions(vec![question(1)])),
        Arc::new(UnavailableRepository),
        Arc::new(StubRecommender::Unconfigured),
    ));

    let response = submit_handler(
        State(service),
        axum::Json(SubmissionRequest {
            user_name: "Rina".to_string(),
            answers: vec![V, A],
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert!(payload.get("share_path").is_none());
    assert!(payload.get("id").is_none());
    assert_eq!(payload["dominant"], "Multimodal");
}

#[tokio::test]
async fn shared_handler_returns_stored_result() {
    let (service, repository) = build_service();
    let id = repository
        .insert(NewResult {
            user_name: "Ayu".to_string(),
            score_visual: 5,
            score_auditory: 2,
            score_readwrite: 0,
            score_kinesthetic: 3,
            dominant_style: "V".to_string(),
        })
        .await
        .expect("insert");

    let response = shared_handler(State(Arc::new(service)), Path(id.to_string())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["userName"], "Ayu");
    assert_eq!(payload["percentages"]["A"], 20);
    assert_eq!(payload["rawScores"]["K"], 3);
}

#[tokio::test]
async fn shared_route_returns_not_found() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    for uri in [
        "/api/v1/results/99",
        "/api/v1/results/not-a-number",
        "/shared/99",
    ] {
        let response = router
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        let payload = read_json_body(response).await;
        assert_eq!(payload["error"], "Hasil tidak ditemukan");
    }
}

#[tokio::test]
async fn shared_handler_reports_unavailable_store() {
    let service = Arc::new(QuizService::new(
        Arc::new(StaticQuestions(Vec::new())),
        Arc::new(UnavailableRepository),
        Arc::new(StubRecommender::Unconfigured),
    ));

    let response = shared_handler(State(service), Path("3".to_string())).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

fn recommendation_body() -> Value {
    json!({
        "dominant": "Multimodal",
        "percentages": { "V": 25, "A": 25, "R": 25, "K": 25 }
    })
}

#[tokio::test]
async fn recommendation_route_returns_text() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(post_json("/api/v1/recommendations", recommendation_body()))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert!(payload["text"]
        .as_str()
        .unwrap_or_default()
        .starts_with("Rekomendasi"));
}

#[tokio::test]
async fn recommendation_failures_map_to_statuses() {
    let cases = [
        (StubRecommender::Quota, StatusCode::TOO_MANY_REQUESTS, true),
        (StubRecommender::Unconfigured, StatusCode::SERVICE_UNAVAILABLE, false),
        (StubRecommender::Broken, StatusCode::BAD_GATEWAY, false),
    ];

    for (recommender, status, quota) in cases {
        let (service, _) = build_service_with(recommender);
        let router = router_with_service(service);

        let response = router
            .oneshot(post_json("/api/v1/recommendations", recommendation_body()))
            .await
            .expect("route executes");

        assert_eq!(response.status(), status);
        let payload = read_json_body(response).await;
        assert_eq!(payload["quota_exceeded"], quota);
        assert!(payload["error"].is_string());
    }
}

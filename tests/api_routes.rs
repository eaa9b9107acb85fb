use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use video_analytics::config::AppConfig;
use video_analytics::server::{router, AppState};

fn app() -> axum::Router {
    let mut config = AppConfig::default();
    config.generator.seed = Some(7);
    router(AppState::new(config))
}

async fn call(method: Method, uri: &str) -> (StatusCode, Value) {
    let response = app()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn get(uri: &str) -> (StatusCode, Value) {
    call(Method::GET, uri).await
}

#[tokio::test]
async fn health_reports_healthy() {
    let (status, body) = get("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn views_trend_honours_days() {
    let (status, body) = get("/api/views-trend?days=3").await;
    assert_eq!(status, StatusCode::OK);

    let points = body.as_array().unwrap();
    assert_eq!(points.len(), 3);
    for point in points {
        assert!(point["date"].is_string());
        assert!(point["views"].is_u64());
        assert!(point["watchTime"].is_number());
    }
}

#[tokio::test]
async fn views_trend_defaults_to_seven_days() {
    let (_, missing) = get("/api/views-trend").await;
    assert_eq!(missing.as_array().unwrap().len(), 7);

    let (status, garbage) = get("/api/views-trend?days=abc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(garbage.as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn views_trend_empty_for_non_positive_days() {
    let (_, zero) = get("/api/views-trend?days=0").await;
    assert!(zero.as_array().unwrap().is_empty());

    let (_, negative) = get("/api/views-trend?days=-5").await;
    assert!(negative.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn overview_aggregates_all_sections() {
    let (status, body) = get("/api/overview").await;
    assert_eq!(status, StatusCode::OK);

    for key in [
        "currentVideo",
        "viewsOverTime",
        "engagementMetrics",
        "performanceScore",
        "recommendations",
        "lastUpdated",
    ] {
        assert!(!body[key].is_null(), "missing {}", key);
    }
    assert_eq!(body["analyticsVersion"], "1.0.0");
    assert_eq!(body["viewsOverTime"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn performance_is_bounded_and_graded() {
    let (status, body) = get("/api/performance").await;
    assert_eq!(status, StatusCode::OK);

    let overall = body["overallScore"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&overall));
    assert!(body["grade"].is_string());
    for key in ["viewsScore", "engagementScore", "watchTimeScore", "ctrScore"] {
        let score = body["breakdown"][key].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&score), "{} = {}", key, score);
    }
}

#[tokio::test]
async fn seeded_recommendations_are_stable() {
    let (status, first) = get("/api/recommendations").await;
    assert_eq!(status, StatusCode::OK);
    assert!(first.is_array());

    let (_, second) = get("/api/recommendations").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn metrics_are_flattened() {
    let (status, body) = get("/api/metrics").await;
    assert_eq!(status, StatusCode::OK);
    for key in [
        "totalViews",
        "watchTimeHours",
        "engagementRate",
        "clickThroughRate",
        "totalLikes",
        "totalComments",
        "avgViewDurationSeconds",
    ] {
        assert!(body[key].is_number(), "missing {}", key);
    }
}

#[tokio::test]
async fn reaction_breakdowns_are_served() {
    let (status, rate) = get("/api/engagement-rate").await;
    assert_eq!(status, StatusCode::OK);
    let expected = rate["likes"].as_u64().unwrap() + rate["comments"].as_u64().unwrap();
    assert_eq!(rate["totalEngagements"].as_u64().unwrap(), expected);
    assert!(rate["lastUpdated"].is_string());

    let (status, reactions) = get("/api/likes-dislikes").await;
    assert_eq!(status, StatusCode::OK);
    let like_pct = reactions["like_percentage"].as_f64().unwrap();
    let dislike_pct = reactions["dislike_percentage"].as_f64().unwrap();
    assert!((like_pct + dislike_pct - 100.0).abs() < 0.2);

    let likes = reactions["likes"].as_u64().unwrap();
    let dislikes = reactions["dislikes"].as_u64().unwrap();
    assert_eq!(reactions["total_reactions"].as_u64().unwrap(), likes + dislikes);
    assert!(reactions["ratio_text"].as_str().unwrap().ends_with(":1"));
    assert!(reactions["last_updated"].is_string());

    let chart = reactions["chart_data"].as_array().unwrap();
    assert_eq!(chart.len(), 2);
    assert_eq!(chart[0]["name"], "Likes");
    assert_eq!(chart[0]["value"].as_u64().unwrap(), likes);
    assert_eq!(chart[1]["name"], "Dislikes");
    assert_eq!(chart[1]["value"].as_u64().unwrap(), dislikes);
}

#[tokio::test]
async fn refresh_acknowledges() {
    let (status, body) = call(Method::POST, "/api/refresh").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Data refreshed successfully");
}

#[tokio::test]
async fn unknown_route_returns_json_error() {
    let (status, body) = get("/api/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

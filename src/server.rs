use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use std::{any::Any, collections::HashMap, net::SocketAddr, sync::Arc};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{debug, error, info};

use crate::api::{parse_days, ApiError, HealthResponse, RefreshResponse};
use crate::config::AppConfig;
use crate::error::{AnalyticsError, Result};
use crate::generator::MockDataGenerator;
use crate::recommendations::Recommendation;
use crate::scoring::PerformanceScore;
use crate::{
    timestamp, AnalyticsEngine, EngagementRate, KeyMetrics, LikesDislikes, Overview, TrendPoint,
    SERVICE_NAME,
};

#[derive(Clone)]
pub struct AppState {
    config: Arc<AppConfig>,
    engine: AnalyticsEngine,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let engine = AnalyticsEngine::new(config.benchmarks.clone());
        Self {
            config: Arc::new(config),
            engine,
        }
    }

    fn generator(&self) -> MockDataGenerator {
        MockDataGenerator::from_config(&self.config)
    }
}

pub fn router(state: AppState) -> Router {
    let web_root = state.config.server.web_root.clone();

    let api = Router::new()
        .route("/api/health", get(health))
        .route("/api/overview", get(overview))
        .route("/api/metrics", get(metrics))
        .route("/api/views-trend", get(views_trend))
        .route("/api/performance", get(performance))
        .route("/api/recommendations", get(recommendations))
        .route("/api/engagement-rate", get(engagement_rate))
        .route("/api/likes-dislikes", get(likes_dislikes))
        .route("/api/refresh", post(refresh))
        .with_state(state);

    let app = match web_root {
        Some(web_root) => {
            let index_path = format!("{}/index.html", web_root.trim_end_matches('/'));
            let static_service =
                ServeDir::new(web_root).not_found_service(ServeFile::new(index_path));
            api.fallback_service(static_service)
        }
        None => api.fallback(not_found),
    };

    app.layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(config: AppConfig) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|err| AnalyticsError::InvalidAddress(format!("{}", err)))?;

    info!(
        mode = config.mode.label(),
        debug = config.debug_enabled(),
        seeded = config.generator.seed.is_some(),
        "starting analytics server on {}",
        addr
    );
    if config.youtube.api_key.is_none() {
        debug!("no YouTube API key configured; serving generated data");
    }

    let app = router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: timestamp(Utc::now()),
        service: SERVICE_NAME.to_string(),
    })
}

async fn overview(State(state): State<AppState>) -> Json<Overview> {
    let mut generator = state.generator();
    let days = state.config.trend_days(None);
    let overview = state.engine.overview(&mut generator, days, Utc::now());
    info!(
        score = overview.performance_score.overall_score,
        recommendations = overview.recommendations.len(),
        "overview served"
    );
    Json(overview)
}

async fn metrics(State(state): State<AppState>) -> Json<KeyMetrics> {
    let snapshot = state.generator().video_metrics();
    Json(state.engine.key_metrics(&snapshot))
}

async fn views_trend(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Vec<TrendPoint>> {
    let days = state.config.trend_days(parse_days(&query));
    debug!(days, "views trend requested");
    let trend = state
        .generator()
        .views_trend(days, Utc::now().date_naive());
    Json(trend)
}

async fn performance(State(state): State<AppState>) -> Json<PerformanceScore> {
    let snapshot = state.generator().video_metrics();
    Json(state.engine.performance(&snapshot))
}

async fn recommendations(State(state): State<AppState>) -> Json<Vec<Recommendation>> {
    let snapshot = state.generator().video_metrics();
    Json(state.engine.recommendations(&snapshot))
}

async fn engagement_rate(State(state): State<AppState>) -> Json<EngagementRate> {
    let snapshot = state.generator().video_metrics();
    Json(state.engine.engagement_rate(&snapshot, Utc::now()))
}

async fn likes_dislikes(State(state): State<AppState>) -> Json<LikesDislikes> {
    let snapshot = state.generator().video_metrics();
    Json(state.engine.likes_dislikes(&snapshot, Utc::now()))
}

async fn refresh() -> Json<RefreshResponse> {
    info!("data refresh requested");
    Json(RefreshResponse {
        message: "Data refreshed successfully".to_string(),
        timestamp: timestamp(Utc::now()),
    })
}

async fn not_found() -> ApiError {
    ApiError::not_found("resource not found")
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| err.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());
    error!(detail = %detail, "request handler panicked");

    ApiError::internal("internal server error").into_response()
}

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use super::params::InsightsQuery;
use super::service::InsightsService;
use crate::error::AppError;

type Service = State<Arc<InsightsService>>;
type ApiResult = Result<Json<Value>, AppError>;

/// Router builder exposing the snapshot-backed and live analysis endpoints.
pub fn insights_router(service: Arc<InsightsService>) -> Router {
    Router::new()
        .route("/api/v1/enade/metadata", get(metadata_handler))
        .route("/api/v1/enade/areas", get(areas_handler))
        .route("/api/v1/enade/comparisons", get(comparisons_handler))
        .route("/api/v1/enade/courses", get(courses_handler))
        .route("/api/v1/enade/extremes", get(extremes_handler))
        .route("/api/v1/enade/course-detail", get(course_detail_handler))
        .route("/api/v1/enade/dashboard", get(dashboard_handler))
        .route("/api/v1/enade/compare", get(compare_handler))
        .route("/api/v1/enade/question-stats", get(question_stats_handler))
        .route("/api/v1/enade/ranking", get(ranking_handler))
        .route("/api/v1/enade/similar", get(similar_handler))
        .route("/api/v1/enade/priorities", get(priorities_handler))
        .route("/api/v1/enade/institutions", get(institutions_handler))
        .route("/api/v1/enade/report", get(report_handler))
        .with_state(service)
}

fn to_json<T: serde::Serialize>(value: &T) -> ApiResult {
    serde_json::to_value(value)
        .map(Json)
        .map_err(|err| AppError::Snapshot(err.into()))
}

pub(crate) async fn metadata_handler(State(service): Service) -> ApiResult {
    to_json(service.metadata())
}

pub(crate) async fn areas_handler(State(service): Service) -> ApiResult {
    to_json(&service.areas())
}

pub(crate) async fn comparisons_handler(
    State(service): Service,
    Query(query): Query<InsightsQuery>,
) -> ApiResult {
    to_json(service.snapshot_comparison(query.area())?)
}

pub(crate) async fn courses_handler(State(service): Service) -> ApiResult {
    to_json(&service.courses())
}

pub(crate) async fn extremes_handler(
    State(service): Service,
    Query(query): Query<InsightsQuery>,
) -> ApiResult {
    to_json(service.snapshot_extremes(query.required_area()?)?)
}

pub(crate) async fn course_detail_handler(
    State(service): Service,
    Query(query): Query<InsightsQuery>,
) -> ApiResult {
    to_json(&service.course_detail(query.required_area()?)?)
}

pub(crate) async fn dashboard_handler(State(service): Service) -> ApiResult {
    to_json(&service.dashboard())
}

pub(crate) async fn compare_handler(
    State(service): Service,
    Query(query): Query<InsightsQuery>,
) -> ApiResult {
    to_json(&service.live_comparison(query.area())?)
}

pub(crate) async fn question_stats_handler(
    State(service): Service,
    Query(query): Query<InsightsQuery>,
) -> ApiResult {
    let question = query.required_question()?;
    to_json(&service.question_stats(&question, query.area())?)
}

pub(crate) async fn ranking_handler(
    State(service): Service,
    Query(query): Query<InsightsQuery>,
) -> ApiResult {
    let question = query.required_question()?;
    let limit = query.limit()?;
    to_json(&service.ranking(&question, query.area(), limit)?)
}

pub(crate) async fn similar_handler(
    State(service): Service,
    Query(query): Query<InsightsQuery>,
) -> ApiResult {
    let limit = query.limit()?;
    to_json(&service.similar_institutions(query.area(), query.category(), limit)?)
}

pub(crate) async fn priorities_handler(
    State(service): Service,
    Query(query): Query<InsightsQuery>,
) -> ApiResult {
    to_json(&service.priorities(query.area())?)
}

pub(crate) async fn institutions_handler(
    State(service): Service,
    Query(query): Query<InsightsQuery>,
) -> ApiResult {
    let needles = query.institutions()?;
    to_json(&service.institutions(&needles, query.area())?)
}

pub(crate) async fn report_handler(
    State(service): Service,
    Query(query): Query<InsightsQuery>,
) -> ApiResult {
    to_json(&service.report(query.area())?)
}

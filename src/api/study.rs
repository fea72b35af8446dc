//! `/api/study` 与 `/health` 处理函数

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;

use super::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{HealthResponse, StudyQuery, StudyResponse};

/// `GET /api/study?topic=..&mode=..`
pub async fn study(
    State(flow): State<AppState>,
    query: Result<Query<StudyQuery>, QueryRejection>,
) -> AppResult<Json<StudyResponse>> {
    let Query(query) = query.map_err(|rejection| AppError::validation(rejection.body_text()))?;
    let response = flow.handle(&query).await?;
    Ok(Json(response))
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

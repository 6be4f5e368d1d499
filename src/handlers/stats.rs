// src/handlers/stats.rs

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::{
    error::AppError,
    models::stats::{QuizStats, StatsQuery},
    services::stats::compute_stats,
    store::QuizStore,
};

/// Aggregated statistics over completed sessions.
#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "Statistics",
    params(StatsQuery),
    responses(
        (status = 200, description = "Statistics", body = QuizStats)
    )
)]
pub async fn get_stats(
    State(store): State<Arc<dyn QuizStore>>,
    Query(params): Query<StatsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let stats = compute_stats(store.as_ref(), params.user_id.as_deref()).await?;
    Ok(Json(stats))
}

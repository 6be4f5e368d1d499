// src/handlers/category.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::{
    error::AppError,
    models::{category::QuizCategory, question::Question},
    store::QuizStore,
};

/// Lists all quiz categories.
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Categories",
    responses(
        (status = 200, description = "All categories", body = [QuizCategory])
    )
)]
pub async fn list_categories(
    State(store): State<Arc<dyn QuizStore>>,
) -> Result<impl IntoResponse, AppError> {
    let categories = store.list_categories().await?;
    Ok(Json(categories))
}

/// Retrieves a single category by ID.
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "Categories",
    params(("id" = String, Path, description = "Category slug")),
    responses(
        (status = 200, description = "The category", body = QuizCategory),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category(
    State(store): State<Arc<dyn QuizStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let category = store
        .get_category(&id)
        .await?
        .ok_or(AppError::NotFound("Category not found".to_string()))?;

    Ok(Json(category))
}

/// Lists the questions of a category.
///
/// Unknown categories return an empty list rather than 404.
#[utoipa::path(
    get,
    path = "/api/categories/{id}/questions",
    tag = "Categories",
    params(("id" = String, Path, description = "Category slug")),
    responses(
        (status = 200, description = "Questions of the category", body = [Question])
    )
)]
pub async fn list_questions(
    State(store): State<Arc<dyn QuizStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let questions = store.list_questions_by_category(&id).await?;
    Ok(Json(questions))
}

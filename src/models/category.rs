// src/models/category.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use utoipa::ToSchema;

/// Represents the 'quiz_categories' table.
/// Categories are seeded once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizCategory {
    /// Stable slug, e.g. "science".
    pub id: String,

    pub name: String,

    pub description: String,

    /// Icon reference used by the client (e.g. "fas fa-atom").
    pub icon: String,

    /// Free-text label: Beginner, Intermediate, Advanced, Expert or All Levels.
    pub difficulty: String,

    /// Estimated completion time in minutes.
    pub estimated_time: i32,

    /// Declared number of questions. Informational only.
    pub question_count: i32,
}

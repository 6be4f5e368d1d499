// src/models/question.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single multiple-choice item belonging to a category.
///
/// `category_id` is not checked against the category table, so a question
/// may point at a category that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,

    pub category_id: String,

    pub question_text: String,

    /// Answer options in display order.
    pub options: Vec<String>,

    /// Zero-based index into `options`.
    pub correct_answer: i32,

    pub explanation: Option<String>,

    pub difficulty: String,
}

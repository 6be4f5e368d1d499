// src/models/stats.rs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Aggregated statistics over completed sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizStats {
    pub total_quizzes: i64,

    /// Mean score, rounded to the nearest integer.
    pub average_score: i64,

    /// Total time spent, in whole hours.
    pub time_spent: i64,

    pub streak: i64,
}

/// Query parameters for the stats endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StatsQuery {
    /// Restrict statistics to sessions owned by this user.
    pub user_id: Option<String>,
}

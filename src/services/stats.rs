// src/services/stats.rs

use crate::{
    models::{session::QuizSession, stats::QuizStats},
    store::{QuizStore, SessionFilter, StoreError},
};

/// Reported in place of a real consecutive-day streak, which is not computed.
pub const PLACEHOLDER_STREAK: i64 = 7;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Statistics over completed sessions, optionally scoped to one user.
///
/// An empty `user_id` means "no filter".
pub async fn compute_stats(
    store: &dyn QuizStore,
    user_id: Option<&str>,
) -> Result<QuizStats, StoreError> {
    let user_id = user_id.filter(|u| !u.is_empty()).map(str::to_string);
    let sessions = store
        .sessions_matching(&SessionFilter::completed(user_id))
        .await?;

    Ok(aggregate(&sessions))
}

/// Folds already-selected sessions into stats. Missing score or time counts as 0.
pub fn aggregate(sessions: &[QuizSession]) -> QuizStats {
    let total_quizzes = sessions.len() as i64;

    let average_score = if total_quizzes > 0 {
        let sum: i64 = sessions.iter().map(|s| i64::from(s.score.unwrap_or(0))).sum();
        round_half_up(sum as f64 / total_quizzes as f64)
    } else {
        0
    };

    // Sum in seconds first, convert once.
    let seconds: i64 = sessions
        .iter()
        .map(|s| i64::from(s.time_spent.unwrap_or(0)))
        .sum();
    let time_spent = round_half_up(seconds as f64 / SECONDS_PER_HOUR);

    QuizStats {
        total_quizzes,
        average_score,
        time_spent,
        streak: PLACEHOLDER_STREAK,
    }
}

/// Halves round toward positive infinity: 2.5 -> 3, -2.5 -> -2.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::{CreateSessionRequest, UpdateSessionRequest};
    use crate::store::MemoryStore;
    use chrono::Utc;
    use std::collections::{BTreeMap, BTreeSet};

    fn completed(score: Option<i32>, time_spent: Option<i32>) -> QuizSession {
        QuizSession {
            id: "s".to_string(),
            category_id: "science".to_string(),
            user_id: None,
            started_at: Utc::now(),
            completed_at: Some(Utc::now()),
            answers: BTreeMap::new(),
            marked_for_review: BTreeSet::new(),
            time_spent,
            score,
            total_questions: 5,
        }
    }

    async fn finish(store: &MemoryStore, user_id: Option<&str>, score: i32, time_spent: i32) {
        let session = store
            .create_session(CreateSessionRequest {
                category_id: "science".to_string(),
                user_id: user_id.map(str::to_string),
                total_questions: 5,
                answers: BTreeMap::new(),
                marked_for_review: BTreeSet::new(),
                time_spent: None,
                score: None,
            })
            .await
            .unwrap();
        let update = UpdateSessionRequest {
            completed_at: Some(Some(Utc::now())),
            score: Some(Some(score)),
            time_spent: Some(Some(time_spent)),
            ..Default::default()
        };
        store.update_session(&session.id, update).await.unwrap();
    }

    #[test]
    fn empty_input_is_all_zero_except_streak() {
        let stats = aggregate(&[]);
        assert_eq!(stats.total_quizzes, 0);
        assert_eq!(stats.average_score, 0);
        assert_eq!(stats.time_spent, 0);
        assert_eq!(stats.streak, PLACEHOLDER_STREAK);
    }

    #[test]
    fn averages_scores_and_converts_time_to_hours() {
        let sessions = [
            completed(Some(80), Some(1800)),
            completed(Some(90), Some(1800)),
            completed(Some(100), Some(1800)),
        ];
        let stats = aggregate(&sessions);

        assert_eq!(stats.total_quizzes, 3);
        assert_eq!(stats.average_score, 90);
        assert_eq!(stats.time_spent, 2);
    }

    #[test]
    fn missing_values_count_as_zero() {
        let sessions = [completed(Some(90), None), completed(None, Some(3600))];
        let stats = aggregate(&sessions);

        assert_eq!(stats.average_score, 45);
        assert_eq!(stats.time_spent, 1);
    }

    #[test]
    fn time_is_summed_before_rounding() {
        // 3 x 1000s = 3000s ~ 0.83h -> 1. Rounding per session would give 0.
        let sessions = [
            completed(Some(0), Some(1000)),
            completed(Some(0), Some(1000)),
            completed(Some(0), Some(1000)),
        ];
        assert_eq!(aggregate(&sessions).time_spent, 1);
    }

    #[test]
    fn halves_round_up() {
        let sessions = [completed(Some(1), Some(1800)), completed(Some(2), Some(0))];
        let stats = aggregate(&sessions);

        assert_eq!(stats.average_score, 2);
        assert_eq!(stats.time_spent, 1);
        assert_eq!(round_half_up(-2.5), -2);
    }

    #[tokio::test]
    async fn stats_only_count_completed_sessions() {
        let store = MemoryStore::seeded();
        finish(&store, None, 80, 1800).await;
        finish(&store, Some("userX"), 90, 1800).await;
        finish(&store, Some("userY"), 100, 1800).await;
        // In progress, ignored.
        store
            .create_session(CreateSessionRequest {
                category_id: "science".to_string(),
                user_id: Some("userX".to_string()),
                total_questions: 5,
                answers: BTreeMap::new(),
                marked_for_review: BTreeSet::new(),
                time_spent: None,
                score: None,
            })
            .await
            .unwrap();

        let all = compute_stats(&store, None).await.unwrap();
        assert_eq!(all.total_quizzes, 3);
        assert_eq!(all.average_score, 90);
        assert_eq!(all.time_spent, 2);

        let user_x = compute_stats(&store, Some("userX")).await.unwrap();
        assert_eq!(user_x.total_quizzes, 1);
        assert_eq!(user_x.average_score, 90);

        let unfiltered = compute_stats(&store, Some("")).await.unwrap();
        assert_eq!(unfiltered, all);
    }
}

// src/models/session.rs

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::utils::extract::RequestBody;

/// One attempt at a category's question set.
///
/// A session is in progress while `completed_at` is `None` and completed once
/// an update sets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizSession {
    pub id: String,

    pub category_id: String,

    /// `None` for anonymous sessions.
    pub user_id: Option<String>,

    pub started_at: DateTime<Utc>,

    pub completed_at: Option<DateTime<Utc>>,

    /// Question id -> selected option index.
    #[schema(value_type = Object)]
    pub answers: BTreeMap<String, i32>,

    /// Question ids flagged for later review.
    #[schema(value_type = Vec<String>)]
    pub marked_for_review: BTreeSet<String>,

    /// Elapsed time in seconds.
    pub time_spent: Option<i32>,

    pub score: Option<i32>,

    pub total_questions: i32,
}

impl QuizSession {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// DTO for starting a new session.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[validate(length(min = 1, max = 100))]
    pub category_id: String,

    #[serde(default)]
    #[validate(length(max = 100))]
    pub user_id: Option<String>,

    #[validate(range(min = 0))]
    pub total_questions: i32,

    #[serde(default)]
    #[validate(custom(function = validate_answers))]
    #[schema(value_type = Object)]
    pub answers: BTreeMap<String, i32>,

    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    pub marked_for_review: BTreeSet<String>,

    /// Elapsed seconds, if the client already tracks them.
    #[serde(default)]
    #[validate(range(min = 0))]
    pub time_spent: Option<i32>,

    #[serde(default)]
    pub score: Option<i32>,
}

impl RequestBody for CreateSessionRequest {
    const INVALID_MESSAGE: &'static str = "Invalid session data";
}

impl CreateSessionRequest {
    /// Builds the stored record. Empty user ids are treated as anonymous.
    pub fn into_session(self, id: String, started_at: DateTime<Utc>) -> QuizSession {
        QuizSession {
            id,
            category_id: self.category_id,
            user_id: self.user_id.filter(|u| !u.is_empty()),
            started_at,
            completed_at: None,
            answers: self.answers,
            marked_for_review: self.marked_for_review,
            time_spent: self.time_spent,
            score: self.score,
            total_questions: self.total_questions,
        }
    }
}

/// DTO for a partial session update.
///
/// Each field is an independent slot: a missing field leaves the stored value
/// alone, a present field replaces it wholesale. `answers` and
/// `markedForReview` are never merged entry by entry.
///
/// For the nullable fields an explicit JSON `null` clears the stored value,
/// hence the nested `Option`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSessionRequest {
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub answers: Option<BTreeMap<String, i32>>,

    #[serde(default)]
    #[schema(value_type = Option<Vec<String>>)]
    pub marked_for_review: Option<BTreeSet<String>>,

    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub completed_at: Option<Option<DateTime<Utc>>>,

    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<i32>)]
    pub time_spent: Option<Option<i32>>,

    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<i32>)]
    pub score: Option<Option<i32>>,
}

impl RequestBody for UpdateSessionRequest {
    const INVALID_MESSAGE: &'static str = "Invalid update data";
}

impl UpdateSessionRequest {
    /// Shallow merge into `session`. Immutable fields are never touched.
    pub fn apply_to(self, session: &mut QuizSession) {
        if let Some(answers) = self.answers {
            session.answers = answers;
        }
        if let Some(marked) = self.marked_for_review {
            session.marked_for_review = marked;
        }
        if let Some(completed_at) = self.completed_at {
            session.completed_at = completed_at;
        }
        if let Some(time_spent) = self.time_spent {
            session.time_spent = time_spent;
        }
        if let Some(score) = self.score {
            session.score = score;
        }
    }
}

impl Validate for UpdateSessionRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(answers) = &self.answers {
            if let Err(e) = validate_answers(answers) {
                errors.add("answers", e);
            }
        }
        if let Some(Some(seconds)) = self.time_spent {
            if seconds < 0 {
                errors.add("time_spent", ValidationError::new("negative_time_spent"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Answer indices are zero-based, so negatives can never point at an option.
fn validate_answers(answers: &BTreeMap<String, i32>) -> Result<(), ValidationError> {
    if answers.values().any(|&index| index < 0) {
        return Err(ValidationError::new("negative_answer_index"));
    }
    Ok(())
}

/// Distinguishes a missing field (outer `None`, via `#[serde(default)]`) from
/// an explicit `null` (`Some(None)`).
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn in_progress() -> QuizSession {
        CreateSessionRequest {
            category_id: "science".to_string(),
            user_id: None,
            total_questions: 5,
            answers: BTreeMap::new(),
            marked_for_review: BTreeSet::new(),
            time_spent: None,
            score: None,
        }
        .into_session("s1".to_string(), Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn update_replaces_answers_wholesale() {
        let mut session = in_progress();
        session.answers.insert("q1".to_string(), 0);
        session.answers.insert("q2".to_string(), 3);

        let update: UpdateSessionRequest =
            serde_json::from_value(serde_json::json!({ "answers": { "q3": 1 } })).unwrap();
        update.apply_to(&mut session);

        assert_eq!(session.answers.len(), 1);
        assert_eq!(session.answers.get("q3"), Some(&1));
    }

    #[test]
    fn missing_fields_are_untouched() {
        let mut session = in_progress();
        session.answers.insert("q1".to_string(), 0);
        session.score = Some(40);

        let update: UpdateSessionRequest =
            serde_json::from_value(serde_json::json!({ "markedForReview": ["q2"] })).unwrap();
        update.apply_to(&mut session);

        assert_eq!(session.answers.get("q1"), Some(&0));
        assert_eq!(session.score, Some(40));
        assert!(session.marked_for_review.contains("q2"));
    }

    #[test]
    fn explicit_null_clears_nullable_fields() {
        let mut session = in_progress();
        session.completed_at = Some(Utc::now());
        session.score = Some(70);

        let update: UpdateSessionRequest =
            serde_json::from_value(serde_json::json!({ "completedAt": null, "score": null }))
                .unwrap();
        assert_eq!(update.completed_at, Some(None));
        update.apply_to(&mut session);

        assert!(!session.is_completed());
        assert_eq!(session.score, None);
    }

    #[test]
    fn immutable_fields_in_body_are_ignored() {
        let mut session = in_progress();
        let original = session.clone();

        let update: UpdateSessionRequest = serde_json::from_value(serde_json::json!({
            "id": "other",
            "categoryId": "history",
            "totalQuestions": 99,
            "userId": "mallory"
        }))
        .unwrap();
        update.apply_to(&mut session);

        assert_eq!(session, original);
    }

    #[test]
    fn completion_update_sets_all_result_fields() {
        let mut session = in_progress();
        let finished = Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap();

        let update: UpdateSessionRequest = serde_json::from_value(serde_json::json!({
            "completedAt": "2024-01-01T12:30:00Z",
            "timeSpent": 1800,
            "score": 80
        }))
        .unwrap();
        update.apply_to(&mut session);

        assert_eq!(session.completed_at, Some(finished));
        assert_eq!(session.time_spent, Some(1800));
        assert_eq!(session.score, Some(80));
    }

    #[test]
    fn create_keeps_initial_score_and_time() {
        let req: CreateSessionRequest = serde_json::from_value(serde_json::json!({
            "categoryId": "science",
            "totalQuestions": 5,
            "score": 50,
            "timeSpent": 10
        }))
        .unwrap();
        let session = req.into_session("s3".to_string(), Utc::now());

        assert_eq!(session.score, Some(50));
        assert_eq!(session.time_spent, Some(10));
        assert!(!session.is_completed());
    }

    #[test]
    fn empty_user_id_becomes_anonymous() {
        let session = CreateSessionRequest {
            category_id: "science".to_string(),
            user_id: Some(String::new()),
            total_questions: 1,
            answers: BTreeMap::new(),
            marked_for_review: BTreeSet::new(),
            time_spent: None,
            score: None,
        }
        .into_session("s2".to_string(), Utc::now());

        assert_eq!(session.user_id, None);
    }

    #[test]
    fn create_validation_rejects_bad_input() {
        let req: CreateSessionRequest = serde_json::from_value(serde_json::json!({
            "categoryId": "",
            "totalQuestions": -1,
            "answers": { "q1": -2 }
        }))
        .unwrap();

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("category_id"));
        assert!(fields.contains_key("total_questions"));
        assert!(fields.contains_key("answers"));
    }

    #[test]
    fn update_validation_rejects_negative_values() {
        let update: UpdateSessionRequest = serde_json::from_value(serde_json::json!({
            "answers": { "q1": -1 },
            "timeSpent": -5
        }))
        .unwrap();

        assert!(update.validate().is_err());
        assert!(UpdateSessionRequest::default().validate().is_ok());
    }
}

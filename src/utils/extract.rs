// src/utils/extract.rs

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use validator::{Validate, ValidationErrors};

use crate::error::AppError;

/// A JSON request body accepted through `ValidatedJson`.
pub trait RequestBody: DeserializeOwned + Validate {
    /// Returned as `message` when the body is rejected.
    const INVALID_MESSAGE: &'static str;
}

/// JSON body extractor that also runs `Validate`.
///
/// Malformed JSON, a wrong shape and failed validation all reject with
/// `AppError::InvalidInput` before the handler runs, so nothing is stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: RequestBody,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!("Rejected request body: {}", rejection.body_text());
            AppError::InvalidInput {
                message: T::INVALID_MESSAGE,
                errors: json!(rejection.body_text()),
            }
        })?;

        value.validate().map_err(|e| AppError::InvalidInput {
            message: T::INVALID_MESSAGE,
            errors: field_errors(&e),
        })?;

        Ok(ValidatedJson(value))
    }
}

/// `{"fieldName": ["code", ...]}` with field names as the API spells them.
fn field_errors(errors: &ValidationErrors) -> Value {
    let fields: Map<String, Value> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let codes: Vec<String> = errs.iter().map(|e| e.code.to_string()).collect();
            (camel_case(&field), json!(codes))
        })
        .collect();

    Value::Object(fields)
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::CreateSessionRequest;

    #[test]
    fn field_names_are_camel_cased() {
        assert_eq!(camel_case("category_id"), "categoryId");
        assert_eq!(camel_case("marked_for_review"), "markedForReview");
        assert_eq!(camel_case("answers"), "answers");
    }

    #[test]
    fn validation_details_use_api_field_names() {
        let req: CreateSessionRequest = serde_json::from_value(json!({
            "categoryId": "",
            "totalQuestions": -1
        }))
        .unwrap();

        let details = field_errors(&req.validate().unwrap_err());
        let fields = details.as_object().unwrap();
        assert!(fields.contains_key("categoryId"));
        assert!(fields.contains_key("totalQuestions"));
        assert!(!fields.contains_key("category_id"));
    }
}

//! Validation utilities for HTTP API DTOs.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::board::{MAX_PASSWORD_LENGTH, MAX_TEXT_LENGTH};
use crate::web::error::ApiError;

/// A body extractor that accepts JSON or a urlencoded form and validates it.
///
/// The format is picked from the `Content-Type` header; anything other than
/// `application/x-www-form-urlencoded` is parsed as JSON. A body that cannot
/// be parsed is a 400, a body that fails validation is a 422 with
/// field-level details.
///
/// # Example
///
/// ```ignore
/// use msgboard::web::dto::ValidatedBody;
///
/// async fn create_thread(
///     ValidatedBody(payload): ValidatedBody<CreateThreadRequest>,
/// ) -> Result<Json<Thread>, ApiError> {
///     // payload is already validated
///     // ...
/// }
/// ```
pub struct ValidatedBody<T>(pub T);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send + 'static,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(format!("Invalid form body: {}", e)))?;
            value
        } else {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e)))?;
            value
        };

        value.validate().map_err(ApiError::from_validation_errors)?;

        Ok(ValidatedBody(value))
    }
}

// ============================================================================
// Custom Validators
// ============================================================================

/// Validate that a string does not contain control characters or NULL bytes.
pub fn no_control_chars(value: &str) -> Result<(), validator::ValidationError> {
    if value
        .chars()
        .any(|c| c.is_control() && c != '\n' && c != '\r' && c != '\t')
    {
        return Err(validator::ValidationError::new("no_control_chars")
            .with_message("Must not contain control characters".into()));
    }
    Ok(())
}

/// Validate that a string is not empty after trimming whitespace.
pub fn not_empty_trimmed(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("not_empty_trimmed")
            .with_message("Must not be empty".into()));
    }
    Ok(())
}

/// Validate that a string has at most `max` characters.
fn max_chars(
    value: &str,
    max: usize,
    message: &'static str,
) -> Result<(), validator::ValidationError> {
    if value.chars().count() > max {
        let mut err = validator::ValidationError::new("too_long").with_message(message.into());
        err.add_param("max".into(), &max);
        return Err(err);
    }
    Ok(())
}

/// Validate thread or reply text: non-blank, free of control characters and
/// at most [`MAX_TEXT_LENGTH`] characters.
pub fn post_text(value: &str) -> Result<(), validator::ValidationError> {
    not_empty_trimmed(value)?;
    no_control_chars(value)?;
    max_chars(value, MAX_TEXT_LENGTH, "Text is too long")
}

/// Validate a delete password chosen at creation time.
pub fn new_password(value: &str) -> Result<(), validator::ValidationError> {
    not_empty_trimmed(value)?;
    max_chars(value, MAX_PASSWORD_LENGTH, "Password is too long")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(custom(function = "not_empty_trimmed"))]
        name: String,
    }

    async fn extract(content_type: &str, body: &'static str) -> Result<Sample, ApiError> {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap();
        ValidatedBody::<Sample>::from_request(req, &())
            .await
            .map(|ValidatedBody(sample)| sample)
    }

    #[test]
    fn test_no_control_chars_valid() {
        assert!(no_control_chars("Hello, world!").is_ok());
        assert!(no_control_chars("Line 1\nLine 2").is_ok());
        assert!(no_control_chars("Tab\there").is_ok());
    }

    #[test]
    fn test_no_control_chars_invalid() {
        assert!(no_control_chars("Hello\x00World").is_err()); // NULL byte
        assert!(no_control_chars("Hello\x1bWorld").is_err()); // Escape
    }

    #[test]
    fn test_not_empty_trimmed() {
        assert!(not_empty_trimmed("  Hello  ").is_ok());
        assert!(not_empty_trimmed("").is_err());
        assert!(not_empty_trimmed("\t\n").is_err());
    }

    #[test]
    fn test_post_text() {
        assert!(post_text("a reply\nwith lines").is_ok());
        assert!(post_text(" ").is_err());
        assert!(post_text("bell\x07").is_err());
        assert!(post_text(&"a".repeat(MAX_TEXT_LENGTH)).is_ok());
        assert!(post_text(&"a".repeat(MAX_TEXT_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_new_password() {
        assert!(new_password(&"p".repeat(MAX_PASSWORD_LENGTH)).is_ok());
        let err = new_password(&"p".repeat(MAX_PASSWORD_LENGTH + 1)).unwrap_err();
        assert_eq!(err.code, "too_long");
        assert!(new_password("  ").is_err());
    }

    #[tokio::test]
    async fn test_extracts_json() {
        let sample = extract("application/json", r#"{"name":"json"}"#)
            .await
            .unwrap();
        assert_eq!(sample.name, "json");
    }

    #[tokio::test]
    async fn test_extracts_form() {
        let sample = extract("application/x-www-form-urlencoded", "name=form+body")
            .await
            .unwrap();
        assert_eq!(sample.name, "form body");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let err = extract("application/json", "{not json").await.unwrap_err();
        assert_eq!(err.code(), crate::web::error::ErrorCode::BadRequest);

        let err = extract("application/json", "{}").await.unwrap_err();
        assert_eq!(err.code(), crate::web::error::ErrorCode::BadRequest);
    }

    #[tokio::test]
    async fn test_invalid_body_is_validation_error() {
        let err = extract("application/json", r#"{"name":"  "}"#)
            .await
            .unwrap_err();
        assert_eq!(err.code(), crate::web::error::ErrorCode::ValidationError);
    }
}

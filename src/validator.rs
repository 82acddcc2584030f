use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use studyport_core::AppError;

fn collect_messages(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            match &error.message {
                Some(msg) => messages.push(msg.to_string()),
                None => messages.push(format!("{field} is invalid")),
            }
        }
    }
    messages.join(", ")
}

/// JSON extractor that runs `validator` rules after deserialization.
///
/// Deserialization failures map to 400, rule violations to 422 with the
/// offending fields named in the message.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::MissingJsonContentType(_) => {
                    AppError::bad_request("Missing 'Content-Type: application/json' header")
                }
                other => {
                    AppError::bad_request(format!("Invalid request body: {}", other.body_text()))
                }
            })?;

        if let Err(errors) = value.validate() {
            return Err(AppError::unprocessable(collect_messages(&errors)));
        }

        Ok(ValidatedJson(value))
    }
}

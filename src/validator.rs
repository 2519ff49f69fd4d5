//! Request extractors that turn malformed input into 400 responses.

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Query, Request,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use schoolhub_core::AppError;

fn format_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Strips axum's generic prefix ("Failed to deserialize ...: ") from a
/// rejection message, leaving serde's field-level explanation.
fn serde_detail(body_text: &str) -> &str {
    body_text
        .split_once(": ")
        .map(|(_, detail)| detail)
        .unwrap_or(body_text)
}

fn json_rejection_to_error(rejection: JsonRejection) -> AppError {
    let error_msg = rejection.body_text();

    if error_msg.contains("missing field") {
        let field = error_msg
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
            .unwrap_or("unknown");
        return AppError::validation(format!("{} is required", field));
    }

    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            AppError::validation("Missing 'Content-Type: application/json' header")
        }
        JsonRejection::JsonDataError(_) => AppError::validation(serde_detail(&error_msg)),
        _ => AppError::validation("Invalid request body"),
    }
}

/// JSON body extractor that also runs `validator` rules.
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
            .map_err(json_rejection_to_error)?;

        value
            .validate()
            .map_err(|errors| AppError::validation(format_errors(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

/// Query-string extractor with JSON error responses.
#[derive(Debug, Clone, Default)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| {
                AppError::validation(format!(
                    "Invalid query parameters: {}",
                    serde_detail(&rejection.body_text())
                ))
            })?;

        Ok(ApiQuery(value))
    }
}

/// Path extractor for record ids. An id that does not parse cannot name an
/// existing record, so it answers 404 like a missing one.
#[derive(Debug, Clone, Copy)]
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| {
                AppError::not_found(anyhow::anyhow!(
                    "Not found: {}",
                    serde_detail(&rejection.body_text())
                ))
            })?;

        Ok(ApiPath(value))
    }
}

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Query, Request,
        rejection::{JsonRejection, QueryRejection},
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body extractor that runs `validator` rules before the handler sees
/// the value.
///
/// Unparseable bodies are rejected with 400. Bodies that parse but do not fit
/// `T` (missing or mistyped fields) and rule violations are rejected with 422.
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::JsonDataError(e) => {
                    AppError::UnprocessableEntity(anyhow::anyhow!(e.body_text()))
                }
                other => AppError::BadRequest(anyhow::anyhow!(
                    "Json parse error: {}",
                    other.body_text()
                )),
            })?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

/// Query string counterpart of [`ValidatedJson`]. Every failure is a 422
/// with the usual JSON error body.
pub struct ValidatedQuery<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| {
                AppError::UnprocessableEntity(anyhow::anyhow!(rejection.body_text()))
            })?;

        value.validate()?;

        Ok(ValidatedQuery(value))
    }
}

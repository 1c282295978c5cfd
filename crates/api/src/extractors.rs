//! Request extractors.

use axum::extract::{FromRequest, Request};
use cinecircle_common::AppError;
use serde::de::DeserializeOwned;

/// JSON body extractor that reports malformed input as a validation error.
///
/// The stock `axum::Json` rejection answers 422; the REST contract here
/// treats an absent or unparseable body the same as an empty field, 400.
#[derive(Debug, Clone)]
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}

//! Request body extraction for submitted forms.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// A JSON form body.
///
/// The body is read as a JSON value first, so a body that is valid JSON but
/// does not fit `T` is rejected with [`AppError::Unreadable`] carrying the
/// submitted value. A body that is not JSON at all is
/// [`AppError::BadRequest`].
#[derive(Debug)]
pub struct FormJson<T>(pub T);

impl<S, T> FromRequest<S> for FormJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(input) = Json::<serde_json::Value>::from_request(req, state).await?;
        match serde_json::from_value(input.clone()) {
            Ok(form) => Ok(FormJson(form)),
            Err(err) => Err(AppError::Unreadable {
                message: err.to_string(),
                input,
            }),
        }
    }
}

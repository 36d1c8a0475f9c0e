//! Extractors whose rejections use the API error body instead of axum's plain text.

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::errors::ApiError;

/// JSON body; malformed input becomes a 400 `{"message": ...}`.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Path parameters; unparsable segments become a 400 `{"message": ...}`.
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| Self(value))
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
    }
}

/// Narrows a path id to the key column type. Ids outside that range name no
/// stored row, so they report the same 404 as any other unknown id.
pub fn record_id(entity: &str, id: i64) -> Result<i32, ApiError> {
    i32::try_from(id).map_err(|_| ApiError::not_found(format!("{entity} not found with id: {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn ids_beyond_key_range_are_missing() {
        assert_eq!(record_id("Employee", 42).ok(), Some(42));
        let err = record_id("Department", 99_999_999_999).unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Department not found with id: 99999999999");
    }
}

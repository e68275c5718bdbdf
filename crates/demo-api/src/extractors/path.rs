//! Path parameter extractors
//!
//! Like `axum::extract::Path`, but rejections go through [`ApiError`] so a
//! malformed segment gets the same JSON error body as every other failure.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::response::ApiError;

/// Extract a single typed path parameter
#[derive(Debug, Clone)]
pub struct PathParam<T>(pub T);

/// A row id from the path. Anything that is not an `i64` is rejected with 400.
pub type IdPath = PathParam<i64>;

#[async_trait]
impl<S, T> FromRequestParts<S> for PathParam<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(PathParam(inner))
    }
}

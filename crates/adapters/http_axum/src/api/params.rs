//! Query-string extractors.

use std::collections::HashMap;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use portal_domain::id::UserId;

use crate::error::ApiError;

/// Name of the query parameter carrying a user id.
pub const USER_ID_PARAM: &str = "userId";

/// Type name reported when `userId` cannot be parsed.
const USER_ID_TYPE: &str = "Integer";

/// Extracts `?userId=<int>`, rejecting with an `Invalid Parameter` error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserIdParam(pub UserId);

impl<S> FromRequestParts<S> for UserIdParam
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)?;

        let raw = params
            .get(USER_ID_PARAM)
            .ok_or_else(|| ApiError::missing_parameter(USER_ID_PARAM, USER_ID_TYPE))?;

        raw.parse::<UserId>()
            .map(Self)
            .map_err(|_| ApiError::invalid_parameter(raw, USER_ID_TYPE))
    }
}

//! Request extractors
//!
//! `DeviceId` identifies the calling device (no accounts, no sessions);
//! `AdminToken` gates the admin surface on the configured bearer token.
//! Both reject at extraction time, before handlers run.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the device identity
pub const DEVICE_ID_HEADER: &str = "x-device-id";

const DEVICE_ID_MAX_LEN: usize = 128;

/// The calling device's identifier, from `X-Device-Id`
///
/// 1-128 visible-ASCII characters. The server never generates these; the
/// device vault does, and the value is opaque here.
#[derive(Debug, Clone)]
pub struct DeviceId(pub String);

impl DeviceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for DeviceId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(DEVICE_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::bad_request("missing X-Device-Id header"))?;

        if value.is_empty()
            || value.len() > DEVICE_ID_MAX_LEN
            || !value.bytes().all(|b| (0x21..=0x7e).contains(&b))
        {
            return Err(ApiError::bad_request(
                "X-Device-Id must be 1-128 visible ASCII characters",
            ));
        }

        Ok(Self(value.to_string()))
    }
}

/// Proof that the request carried the configured admin token
///
/// 401 when the token is absent or wrong; 503 `ADMIN_DISABLED` when no
/// token is configured at all, so a misconfigured deployment is
/// distinguishable from a bad credential.
#[derive(Debug, Clone, Copy)]
pub struct AdminToken;

impl FromRequestParts<AppState> for AdminToken {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = &state.admin_token else {
            return Err(ApiError::AdminDisabled);
        };

        let presented = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(ApiError::Unauthorized)?;

        if presented != expected {
            return Err(ApiError::Unauthorized);
        }

        Ok(Self)
    }
}

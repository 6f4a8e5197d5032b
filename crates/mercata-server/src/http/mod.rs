pub(crate) mod products;

use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use mercata_api::{status_code_for, ApiError};
use mercata_model::{Reviewer, UserId};
use serde_json::json;

pub(crate) const REQUEST_ID_HEADER: &str = "x-request-id";
pub(crate) const USER_ID_HEADER: &str = "x-user-id";
pub(crate) const USER_NAME_HEADER: &str = "x-user-name";

/// Honors a caller-supplied request id, otherwise mints one, so log lines
/// and responses correlate across the proxy chain.
pub(crate) fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), str::to_string)
}

pub(crate) fn with_request_id(mut response: Response, request_id: &str) -> Response {
    if let Ok(value) = HeaderValue::from_str(request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

pub(crate) fn api_error_response(err: ApiError) -> Response {
    let status = StatusCode::from_u16(status_code_for(err.code))
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "error": err }))).into_response()
}

/// The identity provider upstream authenticates the caller and forwards
/// `{id, name}` in headers; those values are trusted verbatim here. A
/// missing name falls back to the id.
pub(crate) fn caller_identity(headers: &HeaderMap) -> Option<Reviewer> {
    let raw_id = headers.get(USER_ID_HEADER)?.to_str().ok()?;
    let id = UserId::parse(raw_id).ok()?;
    let name = headers
        .get(USER_NAME_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or(raw_id)
        .to_string();
    Some(Reviewer { id, name })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_identity_requires_user_id() {
        let mut headers = HeaderMap::new();
        assert!(caller_identity(&headers).is_none());

        headers.insert(USER_NAME_HEADER, HeaderValue::from_static("Ada"));
        assert!(caller_identity(&headers).is_none());

        headers.insert(USER_ID_HEADER, HeaderValue::from_static("u1"));
        let identity = caller_identity(&headers).expect("identity");
        assert_eq!(identity.id.as_str(), "u1");
        assert_eq!(identity.name, "Ada");
    }

    #[test]
    fn caller_name_falls_back_to_id() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("u1"));
        let identity = caller_identity(&headers).expect("identity");
        assert_eq!(identity.name, "u1");
    }

    #[test]
    fn request_id_is_propagated_or_minted() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("req-7"));
        assert_eq!(request_id(&headers), "req-7");

        let minted = request_id(&HeaderMap::new());
        assert!(!minted.is_empty());
    }
}

use axum::{
    http::{header::{HOST, LOCATION}, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::utils::logout_url;

/// Send the browser to the same host with an invalid embedded credential so it
/// forgets the cached Basic auth.
pub async fn logout_get(headers: HeaderMap, uri: Uri) -> Response {
    let host = headers
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .or_else(|| uri.authority().map(|a| a.to_string()))
        .unwrap_or_default();
    (StatusCode::FOUND, [(LOCATION, logout_url(&host))]).into_response()
}

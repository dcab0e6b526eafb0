use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::IntoResponse;

// Embed the default stylesheet in the binary
const DEFAULT_STYLESHEET: &str = include_str!("../../static/styles.css");

pub async fn stylesheet_get() -> impl IntoResponse {
    (
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=3600"),
        ],
        DEFAULT_STYLESHEET,
    )
}

use axum::response::{Html, IntoResponse, Response};

use crate::error::AppResult;
use crate::templates::BaseTemplate;

/// Render a page; a template failure surfaces as `AppError::Template`.
pub fn render_template<T: askama::Template + BaseTemplate>(t: T) -> AppResult<Response> {
    let user = t.current_user().as_ref().map(|u| u.username.clone());
    let body = t.render()?;
    tracing::debug!(?user, "Rendered page");
    Ok(Html(body).into_response())
}

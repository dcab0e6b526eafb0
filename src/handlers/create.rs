use axum::{
    body::Bytes,
    extract::{Extension, State},
    response::Response,
};

use crate::error::AppResult;
use crate::handlers::helpers::render_template;
use crate::models::{AppState, CreateForm, CurrentUser};
use crate::services::create_service;
use crate::templates::CreateTemplate;
use crate::utils::parse_urlencoded_body;

pub async fn create_get(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Response> {
    let page = create_service::show(&state).await?;
    render_template(CreateTemplate::new(Some(user), state.refresh_seconds, page))
}

pub async fn create_post(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    body: Bytes,
) -> AppResult<Response> {
    let form = CreateForm::from_fields(&parse_urlencoded_body(&body));
    tracing::info!(user = %user.username, url = %form.url.trim(), "Creation form submitted");
    let page = create_service::submit(&state, &form).await?;
    render_template(CreateTemplate::new(Some(user), state.refresh_seconds, page))
}

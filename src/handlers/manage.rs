use axum::{
    body::Bytes,
    extract::{Extension, State},
    response::Response,
};

use crate::error::AppResult;
use crate::handlers::helpers::render_template;
use crate::models::{AppState, CurrentUser, VmRow};
use crate::services::partition_deletions;
use crate::templates::ManageTemplate;
use crate::utils::parse_urlencoded_body;

pub async fn manage_get(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Response> {
    render_manage(&state, user, None).await
}

pub async fn manage_post(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    body: Bytes,
) -> AppResult<Response> {
    let fields = parse_urlencoded_body(&body);
    let requested = fields.get("vmname").cloned().unwrap_or_default();
    let (to_delete, refused) = partition_deletions(&requested, &state.protected_hosts);

    let mut message = None;
    if !refused.is_empty() {
        tracing::warn!(user = %user.username, ?refused, "Refused to delete protected hosts");
        message = Some(format!("Protected hosts were not deleted: {}.", refused.join(", ")));
    }
    if !to_delete.is_empty() {
        tracing::info!(user = %user.username, vms = ?to_delete, "Deletion requested");
        state.vms.delete(&to_delete).await?;
    }
    render_manage(&state, user, message).await
}

async fn render_manage(state: &AppState, user: CurrentUser, message: Option<String>) -> AppResult<Response> {
    let running = state.vms.list_running().await?;
    let rows = VmRow::from_listing(&running, &state.protected_hosts);
    let protected_count = rows.iter().filter(|r| r.protected).count();
    render_template(ManageTemplate {
        current_user: Some(user),
        refresh_seconds: state.refresh_seconds,
        message,
        vm_list: &rows,
        protected_count,
    })
}

use crate::error::AppResult;
use crate::models::{AppState, CreateForm, CreatePage};
use crate::services::CreationRequest;
use crate::utils::{is_node_count, is_valid_url, normalize_download_url};

const IN_PROGRESS: &str = "Host creation in progress. Please wait. ";
const IN_PROGRESS_RESUBMIT: &str = "Host creation in progress. Please wait before submitting again. ";

pub const MSG_NODES_NOT_NUMBER: &str = "The number of nodes must be a number.";
pub const MSG_URL_EMPTY: &str = "The URL cannot be empty.";
pub const MSG_URL_INVALID: &str = "The provided URL is not valid.";

/// State of the creation page for a plain visit.
pub async fn show(state: &AppState) -> AppResult<CreatePage> {
    let running_count = state.vms.list_running().await?.len();
    let phase = state.probe.job_phase().await?;
    if phase.is_busy() {
        return Ok(CreatePage::in_progress(running_count, IN_PROGRESS, phase));
    }
    Ok(CreatePage::blank(running_count))
}

/// Validate a submission and, when the host is idle, launch the creation job.
pub async fn submit(state: &AppState, form: &CreateForm) -> AppResult<CreatePage> {
    let running_count = state.vms.list_running().await?.len();
    let phase = state.probe.job_phase().await?;

    if phase.is_busy() {
        tracing::info!(%phase, "Rejected creation request while a job is running");
        return Ok(CreatePage {
            num_of_nodes: form.num_of_nodes_or_default(),
            node_prefix: form.node_prefix_trimmed(),
            ..CreatePage::in_progress(running_count, IN_PROGRESS_RESUBMIT, phase)
        });
    }

    let num_of_nodes = form.num_of_nodes_or_default();
    let redisplay = CreatePage {
        num_of_nodes: num_of_nodes.clone(),
        node_prefix: form.node_prefix_trimmed(),
        url: form.url.trim().to_string(),
        ..CreatePage::blank(running_count)
    };

    if !is_node_count(&num_of_nodes) {
        return Ok(redisplay.warning(MSG_NODES_NOT_NUMBER));
    }

    let url = normalize_download_url(&form.url);
    if url.is_empty() {
        return Ok(redisplay.warning(MSG_URL_EMPTY));
    }
    if !is_valid_url(&url) {
        return Ok(redisplay.warning(MSG_URL_INVALID));
    }

    let request = CreationRequest {
        url,
        num_of_nodes,
        prefix: form.creation_prefix(),
    };
    state.vms.start_creation(&request).await?;

    let phase = state.probe.job_phase().await?;
    Ok(CreatePage::submitted(running_count, phase))
}

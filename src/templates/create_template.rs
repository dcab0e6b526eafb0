use askama::Template;
use crate::models::{CreatePage, CurrentUser, MessageType};

#[derive(Template)]
#[template(path = "create.html")]
pub struct CreateTemplate {
    pub current_user: Option<CurrentUser>,
    pub refresh_seconds: u64,
    pub message: Option<String>,
    pub message_type: MessageType,
    pub hide_form: bool,
    pub auto_refresh: bool,
    pub running_count: usize,
    pub num_of_nodes: String,
    pub node_prefix: String,
    pub url: String,
}

impl CreateTemplate {
    pub fn new(current_user: Option<CurrentUser>, refresh_seconds: u64, page: CreatePage) -> Self {
        Self {
            current_user,
            refresh_seconds,
            message: page.message,
            message_type: page.message_type,
            hide_form: page.hide_form,
            auto_refresh: page.auto_refresh,
            running_count: page.running_count,
            num_of_nodes: page.num_of_nodes,
            node_prefix: page.node_prefix,
            url: page.url,
        }
    }
}

crate::impl_base_template!(CreateTemplate);

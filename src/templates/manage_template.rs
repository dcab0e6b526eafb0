use askama::Template;
use crate::models::{CurrentUser, VmRow};

#[derive(Template)]
#[template(path = "manage.html")]
pub struct ManageTemplate<'a> {
    pub current_user: Option<CurrentUser>,
    pub refresh_seconds: u64,
    pub message: Option<String>,
    pub vm_list: &'a [VmRow],
    pub protected_count: usize,
}

crate::impl_base_template!(ManageTemplate<'_>);

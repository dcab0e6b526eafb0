pub mod app_state;
pub mod create_form;
pub mod create_page;
pub mod current_user;
pub mod job_phase;
pub mod message_type;
pub mod vm_row;

pub use app_state::AppState;
pub use create_form::CreateForm;
pub use create_page::CreatePage;
pub use current_user::CurrentUser;
pub use job_phase::JobPhase;
pub use message_type::MessageType;
pub use vm_row::VmRow;

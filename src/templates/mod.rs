// Base template trait for inheritance
pub mod base_template;
pub use base_template::BaseTemplate;

// Individual template files
pub mod create_template;
pub mod manage_template;

pub use create_template::CreateTemplate;
pub use manage_template::ManageTemplate;

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod templates;
pub mod utils;

pub use error::{AppError, AppResult};
pub use models::AppState;
pub use routes::build_router;

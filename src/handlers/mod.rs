pub mod auth;
pub mod create;
pub mod helpers;
pub mod manage;
pub mod middleware;
pub mod system;

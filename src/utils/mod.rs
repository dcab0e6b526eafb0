// URL handling utilities
pub mod url_encoding;
pub mod url_parser;
pub mod url_builder;

// Parsing utilities
pub mod parse_int;

// Re-export all utilities for convenient access
pub use url_encoding::parse_urlencoded_body;
pub use url_parser::{is_valid_url, normalize_download_url};
pub use url_builder::logout_url;
pub use parse_int::is_node_count;

pub mod base64;
pub mod file;
pub mod http;
pub mod url;

// Re-export common utilities
pub use file::{file_exists, file_get, file_write};
pub use url::is_link;

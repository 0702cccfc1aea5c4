//! HTTP client for the notification service.
//!
//! - [`ApiKey`] parses the combined key and signs per-request tokens
//! - [`ClientOptions`] carries base URL and timeouts
//! - [`NotificationClient`] performs the calls and maps error responses

mod auth;
mod http;
mod notification_client;
mod options;

pub use auth::{ApiKey, Claims};
pub use http::user_agent;
pub use notification_client::NotificationClient;
pub use options::ClientOptions;

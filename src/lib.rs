//! Client SDK for the GOV.UK Notify API
//!
//! [`NotificationClient`] sends SMS, email and letters, looks up
//! notifications and received texts, and fetches or previews templates.
//! Every call is signed with a token derived from the service API key, and
//! any non-2xx response surfaces as [`NotifyError::Client`].
//!
//! The `cli`, `config` and `logger` modules back the `notify` binary.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;

pub use client::{ApiKey, ClientOptions, NotificationClient};
pub use error::{ApiError, NotifyError, NotifyResult};

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}

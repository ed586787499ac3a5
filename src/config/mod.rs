//! Configuration module
//!
//! Settings for the HTTP client, search trigger, notifications, and
//! local store, persisted as TOML in the platform config directory.

pub mod config;

pub use config::{Config, HttpConfig, NotificationConfig, SearchConfig, StorageConfig};

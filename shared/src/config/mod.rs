//! Configuration module for the synchronization engine.

pub mod sync;

pub use sync::{parse_tag_list, ConfigError, SyncConfig, DEFAULT_POLL_INTERVAL_SECS};

//! Configuration module for twitter-backup.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Backup, run and media error modes
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{
    Config, CredentialsConfig, FollowingConfig, LikesConfig, OptionsConfig, RateLimitConfig,
    CONFIG_FILE_NAME, MAX_PAGE_SIZE,
};
pub use modes::{BackupMode, MediaErrorPolicy, ResourceKind, RunMode};
pub use validation::validate_config;

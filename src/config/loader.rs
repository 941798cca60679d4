//! Configuration structures and loading logic.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::config::modes::{BackupMode, MediaErrorPolicy, RunMode};
use crate::error::{Error, Result};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Largest page the API hands out.
pub const MAX_PAGE_SIZE: u32 = 200;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub credentials: CredentialsConfig,

    #[serde(default)]
    pub options: OptionsConfig,

    #[serde(default)]
    pub likes: LikesConfig,

    #[serde(default)]
    pub following: FollowingConfig,

    #[serde(default)]
    pub rate_limits: RateLimitConfig,
}

/// OAuth 1.0a credentials from the developer portal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub consumer_key: String,

    #[serde(default)]
    pub consumer_secret: String,

    #[serde(default)]
    pub access_token: String,

    #[serde(default)]
    pub access_secret: String,
}

/// Backup options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Which resources to back up.
    #[serde(default)]
    pub mode: BackupMode,

    /// Base directory the resource directories are created in.
    #[serde(default)]
    pub output_directory: Option<PathBuf>,

    /// Directory name for liked tweets.
    #[serde(default = "default_likes_directory")]
    pub likes_directory: String,

    /// Directory name for followed accounts.
    #[serde(default = "default_following_directory")]
    pub following_directory: String,

    /// Whether to wipe the resource directories before a run.
    #[serde(default)]
    pub run_mode: RunMode,

    /// What to do when a media asset fails at the transport level.
    #[serde(default)]
    pub media_errors: MediaErrorPolicy,

    /// Items requested per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Whether to print a line per saved item.
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            mode: BackupMode::default(),
            output_directory: None,
            likes_directory: default_likes_directory(),
            following_directory: default_following_directory(),
            run_mode: RunMode::default(),
            media_errors: MediaErrorPolicy::default(),
            page_size: default_page_size(),
            api_base: default_api_base(),
            show_progress: true,
        }
    }
}

/// Request flags for the liked tweets endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikesConfig {
    /// `extended` returns untruncated text.
    #[serde(default = "default_tweet_mode")]
    pub tweet_mode: String,

    /// Include the entities node (media descriptors live there).
    #[serde(default = "default_true")]
    pub include_entities: bool,
}

impl Default for LikesConfig {
    fn default() -> Self {
        Self {
            tweet_mode: default_tweet_mode(),
            include_entities: true,
        }
    }
}

/// Request flags for the followed accounts endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowingConfig {
    #[serde(default = "default_true")]
    pub include_user_entities: bool,
}

impl Default for FollowingConfig {
    fn default() -> Self {
        Self {
            include_user_entities: true,
        }
    }
}

/// Documented quotas per fifteen minute window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_likes_requests")]
    pub likes_requests: u32,

    #[serde(default = "default_following_requests")]
    pub following_requests: u32,

    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,

    /// Extra delay added on top of the computed interval.
    #[serde(default = "default_margin_millis")]
    pub margin_millis: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            likes_requests: default_likes_requests(),
            following_requests: default_following_requests(),
            window_seconds: default_window_seconds(),
            margin_millis: default_margin_millis(),
        }
    }
}

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_seconds)
    }

    pub fn margin(&self) -> Duration {
        Duration::from_millis(self.margin_millis)
    }
}

fn default_likes_directory() -> String {
    "likes".to_string()
}

fn default_following_directory() -> String {
    "following".to_string()
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_api_base() -> String {
    "https://api.twitter.com/1.1/".to_string()
}

fn default_tweet_mode() -> String {
    "extended".to_string()
}

fn default_true() -> bool {
    true
}

fn default_likes_requests() -> u32 {
    75
}

fn default_following_requests() -> u32 {
    15
}

fn default_window_seconds() -> u64 {
    15 * 60
}

fn default_margin_millis() -> u64 {
    500
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Find the configuration file to use when none was given explicitly.
    ///
    /// The working directory wins over the per-user config directory.
    pub fn default_path() -> PathBuf {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return local;
        }

        ProjectDirs::from("", "", "twitter-backup")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
            .unwrap_or(local)
    }

    /// Get the effective output directory.
    pub fn output_directory(&self) -> PathBuf {
        self.options
            .output_directory
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Directory the liked tweets are written to.
    pub fn likes_directory(&self) -> PathBuf {
        self.output_directory().join(&self.options.likes_directory)
    }

    /// Directory the followed accounts are written to.
    pub fn following_directory(&self) -> PathBuf {
        self.output_directory()
            .join(&self.options.following_directory)
    }
}

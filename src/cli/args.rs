//! Command-line argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{BackupMode, Config, MediaErrorPolicy, RunMode};

/// Twitter likes and followed accounts backup CLI.
#[derive(Parser, Debug)]
#[command(
    name = "twitter-backup",
    version,
    about = "Back up your liked tweets and followed accounts",
    long_about = "Walks your liked tweets and followed accounts page by page and stores every \
                  record as JSON, with the photos of liked tweets next to them.\n\n\
                  Requests are paced to stay within the documented rate limits."
)]
pub struct Args {
    /// OAuth consumer key.
    #[arg(long = "consumer-key", env = "TWITTER_CONSUMER_KEY", hide_env_values = true)]
    pub consumer_key: Option<String>,

    /// OAuth consumer secret.
    #[arg(long = "consumer-secret", env = "TWITTER_CONSUMER_SECRET", hide_env_values = true)]
    pub consumer_secret: Option<String>,

    /// OAuth access token.
    #[arg(long = "access-token", env = "TWITTER_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// OAuth access token secret.
    #[arg(long = "access-secret", env = "TWITTER_ACCESS_SECRET", hide_env_values = true)]
    pub access_secret: Option<String>,

    /// Which resources to back up.
    #[arg(long, value_enum)]
    pub mode: Option<BackupModeArg>,

    /// Base directory for the likes and following directories.
    #[arg(short = 'd', long = "directory")]
    pub output_directory: Option<PathBuf>,

    /// Keep items from a previous run instead of wiping the directories.
    #[arg(long)]
    pub resume: bool,

    /// Skip media assets that fail to download instead of aborting.
    #[arg(long)]
    pub skip_failed_media: bool,

    /// Items requested per page (1-200).
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Path to configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Hide per-item progress information.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// CLI backup mode argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackupModeArg {
    /// Back up liked tweets, then followed accounts.
    All,
    /// Back up only liked tweets.
    Likes,
    /// Back up only followed accounts.
    Following,
}

impl From<BackupModeArg> for BackupMode {
    fn from(arg: BackupModeArg) -> Self {
        match arg {
            BackupModeArg::All => BackupMode::All,
            BackupModeArg::Likes => BackupMode::Likes,
            BackupModeArg::Following => BackupMode::Following,
        }
    }
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        // Credentials
        if let Some(key) = self.consumer_key {
            config.credentials.consumer_key = key;
        }

        if let Some(secret) = self.consumer_secret {
            config.credentials.consumer_secret = secret;
        }

        if let Some(token) = self.access_token {
            config.credentials.access_token = token;
        }

        if let Some(secret) = self.access_secret {
            config.credentials.access_secret = secret;
        }

        // Options
        if let Some(mode) = self.mode {
            config.options.mode = mode.into();
        }

        if let Some(dir) = self.output_directory {
            config.options.output_directory = Some(dir);
        }

        if let Some(page_size) = self.page_size {
            config.options.page_size = page_size;
        }

        // Boolean flags (only override if set to non-default)
        if self.resume {
            config.options.run_mode = RunMode::Resume;
        }

        if self.skip_failed_media {
            config.options.media_errors = MediaErrorPolicy::Skip;
        }

        if self.quiet {
            config.options.show_progress = false;
        }
    }
}

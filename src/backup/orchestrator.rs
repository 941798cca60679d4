//! Top-level backup sequence: verify, then back up each selected resource.

use std::path::Path;
use std::time::Instant;

use crate::api::{Account, TwitterApi, VerifyParams};
use crate::backup::endpoint::{Endpoint, FollowedAccounts, LikedTweets};
use crate::backup::pacer::Pacer;
use crate::backup::paginator::{Paginator, PaginatorOptions};
use crate::backup::state::{BackupReport, RunState};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::fs::directory_size;
use crate::output::{print_info, print_run_summary, print_success};
use crate::store::FsStore;

/// Check that the credentials identify a user.
///
/// Every failure, including transport errors, is an authentication error.
pub async fn verify_account(api: &dyn TwitterApi) -> Result<Account> {
    api.verify_credentials(&VerifyParams::default())
        .await
        .map_err(|e| match e {
            e @ Error::Authentication(_) => e,
            other => Error::Authentication(other.to_string()),
        })
}

/// Verify the credentials, then back up likes and followed accounts as the
/// configured mode selects, in that order.
///
/// Nothing on disk is touched when verification fails.
pub async fn run_backup(api: &dyn TwitterApi, config: &Config) -> Result<BackupReport> {
    let account = verify_account(api).await?;
    print_success(&format!("Logged in as @{}", account.screen_name));

    back_up_resources(api, config).await
}

/// Back up the resources the configured mode selects, without verifying the
/// credentials first.
pub async fn back_up_resources(api: &dyn TwitterApi, config: &Config) -> Result<BackupReport> {
    let started = Instant::now();

    let options = PaginatorOptions::from(config);
    let limits = &config.rate_limits;
    let mut report = BackupReport::default();

    if config.options.mode.includes_likes() {
        let pacer = Pacer::from_quota(limits.likes_requests, limits.window(), limits.margin());
        let endpoint = LikedTweets::new(config.likes.clone());
        let state = backup_resource(api, &config.likes_directory(), pacer, options, &endpoint)
            .await?;
        report.likes = Some(state);
    }

    if config.options.mode.includes_following() {
        let pacer =
            Pacer::from_quota(limits.following_requests, limits.window(), limits.margin());
        let endpoint = FollowedAccounts::new(config.following.clone());
        let state =
            backup_resource(api, &config.following_directory(), pacer, options, &endpoint)
                .await?;
        report.following = Some(state);
    }

    report.elapsed = started.elapsed();
    Ok(report)
}

async fn backup_resource<E: Endpoint>(
    api: &dyn TwitterApi,
    directory: &Path,
    pacer: Pacer,
    options: PaginatorOptions,
    endpoint: &E,
) -> Result<RunState> {
    let pacer = if options.show_progress {
        pacer
    } else {
        pacer.quiet()
    };

    print_info(&format!(
        "Backing up {} into {}",
        endpoint.kind(),
        directory.display()
    ));

    let mut paginator = Paginator::new(api, FsStore::new(directory), pacer, options);
    let mut state = paginator.run(endpoint).await?;

    state.bytes_on_disk = match directory_size(directory) {
        Ok(size) => Some(size),
        Err(e) => {
            tracing::warn!("Could not measure {}: {}", directory.display(), e);
            None
        }
    };
    print_run_summary(&state);

    Ok(state)
}

//! twitter-backup - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use twitter_backup::{
    api::TwitterClient,
    backup::{back_up_resources, verify_account},
    cli::Args,
    config::{validate_config, Config},
    error::{exit_codes, Result},
    output::{
        create_spinner, print_banner, print_config_summary, print_error, print_info,
        print_report, print_success, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS),
        Err(e) => {
            print_error(&format!("{}", e));
            ExitCode::from(exit_codes::FAILURE)
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    // Print banner
    print_banner();

    // Load configuration
    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    // Validate configuration
    validate_config(&config)?;

    print_config_summary(
        &config.options.mode.to_string(),
        &config.options.run_mode.to_string(),
        &config.output_directory().display().to_string(),
    );

    // Initialize API client
    let api = TwitterClient::new(&config.credentials, &config.options.api_base)?;

    let spinner = create_spinner("Verifying credentials...");
    let verified = verify_account(&api).await;
    spinner.finish_and_clear();
    let account = verified?;
    print_success(&format!("Logged in as @{}", account.screen_name));

    let report = back_up_resources(&api, &config).await?;

    // Print overall statistics
    print_report(&report);

    Ok(())
}

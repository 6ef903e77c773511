//! BoxVideoSkill server entry point

use std::env;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use box_video_skill::application::ports::ConfigStore;
use box_video_skill::cli::{handle_config_command, Cli, Commands};
use box_video_skill::domain::config::AppConfig;
use box_video_skill::infrastructure::XdgConfigStore;
use box_video_skill::server::run_server;

/// Exit codes
const EXIT_ERROR: u8 = 1;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store).await {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        api_key: None, // API key comes from env/file only
        port: cli.port,
        bind: cli.bind,
        whisper_model: cli.whisper_model,
        completion_model: cli.completion_model,
        summary: if cli.no_summary { Some(false) } else { None },
        keywords: if cli.no_keywords { Some(false) } else { None },
    };

    let config = load_merged_config(cli_config).await;

    match run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Load and merge configuration from file, env, and CLI
async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    // Build env config
    let env_config = AppConfig {
        api_key: env::var("OPENAI_API_KEY").ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

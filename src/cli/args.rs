//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

/// BoxVideoSkill - Box Skills video/audio transcription webhook service
#[derive(Parser, Debug)]
#[command(name = "box-video-skill")]
#[command(version)]
#[command(about = "Box Skills webhook service that transcribes video and audio with OpenAI Whisper")]
#[command(long_about = None)]
pub struct Cli {
    /// Port to listen on
    #[arg(short = 'p', long, value_name = "PORT", env = "PORT")]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(short = 'b', long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Whisper model for transcription
    #[arg(long, value_name = "MODEL")]
    pub whisper_model: Option<String>,

    /// Chat model for summaries and keyword extraction
    #[arg(long, value_name = "MODEL")]
    pub completion_model: Option<String>,

    /// Skip the summary card
    #[arg(long)]
    pub no_summary: bool,

    /// Skip the keyword card
    #[arg(long)]
    pub no_keywords: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "api_key",
    "port",
    "bind",
    "whisper_model",
    "completion_model",
    "summary",
    "keywords",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

//! CLI layer: argument parsing and the config subcommand

pub mod args;
pub mod config_cmd;

pub use args::{Cli, Commands, ConfigAction};
pub use config_cmd::handle_config_command;

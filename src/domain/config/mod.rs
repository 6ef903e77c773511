//! Configuration domain module

mod app_config;

pub use app_config::{
    AppConfig, CardSelection, DEFAULT_BIND, DEFAULT_COMPLETION_MODEL, DEFAULT_PORT,
    DEFAULT_WHISPER_MODEL,
};

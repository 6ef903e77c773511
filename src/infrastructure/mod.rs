//! Infrastructure layer: adapter implementations for the ports

pub mod config;
pub mod language;
pub mod media;
pub mod storage;
pub mod transcription;

// Re-export adapters
pub use config::XdgConfigStore;
pub use language::OpenAiAnalyzer;
pub use media::FfmpegAudioExtractor;
pub use storage::BoxFileStore;
pub use transcription::WhisperTranscriber;

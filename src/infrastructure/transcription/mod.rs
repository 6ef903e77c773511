//! Transcription adapters

mod whisper;

pub use whisper::WhisperTranscriber;

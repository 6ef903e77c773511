//! Media conversion adapters

mod ffmpeg;

pub use ffmpeg::FfmpegAudioExtractor;

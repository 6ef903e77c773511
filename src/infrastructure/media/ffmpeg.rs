//! FFmpeg-based audio extractor adapter

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::fs;
use tokio::process::Command;

use crate::application::ports::{AudioExtractor, ExtractionError};

/// Audio extractor that shells out to ffprobe/ffmpeg
pub struct FfmpegAudioExtractor;

impl FfmpegAudioExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Output path: the input path with `.mp3` appended, so converted
    /// files never collide with their source.
    fn audio_path_for(media_path: &Path) -> PathBuf {
        let mut path = OsString::from(media_path.as_os_str());
        path.push(".mp3");
        PathBuf::from(path)
    }

    /// ffmpeg args for an MP3 conversion Whisper accepts
    fn build_ffmpeg_args(media_path: &Path, audio_path: &Path) -> Vec<String> {
        vec![
            "-i".to_string(),
            media_path.to_string_lossy().to_string(),
            "-vn".to_string(), // No video
            "-acodec".to_string(),
            "libmp3lame".to_string(),
            "-ac".to_string(),
            "2".to_string(), // Stereo
            "-ar".to_string(),
            "44100".to_string(), // 44.1kHz sample rate
            "-ab".to_string(),
            "192k".to_string(), // 192kbps bitrate
            "-y".to_string(),   // Overwrite output
            audio_path.to_string_lossy().to_string(),
        ]
    }

    /// Confirm the input has an audio stream before converting
    async fn probe_audio_stream(media_path: &Path) -> Result<(), ExtractionError> {
        let output = Command::new("ffprobe")
            .args([
                "-v",
                "error",
                "-select_streams",
                "a",
                "-show_entries",
                "stream=codec_name",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(media_path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ExtractionError::FfmpegNotFound
                } else {
                    ExtractionError::ConversionFailed(e.to_string())
                }
            })?;

        let streams = String::from_utf8_lossy(&output.stdout);
        if streams.trim().is_empty() {
            return Err(ExtractionError::NoAudioStream);
        }

        Ok(())
    }
}

impl Default for FfmpegAudioExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioExtractor for FfmpegAudioExtractor {
    async fn extract(&self, media_path: &Path) -> Result<PathBuf, ExtractionError> {
        if !fs::try_exists(media_path).await.unwrap_or(false) {
            return Err(ExtractionError::InputMissing(
                media_path.to_string_lossy().to_string(),
            ));
        }

        Self::probe_audio_stream(media_path).await?;

        let audio_path = Self::audio_path_for(media_path);
        let args = Self::build_ffmpeg_args(media_path, &audio_path);

        let output = Command::new("ffmpeg")
            .args(&args)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ExtractionError::FfmpegNotFound
                } else {
                    ExtractionError::ConversionFailed(e.to_string())
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::ConversionFailed(
                stderr.lines().last().unwrap_or("unknown error").to_string(),
            ));
        }

        let size = fs::metadata(&audio_path).await.map(|m| m.len()).unwrap_or(0);
        if size == 0 {
            let _ = fs::remove_file(&audio_path).await;
            return Err(ExtractionError::OutputEmpty);
        }

        tracing::info!(path = %audio_path.display(), bytes = size, "converted media to audio");
        Ok(audio_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_path_appends_mp3() {
        let path = FfmpegAudioExtractor::audio_path_for(Path::new("/tmp/box-file-123"));
        assert_eq!(path, PathBuf::from("/tmp/box-file-123.mp3"));
    }

    #[test]
    fn ffmpeg_args_strip_video_and_set_mp3_encoding() {
        let args = FfmpegAudioExtractor::build_ffmpeg_args(
            Path::new("/tmp/in.mov"),
            Path::new("/tmp/in.mov.mp3"),
        );

        assert!(args.contains(&"-vn".to_string()));
        assert!(args.contains(&"libmp3lame".to_string()));
        assert!(args.contains(&"44100".to_string()));
        assert!(args.contains(&"192k".to_string()));
        assert_eq!(args.last(), Some(&"/tmp/in.mov.mp3".to_string()));
    }

    #[tokio::test]
    async fn missing_input_is_reported() {
        let extractor = FfmpegAudioExtractor::new();
        let result = extractor
            .extract(Path::new("/nonexistent/box-file-0"))
            .await;
        assert!(matches!(result, Err(ExtractionError::InputMissing(_))));
    }
}

//! Process uploaded file use case

use std::path::Path;
use std::time::Instant;

use thiserror::Error;
use tokio::fs;

use crate::domain::cards::{build_document, build_error_document, BuildError, DocumentParts};
use crate::domain::config::CardSelection;
use crate::domain::token::SkillsToken;
use crate::domain::transcript::{ProcessingInfo, SizeMetric, StageReports};

use super::ports::{
    AudioExtractor, ExtractionError, FileStore, FileStoreError, TextAnalyzer, Transcriber,
    TranscriptionError,
};

/// File extensions Whisper accepts directly, skipping audio extraction
const SUPPORTED_AUDIO_EXTENSIONS: &[&str] = &[".mp3", ".m4a", ".wav", ".flac", ".ogg", ".webm"];

/// Errors from the process-file use case
#[derive(Debug, Error)]
pub enum ProcessFileError {
    #[error("Failed to download file: {0}")]
    Download(FileStoreError),

    #[error("Failed to convert video to audio: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Failed to transcribe audio: {0}")]
    Transcription(#[from] TranscriptionError),

    #[error("Failed to format metadata: {0}")]
    Format(#[from] BuildError),

    #[error("Failed to upload metadata: {0}")]
    Upload(FileStoreError),
}

/// Input parameters for one webhook invocation
#[derive(Debug, Clone)]
pub struct ProcessFileInput {
    /// Platform file identifier
    pub file_id: String,
    /// Original file name, used to decide whether extraction is needed
    pub file_name: String,
    /// Skills token from the webhook
    pub token: SkillsToken,
}

/// Output from a completed pipeline run
#[derive(Debug, Clone)]
pub struct ProcessFileOutput {
    /// Number of transcript segments produced
    pub segment_count: usize,
    /// Number of cards uploaded
    pub card_count: usize,
    /// Whether a summary card was produced
    pub summary_generated: bool,
    /// Whether a keyword card was produced
    pub keywords_extracted: bool,
}

/// Webhook-to-metadata pipeline use case
pub struct ProcessFileUseCase<S, X, T, A>
where
    S: FileStore,
    X: AudioExtractor,
    T: Transcriber,
    A: TextAnalyzer,
{
    store: S,
    extractor: X,
    transcriber: T,
    analyzer: A,
    selection: CardSelection,
}

impl<S, X, T, A> ProcessFileUseCase<S, X, T, A>
where
    S: FileStore,
    X: AudioExtractor,
    T: Transcriber,
    A: TextAnalyzer,
{
    /// Create a new use case instance
    pub fn new(store: S, extractor: X, transcriber: T, analyzer: A, selection: CardSelection) -> Self {
        Self {
            store,
            extractor,
            transcriber,
            analyzer,
            selection,
        }
    }

    /// Execute the pipeline for one webhook invocation.
    ///
    /// On any failure an error card is built and uploaded best-effort
    /// before the error is returned, so the platform user never sees a
    /// blank metadata panel.
    pub async fn execute(
        &self,
        input: ProcessFileInput,
    ) -> Result<ProcessFileOutput, ProcessFileError> {
        match self.run(&input).await {
            Ok(output) => Ok(output),
            Err(error) => {
                tracing::error!(file_id = %input.file_id, %error, "processing failed");
                let document = build_error_document(&error.to_string());
                if let Err(upload_error) = self
                    .store
                    .upload_cards(&input.file_id, &document, &input.token)
                    .await
                {
                    tracing::error!(%upload_error, "failed to upload error card");
                } else {
                    tracing::info!(file_id = %input.file_id, "uploaded error card");
                }
                Err(error)
            }
        }
    }

    async fn run(&self, input: &ProcessFileInput) -> Result<ProcessFileOutput, ProcessFileError> {
        let media_path = self
            .store
            .download(&input.file_id, &input.token)
            .await
            .map_err(ProcessFileError::Download)?;
        tracing::info!(file_id = %input.file_id, path = %media_path.display(), "downloaded file");

        let audio_path = if has_supported_audio_extension(&input.file_name) {
            media_path.clone()
        } else {
            match self.extractor.extract(&media_path).await {
                Ok(path) => {
                    tracing::info!(path = %path.display(), "extracted audio track");
                    path
                }
                Err(error) => {
                    let _ = fs::remove_file(&media_path).await;
                    return Err(error.into());
                }
            }
        };

        let outcome = self.process_audio(input, &audio_path).await;

        // Temp files are removed best-effort once processing ends.
        let _ = fs::remove_file(&media_path).await;
        if audio_path != media_path {
            let _ = fs::remove_file(&audio_path).await;
        }

        outcome
    }

    async fn process_audio(
        &self,
        input: &ProcessFileInput,
        audio_path: &Path,
    ) -> Result<ProcessFileOutput, ProcessFileError> {
        let file_size = file_size_bytes(audio_path).await;

        let started = Instant::now();
        let transcript = self.transcriber.transcribe(audio_path).await?;
        let transcription_info = ProcessingInfo::new(
            self.transcriber.service(),
            self.transcriber.model(),
            started.elapsed().as_secs_f64(),
            SizeMetric::FileBytes(file_size),
        );
        tracing::info!(
            segments = transcript.segments.len(),
            chars = transcript.char_count(),
            "transcription complete"
        );

        let mut parts = DocumentParts {
            reports: StageReports {
                transcription: Some(transcription_info),
                ..Default::default()
            },
            ..Default::default()
        };

        if self.selection.summary {
            let started = Instant::now();
            match self.analyzer.summarize(&transcript.full_text).await {
                Ok(summary) => {
                    parts.reports.summarization = Some(ProcessingInfo::new(
                        self.analyzer.service(),
                        self.analyzer.model(),
                        started.elapsed().as_secs_f64(),
                        SizeMetric::InputChars(transcript.char_count()),
                    ));
                    parts.summary = Some(summary);
                }
                // Summary is optional; the transcript is still worth uploading.
                Err(error) => tracing::warn!(%error, "summary generation failed, skipping card"),
            }
        }

        if self.selection.keywords {
            let started = Instant::now();
            match self.analyzer.extract_keywords(&transcript.full_text).await {
                Ok(keywords) => {
                    parts.reports.keyword_extraction = Some(ProcessingInfo::new(
                        self.analyzer.service(),
                        self.analyzer.model(),
                        started.elapsed().as_secs_f64(),
                        SizeMetric::InputChars(transcript.char_count()),
                    ));
                    parts.keywords = Some(keywords);
                }
                Err(error) => tracing::warn!(%error, "keyword extraction failed, skipping card"),
            }
        }

        let summary_generated = parts.summary.is_some();
        let keywords_extracted = parts.keywords.is_some();

        let document = build_document(&transcript, parts)?;
        tracing::info!(cards = document.cards.len(), "formatted card document");

        self.store
            .upload_cards(&input.file_id, &document, &input.token)
            .await
            .map_err(ProcessFileError::Upload)?;
        tracing::info!(file_id = %input.file_id, "uploaded metadata");

        Ok(ProcessFileOutput {
            segment_count: transcript.segments.len(),
            card_count: document.cards.len(),
            summary_generated,
            keywords_extracted,
        })
    }
}

/// Whether the file name ends in an extension Whisper accepts directly
pub fn has_supported_audio_extension(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    SUPPORTED_AUDIO_EXTENSIONS
        .iter()
        .any(|extension| lower.ends_with(extension))
}

async fn file_size_bytes(path: &Path) -> u64 {
    fs::metadata(path).await.map(|meta| meta.len()).unwrap_or(0)
}

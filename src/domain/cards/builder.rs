//! Card document builder
//!
//! Pure transformation from a transcript plus optional derived fields
//! into a validated Skills card document. No I/O. The entry point is
//! total apart from the missing-transcript case: an assembled document
//! that fails validation is replaced by an error document, so the caller
//! always has something uploadable.

use thiserror::Error;

use crate::domain::transcript::{StageReports, Transcript};

use super::card::{Card, CardDocument, Entry};
use super::error_card::build_error_document;
use super::invocation::InvocationId;
use super::validator::validate_document;

/// The one failure the builder surfaces to its caller. Everything else
/// is recovered internally via the error-document path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Transcript has no segments to format")]
    MissingSegments,
}

/// Optional inputs for a card document. Which optional cards appear is
/// decided by which fields are populated; the transcript and diagnostics
/// cards are always present.
#[derive(Debug, Clone, Default)]
pub struct DocumentParts {
    pub summary: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub reports: StageReports,
    /// Source media duration for the diagnostics efficiency figure.
    /// Falls back to the transcript-derived duration when absent.
    pub media_duration_seconds: Option<f64>,
    pub invocation_id: Option<InvocationId>,
}

/// Build the full card document for one pipeline run.
///
/// Card order is fixed: summary, keywords, transcript, diagnostics.
/// The summary card is dropped when the summary is blank; the keyword
/// card is dropped when no non-blank keyword remains. Every segment is
/// included in the transcript card, untruncated.
pub fn build_document(
    transcript: &Transcript,
    parts: DocumentParts,
) -> Result<CardDocument, BuildError> {
    if transcript.segments.is_empty() {
        return Err(BuildError::MissingSegments);
    }

    let invocation_id = parts.invocation_id.unwrap_or_else(InvocationId::generate);
    let mut cards = Vec::new();

    if let Some(summary) = parts.summary.as_deref() {
        let summary = summary.trim();
        if !summary.is_empty() {
            cards.push(Card::summary(&invocation_id, summary));
        }
    }

    if let Some(keywords) = &parts.keywords {
        let entries = keyword_entries(keywords);
        if !entries.is_empty() {
            cards.push(Card::keyword(&invocation_id, entries));
        }
    }

    cards.push(transcript_card(transcript, &invocation_id));

    let media_duration = parts
        .media_duration_seconds
        .unwrap_or(transcript.duration_seconds() as f64);
    let report = parts.reports.render(Some(media_duration));
    cards.push(Card::diagnostics(&invocation_id, &report));

    let document = CardDocument { cards };

    let validation = validate_document(&document);
    if !validation.is_valid {
        tracing::error!(reason = %validation.reason, "assembled document failed validation");
        return Ok(build_error_document(&format!(
            "Metadata validation failed: {}",
            validation.reason
        )));
    }

    Ok(document)
}

/// Single-card document carrying only the summary, for separate upload.
pub fn build_summary_document(summary: &str, invocation_id: Option<InvocationId>) -> CardDocument {
    let invocation_id = invocation_id.unwrap_or_else(InvocationId::generate);
    CardDocument {
        cards: vec![Card::summary(&invocation_id, summary.trim())],
    }
}

/// Single-card document carrying only the processing diagnostics.
pub fn build_diagnostics_document(
    reports: &StageReports,
    media_duration_seconds: Option<f64>,
    invocation_id: Option<InvocationId>,
) -> CardDocument {
    let invocation_id = invocation_id.unwrap_or_else(InvocationId::generate);
    let report = reports.render(media_duration_seconds);
    CardDocument {
        cards: vec![Card::diagnostics(&invocation_id, &report)],
    }
}

/// Transcript card: one entry per segment in playback order, start times
/// truncated to whole seconds, duration = max truncated start.
fn transcript_card(transcript: &Transcript, invocation_id: &InvocationId) -> Card {
    let entries: Vec<Entry> = transcript
        .segments
        .iter()
        .map(|segment| Entry::timed(segment.text.trim(), segment.start_second()))
        .collect();

    Card::transcript(invocation_id, transcript.duration_seconds(), entries)
}

/// Keyword entries: trimmed, blanks dropped, order preserved.
fn keyword_entries(keywords: &[String]) -> Vec<Entry> {
    keywords
        .iter()
        .map(|keyword| keyword.trim())
        .filter(|keyword| !keyword.is_empty())
        .map(Entry::text)
        .collect()
}

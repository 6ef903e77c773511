//! Transcript value objects

/// One timed span of transcript text, as returned by the transcription
/// service. Immutable; owned by its `Transcript`.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub text: String,
}

impl Segment {
    pub fn new(start_seconds: f64, end_seconds: f64, text: impl Into<String>) -> Self {
        Self {
            start_seconds,
            end_seconds,
            text: text.into(),
        }
    }

    /// Start time truncated (not rounded) to whole seconds, as the Box
    /// API expects.
    pub fn start_second(&self) -> u64 {
        self.start_seconds.max(0.0) as u64
    }
}

/// A full transcription result: the complete text plus its timed
/// segments in playback order.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub full_text: String,
    pub segments: Vec<Segment>,
}

impl Transcript {
    pub fn new(full_text: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            full_text: full_text.into(),
            segments,
        }
    }

    /// Derived duration: the maximum truncated segment start.
    ///
    /// This intentionally uses start times, not end times, matching the
    /// duration Box displays on the transcript card.
    pub fn duration_seconds(&self) -> u64 {
        self.segments
            .iter()
            .map(Segment::start_second)
            .max()
            .unwrap_or(0)
    }

    /// Character count of the full text, the size metric for the text
    /// analysis stages.
    pub fn char_count(&self) -> usize {
        self.full_text.chars().count()
    }
}

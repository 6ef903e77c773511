//! Per-stage processing diagnostics

/// Size measure for one pipeline stage: transcription is measured by the
/// uploaded file, text stages by their input length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeMetric {
    FileBytes(u64),
    InputChars(usize),
}

/// Diagnostic record for one pipeline stage.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingInfo {
    pub service: String,
    pub model: String,
    pub processing_seconds: f64,
    pub size: SizeMetric,
}

impl ProcessingInfo {
    pub fn new(
        service: impl Into<String>,
        model: impl Into<String>,
        processing_seconds: f64,
        size: SizeMetric,
    ) -> Self {
        Self {
            service: service.into(),
            model: model.into(),
            processing_seconds,
            size,
        }
    }
}

/// The three pipeline stages as explicit optional fields. Rendering only
/// ever reads these fields, so a stage that did not run simply has no
/// section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReports {
    pub transcription: Option<ProcessingInfo>,
    pub summarization: Option<ProcessingInfo>,
    pub keyword_extraction: Option<ProcessingInfo>,
}

impl StageReports {
    /// Sum of elapsed seconds across the stages that ran.
    pub fn total_processing_seconds(&self) -> f64 {
        [
            &self.transcription,
            &self.summarization,
            &self.keyword_extraction,
        ]
        .into_iter()
        .flatten()
        .map(|info| info.processing_seconds)
        .sum()
    }

    /// Render the human-readable diagnostics card body.
    ///
    /// The efficiency figure appears only when the media duration is
    /// known and exceeds the total processing time.
    pub fn render(&self, media_duration_seconds: Option<f64>) -> String {
        let mut lines = Vec::new();

        push_section(&mut lines, "TRANSCRIPTION", &self.transcription);
        push_section(&mut lines, "SUMMARY GENERATION", &self.summarization);
        push_section(&mut lines, "KEYWORD EXTRACTION", &self.keyword_extraction);

        lines.push("PERFORMANCE SUMMARY".to_string());

        let media_duration = media_duration_seconds.filter(|d| *d > 0.0);
        if let Some(duration) = media_duration {
            let minutes = (duration / 60.0) as u64;
            let seconds = (duration % 60.0) as u64;
            lines.push(format!("  Audio duration: {}:{:02}", minutes, seconds));
        }

        let total = self.total_processing_seconds();
        if total > 0.0 {
            lines.push(format!("  Total AI processing: {:.2}s", total));

            if let Some(duration) = media_duration {
                if total < duration {
                    lines.push(format!(
                        "  Efficiency: {:.1}x faster than real-time",
                        duration / total
                    ));
                }
            }
        }

        lines.push(String::new());
        lines.push("Processing completed successfully".to_string());

        lines.join("\n")
    }
}

fn push_section(lines: &mut Vec<String>, heading: &str, info: &Option<ProcessingInfo>) {
    let Some(info) = info else {
        return;
    };

    lines.push(heading.to_string());
    lines.push(format!("  Service: {}", info.service));
    lines.push(format!("  Model: {}", info.model));
    lines.push(format!("  Processing time: {:.1}s", info.processing_seconds));

    match info.size {
        SizeMetric::FileBytes(bytes) => {
            lines.push(format!(
                "  File size: {:.2}MB",
                bytes as f64 / 1024.0 / 1024.0
            ));
        }
        SizeMetric::InputChars(chars) => {
            lines.push(format!(
                "  Input text: {:.1}k characters",
                chars as f64 / 1000.0
            ));
        }
    }

    lines.push(String::new());
}

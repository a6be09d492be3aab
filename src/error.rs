use thiserror::Error;

/// Exit status reported when the hook payload or transcript path is rejected.
pub const VALIDATION_EXIT_CODE: u8 = 2;

/// Rejections raised at the security boundary (payload shape and path checks).
///
/// These are the only failures that surface as a non-zero exit; everything past
/// validation degrades to a silent outcome.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("hook input is not valid JSON: {0}")]
    MalformedJson(String),

    #[error("hook input must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("Missing transcript_path in hook input")]
    MissingTranscriptPath,

    #[error("transcript_path must be string, got {0}")]
    TranscriptPathNotString(&'static str),

    #[error("transcript_path must not be empty")]
    EmptyTranscriptPath,

    #[error("transcript_path contains forbidden pattern {pattern:?}")]
    ForbiddenPattern { pattern: String },

    #[error("transcript_path could not be resolved: {0}")]
    Unresolvable(String),

    #[error("transcript_path is not a regular file: {0}")]
    NotARegularFile(String),
}

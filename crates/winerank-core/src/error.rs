//! Error types and exit codes for winerank
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (I/O, unusable configuration)
//! - 2: Usage error (bad flags/args)
//! - 3: Data error (malformed CSV, column count mismatch, bad rating)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the winerank binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - the input file content was rejected (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while ranking a wine file
#[derive(Error, Debug)]
pub enum RankError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    Usage(String),

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to {operation} {target}: {source}")]
    FailedOperation {
        operation: String,
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid date format: {format:?}")]
    InvalidDateFormat { format: String },

    // Data errors (exit code 3)
    #[error("malformed CSV{}: {reason}", .line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Parse { line: Option<u64>, reason: String },

    #[error("missing header in {path:?}")]
    MissingHeader { path: PathBuf },

    #[error("header size mismatch: expected {expected} columns, got {actual}")]
    HeaderSize { expected: usize, actual: usize },

    #[error("record size mismatch at line {line}: expected {expected} columns, got {actual}")]
    RecordSize {
        line: u64,
        expected: usize,
        actual: usize,
    },

    #[error("rating field not found at line {line}")]
    RatingNotFound { line: u64 },

    #[error("invalid rating format: {field}")]
    RatingFormat { field: String },

    #[error("failed to parse rating value {value:?}: {reason}")]
    RatingValue { value: String, reason: String },

    #[error("invalid rating scale: {scale} (supported: {supported})")]
    UnknownScale { scale: String, supported: String },

    /// An error raised while processing a specific data row
    #[error("line {line}: {source}")]
    AtLine {
        line: u64,
        #[source]
        source: Box<RankError>,
    },
}

impl RankError {
    /// Create an error for a failed IO operation on a path
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: std::io::Error,
    ) -> Self {
        RankError::FailedOperation {
            operation: operation.to_string(),
            target: path.to_string(),
            source: error,
        }
    }

    /// Attach the source line of the data row being processed.
    ///
    /// Errors that already name their line are returned unchanged.
    pub fn with_line(self, line: u64) -> Self {
        if matches!(
            self,
            RankError::RecordSize { .. } | RankError::RatingNotFound { .. } | RankError::AtLine { .. }
        ) {
            return self;
        }

        RankError::AtLine {
            line,
            source: Box::new(self),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            RankError::Usage(_) => ExitCode::Usage,

            RankError::Io(_)
            | RankError::FailedOperation { .. }
            | RankError::InvalidDateFormat { .. } => ExitCode::Failure,

            RankError::Parse { .. }
            | RankError::MissingHeader { .. }
            | RankError::HeaderSize { .. }
            | RankError::RecordSize { .. }
            | RankError::RatingNotFound { .. }
            | RankError::RatingFormat { .. }
            | RankError::RatingValue { .. }
            | RankError::UnknownScale { .. } => ExitCode::Data,

            RankError::AtLine { source, .. } => source.exit_code(),
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            RankError::Usage(_) => "usage_error",
            RankError::Io(_) => "io_error",
            RankError::FailedOperation { .. } => "failed_operation",
            RankError::InvalidDateFormat { .. } => "invalid_date_format",
            RankError::Parse { .. } => "parse_error",
            RankError::MissingHeader { .. } => "missing_header",
            RankError::HeaderSize { .. } => "header_size",
            RankError::RecordSize { .. } => "record_size",
            RankError::RatingNotFound { .. } => "rating_not_found",
            RankError::RatingFormat { .. } => "rating_format",
            RankError::RatingValue { .. } => "rating_value",
            RankError::UnknownScale { .. } => "unknown_scale",
            RankError::AtLine { source, .. } => source.error_type(),
        }
    }

    /// Source line of the offending data row, if known
    pub fn line(&self) -> Option<u64> {
        match self {
            RankError::Parse { line, .. } => *line,
            RankError::RecordSize { line, .. }
            | RankError::RatingNotFound { line }
            | RankError::AtLine { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        let mut error_obj = serde_json::json!({
            "code": self.exit_code() as i32,
            "type": self.error_type(),
            "message": self.to_string(),
        });

        if let Some(line) = self.line() {
            error_obj["line"] = serde_json::json!(line);
        }

        serde_json::json!({ "error": error_obj })
    }
}

impl From<csv::Error> for RankError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line());
        let reason = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(e) => RankError::Io(e),
            _ => RankError::Parse { line, reason },
        }
    }
}

/// Result type alias for winerank operations
pub type Result<T> = std::result::Result<T, RankError>;

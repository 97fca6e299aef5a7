//! Error types for the piano-daemon.
//!
//! Every failure surfaced to a caller carries a machine-readable
//! [`ErrorCode`] and a human-readable message. Nothing is retried here.

use std::fmt;

/// Error codes returned by the daemon in error responses.
///
/// These codes are used in JSON-RPC error responses and allow clients
/// to programmatically handle specific error conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The sample source rejected the request or failed to synthesize.
    /// Trigger: non-positive duration, out-of-range frequency.
    SynthesisError,

    /// The container format parameters cannot be encoded.
    /// Trigger: zero sample rate, byte rate or RIFF size overflowing u32.
    InvalidFormatParams,

    /// The sample buffer disagrees with its declared length, or the
    /// encoder wrote an unexpected number of bytes.
    EncodingConsistencyError,

    /// Writing the finished WAV image to disk failed.
    OutputWriteFailed,

    /// Runtime configuration is invalid.
    InvalidConfig,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::SynthesisError => "SYNTHESIS_ERROR",
            ErrorCode::InvalidFormatParams => "INVALID_FORMAT_PARAMS",
            ErrorCode::EncodingConsistencyError => "ENCODING_CONSISTENCY_ERROR",
            ErrorCode::OutputWriteFailed => "OUTPUT_WRITE_FAILED",
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
        }
    }

    /// Returns a human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::SynthesisError => "The sample source failed to synthesize audio",
            ErrorCode::InvalidFormatParams => "Audio format parameters are not encodable",
            ErrorCode::EncodingConsistencyError => {
                "Sample buffer length disagrees with the encoded payload"
            }
            ErrorCode::OutputWriteFailed => "Failed to write the WAV file",
            ErrorCode::InvalidConfig => "Daemon configuration is invalid",
        }
    }

    /// Returns a recovery hint suggesting how to resolve this error.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCode::SynthesisError => {
                "Use a positive duration within the configured maximum and frequencies \
                 between 0 Hz and half the sample rate (e.g., frequencies: [440.0], duration: 1.0)"
            }
            ErrorCode::InvalidFormatParams => {
                "Use a positive sample rate (e.g., 44100) and keep the clip under 4 GiB"
            }
            ErrorCode::EncodingConsistencyError => {
                "The sample source reported a length it did not deliver; \
                 check the source implementation"
            }
            ErrorCode::OutputWriteFailed => {
                "Check that the output directory exists, is writable, and has free space"
            }
            ErrorCode::InvalidConfig => {
                "Check PIANO_SAMPLE_RATE, PIANO_MAX_DURATION and PIANO_OUTPUT_DIR"
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for daemon operations.
#[derive(Debug)]
pub struct DaemonError {
    /// The error code identifying the type of error.
    pub code: ErrorCode,
    /// Human-readable error message with context.
    pub message: String,
    /// Optional underlying cause of the error.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl DaemonError {
    /// Creates a new DaemonError with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new DaemonError with an underlying cause.
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a SYNTHESIS_ERROR.
    pub fn synthesis(reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::SynthesisError,
            format!("Synthesis failed: {}", reason.into()),
        )
    }

    /// Creates an INVALID_FORMAT_PARAMS error.
    pub fn invalid_format(reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InvalidFormatParams,
            format!("Invalid format parameters: {}", reason.into()),
        )
    }

    /// Creates an ENCODING_CONSISTENCY_ERROR.
    pub fn encoding_consistency(expected: usize, actual: usize, what: &str) -> Self {
        Self::new(
            ErrorCode::EncodingConsistencyError,
            format!("{} mismatch: expected {}, got {}", what, expected, actual),
        )
    }

    /// Creates an OUTPUT_WRITE_FAILED error wrapping an I/O error.
    pub fn output_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::with_source(
            ErrorCode::OutputWriteFailed,
            format!("Failed to write {}: {}", path.into(), source),
            source,
        )
    }

    /// Creates an INVALID_CONFIG error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfig, reason)
    }
}

impl fmt::Display for DaemonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}. Recovery: {}",
            self.code,
            self.message,
            self.code.recovery_hint()
        )
    }
}

impl std::error::Error for DaemonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias using DaemonError.
pub type Result<T> = std::result::Result<T, DaemonError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn error_code_as_str() {
        assert_eq!(ErrorCode::SynthesisError.as_str(), "SYNTHESIS_ERROR");
        assert_eq!(ErrorCode::InvalidFormatParams.as_str(), "INVALID_FORMAT_PARAMS");
        assert_eq!(
            ErrorCode::EncodingConsistencyError.as_str(),
            "ENCODING_CONSISTENCY_ERROR"
        );
        assert_eq!(ErrorCode::OutputWriteFailed.as_str(), "OUTPUT_WRITE_FAILED");
        assert_eq!(ErrorCode::InvalidConfig.as_str(), "INVALID_CONFIG");
    }

    #[test]
    fn error_code_recovery_hints_not_empty() {
        for code in [
            ErrorCode::SynthesisError,
            ErrorCode::InvalidFormatParams,
            ErrorCode::EncodingConsistencyError,
            ErrorCode::OutputWriteFailed,
            ErrorCode::InvalidConfig,
        ] {
            assert!(!code.recovery_hint().is_empty());
            assert!(!code.description().is_empty());
        }
    }

    #[test]
    fn daemon_error_display() {
        let err = DaemonError::invalid_format("sample rate must be positive, got 0");
        let text = err.to_string();
        assert!(text.contains("INVALID_FORMAT_PARAMS"));
        assert!(text.contains("got 0"));
        assert!(text.contains("Recovery:"));
    }

    #[test]
    fn consistency_error_names_both_lengths() {
        let err = DaemonError::encoding_consistency(8, 6, "sample count");
        assert_eq!(err.code, ErrorCode::EncodingConsistencyError);
        assert!(err.message.contains("expected 8"));
        assert!(err.message.contains("got 6"));
    }

    #[test]
    fn output_write_failed_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = DaemonError::output_write_failed("/nope/out.wav", io);
        assert_eq!(err.code, ErrorCode::OutputWriteFailed);
        assert!(err.source().is_some());
    }
}

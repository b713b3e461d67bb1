// Error types for the crack detector
//
// Errors never cross the public `analyze` boundary: the decoder folds them into
// the empty-sequence sentinel and the pipeline folds them into the fallback
// record. They exist so the internal steps can use `?` and so failures get
// logged with a stable numeric code.

mod analysis;

pub use analysis::{log_analysis_error, AnalysisError, AnalysisErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}

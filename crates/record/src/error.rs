//! Error types for record construction and attribute schemas.

use thiserror::Error;

/// Errors raised while building records or attribute schemas.
#[derive(Debug, Error)]
pub enum RecordError {
	/// A link or field name cannot be used to derive attribute names.
	#[error("invalid link name {0:?} (expected ascii alphanumerics starting with a lowercase letter)")]
	InvalidLinkName(String),

	/// Record attributes could not be parsed as JSON.
	#[error("JSON parse error: {0}")]
	Json(#[from] serde_json::Error),

	/// Record attributes parsed, but not as a JSON object.
	#[error("record attributes must be a JSON object, got {0}")]
	NotAnObject(&'static str),
}

/// Result type for record operations.
pub type Result<T> = std::result::Result<T, RecordError>;

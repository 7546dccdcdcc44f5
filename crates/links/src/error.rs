//! Error types for relation fields.

use linkfield_record::RecordError;
use thiserror::Error;

/// Errors raised by base relation fields.
#[derive(Debug, Error)]
pub enum FieldError {
	/// A backing attribute on the record has the wrong shape.
	#[error("attribute {attribute} is malformed: expected {expected}")]
	MalformedAttribute {
		/// Attribute key on the host record.
		attribute: String,
		/// Human readable description of the expected shape.
		expected: &'static str,
	},

	/// Operation targeted an id that is not linked.
	#[error("{0:?} is not linked")]
	NotLinked(String),

	/// A role outside of the configured role options.
	#[error("unknown role {role:?} for {id:?}")]
	UnknownRole {
		/// Linked id the role was assigned to.
		id: String,
		/// Rejected role value.
		role: String,
	},

	/// Attribute schema could not be derived.
	#[error(transparent)]
	Record(#[from] RecordError),
}

/// Result type for relation field operations.
pub type Result<T> = std::result::Result<T, FieldError>;

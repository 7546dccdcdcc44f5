use linkfield_links::FieldError;
use linkfield_record::RecordError;
use thiserror::Error;

/// Errors raised by primary selection.
#[derive(Debug, Error)]
pub enum PrimaryError {
	/// The requested primary is not one of the linked ids.
	#[error("cannot make {0:?} primary: it is not linked")]
	NotLinked(String),

	/// The primary link name cannot form attribute names.
	#[error(transparent)]
	Record(#[from] RecordError),

	/// The base field failed, e.g. while reloading from the record.
	#[error(transparent)]
	Field(#[from] FieldError),
}

/// Result type for primary selection.
pub type Result<T> = std::result::Result<T, PrimaryError>;

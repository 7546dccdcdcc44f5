use linkfield_links::FieldError;
use linkfield_primary::PrimaryError;
use linkfield_record::RecordError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoleError {
	#[error(transparent)]
	Record(#[from] RecordError),

	#[error(transparent)]
	Field(#[from] FieldError),

	#[error(transparent)]
	Primary(#[from] PrimaryError),
}

pub type Result<T> = std::result::Result<T, RoleError>;

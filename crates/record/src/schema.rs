//! Declared attribute schemas for the attributes a field reads and writes.

use crate::error::{RecordError, Result};

/// Attribute pair backing a single link: `<link>Id` and `<link>Name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkAttrs {
	link: String,
	id_field: String,
	name_field: String,
}

impl LinkAttrs {
	/// Derives the attribute pair for `link`, rejecting names that cannot form attribute keys.
	pub fn new(link: &str) -> Result<Self> {
		validate_name(link)?;
		Ok(Self {
			link: link.to_owned(),
			id_field: format!("{link}Id"),
			name_field: format!("{link}Name"),
		})
	}

	pub fn link(&self) -> &str {
		&self.link
	}

	pub fn id_field(&self) -> &str {
		&self.id_field
	}

	pub fn name_field(&self) -> &str {
		&self.name_field
	}
}

/// Attributes backing a multi-valued link field.
///
/// `<field>Ids` holds the ordered id array, `<field>Names` the id to name
/// object and `<field>Columns` per-id column data such as roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiLinkAttrs {
	field: String,
	ids_field: String,
	names_field: String,
	columns_field: String,
}

impl MultiLinkAttrs {
	pub fn new(field: &str) -> Result<Self> {
		validate_name(field)?;
		Ok(Self {
			field: field.to_owned(),
			ids_field: format!("{field}Ids"),
			names_field: format!("{field}Names"),
			columns_field: format!("{field}Columns"),
		})
	}

	pub fn field(&self) -> &str {
		&self.field
	}

	pub fn ids_field(&self) -> &str {
		&self.ids_field
	}

	pub fn names_field(&self) -> &str {
		&self.names_field
	}

	pub fn columns_field(&self) -> &str {
		&self.columns_field
	}
}

fn validate_name(name: &str) -> Result<()> {
	let mut chars = name.chars();
	let valid = chars.next().is_some_and(|c| c.is_ascii_lowercase()) && chars.all(|c| c.is_ascii_alphanumeric());
	if valid {
		Ok(())
	} else {
		Err(RecordError::InvalidLinkName(name.to_owned()))
	}
}

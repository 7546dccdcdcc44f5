use serde::{Deserialize, Serialize};

/// View mode a field is rendered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldMode {
	/// Read-only record view.
	#[default]
	Detail,
	/// Editable form.
	Edit,
	/// Read-only list cell.
	List,
	/// Search filter input.
	Search,
}

impl FieldMode {
	pub fn name(self) -> &'static str {
		match self {
			Self::Detail => "detail",
			Self::Edit => "edit",
			Self::List => "list",
			Self::Search => "search",
		}
	}

	/// Whether the mode shows read-only links rather than editable items.
	pub fn is_read_only(self) -> bool {
		matches!(self, Self::Detail | Self::List)
	}
}

//! Search filters and create defaults derived from the parent record.

use std::collections::BTreeMap;

use serde::Serialize;

/// Filter operator understood by the record picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKind {
	/// Records linked with any of the given ids.
	LinkedWith,
	/// Any of the listed values.
	AnyOf,
}

/// Filter data shown by the picker next to the filter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterData {
	#[serde(rename = "type")]
	pub kind: FilterKind,
	#[serde(rename = "nameHash")]
	pub name_hash: BTreeMap<String, Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectFilter {
	#[serde(rename = "type")]
	pub kind: FilterKind,
	pub value: Vec<String>,
	pub data: FilterData,
}

impl SelectFilter {
	/// Restricts selection to records linked with `id`.
	pub fn linked_with(id: &str, name: Option<&str>) -> Self {
		Self {
			kind: FilterKind::LinkedWith,
			value: vec![id.to_owned()],
			data: FilterData {
				kind: FilterKind::AnyOf,
				name_hash: BTreeMap::from([(id.to_owned(), name.map(str::to_owned))]),
			},
		}
	}
}

/// Picker filters keyed by the filtered attribute.
pub type SelectFilters = BTreeMap<String, SelectFilter>;

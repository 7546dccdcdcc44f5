//! Scripted field sessions: a field, an initial record, and the steps to run.

use linkfield_record::Attributes;
use serde::{Deserialize, Serialize};

use crate::field::FieldConfig;

/// A field configuration with an initial record and a list of steps.
///
/// ```toml
/// [field]
/// kind = "with-primary"
/// name = "contacts"
/// foreign_entity = "Contact"
/// primary_link = "contact"
///
/// [record]
/// contactsIds = ["1", "2"]
///
/// [[steps]]
/// action = "render"
///
/// [[steps]]
/// action = "switch"
/// id = "2"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
	pub field: FieldConfig,
	#[serde(default)]
	pub record: Attributes,
	#[serde(default)]
	pub steps: Vec<Step>,
}

/// One user or host action against the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
	/// Link and render a record.
	Add { id: String, name: String },
	/// Unlink a record.
	Remove { id: String },
	/// User click on a primary toggle.
	Switch { id: String },
	/// Programmatic primary change; no `id` clears it.
	SetPrimary {
		#[serde(default)]
		id: Option<String>,
	},
	SetRole {
		id: String,
		#[serde(default)]
		role: Option<String>,
	},
	/// Attribute changes made on the record outside the field.
	External {
		#[serde(default)]
		set: Attributes,
		#[serde(default)]
		clear: Vec<String>,
	},
	Render,
	Reconcile,
	Sync,
	Display,
	Fetch,
	/// Picker filters and create defaults of a role-aware field.
	Filters,
}

impl Step {
	pub fn name(&self) -> &'static str {
		match self {
			Self::Add { .. } => "add",
			Self::Remove { .. } => "remove",
			Self::Switch { .. } => "switch",
			Self::SetPrimary { .. } => "set-primary",
			Self::SetRole { .. } => "set-role",
			Self::External { .. } => "external",
			Self::Render => "render",
			Self::Reconcile => "reconcile",
			Self::Sync => "sync",
			Self::Display => "display",
			Self::Fetch => "fetch",
			Self::Filters => "filters",
		}
	}
}

use linkfield_links::{FieldMode, LinkMultipleOptions, RoleOptions};
use linkfield_record::{LinkAttrs, MultiLinkAttrs, RecordError};
use linkfield_role::RoleAwareOptions;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// A configured link field, selected by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldConfig {
	/// Multi-link field with a configurable primary link.
	WithPrimary(PrimaryFieldConfig),
	/// Contacts field with roles and a fixed `contact` primary.
	RoleAware(RoleAwareConfig),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryFieldConfig {
	pub name: String,
	pub foreign_entity: String,
	#[serde(default)]
	pub mode: FieldMode,
	pub primary_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAwareConfig {
	#[serde(default = "default_contacts")]
	pub name: String,
	#[serde(default = "default_contact_entity")]
	pub foreign_entity: String,
	#[serde(default)]
	pub mode: FieldMode,
	#[serde(default)]
	pub role: RoleSection,
}

/// `[field.role]` table of a role-aware field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleSection {
	pub suppress_primary: bool,
	pub parent_link: String,
	pub parent_filter: String,
	/// Key of the role inside `<field>Columns` entries.
	pub column: String,
	/// Allowed roles; empty accepts any.
	pub options: Vec<String>,
}

impl Default for RoleSection {
	fn default() -> Self {
		let defaults = RoleAwareOptions::default();
		Self {
			suppress_primary: defaults.suppress_primary,
			parent_link: defaults.parent_link,
			parent_filter: defaults.parent_filter,
			column: defaults.role.column,
			options: defaults.role.options,
		}
	}
}

fn default_contacts() -> String {
	RoleAwareOptions::default().field
}

fn default_contact_entity() -> String {
	RoleAwareOptions::default().foreign_entity
}

impl FieldConfig {
	pub fn name(&self) -> &str {
		match self {
			Self::WithPrimary(config) => &config.name,
			Self::RoleAware(config) => &config.name,
		}
	}

	pub fn mode(&self) -> FieldMode {
		match self {
			Self::WithPrimary(config) => config.mode,
			Self::RoleAware(config) => config.mode,
		}
	}

	/// Checks that every configured name maps to record attributes.
	pub fn validate(&self) -> Result<()> {
		check(MultiLinkAttrs::new(self.name()).map(drop))?;
		match self {
			Self::WithPrimary(config) => {
				check(LinkAttrs::new(&config.primary_link).map(drop))?;
				if config.foreign_entity.is_empty() {
					return Err(ConfigError::Invalid("foreign_entity must not be empty".to_string()));
				}
			}
			Self::RoleAware(config) => {
				check(LinkAttrs::new(&config.role.parent_link).map(drop))?;
				if config.role.column.is_empty() {
					return Err(ConfigError::Invalid("role column must not be empty".to_string()));
				}
				if let Some(dup) = first_duplicate(&config.role.options) {
					return Err(ConfigError::Invalid(format!("duplicate role option {dup:?}")));
				}
			}
		}
		Ok(())
	}
}

impl PrimaryFieldConfig {
	pub fn link_options(&self) -> LinkMultipleOptions {
		LinkMultipleOptions::new(&self.name, &self.foreign_entity).with_mode(self.mode)
	}
}

impl RoleAwareConfig {
	pub fn options(&self) -> RoleAwareOptions {
		RoleAwareOptions {
			field: self.name.clone(),
			foreign_entity: self.foreign_entity.clone(),
			mode: self.mode,
			suppress_primary: self.role.suppress_primary,
			parent_link: self.role.parent_link.clone(),
			parent_filter: self.role.parent_filter.clone(),
			role: RoleOptions {
				column: self.role.column.clone(),
				options: self.role.options.clone(),
			},
		}
	}
}

fn check(result: linkfield_record::Result<()>) -> Result<()> {
	result.map_err(|err| match err {
		RecordError::InvalidLinkName(name) => ConfigError::InvalidLinkName(name),
		other => ConfigError::Invalid(other.to_string()),
	})
}

fn first_duplicate(options: &[String]) -> Option<&str> {
	options
		.iter()
		.enumerate()
		.find(|&(i, option)| options[..i].contains(option))
		.map(|(_, option)| option.as_str())
}

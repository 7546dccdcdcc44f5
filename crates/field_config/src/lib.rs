//! Configuration for link fields.
//!
//! Fields and scenarios are written in TOML:
//!
//! ```toml
//! [field]
//! kind = "role-aware"
//! mode = "edit"
//!
//! [field.role]
//! suppress_primary = false
//! parent_link = "account"
//! parent_filter = "accounts"
//! options = ["Decision Maker", "Influencer"]
//! ```
//!
//! A `with-primary` field names its own link instead:
//!
//! ```toml
//! [field]
//! kind = "with-primary"
//! name = "contacts"
//! foreign_entity = "Contact"
//! primary_link = "contact"
//! ```

use std::path::Path;

pub mod error;
pub mod field;
pub mod scenario;

pub use error::{ConfigError, Result};
pub use field::{FieldConfig, PrimaryFieldConfig, RoleAwareConfig, RoleSection};
pub use scenario::{Scenario, Step};

/// Parses and validates a scenario.
pub fn parse(input: &str) -> Result<Scenario> {
	let scenario: Scenario = toml::from_str(input)?;
	scenario.field.validate()?;
	Ok(scenario)
}

/// Reads, parses and validates the scenario at `path`.
pub fn load(path: &Path) -> Result<Scenario> {
	let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
		path: path.to_path_buf(),
		error,
	})?;
	let scenario = parse(&input)?;
	tracing::debug!(
		path = %path.display(),
		field = scenario.field.name(),
		steps = scenario.steps.len(),
		"scenario loaded"
	);
	Ok(scenario)
}
